//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use async_trait::async_trait;

use crate::core::config::ResolvedConfig;
use crate::core::content::Content;
use crate::core::notes::{Clipboard, ClipboardError};
use crate::core::responder::{Reply, ReplyError, ReplyOutcome, ReplyRequest, Responder};
use crate::core::state::App;

/// Replies immediately with a fixed text.
pub struct ImmediateResponder(pub String);

#[async_trait]
impl Responder for ImmediateResponder {
    fn name(&self) -> &str {
        "immediate"
    }

    async fn reply(&self, _request: ReplyRequest) -> ReplyOutcome {
        Ok(Reply {
            content: self.0.clone(),
            code_blocks: vec![],
        })
    }
}

/// Always fails with the given message.
pub struct FailingResponder(pub String);

#[async_trait]
impl Responder for FailingResponder {
    fn name(&self) -> &str {
        "failing"
    }

    async fn reply(&self, _request: ReplyRequest) -> ReplyOutcome {
        Err(ReplyError::Failed(self.0.clone()))
    }
}

/// Never answers.
pub struct StalledResponder;

#[async_trait]
impl Responder for StalledResponder {
    fn name(&self) -> &str {
        "stalled"
    }

    async fn reply(&self, _request: ReplyRequest) -> ReplyOutcome {
        std::future::pending().await
    }
}

/// Clipboard that keeps the last write, or refuses every write.
#[derive(Default)]
pub struct MemoryClipboard {
    pub contents: Option<String>,
    pub unavailable: bool,
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.unavailable {
            return Err(ClipboardError::Unavailable("no display".into()));
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}

/// Creates a test App with the bundled content and default config.
pub fn test_app() -> App {
    App::new(Content::default(), &ResolvedConfig::default())
}
