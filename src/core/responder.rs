//! # Responders
//!
//! Where assistant replies come from. A [`Responder`] takes the submitted
//! text and eventually produces a [`Reply`] or a [`ReplyError`]. Today the
//! only implementation is [`ScriptedResponder`], which waits a fixed delay
//! and answers with canned content; a backend client would slot in behind
//! the same trait.
//!
//! ```text
//!  ChatView::submit ──► Effect::SpawnReply ──► spawn_reply()
//!                                               │  request_reply(timeout)
//!                                               ▼
//!  ChatView::complete ◄── Action::ReplyFinished ◄┘
//! ```
//!
//! In-flight replies are tracked in [`ReplyTasks`]. Cancelling a view's
//! reply, or dropping the tasks on shutdown, aborts the tokio task so no
//! reply lands on a view that no longer exists.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use tokio::task::AbortHandle;

use crate::core::action::Action;
use crate::core::chat::{ChatKind, ReplyTicket};
use crate::core::content::{CannedReply, Content};
use crate::core::transcript::CodeBlock;

/// Errors a reply request can end with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyError {
    /// No answer within the allowed time.
    Timeout(Duration),
    /// The responder gave up (network error, bad response, ...).
    Failed(String),
}

impl fmt::Display for ReplyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyError::Timeout(after) => write!(f, "no reply after {}ms", after.as_millis()),
            ReplyError::Failed(msg) => write!(f, "reply failed: {msg}"),
        }
    }
}

impl std::error::Error for ReplyError {}

/// What the chat view asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyRequest {
    pub kind: ChatKind,
    pub prompt: String,
}

/// A finished assistant reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub code_blocks: Vec<CodeBlock>,
}

impl From<CannedReply> for Reply {
    fn from(canned: CannedReply) -> Self {
        Self {
            content: canned.content,
            code_blocks: canned.code_blocks,
        }
    }
}

pub type ReplyOutcome = Result<Reply, ReplyError>;

#[async_trait]
pub trait Responder: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Produce a reply for the request.
    async fn reply(&self, request: ReplyRequest) -> ReplyOutcome;
}

/// Answers every request with the canned reply for its chat, after `delay`.
pub struct ScriptedResponder {
    delay: Duration,
    notes: CannedReply,
    prototype: CannedReply,
}

impl ScriptedResponder {
    pub fn new(delay: Duration, notes: CannedReply, prototype: CannedReply) -> Self {
        Self {
            delay,
            notes,
            prototype,
        }
    }

    pub fn from_content(delay: Duration, content: &Content) -> Self {
        Self::new(
            delay,
            content.notes_reply.clone(),
            content.prototype_reply.clone(),
        )
    }
}

#[async_trait]
impl Responder for ScriptedResponder {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn reply(&self, request: ReplyRequest) -> ReplyOutcome {
        debug!(
            "Scripted reply for {:?} in {}ms (prompt len={})",
            request.kind,
            self.delay.as_millis(),
            request.prompt.len()
        );
        tokio::time::sleep(self.delay).await;
        let canned = match request.kind {
            ChatKind::Notes => self.notes.clone(),
            ChatKind::Prototype => self.prototype.clone(),
        };
        Ok(canned.into())
    }
}

/// Ask `responder` for a reply, giving up after `timeout`.
pub async fn request_reply(
    responder: &dyn Responder,
    request: ReplyRequest,
    timeout: Duration,
) -> ReplyOutcome {
    match tokio::time::timeout(timeout, responder.reply(request)).await {
        Ok(outcome) => outcome,
        Err(_) => {
            warn!(
                "Responder '{}' timed out after {}ms",
                responder.name(),
                timeout.as_millis()
            );
            Err(ReplyError::Timeout(timeout))
        }
    }
}

/// Spawn a reply request; the result comes back as `Action::ReplyFinished`.
pub fn spawn_reply(
    responder: Arc<dyn Responder>,
    kind: ChatKind,
    ticket: ReplyTicket,
    prompt: String,
    timeout: Duration,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning reply for {:?} ({:?})", kind, ticket);
    let handle = tokio::spawn(async move {
        let request = ReplyRequest { kind, prompt };
        let outcome = request_reply(responder.as_ref(), request, timeout).await;
        if tx
            .send(Action::ReplyFinished {
                kind,
                ticket,
                outcome,
            })
            .is_err()
        {
            warn!("Failed to deliver reply for {:?}: receiver dropped", kind);
        }
    });
    handle.abort_handle()
}

/// In-flight reply tasks, at most one per chat view.
#[derive(Default)]
pub struct ReplyTasks {
    handles: HashMap<ChatKind, AbortHandle>,
}

impl ReplyTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track a new task for `kind`, aborting any task it replaces.
    pub fn track(&mut self, kind: ChatKind, handle: AbortHandle) {
        if let Some(previous) = self.handles.insert(kind, handle) {
            previous.abort();
        }
    }

    /// Abort the in-flight reply for `kind`. Returns true if one was running.
    pub fn cancel(&mut self, kind: ChatKind) -> bool {
        match self.handles.remove(&kind) {
            Some(handle) => {
                let running = !handle.is_finished();
                handle.abort();
                if running {
                    info!("Cancelled pending reply for {:?}", kind);
                }
                running
            }
            None => false,
        }
    }

    /// Forget the handle for `kind` once its reply has been delivered.
    pub fn finish(&mut self, kind: ChatKind) {
        self.handles.remove(&kind);
    }

    pub fn is_tracking(&self, kind: ChatKind) -> bool {
        self.handles.contains_key(&kind)
    }
}

impl Drop for ReplyTasks {
    fn drop(&mut self) {
        for (kind, handle) in self.handles.drain() {
            if !handle.is_finished() {
                debug!("Aborting reply for {:?} on teardown", kind);
            }
            handle.abort();
        }
    }
}
