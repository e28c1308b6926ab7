//! # Transcript
//!
//! The message store for one chat view. Messages are appended in order and
//! never edited, reordered, or removed. The only way to get a `Message` is
//! through a shared borrow of the transcript that minted it.
//!
//! ```text
//! Transcript
//! ├── messages: Vec<Message>   // display order == append order
//! └── next_seq: u64            // source of `msg-<n>` ids
//! ```

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Who authored a message.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A fenced source snippet attached to an assistant message.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub id: String,
    /// Language tag as written after the opening fence (e.g. `tsx`).
    pub language: String,
    pub code: String,
}

impl CodeBlock {
    pub fn new(id: impl Into<String>, language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            language: language.into(),
            code: code.into(),
        }
    }

    /// The block as a fenced markdown snippet, ready for the markdown renderer.
    pub fn to_fenced(&self) -> String {
        format!("```{}\n{}\n```", self.language, self.code.trim_end_matches('\n'))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub code_blocks: Vec<CodeBlock>,
}

impl Message {
    pub fn has_code(&self) -> bool {
        !self.code_blocks.is_empty()
    }
}

/// Append-only ordered sequence of messages owned by a single view.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    next_seq: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns a reference to it.
    ///
    /// Ids are `msg-1`, `msg-2`, ... and only unique within this transcript.
    pub fn append(
        &mut self,
        role: Role,
        content: impl Into<String>,
        code_blocks: Vec<CodeBlock>,
    ) -> &Message {
        self.next_seq += 1;
        self.messages.push(Message {
            id: format!("msg-{}", self.next_seq),
            role,
            content: content.into(),
            timestamp: Local::now(),
            code_blocks,
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// First code block of the most recent message, if that message carries one.
    pub fn last_code_block(&self) -> Option<&CodeBlock> {
        self.last().and_then(|m| m.code_blocks.first())
    }
}
