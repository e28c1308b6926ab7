//! # Chat Views
//!
//! A `ChatView` is one conversation surface: its transcript plus the
//! Idle/Pending reply state machine in front of it.
//!
//! ```text
//!            submit(text) ok
//!   ┌──────┐ ───────────────► ┌──────────────────┐
//!   │ Idle │                  │ Pending { ticket } │
//!   └──────┘ ◄─────────────── └──────────────────┘
//!            complete(ticket, outcome)
//! ```
//!
//! - `submit` appends the user message synchronously and hands back a
//!   ticket; the caller is responsible for actually requesting the reply.
//! - `complete` only accepts the ticket it is waiting for. Anything else is
//!   stale (a reply for a view that was reset) and is dropped.
//! - While Pending, further submits are rejected, so at most one reply is
//!   ever scheduled per user message.

use std::fmt;

use log::{debug, info, warn};

use crate::core::responder::{ReplyError, ReplyOutcome};
use crate::core::transcript::{Role, Transcript};

/// Which conversation a view holds. Each kind gets its own canned reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    /// The chat pane beside the notes canvas.
    Notes,
    /// The Preview/Code prototype.
    Prototype,
}

/// Identifies one submission's reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyTicket(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyPhase {
    Idle,
    Pending { ticket: ReplyTicket },
}

/// Why a submit was turned away. None of these touch the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRejected {
    /// Nothing left after trimming.
    EmptyInput,
    /// A reply is already on its way.
    ReplyPending,
    /// Over the configured character limit.
    TooLong { limit: usize },
}

impl fmt::Display for SubmitRejected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejected::EmptyInput => write!(f, "message is empty"),
            SubmitRejected::ReplyPending => write!(f, "still waiting for the previous reply"),
            SubmitRejected::TooLong { limit } => {
                write!(f, "message is longer than {limit} characters")
            }
        }
    }
}

impl std::error::Error for SubmitRejected {}

/// Result of handing a reply outcome to a view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// An assistant message was appended.
    Replied,
    /// The reply failed; nothing was appended and the view is Idle again.
    Failed(ReplyError),
    /// The ticket did not match the pending one; nothing changed.
    Stale,
}

#[derive(Debug, Clone)]
pub struct ChatView {
    pub kind: ChatKind,
    transcript: Transcript,
    phase: ReplyPhase,
    next_ticket: u64,
    max_input_chars: usize,
}

impl ChatView {
    pub fn new(kind: ChatKind, max_input_chars: usize) -> Self {
        Self {
            kind,
            transcript: Transcript::new(),
            phase: ReplyPhase::Idle,
            next_ticket: 0,
            max_input_chars,
        }
    }

    /// A view whose transcript starts with the given messages.
    pub fn seeded(kind: ChatKind, max_input_chars: usize, seed: &[(Role, String)]) -> Self {
        let mut view = Self::new(kind, max_input_chars);
        for (role, content) in seed {
            view.transcript.append(*role, content.clone(), vec![]);
        }
        view
    }

    /// Start over with an empty transcript. Ticket numbering continues so a
    /// reply queued for the old conversation can never match a new one.
    pub fn reset(&mut self) {
        self.transcript = Transcript::new();
        self.phase = ReplyPhase::Idle;
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> ReplyPhase {
        self.phase
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.phase, ReplyPhase::Pending { .. })
    }

    /// Accept a user message and move to Pending.
    ///
    /// On success the trimmed text is already in the transcript.
    pub fn submit(&mut self, text: &str) -> Result<ReplyTicket, SubmitRejected> {
        if self.is_pending() {
            debug!("{:?}: submit ignored, reply pending", self.kind);
            return Err(SubmitRejected::ReplyPending);
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitRejected::EmptyInput);
        }
        if trimmed.chars().count() > self.max_input_chars {
            return Err(SubmitRejected::TooLong {
                limit: self.max_input_chars,
            });
        }

        self.transcript.append(Role::User, trimmed, vec![]);
        self.next_ticket += 1;
        let ticket = ReplyTicket(self.next_ticket);
        self.phase = ReplyPhase::Pending { ticket };
        info!(
            "{:?}: user message accepted ({} chars), awaiting {:?}",
            self.kind,
            trimmed.chars().count(),
            ticket
        );
        Ok(ticket)
    }

    /// Deliver the outcome for `ticket`.
    pub fn complete(&mut self, ticket: ReplyTicket, outcome: ReplyOutcome) -> Completion {
        match self.phase {
            ReplyPhase::Pending { ticket: waiting } if waiting == ticket => {}
            _ => {
                warn!("{:?}: dropping stale reply {:?}", self.kind, ticket);
                return Completion::Stale;
            }
        }

        self.phase = ReplyPhase::Idle;
        match outcome {
            Ok(reply) => {
                self.transcript
                    .append(Role::Assistant, reply.content, reply.code_blocks);
                Completion::Replied
            }
            Err(e) => {
                warn!("{:?}: reply failed: {}", self.kind, e);
                Completion::Failed(e)
            }
        }
    }
}
