//! # Actions
//!
//! Everything that can happen in Captr becomes an `Action`.
//! User presses Enter? That's `Action::Submit { kind, text }`.
//! A reply arrives? That's `Action::ReplyFinished { .. }`.
//!
//! The `update()` function takes the current state and an action,
//! mutates the state, and returns an `Effect` describing any I/O the
//! event loop should perform. No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Clipboard writes and exports come back as `CopyFinished` /
//! `ExportFinished`, so each click produces exactly one notification once
//! its effect has actually run.

use std::path::PathBuf;

use log::{debug, info, warn};

use crate::Screen;
use crate::core::chat::{ChatKind, Completion, ReplyTicket, SubmitRejected};
use crate::core::notes::export_file_name;
use crate::core::responder::ReplyOutcome;
use crate::core::state::{App, NotificationLevel, PrototypeTab};

/// What a clipboard write was for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyTarget {
    Notes,
    Code,
}

#[derive(Debug)]
pub enum Action {
    Submit {
        kind: ChatKind,
        text: String,
    },
    ReplyFinished {
        kind: ChatKind,
        ticket: ReplyTicket,
        outcome: ReplyOutcome,
    },
    CopyNotes,
    CopyCode,
    DownloadNotes,
    CopyFinished {
        target: CopyTarget,
        result: Result<(), String>,
    },
    ExportFinished(Result<PathBuf, String>),
    SubmitVideoUrl(String),
    Navigate(Screen),
    SelectTab(PrototypeTab),
    ToggleTab,
    /// Start over in the given chat, dropping any pending reply.
    NewChat(ChatKind),
    DismissNotification,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    SpawnReply {
        kind: ChatKind,
        ticket: ReplyTicket,
        prompt: String,
    },
    CancelReply(ChatKind),
    WriteClipboard {
        target: CopyTarget,
        text: String,
    },
    ExportNotes {
        file_name: String,
        contents: String,
    },
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Submit { kind, text } => match app.chat_mut(kind).submit(&text) {
            Ok(ticket) => Effect::SpawnReply {
                kind,
                ticket,
                prompt: text.trim().to_string(),
            },
            Err(SubmitRejected::TooLong { limit }) => {
                app.notify(
                    NotificationLevel::Error,
                    "Message too long",
                    format!("Keep messages under {limit} characters."),
                );
                Effect::None
            }
            Err(rejected) => {
                debug!("Submit to {:?} rejected: {}", kind, rejected);
                Effect::None
            }
        },

        Action::ReplyFinished {
            kind,
            ticket,
            outcome,
        } => {
            match app.chat_mut(kind).complete(ticket, outcome) {
                Completion::Replied => {
                    debug!("{:?}: assistant reply appended", kind);
                }
                Completion::Failed(e) => {
                    app.notify(NotificationLevel::Error, "No reply", e.to_string());
                }
                Completion::Stale => {}
            }
            Effect::None
        }

        Action::CopyNotes => Effect::WriteClipboard {
            target: CopyTarget::Notes,
            text: app.document.markdown.clone(),
        },

        Action::CopyCode => match app.prototype_chat.transcript().last_code_block() {
            Some(block) => Effect::WriteClipboard {
                target: CopyTarget::Code,
                text: block.code.clone(),
            },
            None => {
                app.notify(
                    NotificationLevel::Info,
                    "Nothing to copy",
                    "Ask Captr to create a component first.",
                );
                Effect::None
            }
        },

        Action::DownloadNotes => Effect::ExportNotes {
            file_name: export_file_name(&app.chat_name),
            contents: app.document.markdown.clone(),
        },

        Action::CopyFinished { target, result } => {
            match (target, result) {
                (CopyTarget::Notes, Ok(())) => app.notify(
                    NotificationLevel::Success,
                    "Notes copied to clipboard!",
                    "You can now paste the notes anywhere you want.",
                ),
                (CopyTarget::Code, Ok(())) => app.notify(
                    NotificationLevel::Success,
                    "Code copied to clipboard!",
                    "",
                ),
                (_, Err(e)) => {
                    warn!("Copy of {:?} failed: {}", target, e);
                    app.notify(NotificationLevel::Error, "Copy failed", e);
                }
            }
            Effect::None
        }

        Action::ExportFinished(result) => {
            match result {
                Ok(path) => {
                    info!("Notes exported to {}", path.display());
                    app.notify(
                        NotificationLevel::Success,
                        "Notes downloaded!",
                        format!("Your notes have been saved to {}.", path.display()),
                    );
                }
                Err(e) => {
                    warn!("Notes export failed: {}", e);
                    app.notify(NotificationLevel::Error, "Download failed", e);
                }
            }
            Effect::None
        }

        Action::SubmitVideoUrl(url) => {
            let url = url.trim();
            if !url.is_empty() {
                info!("Processing URL: {}", url);
                app.notify(
                    NotificationLevel::Info,
                    "Processing video",
                    format!("Captr will turn {url} into notes."),
                );
                app.last_video_url = Some(url.to_string());
            }
            Effect::None
        }

        Action::Navigate(screen) => {
            if app.screen != screen {
                debug!("Navigate {:?} -> {:?}", app.screen, screen);
                app.screen = screen;
            }
            Effect::None
        }

        Action::SelectTab(tab) => {
            app.prototype_tab = tab;
            Effect::None
        }

        Action::ToggleTab => {
            app.prototype_tab = app.prototype_tab.toggled();
            Effect::None
        }

        Action::NewChat(kind) => {
            let was_pending = app.chat(kind).is_pending();
            app.chat_mut(kind).reset();
            if kind == ChatKind::Prototype {
                app.prototype_tab = PrototypeTab::Preview;
            }
            info!("Started a new {:?} chat", kind);
            if was_pending {
                Effect::CancelReply(kind)
            } else {
                Effect::None
            }
        }

        Action::DismissNotification => {
            app.notification = None;
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
