//! # Application State
//!
//! Core business state for Captr. This module contains domain logic only -
//! no TUI-specific types. Presentation state lives in the `tui` module.
//!
//! ```text
//! App
//! ├── screen: Screen                   // landing, notes workspace or prototype
//! ├── chat_name: String                // header title, export file name
//! ├── document: Document               // notes canvas contents
//! ├── notes_chat: ChatView             // chat beside the canvas
//! ├── prototype_chat: ChatView         // Preview/Code chat
//! ├── prototype_tab: PrototypeTab
//! ├── notification: Option<Notification>  // the one visible toast
//! ├── last_video_url: Option<String>   // last URL submitted on the landing page
//! └── videos: Vec<VideoExample>        // landing carousel
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::time::{Duration, Instant};

use log::debug;

use crate::Screen;
use crate::core::chat::{ChatKind, ChatView};
use crate::core::config::ResolvedConfig;
use crate::core::content::{Content, VideoExample};
use crate::core::notes::Document;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PrototypeTab {
    #[default]
    Preview,
    Code,
}

impl PrototypeTab {
    pub fn toggled(self) -> Self {
        match self {
            PrototypeTab::Preview => PrototypeTab::Code,
            PrototypeTab::Code => PrototypeTab::Preview,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PrototypeTab::Preview => "Preview",
            PrototypeTab::Code => "Code",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Info,
    Error,
}

/// A transient toast. `seq` increases with every notification so the UI can
/// tell a repeated message apart from the one already on screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub title: String,
    pub description: String,
    pub seq: u64,
    pub shown_at: Instant,
}

pub struct App {
    pub screen: Screen,
    pub chat_name: String,
    pub document: Document,
    pub notes_chat: ChatView,
    pub prototype_chat: ChatView,
    pub prototype_tab: PrototypeTab,
    pub notification: Option<Notification>,
    pub last_video_url: Option<String>,
    pub videos: Vec<VideoExample>,
    pub max_input_chars: usize,
    /// Show inline HTML in the document as literal text instead of dropping it.
    pub allow_raw_html: bool,
    notification_seq: u64,
}

impl App {
    pub fn new(content: Content, config: &ResolvedConfig) -> Self {
        let max = config.max_input_chars;
        Self {
            screen: config.start_screen,
            chat_name: config.chat_name.clone().unwrap_or(content.chat_name),
            document: content.document,
            notes_chat: ChatView::seeded(ChatKind::Notes, max, &content.notes_seed),
            prototype_chat: ChatView::new(ChatKind::Prototype, max),
            prototype_tab: PrototypeTab::default(),
            notification: None,
            last_video_url: None,
            videos: content.videos,
            max_input_chars: max,
            allow_raw_html: config.allow_raw_html,
            notification_seq: 0,
        }
    }

    pub fn chat(&self, kind: ChatKind) -> &ChatView {
        match kind {
            ChatKind::Notes => &self.notes_chat,
            ChatKind::Prototype => &self.prototype_chat,
        }
    }

    pub fn chat_mut(&mut self, kind: ChatKind) -> &mut ChatView {
        match kind {
            ChatKind::Notes => &mut self.notes_chat,
            ChatKind::Prototype => &mut self.prototype_chat,
        }
    }

    /// The chat shown on the current screen, if any.
    pub fn active_chat_kind(&self) -> Option<ChatKind> {
        match self.screen {
            Screen::Landing => None,
            Screen::Notes => Some(ChatKind::Notes),
            Screen::Prototype => Some(ChatKind::Prototype),
        }
    }

    /// Replace the visible notification.
    pub fn notify(
        &mut self,
        level: NotificationLevel,
        title: impl Into<String>,
        description: impl Into<String>,
    ) {
        self.notification_seq += 1;
        let notification = Notification {
            level,
            title: title.into(),
            description: description.into(),
            seq: self.notification_seq,
            shown_at: Instant::now(),
        };
        debug!("Notification #{}: {}", notification.seq, notification.title);
        self.notification = Some(notification);
    }

    /// Drop the notification once it has been visible for `ttl`.
    /// Returns true if one was removed.
    pub fn expire_notification(&mut self, now: Instant, ttl: Duration) -> bool {
        match &self.notification {
            Some(n) if now.saturating_duration_since(n.shown_at) >= ttl => {
                self.notification = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Role;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Landing);
        assert_eq!(app.chat_name, "AI Notes Chat");
        assert_eq!(app.prototype_tab, PrototypeTab::Preview);
        assert!(app.notification.is_none());
        assert!(app.prototype_chat.transcript().is_empty());
        assert_eq!(app.videos.len(), 8);
    }

    #[test]
    fn notes_chat_starts_seeded() {
        let app = test_app();
        let roles: Vec<Role> = app
            .notes_chat
            .transcript()
            .messages()
            .iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, [Role::Assistant, Role::User, Role::Assistant]);
    }

    #[test]
    fn config_overrides_chat_name_and_screen() {
        let config = ResolvedConfig {
            chat_name: Some("Lecture 4".into()),
            start_screen: Screen::Prototype,
            ..ResolvedConfig::default()
        };
        let app = App::new(Content::default(), &config);
        assert_eq!(app.chat_name, "Lecture 4");
        assert_eq!(app.active_chat_kind(), Some(ChatKind::Prototype));
    }

    #[test]
    fn notify_replaces_and_increments_seq() {
        let mut app = test_app();
        app.notify(NotificationLevel::Info, "one", "");
        app.notify(NotificationLevel::Success, "two", "");
        let n = app.notification.as_ref().unwrap();
        assert_eq!(n.title, "two");
        assert_eq!(n.seq, 2);
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut app = test_app();
        app.notify(NotificationLevel::Success, "Saved", "");
        let shown = app.notification.as_ref().unwrap().shown_at;
        let ttl = Duration::from_millis(3000);

        assert!(!app.expire_notification(shown + Duration::from_millis(2999), ttl));
        assert!(app.notification.is_some());
        assert!(app.expire_notification(shown + ttl, ttl));
        assert!(app.notification.is_none());
    }

    #[test]
    fn tab_toggle_round_trips() {
        assert_eq!(PrototypeTab::Preview.toggled(), PrototypeTab::Code);
        assert_eq!(PrototypeTab::Code.toggled(), PrototypeTab::Preview);
    }
}
