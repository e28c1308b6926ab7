//! # Header Component
//!
//! One-line bar at the top of every screen: product name, where you are,
//! and the shortcuts that apply there.
//!
//! ```text
//!  Captr › AI Notes Chat  ⠙ thinking            ^Y Copy  ^S Download  ^O Menu
//! ```
//!
//! Stateless: every field is a prop filled in by `ui::draw_ui` each frame.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::Screen;
use crate::tui::component::Component;
use crate::tui::components::spinner;

pub struct Header<'a> {
    pub screen: Screen,
    /// Chat name shown on the notes workspace
    pub chat_name: &'a str,
    /// A reply is pending on the visible chat
    pub pending: bool,
    pub spinner_frame: usize,
}

impl<'a> Header<'a> {
    pub fn new(screen: Screen, chat_name: &'a str, pending: bool, spinner_frame: usize) -> Self {
        Self {
            screen,
            chat_name,
            pending,
            spinner_frame,
        }
    }

    fn location(&self) -> &str {
        match self.screen {
            Screen::Notes => self.chat_name,
            other => other.label(),
        }
    }

    /// Shortcut hints for the current screen as `(key, label)` pairs.
    pub fn hints(screen: Screen) -> &'static [(&'static str, &'static str)] {
        match screen {
            Screen::Landing => &[("Enter", "Process"), ("^O", "Menu"), ("^C", "Quit")],
            Screen::Notes => &[("^Y", "Copy"), ("^S", "Download"), ("^O", "Menu")],
            Screen::Prototype => &[("Tab", "Preview/Code"), ("^Y", "Copy code"), ("^O", "Menu")],
        }
    }
}

impl Component for Header<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut left = vec![
            Span::styled(
                " Captr",
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" › ", Style::default().fg(Color::DarkGray)),
            Span::raw(self.location().to_string()),
        ];
        if self.pending {
            let frame_char = spinner::frame(self.spinner_frame);
            left.push(Span::styled(
                format!("  {frame_char} thinking"),
                Style::default().fg(Color::Yellow),
            ));
        }

        let key_style = Style::default().fg(Color::Cyan);
        let label_style = Style::default().fg(Color::DarkGray);
        let mut right: Vec<Span> = Vec::new();
        for (key, label) in Self::hints(self.screen) {
            right.push(Span::styled(*key, key_style));
            right.push(Span::styled(format!(" {label}  "), label_style));
        }
        let right_width = right.iter().map(|s| s.width()).sum::<usize>() as u16;

        let [left_area, right_area] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(right_width)]).areas(area);
        frame.render_widget(Paragraph::new(Line::from(left)), left_area);
        frame.render_widget(Paragraph::new(Line::from(right)), right_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn rendered(mut header: Header<'_>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 1)).unwrap();
        terminal.draw(|f| header.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn notes_header_shows_chat_name_and_actions() {
        let text = rendered(Header::new(Screen::Notes, "AI Notes Chat", false, 0));
        assert!(text.contains("Captr"));
        assert!(text.contains("AI Notes Chat"));
        assert!(text.contains("Copy"));
        assert!(text.contains("Download"));
        assert!(!text.contains("thinking"));
    }

    #[test]
    fn prototype_header_mentions_tabs() {
        let text = rendered(Header::new(Screen::Prototype, "ignored", false, 0));
        assert!(text.contains("Prototype"));
        assert!(text.contains("Preview/Code"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn pending_reply_shows_spinner() {
        let text = rendered(Header::new(Screen::Prototype, "", true, 1));
        assert!(text.contains("⠙ thinking"));
    }
}
