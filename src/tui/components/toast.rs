//! Notification toast drawn over the top-right corner.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::state::{Notification, NotificationLevel};
use crate::tui::component::Component;

const WIDTH: u16 = 44;

pub struct Toast<'a> {
    pub notification: &'a Notification,
}

impl<'a> Toast<'a> {
    pub fn new(notification: &'a Notification) -> Self {
        Self { notification }
    }

    fn accent(level: NotificationLevel) -> (Color, &'static str) {
        match level {
            NotificationLevel::Success => (Color::Green, "✓"),
            NotificationLevel::Info => (Color::Cyan, "i"),
            NotificationLevel::Error => (Color::Red, "✗"),
        }
    }

    /// Rect the toast occupies inside `area`: top-right, one row below the
    /// header, tall enough for the wrapped description.
    pub fn area(&self, area: Rect) -> Rect {
        let width = WIDTH.min(area.width);
        let text_width = width.saturating_sub(4).max(1) as usize;
        let description_lines = if self.notification.description.is_empty() {
            0
        } else {
            textwrap::wrap(&self.notification.description, text_width).len() as u16
        };
        let height = (description_lines + 3).min(area.height.saturating_sub(1));
        Rect {
            x: area.x + area.width - width,
            y: area.y + 1u16.min(area.height),
            width,
            height,
        }
    }
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = self.area(area);
        if rect.height < 3 {
            return;
        }
        let (color, icon) = Self::accent(self.notification.level);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .title(Line::from(vec![
                Span::styled(format!(" {icon} "), Style::default().fg(color)),
                Span::styled(
                    format!("{} ", self.notification.title),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
            .padding(Padding::horizontal(1));

        frame.render_widget(Clear, rect);
        frame.render_widget(
            Paragraph::new(self.notification.description.as_str())
                .style(Style::default().fg(Color::Gray))
                .wrap(Wrap { trim: true })
                .block(block),
            rect,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::time::Instant;

    fn notification(level: NotificationLevel, title: &str, description: &str) -> Notification {
        Notification {
            level,
            title: title.into(),
            description: description.into(),
            seq: 1,
            shown_at: Instant::now(),
        }
    }

    #[test]
    fn anchored_top_right_below_header() {
        let n = notification(NotificationLevel::Success, "Notes copied to clipboard!", "");
        let rect = Toast::new(&n).area(Rect::new(0, 0, 100, 30));
        assert_eq!(rect.x + rect.width, 100);
        assert_eq!(rect.y, 1);
        assert_eq!(rect.height, 3);
    }

    #[test]
    fn grows_with_description() {
        let n = notification(
            NotificationLevel::Info,
            "Processing video",
            "https://youtube.com/watch?v=abc is being turned into notes. This can take a while.",
        );
        let rect = Toast::new(&n).area(Rect::new(0, 0, 100, 30));
        assert!(rect.height > 3);
    }

    #[test]
    fn renders_title_and_description() {
        let n = notification(
            NotificationLevel::Success,
            "Notes copied to clipboard!",
            "You can now paste the notes anywhere you want.",
        );
        let mut terminal = Terminal::new(TestBackend::new(100, 10)).unwrap();
        terminal
            .draw(|f| Toast::new(&n).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Notes copied to clipboard!"));
        assert!(text.contains("You can now paste"));
    }
}
