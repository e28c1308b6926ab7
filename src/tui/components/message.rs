use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::transcript::{Message, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Renders one transcript entry as a bordered bubble.
///
/// Transient: built each frame by `MessageList` with the data it needs.
/// Assistant messages that carry code get one "View Code" line per block
/// under the text, pointing at the Code tab.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
    pub is_hovered: bool,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message, is_hovered: bool) -> Self {
        Self {
            message,
            is_hovered,
        }
    }

    /// Height this message needs at `width`, predicted with `textwrap` using
    /// the same options as the rendered `Paragraph`.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let text_lines = textwrap::wrap(message.content.trim(), options).len().max(1);
        let code_hints = message.code_blocks.len();
        u16::try_from(text_lines.saturating_add(code_hints))
            .unwrap_or(u16::MAX)
            .saturating_add(VERTICAL_OVERHEAD)
    }

    fn role_label(role: Role) -> &'static str {
        match role {
            Role::User => "You",
            Role::Assistant => "Captr",
        }
    }

    fn role_style(role: Role) -> Style {
        match role {
            Role::User => Style::default().fg(Color::Cyan),
            Role::Assistant => Style::default().fg(Color::Magenta),
        }
    }
}

impl Widget for MessageView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let role = self.message.role;
        let style = Self::role_style(role);
        let border_style = if self.is_hovered {
            style
        } else {
            style.add_modifier(Modifier::DIM)
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style)
            .title(Span::styled(Self::role_label(role), style.add_modifier(Modifier::BOLD)))
            .title(
                Line::from(Span::styled(
                    self.message.timestamp.format(" %H:%M ").to_string(),
                    Style::default().fg(Color::DarkGray),
                ))
                .right_aligned(),
            )
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(area);
        block.render(area, buf);

        let code_rows = self.message.code_blocks.len() as u16;
        let text_area = Rect {
            height: inner.height.saturating_sub(code_rows),
            ..inner
        };
        Paragraph::new(self.message.content.trim())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        for (i, block) in self.message.code_blocks.iter().enumerate() {
            let y = text_area.y + text_area.height + i as u16;
            if y >= inner.y + inner.height {
                break;
            }
            let hint = Line::from(vec![
                Span::styled("▸ View Code", Style::default().fg(Color::Cyan)),
                Span::styled(
                    format!(" ({}) · Tab", block.language),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            Paragraph::new(hint).render(Rect::new(inner.x, y, inner.width, 1), buf);
        }
    }
}

impl Component for MessageView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::{CodeBlock, Transcript};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn message(role: Role, content: &str, code: Vec<CodeBlock>) -> Message {
        let mut t = Transcript::new();
        t.append(role, content, code).clone()
    }

    #[test]
    fn height_single_line() {
        let m = message(Role::User, "Hello", vec![]);
        assert_eq!(MessageView::calculate_height(&m, 80), 1 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn height_wraps_at_width() {
        // content width 9 - 4 = 5: "Hello" | "world"
        let m = message(Role::User, "Hello world", vec![]);
        assert_eq!(MessageView::calculate_height(&m, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn height_degenerate_width() {
        let m = message(Role::User, "Hello", vec![]);
        assert_eq!(MessageView::calculate_height(&m, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn height_saturates_for_huge_message() {
        let content = "word\n".repeat(70_000);
        let m = message(Role::Assistant, &content, vec![]);
        assert_eq!(MessageView::calculate_height(&m, 80), u16::MAX);
    }

    #[test]
    fn height_counts_code_hints() {
        let m = message(
            Role::Assistant,
            "Here you go",
            vec![CodeBlock::new("code-1", "tsx", "<Button />")],
        );
        assert_eq!(MessageView::calculate_height(&m, 80), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn render_shows_role_and_view_code_hint() {
        let m = message(
            Role::Assistant,
            "I've created a button",
            vec![CodeBlock::new("code-1", "tsx", "<Button />")],
        );
        let height = MessageView::calculate_height(&m, 50);
        let mut terminal = Terminal::new(TestBackend::new(50, height)).unwrap();
        terminal
            .draw(|f| f.render_widget(MessageView::new(&m, false), f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Captr"));
        assert!(text.contains("I've created a button"));
        assert!(text.contains("View Code"));
        assert!(text.contains("(tsx)"));
    }

    #[test]
    fn role_styles_differ() {
        assert_eq!(MessageView::role_style(Role::User).fg, Some(Color::Cyan));
        assert_eq!(MessageView::role_style(Role::Assistant).fg, Some(Color::Magenta));
    }
}
