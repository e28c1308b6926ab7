//! # InputBox Component
//!
//! The draft text for one chat (or the landing page URL field).
//!
//! ## Responsibilities
//!
//! - Capture text input, editing and paste
//! - Emit `Submit` on Enter with the draft, clearing it optimistically
//! - Refuse to submit while `locked` (a reply is pending), keeping the draft
//! - Show a placeholder when empty and an optional footer line
//!
//! The buffer and cursor are internal state; `title`, `placeholder`,
//! `locked` and `footer` are props set by the parent each frame.

mod text_wrap;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use text_wrap::{
    CONTENT_OFFSET, MAX_VISIBLE_LINES, VERTICAL_OVERHEAD, cursor_cell, inner_width,
    next_char_boundary, prev_char_boundary, vertical_target, wrap_line_count, wrap_lines,
};

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    /// Text or cursor changed
    Changed,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Block title (Prop)
    pub title: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Footer under the text, e.g. a disclaimer (Prop)
    pub footer: Option<String>,
    /// True while a reply is pending (Prop)
    pub locked: bool,
    /// Cursor as a byte offset into `buffer`
    cursor: usize,
    /// First visible wrapped line
    scroll_offset: u16,
}

impl InputBox {
    pub fn new(title: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            buffer: String::new(),
            title: title.into(),
            placeholder: placeholder.into(),
            footer: None,
            locked: false,
            cursor: 0,
            scroll_offset: 0,
        }
    }

    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    /// Put text back into the box, cursor at the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
        self.cursor = self.buffer.len();
        self.scroll_offset = 0;
    }

    /// Required height for the current buffer, clamped to the visible maximum.
    pub fn calculate_height(&self, area_width: u16) -> u16 {
        let lines = wrap_line_count(&self.buffer, inner_width(area_width));
        lines.min(MAX_VISIBLE_LINES) + VERTICAL_OVERHEAD
    }

    fn keep_cursor_visible(&mut self, width: u16) {
        let (row, _) = cursor_cell(&self.buffer, self.cursor, width);
        if row < self.scroll_offset {
            self.scroll_offset = row;
        } else if row >= self.scroll_offset + MAX_VISIBLE_LINES {
            self.scroll_offset = row + 1 - MAX_VISIBLE_LINES;
        }
    }

    fn insert(&mut self, text: &str) -> Option<InputEvent> {
        self.buffer.insert_str(self.cursor, text);
        self.cursor += text.len();
        Some(InputEvent::Changed)
    }

    fn move_to(&mut self, pos: usize) -> Option<InputEvent> {
        (pos != self.cursor).then(|| {
            self.cursor = pos;
            InputEvent::Changed
        })
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = inner_width(area.width);
        self.keep_cursor_visible(width);

        let (border, title) = if self.locked {
            (
                Style::default().fg(Color::DarkGray),
                format!("{} (waiting for reply…)", self.title),
            )
        } else {
            (Style::default().fg(Color::Cyan), self.title.clone())
        };

        let mut block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border)
            .title(title)
            .padding(Padding::horizontal(1));
        if let Some(footer) = &self.footer {
            block = block.title_bottom(
                Line::from(format!(" {footer} "))
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center),
            );
        }

        let paragraph = if self.buffer.is_empty() {
            Paragraph::new(self.placeholder.as_str()).style(
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            )
        } else {
            let visible: Vec<String> = wrap_lines(&self.buffer, width)
                .into_iter()
                .skip(self.scroll_offset as usize)
                .take(MAX_VISIBLE_LINES as usize)
                .collect();
            Paragraph::new(visible.join("\n")).style(Style::default().fg(Color::White))
        };
        frame.render_widget(paragraph.block(block), area);

        if !self.locked && width > 0 {
            let (row, col) = cursor_cell(&self.buffer, self.cursor, width);
            frame.set_cursor_position((
                area.x + CONTENT_OFFSET + col,
                area.y + 1 + row.saturating_sub(self.scroll_offset),
            ));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => self.insert(c.encode_utf8(&mut [0; 4])),
            TuiEvent::Paste(text) => self.insert(&text.replace("\r\n", "\n")),
            TuiEvent::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let prev = prev_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(prev..self.cursor);
                self.cursor = prev;
                Some(InputEvent::Changed)
            }
            TuiEvent::Delete => {
                if self.cursor >= self.buffer.len() {
                    return None;
                }
                let next = next_char_boundary(&self.buffer, self.cursor);
                self.buffer.drain(self.cursor..next);
                Some(InputEvent::Changed)
            }
            TuiEvent::CursorLeft => self.move_to(prev_char_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorRight => self.move_to(next_char_boundary(&self.buffer, self.cursor)),
            TuiEvent::CursorHome => {
                let start = self.buffer[..self.cursor]
                    .rfind('\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
                self.move_to(start)
            }
            TuiEvent::CursorEnd => {
                let end = self.buffer[self.cursor..]
                    .find('\n')
                    .map(|i| self.cursor + i)
                    .unwrap_or(self.buffer.len());
                self.move_to(end)
            }
            TuiEvent::CursorUp => {
                vertical_target(&self.buffer, self.cursor, true).and_then(|pos| self.move_to(pos))
            }
            TuiEvent::CursorDown => {
                vertical_target(&self.buffer, self.cursor, false).and_then(|pos| self.move_to(pos))
            }
            TuiEvent::Submit => {
                if self.locked || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                self.cursor = 0;
                self.scroll_offset = 0;
                Some(InputEvent::Submit(text))
            }
            _ => None,
        }
    }
}
