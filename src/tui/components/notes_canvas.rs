//! # NotesCanvas Component
//!
//! The rendered notes document on the right of the notes workspace.
//! Scrolls independently of the chat beside it.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Text};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Wrap};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::notes::Document;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown::{self, RawHtml};

#[derive(Default)]
pub struct NotesCanvasState {
    pub scroll_state: ScrollViewState,
    /// Markdown and policy the cached text was rendered from
    source: Option<(String, RawHtml)>,
    rendered: Text<'static>,
}

impl NotesCanvasState {
    pub fn new() -> Self {
        Self::default()
    }

    fn text_for(&mut self, document: &Document, html: RawHtml) -> &Text<'static> {
        let stale = self
            .source
            .as_ref()
            .is_none_or(|(md, policy)| *policy != html || *md != document.markdown);
        if stale {
            self.rendered = markdown::render(&document.markdown, Color::White, html);
            self.source = Some((document.markdown.clone(), html));
        }
        &self.rendered
    }
}

impl EventHandler for NotesCanvasState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::MouseScrollUp(..) => self.scroll_state.scroll_up(),
            TuiEvent::MouseScrollDown(..) => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => {}
        }
        None
    }
}

pub struct NotesCanvas<'a> {
    pub state: &'a mut NotesCanvasState,
    pub document: &'a Document,
    pub html: RawHtml,
}

impl<'a> NotesCanvas<'a> {
    pub fn new(state: &'a mut NotesCanvasState, document: &'a Document, html: RawHtml) -> Self {
        Self {
            state,
            document,
            html,
        }
    }
}

impl Component for NotesCanvas<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(Line::styled(
                format!(" {} ", self.document.title),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        // -1 for the scrollbar
        let width = inner.width.saturating_sub(1);
        if width == 0 || inner.height == 0 {
            return;
        }

        let text = self.state.text_for(self.document, self.html).clone();
        let paragraph = Paragraph::new(text).wrap(Wrap { trim: false });
        let height = paragraph.line_count(width).min(u16::MAX as usize) as u16;

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(paragraph, Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
