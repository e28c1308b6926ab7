//! # CodePanel Component
//!
//! The prototype screen's Code tab: the latest generated code block with
//! syntax highlighting and line numbers, or a placeholder before any code
//! exists.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::CodeBlock;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;
use crate::tui::markdown;

pub const PLACEHOLDER: [&str; 2] = [
    "// No code generated yet",
    "// Ask Captr to create a component",
];

#[derive(Default)]
pub struct CodePanelState {
    pub scroll_state: ScrollViewState,
}

impl EventHandler for CodePanelState {
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

pub struct CodePanel<'a> {
    pub state: &'a mut CodePanelState,
    pub code: Option<&'a CodeBlock>,
}

impl<'a> CodePanel<'a> {
    pub fn new(state: &'a mut CodePanelState, code: Option<&'a CodeBlock>) -> Self {
        Self { state, code }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let Some(block) = self.code else {
            return PLACEHOLDER
                .iter()
                .map(|l| Line::styled(*l, Style::default().fg(Color::DarkGray)))
                .collect();
        };

        let highlighted = markdown::highlight_code(&block.code, &block.language);
        let gutter = highlighted.len().to_string().len();
        highlighted
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                let mut spans = vec![Span::styled(
                    format!("{:>gutter$} │ ", i + 1),
                    Style::default().fg(Color::DarkGray),
                )];
                spans.extend(line.spans);
                Line::from(spans)
            })
            .collect()
    }
}

impl Component for CodePanel<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = match self.code {
            Some(block) => format!(" {} · {} ", block.id, block.language),
            None => " Code ".to_string(),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let lines = self.lines();
        let width = lines
            .iter()
            .map(Line::width)
            .max()
            .unwrap_or(0)
            .min(u16::MAX as usize) as u16;
        let width = width.max(inner.width.saturating_sub(1));
        let height = lines.len().min(u16::MAX as usize) as u16;

        let mut scroll_view = ScrollView::new(Size::new(width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Automatic);
        scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
