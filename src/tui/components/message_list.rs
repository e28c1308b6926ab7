//! # MessageList Component
//!
//! Scrollable view of one chat transcript.
//!
//! ## Responsibilities
//!
//! - Display the transcript in append order
//! - Bring the newest message into view whenever the transcript grows
//! - Show a "thinking" row while a reply is pending
//! - Cache message heights so long transcripts don't re-wrap every frame
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `&'a Transcript` (props).
//!
//! Since `Component::render` takes `&mut self`, we can safely mutate the state
//! (including layout cache and scroll state) during the render pass, aligning
//! with Ratatui's `StatefulWidget` pattern.

use ratatui::Frame;
use ratatui::layout::{Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::MessageView;
use crate::tui::components::spinner;
use crate::tui::event::TuiEvent;

/// Rows reserved under the last message for the pending indicator.
const PENDING_ROWS: u16 = 2;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// Cached layout measurements
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Message under the mouse pointer
    pub hovered_index: Option<usize>,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Message count at the previous render; growth re-pins to the bottom
    pub rendered_count: usize,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true, // Start attached to bottom
            hovered_index: None,
            viewport_height: 0,
            rendered_count: 0,
        }
    }

    /// Forget everything about the previous transcript (new chat).
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Index of the message drawn at viewport row `row` (0 = top of the list).
    pub fn index_at(&self, row: u16) -> Option<usize> {
        let y = self.scroll_state.offset().y.saturating_add(row);
        let idx = self.layout.prefix_heights.partition_point(|&end| end <= y);
        (idx < self.layout.prefix_heights.len()).then_some(idx)
    }
}

/// Scrollable transcript view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_pending: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        is_pending: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_pending,
            spinner_frame,
        }
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();

        // 1. Update Layout Cache. Messages never change once appended, so
        // only new ones need measuring.
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(messages.len(), content_width);
        layout.heights.truncate(reusable.min(layout.heights.len()));
        for message in messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(MessageView::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(messages.len(), content_width);

        // The newest message always comes into view, even if the user had
        // scrolled away before it arrived
        if messages.len() > self.state.rendered_count {
            self.state.stick_to_bottom = true;
        }
        self.state.rendered_count = messages.len();

        let total_height = self.state.layout.total_height();
        let pending_rows = if self.is_pending { PENDING_ROWS } else { 0 };
        let canvas_height = total_height.saturating_add(pending_rows);

        // 2. Clamp scroll offset to prevent overscrolling past content
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible messages into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let hovered = self.state.hovered_index == Some(i);
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageView::new(&messages[i], hovered), rect);
            y_offset = y_offset.saturating_add(height);
        }

        if self.is_pending {
            let line = Line::from(vec![
                Span::styled(
                    format!(" {} ", spinner::frame(self.spinner_frame)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    "Captr is thinking…",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]);
            scroll_view.render_widget(
                Paragraph::new(line),
                Rect::new(0, total_height.saturating_add(1), content_width, 1),
            );
        }

        // Auto-scroll logic (Mutation)
        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the persistent state: `MessageList` is rebuilt every frame
/// and can't carry the scroll position between events.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::MouseScrollUp(..) => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::MouseScrollDown(..) => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollToBottom => {
                self.stick_to_bottom = true;
                self.scroll_state.scroll_to_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached layout measurements
#[derive(Default)]
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl LayoutCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many cached heights are still valid for a transcript of
    /// `message_count` messages rendered at `content_width`.
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || self.heights.is_empty() {
            return 0;
        }
        // Fewer messages than cached: the view was replaced by a new chat
        if message_count < self.message_count {
            return 0;
        }
        self.message_count
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
