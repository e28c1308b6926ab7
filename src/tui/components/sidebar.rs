//! # Sidebar Component
//!
//! Navigation menu docked on the left, opened with Ctrl+O and dismissed
//! with Esc. Also hosts the help overlay it can open.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, List, ListItem, ListState, Padding, Paragraph};

use crate::Screen;
use crate::tui::event::TuiEvent;

const WIDTH: u16 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Home,
    Notes,
    Prototype,
    NewChat,
    Help,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Home,
        MenuItem::Notes,
        MenuItem::Prototype,
        MenuItem::NewChat,
        MenuItem::Help,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Home => "Home",
            MenuItem::Notes => "Notes workspace",
            MenuItem::Prototype => "Prototype",
            MenuItem::NewChat => "New chat",
            MenuItem::Help => "Help",
        }
    }

    /// The screen this item navigates to, if it is a navigation entry.
    pub fn screen(self) -> Option<Screen> {
        match self {
            MenuItem::Home => Some(Screen::Landing),
            MenuItem::Notes => Some(Screen::Notes),
            MenuItem::Prototype => Some(Screen::Prototype),
            MenuItem::NewChat | MenuItem::Help => None,
        }
    }
}

/// Events emitted by the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarEvent {
    Select(MenuItem),
    Dismiss,
}

/// Persistent state for the sidebar.
pub struct SidebarState {
    pub selected: usize,
    pub list_state: ListState,
}

impl Default for SidebarState {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarState {
    pub fn new() -> Self {
        Self {
            selected: 0,
            list_state: ListState::default().with_selected(Some(0)),
        }
    }

    /// Highlight the entry for `screen` when the sidebar opens.
    pub fn focus_screen(&mut self, screen: Screen) {
        if let Some(i) = MenuItem::ALL.iter().position(|m| m.screen() == Some(screen)) {
            self.select(i);
        }
    }

    fn select(&mut self, index: usize) {
        self.selected = index.min(MenuItem::ALL.len() - 1);
        self.list_state.select(Some(self.selected));
    }

    pub fn handle_event(&mut self, event: &TuiEvent) -> Option<SidebarEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::ToggleSidebar => Some(SidebarEvent::Dismiss),
            TuiEvent::CursorUp => {
                self.select(self.selected.saturating_sub(1));
                None
            }
            TuiEvent::CursorDown => {
                self.select(self.selected + 1);
                None
            }
            TuiEvent::Submit => Some(SidebarEvent::Select(MenuItem::ALL[self.selected])),
            _ => None,
        }
    }

    /// Map a click at `(column, row)` to a menu entry, given the area the
    /// sidebar was drawn over.
    pub fn click(&mut self, column: u16, row: u16, area: Rect) -> Option<SidebarEvent> {
        let panel = panel_area(area);
        if column >= panel.x + panel.width {
            return Some(SidebarEvent::Dismiss);
        }
        // Items start below the top border and the blank padding row
        let first_row = panel.y + 2;
        let index = row.checked_sub(first_row)? as usize;
        (index < MenuItem::ALL.len()).then(|| {
            self.select(index);
            SidebarEvent::Select(MenuItem::ALL[index])
        })
    }
}

fn panel_area(area: Rect) -> Rect {
    Rect {
        width: WIDTH.min(area.width),
        ..area
    }
}

/// Transient render wrapper for the sidebar.
pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    current: Screen,
}

impl<'a> Sidebar<'a> {
    pub fn new(state: &'a mut SidebarState, current: Screen) -> Self {
        Self { state, current }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let panel = panel_area(area);
        frame.render_widget(Clear, panel);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Magenta))
            .title(" Captr ")
            .title_bottom(Line::from(" ↑↓ Move  Enter Open  Esc Close ").centered())
            .padding(Padding::new(1, 1, 1, 0));

        let items: Vec<ListItem> = MenuItem::ALL
            .iter()
            .map(|item| {
                let marker = if item.screen() == Some(self.current) {
                    "● "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, Style::default().fg(Color::Magenta)),
                    Span::raw(item.label()),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).highlight_style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED),
        );
        frame.render_stateful_widget(list, panel, &mut self.state.list_state);
    }
}

const HELP: &[(&str, &str)] = &[
    ("Enter", "Send message / process URL"),
    ("Ctrl+J", "New line"),
    ("Tab", "Switch Preview / Code"),
    ("Ctrl+Y", "Copy notes or code"),
    ("Ctrl+S", "Download notes"),
    ("PgUp/PgDn", "Scroll"),
    ("Ctrl+End", "Jump to newest message"),
    ("Ctrl+O", "Menu"),
    ("Ctrl+C", "Quit"),
];

/// Keyboard reference drawn centered over everything else.
pub fn render_help(frame: &mut Frame, area: Rect) {
    let overlay = centered_rect(60, 60, area);
    frame.render_widget(Clear, overlay);

    let lines: Vec<Line> = HELP
        .iter()
        .map(|(key, what)| {
            Line::from(vec![
                Span::styled(format!("{key:>10}  "), Style::default().fg(Color::Cyan)),
                Span::raw(*what),
            ])
        })
        .collect();

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Help ")
        .title_alignment(Alignment::Left)
        .title_bottom(Line::from(" Esc Close ").centered())
        .padding(Padding::uniform(1));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

/// Compute a centered rect using percentage of the outer rect.
pub fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn navigation_clamps_at_edges() {
        let mut state = SidebarState::new();
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected, 0);
        for _ in 0..10 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected, MenuItem::ALL.len() - 1);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(SidebarEvent::Select(MenuItem::Help))
        );
    }

    #[test]
    fn escape_dismisses() {
        let mut state = SidebarState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(SidebarEvent::Dismiss)
        );
    }

    #[test]
    fn focus_screen_selects_matching_entry() {
        let mut state = SidebarState::new();
        state.focus_screen(Screen::Prototype);
        assert_eq!(MenuItem::ALL[state.selected], MenuItem::Prototype);
    }

    #[test]
    fn clicks_select_items_or_dismiss() {
        let area = Rect::new(0, 1, 100, 30);
        let mut state = SidebarState::new();
        // Row 3 = first item (border at 1, padding at 2)
        assert_eq!(
            state.click(5, 3, area),
            Some(SidebarEvent::Select(MenuItem::Home))
        );
        assert_eq!(
            state.click(5, 6, area),
            Some(SidebarEvent::Select(MenuItem::NewChat))
        );
        assert_eq!(state.click(80, 6, area), Some(SidebarEvent::Dismiss));
        assert_eq!(state.click(5, 1, area), None);
    }

    #[test]
    fn render_lists_entries() {
        let mut state = SidebarState::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 14)).unwrap();
        terminal
            .draw(|f| Sidebar::new(&mut state, Screen::Notes).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        for item in MenuItem::ALL {
            assert!(text.contains(item.label()));
        }
        assert!(text.contains("● Notes workspace"));
    }

    #[test]
    fn help_lists_shortcuts() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| render_help(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Help"));
        assert!(text.contains("Download notes"));
    }
}
