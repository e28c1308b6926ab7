//! Screen composition.
//!
//! `areas()` is the single source of truth for where things go; drawing and
//! mouse hit testing both read it, so a click always lands on what was drawn.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Paragraph, Tabs};

use crate::Screen;
use crate::core::chat::ChatKind;
use crate::core::state::{App, PrototypeTab};
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::sidebar::render_help;
use crate::tui::components::{
    CodePanel, Header, LandingPage, MessageList, NotesCanvas, Sidebar, Toast,
};
use crate::tui::markdown::RawHtml;

pub const EMPTY_TITLE: &str = "What can I help you ship?";
pub const EMPTY_HINT: &str = "Ask me to create UI components, layouts, or complete pages.";

const TAB_TITLES: [PrototypeTab; 2] = [PrototypeTab::Preview, PrototypeTab::Code];

/// Where each part of the current screen is drawn. Parts the screen doesn't
/// have are zero-sized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Areas {
    pub header: Rect,
    pub body: Rect,
    /// Transcript pane (notes chat, or the prototype Preview tab)
    pub transcript: Rect,
    pub input: Rect,
    pub canvas: Rect,
    pub tabs: Rect,
}

/// Scrollable panes that mouse wheel events can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pane {
    Transcript(ChatKind),
    Canvas,
    Code,
}

pub fn areas(area: Rect, app: &App, tui: &TuiState) -> Areas {
    let [header, body] = Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(area);
    let mut areas = Areas {
        header,
        body,
        ..Areas::default()
    };

    match app.screen {
        Screen::Landing => {}
        Screen::Notes => {
            let [chat, canvas] =
                Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                    .areas(body);
            let input_height = tui.notes_input.calculate_height(chat.width);
            let [transcript, input] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(input_height)])
                    .areas(chat);
            areas.transcript = transcript;
            areas.input = input;
            areas.canvas = canvas;
        }
        Screen::Prototype => {
            let input_height = tui.prototype_input.calculate_height(body.width);
            let [tabs, content, input] = Layout::vertical([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(input_height),
            ])
            .areas(body);
            areas.tabs = tabs;
            areas.transcript = content;
            areas.input = input;
        }
    }
    areas
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    rect.width > 0
        && rect.height > 0
        && column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// The scrollable pane under `(column, row)`.
pub fn pane_at(areas: &Areas, app: &App, column: u16, row: u16) -> Option<Pane> {
    match app.screen {
        Screen::Landing => None,
        Screen::Notes if contains(areas.canvas, column, row) => Some(Pane::Canvas),
        Screen::Notes if contains(areas.transcript, column, row) => {
            Some(Pane::Transcript(ChatKind::Notes))
        }
        Screen::Prototype if contains(areas.transcript, column, row) => {
            Some(match app.prototype_tab {
                PrototypeTab::Preview => Pane::Transcript(ChatKind::Prototype),
                PrototypeTab::Code => Pane::Code,
            })
        }
        _ => None,
    }
}

/// The prototype tab label under `(column, row)`.
///
/// Mirrors `Tabs` layout: one space of padding on each side of a label and
/// a one-cell divider between labels.
pub fn tab_at(areas: &Areas, column: u16, row: u16) -> Option<PrototypeTab> {
    if !contains(areas.tabs, column, row) {
        return None;
    }
    let mut x = areas.tabs.x;
    for tab in TAB_TITLES {
        let width = tab.label().len() as u16 + 2;
        if column < x + width {
            return Some(tab);
        }
        x += width + 1;
    }
    None
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize, carousel: usize) {
    let areas = areas(frame.area(), app, tui);
    let pending = app
        .active_chat_kind()
        .is_some_and(|kind| app.chat(kind).is_pending());

    Header::new(app.screen, &app.chat_name, pending, spinner_frame).render(frame, areas.header);

    match app.screen {
        Screen::Landing => {
            LandingPage::new(&app.videos, carousel, &mut tui.url_input).render(frame, areas.body);
        }
        Screen::Notes => {
            MessageList::new(
                &mut tui.notes_list,
                app.notes_chat.transcript(),
                app.notes_chat.is_pending(),
                spinner_frame,
            )
            .render(frame, areas.transcript);
            tui.notes_input.render(frame, areas.input);
            NotesCanvas::new(
                &mut tui.canvas,
                &app.document,
                RawHtml::from_allow(app.allow_raw_html),
            )
            .render(frame, areas.canvas);
        }
        Screen::Prototype => {
            draw_tabs(frame, app.prototype_tab, areas.tabs);
            let chat = &app.prototype_chat;
            match app.prototype_tab {
                PrototypeTab::Preview if chat.transcript().is_empty() && !chat.is_pending() => {
                    draw_empty_state(frame, areas.transcript);
                }
                PrototypeTab::Preview => {
                    MessageList::new(
                        &mut tui.prototype_list,
                        chat.transcript(),
                        chat.is_pending(),
                        spinner_frame,
                    )
                    .render(frame, areas.transcript);
                }
                PrototypeTab::Code => {
                    CodePanel::new(&mut tui.code_panel, chat.transcript().last_code_block())
                        .render(frame, areas.transcript);
                }
            }
            tui.prototype_input.render(frame, areas.input);
        }
    }

    // Overlays, bottom to top
    if let Some(sidebar) = tui.sidebar.as_mut() {
        Sidebar::new(sidebar, app.screen).render(frame, areas.body);
    }
    if tui.show_help {
        render_help(frame, frame.area());
    }
    if let Some(notification) = &app.notification {
        Toast::new(notification).render(frame, frame.area());
    }
}

fn draw_tabs(frame: &mut Frame, selected: PrototypeTab, area: Rect) {
    let titles = TAB_TITLES.iter().map(|t| t.label());
    let index = TAB_TITLES.iter().position(|t| *t == selected).unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(index)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("│");
    frame.render_widget(tabs, area);
}

fn draw_empty_state(frame: &mut Frame, area: Rect) {
    let [center] = Layout::vertical([Constraint::Length(2)])
        .flex(Flex::Center)
        .areas(area);
    let text = vec![
        Line::styled(
            EMPTY_TITLE,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), center);
}
