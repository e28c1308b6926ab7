//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Effects
//!
//! `update()` never touches the outside world. Its `Effect`s are carried out
//! here by [`EffectRunner`]: replies are spawned as tokio tasks, clipboard
//! writes and exports run inline, and every result comes back through the
//! same `Action` channel the reply tasks use.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a reply is pending): draws every ~80ms for the spinner.
//! - **Ticking** (landing carousel, visible toast): every ~250ms.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call, making blinking cursors appear erratic during continuous redraws.

mod component;
mod components;
mod event;
pub mod markdown;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::path::PathBuf;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::Screen;
use crate::core::action::{Action, Effect, update};
use crate::core::chat::ChatKind;
use crate::core::config::ResolvedConfig;
use crate::core::content::{Content, carousel_index};
use crate::core::notes::{Clipboard, Document, SystemClipboard, export_notes};
use crate::core::responder::{ReplyTasks, Responder, ScriptedResponder, spawn_reply};
use crate::core::state::App;
use crate::tui::component::EventHandler;
use crate::tui::components::landing::{URL_PLACEHOLDER, URL_TITLE};
use crate::tui::components::{
    CodePanelState, InputBox, InputEvent, MenuItem, MessageListState, NotesCanvasState,
    SidebarEvent, SidebarState,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::ui::Pane;

const NOTES_DISCLAIMER: &str =
    "Disclaimer: We may or may not provide the best responses. Use at your own discretion.";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    // Persistent component states
    pub notes_list: MessageListState,
    pub prototype_list: MessageListState,
    pub canvas: NotesCanvasState,
    pub code_panel: CodePanelState,
    pub notes_input: InputBox,
    pub prototype_input: InputBox,
    pub url_input: InputBox,
    // Sidebar overlay (None = hidden)
    pub sidebar: Option<SidebarState>,
    pub show_help: bool,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            notes_list: MessageListState::new(),
            prototype_list: MessageListState::new(),
            canvas: NotesCanvasState::new(),
            code_panel: CodePanelState::default(),
            notes_input: InputBox::new("Message", "Type your message...")
                .with_footer(NOTES_DISCLAIMER),
            prototype_input: InputBox::new("Message", "Ask Captr to build..."),
            url_input: InputBox::new(URL_TITLE, URL_PLACEHOLDER),
            sidebar: None,
            show_help: false,
        }
    }

    fn chat_input(&mut self, kind: ChatKind) -> &mut InputBox {
        match kind {
            ChatKind::Notes => &mut self.notes_input,
            ChatKind::Prototype => &mut self.prototype_input,
        }
    }

    fn chat_list(&mut self, kind: ChatKind) -> &mut MessageListState {
        match kind {
            ChatKind::Notes => &mut self.notes_list,
            ChatKind::Prototype => &mut self.prototype_list,
        }
    }

    /// Input props that mirror core state, refreshed before every draw.
    fn sync_props(&mut self, app: &App) {
        self.notes_input.locked = app.notes_chat.is_pending();
        self.prototype_input.locked = app.prototype_chat.is_pending();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Enable Kitty keyboard protocol unconditionally (allows Shift+Enter detection)
        // Detection via supports_keyboard_enhancement() fails in WSL, but the protocol
        // is harmlessly ignored by terminals that don't support it
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!(
            "Terminal modes enabled (mouse, bracketed paste, steady block cursor, keyboard enhancement)"
        );
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Carries out the `Effect`s returned by `update()`.
///
/// Results of clipboard writes and exports are sent back on `tx` as
/// `CopyFinished` / `ExportFinished`. In-flight replies are aborted when the
/// runner is dropped.
pub struct EffectRunner<C: Clipboard> {
    responder: Arc<dyn Responder>,
    reply_tasks: ReplyTasks,
    clipboard: C,
    export_dir: PathBuf,
    reply_timeout: Duration,
    tx: mpsc::Sender<Action>,
}

impl<C: Clipboard> EffectRunner<C> {
    pub fn new(
        responder: Arc<dyn Responder>,
        clipboard: C,
        export_dir: PathBuf,
        reply_timeout: Duration,
        tx: mpsc::Sender<Action>,
    ) -> Self {
        Self {
            responder,
            reply_tasks: ReplyTasks::new(),
            clipboard,
            export_dir,
            reply_timeout,
            tx,
        }
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn is_tracking(&self, kind: ChatKind) -> bool {
        self.reply_tasks.is_tracking(kind)
    }

    /// Forget the reply task for `kind` unless the view is still waiting on
    /// one (a stale result must not untrack a newer task).
    pub fn reply_delivered(&mut self, kind: ChatKind, still_pending: bool) {
        if !still_pending {
            self.reply_tasks.finish(kind);
        }
    }

    /// Run `effect`. Returns true if the app should quit.
    pub fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::SpawnReply {
                kind,
                ticket,
                prompt,
            } => {
                let handle = spawn_reply(
                    self.responder.clone(),
                    kind,
                    ticket,
                    prompt,
                    self.reply_timeout,
                    self.tx.clone(),
                );
                self.reply_tasks.track(kind, handle);
            }
            Effect::CancelReply(kind) => {
                self.reply_tasks.cancel(kind);
            }
            Effect::WriteClipboard { target, text } => {
                let result = self.clipboard.set_text(&text).map_err(|e| e.to_string());
                self.send(Action::CopyFinished { target, result });
            }
            Effect::ExportNotes {
                file_name,
                contents,
            } => {
                let result = export_notes(&self.export_dir, &file_name, &contents)
                    .map_err(|e| e.to_string());
                self.send(Action::ExportFinished(result));
            }
        }
        false
    }

    fn send(&self, action: Action) {
        if self.tx.send(action).is_err() {
            warn!("Failed to deliver effect result: receiver dropped");
        }
    }
}

/// Reduce `action` and run its effect. Returns true if the app should quit.
fn dispatch<C: Clipboard>(app: &mut App, runner: &mut EffectRunner<C>, action: Action) -> bool {
    let effect = update(app, action);
    runner.apply(effect)
}

fn submit_chat<C: Clipboard>(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner<C>,
    kind: ChatKind,
    text: String,
) -> bool {
    let effect = update(
        app,
        Action::Submit {
            kind,
            text: text.clone(),
        },
    );
    if effect == Effect::None {
        // Rejected (too long): give the draft back so nothing is lost
        tui.chat_input(kind).set_text(text);
    }
    runner.apply(effect)
}

fn new_chat<C: Clipboard>(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner<C>,
    kind: ChatKind,
) -> bool {
    tui.chat_list(kind).reset();
    if kind == ChatKind::Prototype {
        tui.code_panel = CodePanelState::default();
    }
    dispatch(app, runner, Action::NewChat(kind))
}

fn select_menu_item<C: Clipboard>(
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner<C>,
    item: MenuItem,
) -> bool {
    match item {
        MenuItem::Help => {
            tui.show_help = true;
            false
        }
        MenuItem::NewChat => {
            let kind = app.active_chat_kind().unwrap_or(ChatKind::Notes);
            let quit = new_chat(app, tui, runner, kind);
            quit | dispatch(app, runner, Action::Navigate(screen_for(kind)))
        }
        other => match other.screen() {
            Some(screen) => dispatch(app, runner, Action::Navigate(screen)),
            None => false,
        },
    }
}

fn load_content(config: &ResolvedConfig) -> Content {
    let mut content = Content::default();
    if let Some(path) = &config.notes_file {
        match Document::from_file(path) {
            Ok(document) => content.document = document,
            Err(e) => warn!(
                "Could not read notes file {}: {}; using bundled notes",
                path.display(),
                e
            ),
        }
    }
    content
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let content = load_content(&config);
    let responder: Arc<dyn Responder> =
        Arc::new(ScriptedResponder::from_content(config.reply_delay, &content));
    let mut app = App::new(content, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks and effect results
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(
        responder,
        SystemClipboard,
        config.export_dir.clone(),
        config.reply_timeout,
        tx,
    );

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame
    let mut last_carousel = usize::MAX;

    loop {
        if app.expire_notification(Instant::now(), config.toast_duration) {
            needs_redraw = true;
        }

        let carousel = carousel_index(
            start_time.elapsed().as_millis(),
            config.carousel_interval_ms,
            app.videos.len(),
        );
        if app.screen == Screen::Landing && carousel != last_carousel {
            last_carousel = carousel;
            needs_redraw = true;
        }

        let animating = app.notes_chat.is_pending() || app.prototype_chat.is_pending();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync_props(&app);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame, carousel))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            Duration::from_millis(80)
        } else if app.screen == Screen::Landing || app.notification.is_some() {
            Duration::from_millis(250)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            // ForceQuit (Ctrl+C) always quits
            if matches!(event, TuiEvent::ForceQuit) {
                should_quit |= dispatch(&mut app, &mut runner, Action::Quit);
                continue;
            }

            // Help overlay swallows the next key or click
            if tui.show_help {
                if matches!(
                    event,
                    TuiEvent::Escape | TuiEvent::Submit | TuiEvent::MouseClick(..)
                ) {
                    tui.show_help = false;
                }
                continue;
            }

            // Ctrl+O toggles the sidebar
            if matches!(event, TuiEvent::ToggleSidebar) && tui.sidebar.is_none() {
                let mut sidebar = SidebarState::new();
                sidebar.focus_screen(app.screen);
                tui.sidebar = Some(sidebar);
                continue;
            }

            // When the sidebar is open, route all events to it
            if tui.sidebar.is_some() {
                let body = ui::areas(terminal.get_frame().area(), &app, &tui).body;
                let sidebar_event = tui.sidebar.as_mut().and_then(|sidebar| match event {
                    TuiEvent::MouseClick(column, row) => sidebar.click(column, row, body),
                    _ => sidebar.handle_event(&event),
                });
                match sidebar_event {
                    Some(SidebarEvent::Select(item)) => {
                        tui.sidebar = None;
                        should_quit |= select_menu_item(&mut app, &mut tui, &mut runner, item);
                    }
                    Some(SidebarEvent::Dismiss) => tui.sidebar = None,
                    None => {}
                }
                continue;
            }

            match event {
                TuiEvent::Escape => {
                    if app.notification.is_some() {
                        dispatch(&mut app, &mut runner, Action::DismissNotification);
                    }
                }
                TuiEvent::Copy => {
                    let action = match app.screen {
                        Screen::Notes => Some(Action::CopyNotes),
                        Screen::Prototype => Some(Action::CopyCode),
                        Screen::Landing => None,
                    };
                    if let Some(action) = action {
                        should_quit |= dispatch(&mut app, &mut runner, action);
                    }
                }
                TuiEvent::Download => {
                    if app.screen == Screen::Notes {
                        should_quit |= dispatch(&mut app, &mut runner, Action::DownloadNotes);
                    }
                }
                TuiEvent::NextTab => {
                    if app.screen == Screen::Prototype {
                        dispatch(&mut app, &mut runner, Action::ToggleTab);
                    }
                }
                TuiEvent::MouseScrollUp(column, row) | TuiEvent::MouseScrollDown(column, row) => {
                    let area = terminal.get_frame().area();
                    let areas = ui::areas(area, &app, &tui);
                    match ui::pane_at(&areas, &app, column, row) {
                        Some(Pane::Transcript(kind)) => {
                            tui.chat_list(kind).handle_event(&event);
                        }
                        Some(Pane::Canvas) => {
                            tui.canvas.handle_event(&event);
                        }
                        Some(Pane::Code) => {
                            tui.code_panel.handle_event(&event);
                        }
                        None => {}
                    }
                }
                TuiEvent::MouseMove(column, row) => {
                    let area = terminal.get_frame().area();
                    let areas = ui::areas(area, &app, &tui);
                    let hovered = match ui::pane_at(&areas, &app, column, row) {
                        Some(Pane::Transcript(kind)) => Some(kind),
                        _ => None,
                    };
                    for kind in [ChatKind::Notes, ChatKind::Prototype] {
                        let list = tui.chat_list(kind);
                        list.hovered_index = if hovered == Some(kind) {
                            list.index_at(row - areas.transcript.y)
                        } else {
                            None
                        };
                    }
                }
                TuiEvent::MouseClick(column, row) => {
                    if app.screen == Screen::Prototype {
                        let area = terminal.get_frame().area();
                        let areas = ui::areas(area, &app, &tui);
                        if let Some(tab) = ui::tab_at(&areas, column, row) {
                            dispatch(&mut app, &mut runner, Action::SelectTab(tab));
                        }
                    }
                }
                TuiEvent::ScrollPageUp | TuiEvent::ScrollPageDown | TuiEvent::ScrollToBottom => {
                    match (app.screen, app.prototype_tab) {
                        (Screen::Notes, _) => {
                            tui.notes_list.handle_event(&event);
                        }
                        (Screen::Prototype, crate::core::state::PrototypeTab::Preview) => {
                            tui.prototype_list.handle_event(&event);
                        }
                        (Screen::Prototype, crate::core::state::PrototypeTab::Code) => {
                            tui.code_panel.handle_event(&event);
                        }
                        (Screen::Landing, _) => {}
                    }
                }
                _ => {
                    // Text editing goes to the input box of the current screen
                    match app.active_chat_kind() {
                        Some(kind) => {
                            if let Some(InputEvent::Submit(text)) =
                                tui.chat_input(kind).handle_event(&event)
                            {
                                should_quit |=
                                    submit_chat(&mut app, &mut tui, &mut runner, kind, text);
                            }
                        }
                        None => {
                            if let Some(InputEvent::Submit(url)) =
                                tui.url_input.handle_event(&event)
                            {
                                should_quit |=
                                    dispatch(&mut app, &mut runner, Action::SubmitVideoUrl(url));
                            }
                        }
                    }
                }
            }
        }

        // Handle background task actions (replies, effect results)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let delivered = match &action {
                Action::ReplyFinished { kind, .. } => Some(*kind),
                _ => None,
            };
            let effect = update(&mut app, action);
            if let Some(kind) = delivered {
                runner.reply_delivered(kind, app.chat(kind).is_pending());
            }
            should_quit |= runner.apply(effect);
        }

        if should_quit {
            break;
        }
    }

    info!("Shutting down");
    // Aborts any reply still in flight before the terminal is handed back
    drop(runner);
    ratatui::restore();
    Ok(())
}

fn screen_for(kind: ChatKind) -> Screen {
    match kind {
        ChatKind::Notes => Screen::Notes,
        ChatKind::Prototype => Screen::Prototype,
    }
}
