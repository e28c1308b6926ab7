use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global shortcuts
    ForceQuit,     // Ctrl+C
    ToggleSidebar, // Ctrl+O
    Copy,          // Ctrl+Y: notes on the notes screen, code on the prototype
    Download,      // Ctrl+S
    NextTab,       // Tab
    Escape,

    // Text editing
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,

    // Scrolling
    ScrollPageUp,
    ScrollPageDown,
    ScrollToBottom, // Ctrl+End - also re-enables stick-to-bottom

    // Mouse (column, row)
    MouseScrollUp(u16, u16),
    MouseScrollDown(u16, u16),
    MouseMove(u16, u16),
    MouseClick(u16, u16),

    Resize,
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(ev) => translate(ev),
            Err(e) => {
                log::warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            log::warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(Duration::ZERO)
}

/// Map a crossterm event to a `TuiEvent`. Unmapped input yields `None`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key) => translate_key(key),
        Event::Mouse(mouse) => translate_mouse(mouse),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too
    if key.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('c') if ctrl => Some(TuiEvent::ForceQuit),
        KeyCode::Char('o') if ctrl => Some(TuiEvent::ToggleSidebar),
        KeyCode::Char('y') if ctrl => Some(TuiEvent::Copy),
        KeyCode::Char('s') if ctrl => Some(TuiEvent::Download),
        // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
        KeyCode::Char('j') if ctrl => Some(TuiEvent::InputChar('\n')),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(TuiEvent::InputChar(c)),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::SHIFT) => {
            Some(TuiEvent::InputChar('\n'))
        }
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Tab | KeyCode::BackTab => Some(TuiEvent::NextTab),
        KeyCode::Esc => Some(TuiEvent::Escape),
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Up => Some(TuiEvent::CursorUp),
        KeyCode::Down => Some(TuiEvent::CursorDown),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End if ctrl => Some(TuiEvent::ScrollToBottom),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        _ => None,
    }
}

fn translate_mouse(mouse: MouseEvent) -> Option<TuiEvent> {
    let (col, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(TuiEvent::MouseScrollUp(col, row)),
        MouseEventKind::ScrollDown => Some(TuiEvent::MouseScrollDown(col, row)),
        MouseEventKind::Moved => Some(TuiEvent::MouseMove(col, row)),
        MouseEventKind::Down(event::MouseButton::Left) => Some(TuiEvent::MouseClick(col, row)),
        _ => None,
    }
}
