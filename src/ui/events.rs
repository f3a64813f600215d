//! Event handling for the browser
//!
//! Maps keyboard and mouse events onto [`AppState`] edits and onto
//! [`EventResult`]s that the run loop forwards to the query engine.

use super::state::{AppState, FocusPane, Mode};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::time::Duration;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Continue running the event loop
    Continue,
    /// Exit the browser
    Quit,
    /// Query text changed; schedule a debounced commit
    QueryChanged,
    /// Open the details modal for the highlighted result
    OpenDetails,
    /// Details modal was dismissed
    CloseDetails,
    /// Select the use-case row at this index (0 = all use cases)
    SelectUseCase(usize),
    /// Toggle the category at this index
    ToggleCategory(usize),
    CycleSort,
    ClearAll,
    /// Copy the share string to the clipboard
    CopyShare,
    /// No action taken
    Ignored,
}

/// Handle events in normal mode
fn handle_normal_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        // Exit
        (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,

        // Focus
        (KeyCode::Tab, _) => {
            state.focus = state.focus.next();
            EventResult::Continue
        }
        (KeyCode::BackTab, _) => {
            state.focus = state.focus.prev();
            EventResult::Continue
        }

        // Navigation
        (KeyCode::Up, _) | (KeyCode::Char('k'), KeyModifiers::CONTROL) => {
            state.move_cursor(-1);
            EventResult::Continue
        }
        (KeyCode::Down, _) | (KeyCode::Char('j'), KeyModifiers::CONTROL) => {
            state.move_cursor(1);
            EventResult::Continue
        }
        (KeyCode::PageUp, _) => {
            state.page_up();
            EventResult::Continue
        }
        (KeyCode::PageDown, _) => {
            state.page_down();
            EventResult::Continue
        }
        (KeyCode::Home, _) => {
            state.jump_to_start();
            EventResult::Continue
        }
        (KeyCode::End, _) => {
            state.jump_to_end();
            EventResult::Continue
        }

        // Activate the focused row
        (KeyCode::Enter, _) => activate(state),
        (KeyCode::Char(' '), KeyModifiers::NONE) if state.focus != FocusPane::Results => {
            activate(state)
        }

        // Engine actions
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => EventResult::CycleSort,
        (KeyCode::Char('x'), KeyModifiers::CONTROL) => EventResult::ClearAll,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => EventResult::CopyShare,

        // Help overlay; `?` is typed into a non-empty query
        (KeyCode::F(1), _) => {
            state.mode = Mode::Help;
            EventResult::Continue
        }
        (KeyCode::Char('?'), _) if state.query.value().is_empty() => {
            state.mode = Mode::Help;
            EventResult::Continue
        }

        // Query editing
        (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => {
            state.query.insert(c);
            EventResult::QueryChanged
        }
        (KeyCode::Backspace, _) => changed(state.query.backspace()),
        (KeyCode::Delete, _) => changed(state.query.delete()),
        (KeyCode::Left, _) => {
            state.query.left();
            EventResult::Continue
        }
        (KeyCode::Right, _) => {
            state.query.right();
            EventResult::Continue
        }
        (KeyCode::Char('u'), KeyModifiers::CONTROL) => changed(state.query.clear()),
        (KeyCode::Char('w'), KeyModifiers::CONTROL) => changed(state.query.delete_word()),

        _ => EventResult::Ignored,
    }
}

fn activate(state: &AppState) -> EventResult {
    match state.focus {
        FocusPane::Results => {
            if state.results.is_empty() {
                EventResult::Ignored
            } else {
                EventResult::OpenDetails
            }
        }
        FocusPane::UseCases => EventResult::SelectUseCase(state.use_case_cursor),
        FocusPane::Categories => {
            if state.category_rows == 0 {
                EventResult::Ignored
            } else {
                EventResult::ToggleCategory(state.category_cursor)
            }
        }
    }
}

const fn changed(edited: bool) -> EventResult {
    if edited {
        EventResult::QueryChanged
    } else {
        EventResult::Ignored
    }
}

/// Handle events in help mode
fn handle_help_mode(state: &mut AppState, _key: KeyEvent) -> EventResult {
    // Any key closes help
    state.mode = Mode::Normal;
    EventResult::Continue
}

/// Handle events in details mode
fn handle_details_mode(state: &mut AppState, key: KeyEvent) -> EventResult {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => EventResult::Quit,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => EventResult::CopyShare,
        _ => {
            state.mode = Mode::Normal;
            EventResult::CloseDetails
        }
    }
}

/// Handle mouse events
fn handle_mouse(state: &mut AppState, mouse: MouseEvent) -> EventResult {
    if state.mode != Mode::Normal {
        return EventResult::Ignored;
    }
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            state.move_cursor(-1);
            EventResult::Continue
        }
        MouseEventKind::ScrollDown => {
            state.move_cursor(1);
            EventResult::Continue
        }
        _ => EventResult::Ignored,
    }
}

/// Dispatch one terminal event by mode
pub fn handle_event(state: &mut AppState, event: Event) -> EventResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => match state.mode {
            Mode::Normal => handle_normal_mode(state, key),
            Mode::Help => handle_help_mode(state, key),
            Mode::Details => handle_details_mode(state, key),
        },
        Event::Mouse(mouse) => handle_mouse(state, mouse),
        Event::Resize(_, _) => EventResult::Continue,
        _ => EventResult::Ignored,
    }
}

/// Poll for events and handle them
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn poll_and_handle(state: &mut AppState, timeout: Duration) -> std::io::Result<EventResult> {
    if !event::poll(timeout)? {
        return Ok(EventResult::Continue);
    }
    Ok(handle_event(state, event::read()?))
}
