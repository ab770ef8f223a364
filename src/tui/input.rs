//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps key events to messages based on current app mode.
//! Handles the `gg` chord with a non-blocking state machine.

use super::{App, Message, ModalState};
use crate::filter::Scope;
use crossterm::event::{KeyCode, KeyEvent};
use std::time::Instant;

/// State machine for handling key chords.
///
/// Instead of blocking with `event::poll()` inline, we track pending keys
/// and check for timeout in the main event loop.
#[derive(Debug, Default)]
pub struct InputState {
    /// The first key of a potential chord sequence
    pub pending: Option<KeyCode>,
    /// When the pending key was pressed (for timeout detection)
    pub pending_since: Option<Instant>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there's a pending chord that has timed out (500ms).
    pub fn has_timed_out(&self) -> bool {
        if let Some(since) = self.pending_since {
            since.elapsed().as_millis() > 500
        } else {
            false
        }
    }

    pub fn clear(&mut self) {
        self.pending = None;
        self.pending_since = None;
    }

    pub fn set_pending(&mut self, key: KeyCode) {
        self.pending = Some(key);
        self.pending_since = Some(Instant::now());
    }
}

/// Map key events to messages based on current app mode.
pub fn dispatch(app: &App, input: &mut InputState, key: KeyEvent) -> Message {
    if let Some(pending) = input.pending.take() {
        input.pending_since = None;
        return handle_chord(pending, key.code);
    }

    match app.modal {
        ModalState::Help => dispatch_help_modal(key),
        ModalState::FilterMenu { .. } => dispatch_filter_menu(key),
        ModalState::None if app.search_typing => dispatch_search_mode(key),
        ModalState::None => dispatch_normal_mode(app.search_active, input, key),
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Mode-specific dispatch functions
// ─────────────────────────────────────────────────────────────────────────────

/// Handle keys on the issue list.
fn dispatch_normal_mode(search_active: bool, input: &mut InputState, key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('j') | KeyCode::Down => Message::MoveDown,
        KeyCode::Char('k') | KeyCode::Up => Message::MoveUp,
        KeyCode::Char('G') => Message::GotoBottom,
        KeyCode::Char('g') => {
            input.set_pending(KeyCode::Char('g'));
            Message::None
        }
        KeyCode::Char('/') if search_active => Message::FocusSearch,
        KeyCode::Char('/') => Message::EnterSearch,
        KeyCode::Esc if search_active => Message::ExitSearch,
        KeyCode::Char(c @ '1'..='4') if search_active => {
            let idx = c as usize - '1' as usize;
            Message::SetScope(Scope::ALL[idx])
        }
        KeyCode::Char(']') if search_active => Message::NextScope,
        KeyCode::Char('[') if search_active => Message::PrevScope,
        KeyCode::Tab => Message::ToggleStatusTab,
        KeyCode::Char('x') => Message::ToggleIssueStatus,
        KeyCode::Char('e') => Message::ToggleEditMode,
        KeyCode::Char(' ') => Message::ToggleSelected,
        KeyCode::Char('a') => Message::ToggleSelectAll,
        KeyCode::Char('c') => Message::CloseSelected,
        KeyCode::Char('f') => Message::ToggleFilterMenu,
        KeyCode::Char('r') => Message::Refresh,
        KeyCode::Char('?') => Message::ToggleHelp,
        _ => Message::None,
    }
}

/// Handle keys while typing into the search bar.
fn dispatch_search_mode(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc => Message::ExitSearch,
        KeyCode::Enter => Message::ConfirmSearch,
        KeyCode::Backspace => Message::SearchBackspace,
        KeyCode::Tab => Message::NextScope,
        KeyCode::BackTab => Message::PrevScope,
        KeyCode::Char(c) => Message::SearchInput(c),
        _ => Message::None,
    }
}

fn dispatch_help_modal(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => Message::CloseModal,
        _ => Message::None,
    }
}

fn dispatch_filter_menu(key: KeyEvent) -> Message {
    match key.code {
        KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('q') => Message::CloseModal,
        KeyCode::Char('h') | KeyCode::Left | KeyCode::BackTab => Message::FilterMenuCategory(-1),
        KeyCode::Char('l') | KeyCode::Right | KeyCode::Tab => Message::FilterMenuCategory(1),
        KeyCode::Char('j') | KeyCode::Down => Message::FilterMenuItem(1),
        KeyCode::Char('k') | KeyCode::Up => Message::FilterMenuItem(-1),
        KeyCode::Enter | KeyCode::Char(' ') => Message::FilterMenuSelect,
        KeyCode::Char('c') => Message::ClearFilters,
        _ => Message::None,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Chord handling
// ─────────────────────────────────────────────────────────────────────────────

fn handle_chord(first: KeyCode, second: KeyCode) -> Message {
    match (first, second) {
        (KeyCode::Char('g'), KeyCode::Char('g')) => Message::GotoTop,
        _ => Message::None,
    }
}
