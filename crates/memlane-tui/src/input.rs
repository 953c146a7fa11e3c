use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, Mode};
use crate::keymap::Keymap;

/// Input action that can be performed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Quit,
    Next,
    Prev,
    First,
    Last,
    ScrollForward, // Down arrow: same as one wheel notch
    ScrollBack,
    SelectIndex(usize), // 1-9: jump to a chapter
    OpenDetail,
    Compose,
    ToggleAutoplay,
    CycleStyle,
    CycleTheme,
    ToggleCardStyle,
    ShowHero,
    Export,
    Share,
    OpenImage,
    Delete,
    Help,
    ExitMode,
    // Compose form
    NextField,
    PrevField,
    Confirm,
    Cancel,
    InputChar(char),
    Backspace,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent, app: &App, keymap: &Keymap) -> Action {
    match &app.mode {
        Mode::Compose => return handle_input_mode(key),
        Mode::DeleteConfirm(_) => return handle_confirm_mode(key),
        Mode::Help => {
            // Any key exits help
            return Action::ExitMode;
        }
        Mode::Detail => return handle_detail_mode(key, keymap),
        Mode::Normal => {}
    }

    if let Some(action) = keymap.action_for(&key) {
        return action.clone();
    }

    match (key.code, key.modifiers) {
        (KeyCode::Char(c @ '1'..='9'), KeyModifiers::NONE) => {
            Action::SelectIndex(c as usize - '1' as usize)
        }
        _ => Action::None,
    }
}

/// Detail modal: the memory actions plus a way out
fn handle_detail_mode(key: KeyEvent, keymap: &Keymap) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }
    match keymap.action_for(&key) {
        Some(
            action @ (Action::Export
            | Action::Share
            | Action::OpenImage
            | Action::Delete
            | Action::Next
            | Action::Prev),
        ) => action.clone(),
        Some(Action::OpenDetail | Action::Quit | Action::ExitMode) => Action::ExitMode,
        _ => Action::None,
    }
}

/// Handle key events in the compose form
fn handle_input_mode(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Cancel,
        (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Confirm,
        (KeyCode::Enter, _) => Action::Confirm,
        (KeyCode::Esc, _) => Action::Cancel,
        (KeyCode::Tab, _) | (KeyCode::Down, _) => Action::NextField,
        (KeyCode::BackTab, _) | (KeyCode::Up, _) => Action::PrevField,
        (KeyCode::Backspace, _) => Action::Backspace,
        (KeyCode::Char(c), _) => Action::InputChar(c),
        _ => Action::None,
    }
}

/// Handle key events in confirmation mode
fn handle_confirm_mode(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => Action::Confirm,
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
        _ => Action::None,
    }
}
