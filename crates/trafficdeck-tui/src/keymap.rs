//! Keyboard shortcut handling.
//!
//! The same key means different things while browsing the dashboard and
//! while typing into the form, so mapping depends on the [`InputMode`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Where keystrokes go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Category tabs and log scrolling.
    #[default]
    Browse,
    /// Typing into the application form.
    Form,
}

/// TUI keyboard actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    Cancel,
    NextCategory,
    PreviousCategory,
    /// Zero-based tab index.
    JumpCategory(usize),
    FocusForm,
    LeaveForm,
    NextField,
    PreviousField,
    NextOption,
    PreviousOption,
    Input(char),
    Backspace,
    Submit,
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    None,
}

/// Map a key event to an action.
#[must_use]
pub fn map_key(key: KeyEvent, mode: InputMode) -> KeyAction {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return KeyAction::Cancel;
    }
    match mode {
        InputMode::Browse => map_browse(key),
        InputMode::Form => map_form(key),
    }
}

fn map_browse(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Tab | KeyCode::Right => KeyAction::NextCategory,
        KeyCode::BackTab | KeyCode::Left => KeyAction::PreviousCategory,
        KeyCode::Char(c @ '1'..='9') => {
            KeyAction::JumpCategory(c as usize - '1' as usize)
        }
        KeyCode::Char('f') | KeyCode::Enter => KeyAction::FocusForm,
        KeyCode::Up => KeyAction::ScrollUp,
        KeyCode::Down => KeyAction::ScrollDown,
        KeyCode::PageUp => KeyAction::PageUp,
        KeyCode::PageDown => KeyAction::PageDown,
        _ => KeyAction::None,
    }
}

fn map_form(key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Esc => KeyAction::LeaveForm,
        KeyCode::Enter => KeyAction::Submit,
        KeyCode::Down | KeyCode::Tab => KeyAction::NextField,
        KeyCode::Up | KeyCode::BackTab => KeyAction::PreviousField,
        KeyCode::Right => KeyAction::NextOption,
        KeyCode::Left => KeyAction::PreviousOption,
        KeyCode::Backspace => KeyAction::Backspace,
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            KeyAction::Input(c)
        }
        _ => KeyAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn quit_keys_in_browse() {
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Browse), KeyAction::Quit);
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Browse), KeyAction::Quit);
    }

    #[test]
    fn ctrl_c_cancels_in_every_mode() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(event, InputMode::Browse), KeyAction::Cancel);
        assert_eq!(map_key(event, InputMode::Form), KeyAction::Cancel);
    }

    #[test]
    fn category_keys() {
        assert_eq!(map_key(key(KeyCode::Tab), InputMode::Browse), KeyAction::NextCategory);
        assert_eq!(map_key(key(KeyCode::Right), InputMode::Browse), KeyAction::NextCategory);
        assert_eq!(map_key(key(KeyCode::Left), InputMode::Browse), KeyAction::PreviousCategory);
        assert_eq!(
            map_key(key(KeyCode::Char('1')), InputMode::Browse),
            KeyAction::JumpCategory(0)
        );
        assert_eq!(
            map_key(key(KeyCode::Char('3')), InputMode::Browse),
            KeyAction::JumpCategory(2)
        );
    }

    #[test]
    fn focus_form() {
        assert_eq!(map_key(key(KeyCode::Char('f')), InputMode::Browse), KeyAction::FocusForm);
    }

    #[test]
    fn letters_type_in_form() {
        assert_eq!(map_key(key(KeyCode::Char('q')), InputMode::Form), KeyAction::Input('q'));
        assert_eq!(map_key(key(KeyCode::Char('3')), InputMode::Form), KeyAction::Input('3'));
        assert_eq!(map_key(key(KeyCode::Esc), InputMode::Form), KeyAction::LeaveForm);
    }

    #[test]
    fn form_navigation() {
        assert_eq!(map_key(key(KeyCode::Down), InputMode::Form), KeyAction::NextField);
        assert_eq!(map_key(key(KeyCode::Up), InputMode::Form), KeyAction::PreviousField);
        assert_eq!(map_key(key(KeyCode::Right), InputMode::Form), KeyAction::NextOption);
        assert_eq!(map_key(key(KeyCode::Enter), InputMode::Form), KeyAction::Submit);
        assert_eq!(map_key(key(KeyCode::Backspace), InputMode::Form), KeyAction::Backspace);
    }

    #[test]
    fn scroll_keys_in_browse() {
        assert_eq!(map_key(key(KeyCode::Up), InputMode::Browse), KeyAction::ScrollUp);
        assert_eq!(map_key(key(KeyCode::PageDown), InputMode::Browse), KeyAction::PageDown);
    }

    #[test]
    fn unknown_key() {
        assert_eq!(map_key(key(KeyCode::Char('z')), InputMode::Browse), KeyAction::None);
        assert_eq!(map_key(key(KeyCode::F(5)), InputMode::Form), KeyAction::None);
    }
}
