// Event handling utilities for the TUI: translating crossterm key events
// into tracker key codes and recognising the demo's reserved controls.

use crossterm::event::{KeyCode, KeyEvent, KeyEventState, KeyModifiers, ModifierKeyCode};

/// Demo controls handled by the event loop and never dispatched to the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Quit,
    ToggleHelp,
    ToggleSuppressRepeat,
    TogglePreventDefault,
    ToggleAttach,
}

/// Recognise a reserved control key
pub fn control_for(key: &KeyEvent) -> Option<Control> {
    match key.code {
        KeyCode::Char('c') | KeyCode::Char('C')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            Some(Control::Quit)
        }
        KeyCode::F(1) => Some(Control::ToggleHelp),
        KeyCode::F(2) => Some(Control::ToggleSuppressRepeat),
        KeyCode::F(3) => Some(Control::TogglePreventDefault),
        KeyCode::F(4) => Some(Control::ToggleAttach),
        _ => None,
    }
}

/// Convert a crossterm key to its legacy browser key code (US layout)
pub fn key_code_for(key: &KeyEvent) -> Option<u32> {
    if key.state.contains(KeyEventState::KEYPAD) {
        if let KeyCode::Char(c) = key.code {
            if let Some(code) = keypad_code(c) {
                return Some(code);
            }
        }
    }

    let code = match key.code {
        KeyCode::Backspace => 8,
        KeyCode::Tab | KeyCode::BackTab => 9,
        KeyCode::Enter => 13,
        KeyCode::Pause => 19,
        KeyCode::CapsLock => 20,
        KeyCode::Esc => 27,
        KeyCode::PageUp => 33,
        KeyCode::PageDown => 34,
        KeyCode::End => 35,
        KeyCode::Home => 36,
        KeyCode::Left => 37,
        KeyCode::Up => 38,
        KeyCode::Right => 39,
        KeyCode::Down => 40,
        KeyCode::PrintScreen => 44,
        KeyCode::Insert => 45,
        KeyCode::Delete => 46,
        KeyCode::Menu => 93,
        KeyCode::F(n @ 1..=24) => 111 + n as u32,
        KeyCode::NumLock => 144,
        KeyCode::ScrollLock => 145,
        KeyCode::Modifier(modifier) => return modifier_code(modifier),
        KeyCode::Char(c) => return char_code(c),
        _ => return None,
    };

    Some(code)
}

fn modifier_code(modifier: ModifierKeyCode) -> Option<u32> {
    match modifier {
        ModifierKeyCode::LeftShift | ModifierKeyCode::RightShift => Some(16),
        ModifierKeyCode::LeftControl | ModifierKeyCode::RightControl => Some(17),
        ModifierKeyCode::LeftAlt | ModifierKeyCode::RightAlt | ModifierKeyCode::IsoLevel3Shift => {
            Some(18)
        }
        ModifierKeyCode::LeftSuper | ModifierKeyCode::LeftMeta => Some(91),
        ModifierKeyCode::RightSuper | ModifierKeyCode::RightMeta => Some(93),
        _ => None,
    }
}

fn keypad_code(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some(96 + (c as u32 - '0' as u32)),
        '*' => Some(106),
        '+' => Some(107),
        '-' => Some(109),
        '.' => Some(110),
        '/' => Some(111),
        _ => None,
    }
}

fn char_code(c: char) -> Option<u32> {
    let code = match c {
        'a'..='z' | 'A'..='Z' => c.to_ascii_uppercase() as u32,
        '0'..='9' => c as u32,
        ' ' => 32,
        // Shifted digit row
        ')' => 48,
        '!' => 49,
        '@' => 50,
        '#' => 51,
        '$' => 52,
        '%' => 53,
        '^' => 54,
        '&' => 55,
        '*' => 56,
        '(' => 57,
        ';' | ':' => 186,
        '=' | '+' => 187,
        ',' | '<' => 188,
        '-' | '_' => 189,
        '.' | '>' => 190,
        '/' | '?' => 191,
        '`' | '~' => 192,
        '[' | '{' => 219,
        '\\' | '|' => 220,
        ']' | '}' => 221,
        '\'' | '"' => 222,
        _ => return None,
    };

    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::Keys;
    use crossterm::event::KeyEventKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(key_code_for(&key(KeyCode::Char('a'))), Keys::get("A"));
        assert_eq!(key_code_for(&key(KeyCode::Char('S'))), Keys::get("S"));
        assert_eq!(key_code_for(&key(KeyCode::Char('5'))), Keys::get("5"));
        assert_eq!(key_code_for(&key(KeyCode::Char('%'))), Keys::get("5"));
        assert_eq!(key_code_for(&key(KeyCode::Char(' '))), Keys::get("SPACE_BAR"));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_code_for(&key(KeyCode::Enter)), Keys::get("ENTER"));
        assert_eq!(key_code_for(&key(KeyCode::Esc)), Keys::get("ESCAPE"));
        assert_eq!(key_code_for(&key(KeyCode::Backspace)), Keys::get("BACKSPACE_DELETE"));
        assert_eq!(key_code_for(&key(KeyCode::Left)), Keys::get("LEFT"));
        assert_eq!(key_code_for(&key(KeyCode::F(5))), Some(116));
        assert_eq!(key_code_for(&key(KeyCode::Null)), None);
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(key_code_for(&key(KeyCode::Char('-'))), Keys::get("MINUS"));
        assert_eq!(key_code_for(&key(KeyCode::Char('{'))), Keys::get("BRACKET_LEFT"));
        assert_eq!(key_code_for(&key(KeyCode::Char('"'))), Keys::get("QUOTE"));
        assert_eq!(key_code_for(&key(KeyCode::Char('é'))), None);
    }

    #[test]
    fn test_modifiers_and_keypad() {
        assert_eq!(
            key_code_for(&key(KeyCode::Modifier(ModifierKeyCode::RightShift))),
            Keys::get("SHIFT")
        );
        assert_eq!(
            key_code_for(&key(KeyCode::Modifier(ModifierKeyCode::LeftSuper))),
            Keys::get("META_LEFT")
        );

        let keypad = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('5'),
            KeyModifiers::NONE,
            KeyEventKind::Press,
            KeyEventState::KEYPAD,
        );
        assert_eq!(key_code_for(&keypad), Keys::get("NUMPAD_5"));
    }

    #[test]
    fn test_controls() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(control_for(&ctrl_c), Some(Control::Quit));
        assert_eq!(control_for(&key(KeyCode::Char('c'))), None);
        assert_eq!(control_for(&key(KeyCode::F(1))), Some(Control::ToggleHelp));
        assert_eq!(control_for(&key(KeyCode::F(4))), Some(Control::ToggleAttach));
        assert_eq!(control_for(&key(KeyCode::Esc)), None);
    }
}
