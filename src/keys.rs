//! Static key tables: symbolic key names to numeric key codes (`Keys`) and
//! key codes to display labels (`KeyCodes`).
//!
//! Codes follow the legacy browser `keyCode` numbering, which is also what the
//! terminal host produces.

use crate::error::LookupError;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Name, code and display label of every known key, ordered by code
static KEY_TABLE: &[(&str, u32, &str)] = &[
    ("BACKSPACE_DELETE", 8, "BACKSPACE/DELETE"),
    ("TAB", 9, "TAB"),
    ("ENTER", 13, "ENTER"),
    ("SHIFT", 16, "SHIFT"),
    ("CTRL", 17, "CTRL"),
    ("ALT", 18, "ALT"),
    ("CAPSLOCK", 20, "CAPSLOCK"),
    ("ESCAPE", 27, "ESCAPE"),
    ("SPACE_BAR", 32, "SPACE BAR"),
    ("LEFT", 37, "LEFT"),
    ("UP", 38, "UP"),
    ("RIGHT", 39, "RIGHT"),
    ("DOWN", 40, "DOWN"),
    ("0", 48, "0"),
    ("1", 49, "1"),
    ("2", 50, "2"),
    ("3", 51, "3"),
    ("4", 52, "4"),
    ("5", 53, "5"),
    ("6", 54, "6"),
    ("7", 55, "7"),
    ("8", 56, "8"),
    ("9", 57, "9"),
    ("SEMICOLON_FIREFOX", 59, "SEMICOLON (FIREFOX)"),
    ("A", 65, "A"),
    ("B", 66, "B"),
    ("C", 67, "C"),
    ("D", 68, "D"),
    ("E", 69, "E"),
    ("F", 70, "F"),
    ("G", 71, "G"),
    ("H", 72, "H"),
    ("I", 73, "I"),
    ("J", 74, "J"),
    ("K", 75, "K"),
    ("L", 76, "L"),
    ("M", 77, "M"),
    ("N", 78, "N"),
    ("O", 79, "O"),
    ("P", 80, "P"),
    ("Q", 81, "Q"),
    ("R", 82, "R"),
    ("S", 83, "S"),
    ("T", 84, "T"),
    ("U", 85, "U"),
    ("V", 86, "V"),
    ("W", 87, "W"),
    ("X", 88, "X"),
    ("Y", 89, "Y"),
    ("Z", 90, "Z"),
    ("META_LEFT", 91, "META LEFT"),
    ("META_RIGHT", 93, "META RIGHT"),
    ("NUMPAD_0", 96, "NUMPAD 0"),
    ("NUMPAD_1", 97, "NUMPAD 1"),
    ("NUMPAD_2", 98, "NUMPAD 2"),
    ("NUMPAD_3", 99, "NUMPAD 3"),
    ("NUMPAD_4", 100, "NUMPAD 4"),
    ("NUMPAD_5", 101, "NUMPAD 5"),
    ("NUMPAD_6", 102, "NUMPAD 6"),
    ("NUMPAD_7", 103, "NUMPAD 7"),
    ("NUMPAD_8", 104, "NUMPAD 8"),
    ("NUMPAD_9", 105, "NUMPAD 9"),
    ("NUMPAD_MULTIPLY", 106, "NUMPAD MULTIPLY"),
    ("NUMPAD_ADD", 107, "NUMPAD ADD"),
    ("NUMPAD_SUBTRACT", 109, "NUMPAD SUBTRACT"),
    ("NUMPAD_DECIMAL_POINT", 110, "NUMPAD DECIMAL POINT"),
    ("NUMPAD_DIVIDE", 111, "NUMPAD DIVIDE"),
    ("SEMICOLON", 186, "SEMICOLON"),
    ("EQUAL", 187, "EQUAL"),
    ("COMMA", 188, "COMMA"),
    ("MINUS", 189, "SUBTRACT"),
    ("PERIOD", 190, "PERIOD"),
    ("SLASH", 191, "SLASH"),
    ("BACK_QUOTE", 192, "BACK QUOTE"),
    ("BRACKET_LEFT", 219, "BRACKET LEFT"),
    ("BACK_SLASH", 220, "BACK SLASH"),
    ("BRACKET_RIGHT", 221, "BRACKET RIGHT"),
    ("QUOTE", 222, "QUOTE"),
    ("META_FIREFOX", 224, "META (FIREFOX)"),
];

static KEYS: Lazy<HashMap<&'static str, u32>> = Lazy::new(|| {
    KEY_TABLE
        .iter()
        .map(|&(name, code, _)| (name, code))
        .collect()
});

static KEY_CODES: Lazy<HashMap<u32, &'static str>> = Lazy::new(|| {
    KEY_TABLE
        .iter()
        .map(|&(_, code, label)| (code, label))
        .collect()
});

/// One row of the key table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEntry {
    pub name: &'static str,
    pub code: u32,
    pub label: &'static str,
}

/// Symbolic key name to key code mapping
pub struct Keys;

impl Keys {
    /// Look up the code for an exact key name such as `"ENTER"` or `"NUMPAD_5"`
    pub fn get(name: &str) -> Option<u32> {
        KEYS.get(name).copied()
    }

    pub fn len() -> usize {
        KEYS.len()
    }

    /// All (name, code) pairs, ordered by code
    pub fn iter() -> impl Iterator<Item = (&'static str, u32)> {
        KEY_TABLE.iter().map(|&(name, code, _)| (name, code))
    }
}

/// Key code to display label mapping
pub struct KeyCodes;

impl KeyCodes {
    pub fn get(code: u32) -> Option<&'static str> {
        KEY_CODES.get(&code).copied()
    }

    pub fn len() -> usize {
        KEY_CODES.len()
    }

    /// All (code, label) pairs, ordered by code
    pub fn iter() -> impl Iterator<Item = (u32, &'static str)> {
        KEY_TABLE.iter().map(|&(_, code, label)| (code, label))
    }
}

/// Full table rows, ordered by code
pub fn entries() -> impl Iterator<Item = KeyEntry> {
    KEY_TABLE.iter().map(|&(name, code, label)| KeyEntry { name, code, label })
}

/// Label for display, falling back to the bare number for unknown codes
pub fn label_or_code(code: u32) -> String {
    match KeyCodes::get(code) {
        Some(label) => label.to_string(),
        None => format!("#{}", code),
    }
}

/// Resolve a user query: a decimal key code, or a key name.
///
/// Names match case-insensitively and accept spaces or dashes in place of
/// underscores, so `"numpad 5"` and `"space-bar"` both resolve. A bare digit
/// is always read as a code; use the code (`48`) for the `0` key.
pub fn lookup(query: &str) -> Result<KeyEntry, LookupError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(LookupError::Empty);
    }

    if let Ok(code) = query.parse::<u32>() {
        return entries()
            .find(|entry| entry.code == code)
            .ok_or(LookupError::UnknownCode(code));
    }

    let normalized = query.to_uppercase().replace([' ', '-'], "_");
    entries()
        .find(|entry| entry.name == normalized)
        .ok_or_else(|| LookupError::UnknownName(query.to_string()))
}
