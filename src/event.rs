use crate::tracker::{KeyTracker, WeakState};
use std::cell::Cell;
use std::fmt;

/// The low-level notifications a key target emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    /// The target lost input focus
    Blur,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::KeyDown, EventKind::KeyUp, EventKind::Blur];

    pub fn name(self) -> &'static str {
        match self {
            EventKind::KeyDown => "keydown",
            EventKind::KeyUp => "keyup",
            EventKind::Blur => "blur",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An input notification as seen by handlers and tracker listeners
pub struct KeyEvent {
    kind: EventKind,
    code: Option<u32>,
    default_prevented: Cell<bool>,
    keyboard: Option<WeakState>,
}

impl KeyEvent {
    pub fn key_down(code: u32) -> Self {
        Self::new(EventKind::KeyDown, Some(code))
    }

    pub fn key_up(code: u32) -> Self {
        Self::new(EventKind::KeyUp, Some(code))
    }

    pub fn blur() -> Self {
        Self::new(EventKind::Blur, None)
    }

    fn new(kind: EventKind, code: Option<u32>) -> Self {
        KeyEvent {
            kind,
            code,
            default_prevented: Cell::new(false),
            keyboard: None,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Raw key code; `None` for focus loss
    pub fn code(&self) -> Option<u32> {
        self.code
    }

    /// Ask the host to skip its default handling of this event
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    /// The tracker that handled this event, if it is still alive
    pub fn keyboard(&self) -> Option<KeyTracker> {
        self.keyboard
            .as_ref()
            .and_then(|weak| weak.upgrade())
            .map(KeyTracker::from_state)
    }

    pub(crate) fn set_keyboard(&mut self, state: WeakState) {
        self.keyboard = Some(state);
    }
}

impl fmt::Debug for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyEvent")
            .field("kind", &self.kind)
            .field("code", &self.code)
            .field("default_prevented", &self.default_prevented.get())
            .field("has_keyboard", &self.keyboard.is_some())
            .finish()
    }
}
