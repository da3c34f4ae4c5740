//! The boundary between a tracker and the surface it listens on.

use crate::event::{EventKind, KeyEvent};
use std::rc::Rc;

/// Callback a target invokes for one registered notification.
///
/// Registrations are identified by `Rc` pointer identity, so removal must pass
/// the same handler that was added.
pub type Handler = Rc<dyn Fn(&mut KeyEvent)>;

/// Registration hints passed along with a handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListenerOptions {
    /// The handler promises not to block the target's own processing
    pub passive: bool,
}

/// An input surface able to receive focus and emit key notifications.
///
/// Methods take `&self`: targets are shared with the tracker through `Rc` and
/// keep their mutable state behind `Cell`/`RefCell`. A target must not hold a
/// borrow of its registrations while calling handlers, since a handler may
/// remove itself.
pub trait KeyTarget {
    /// Text inputs are focusable on their own and keep their tab index
    fn is_text_input(&self) -> bool {
        false
    }

    /// Current tab index; negative means the target does not take focus
    /// through the tab order
    fn tab_index(&self) -> i32;

    fn set_tab_index(&self, index: i32);

    /// Drop an explicitly assigned tab index, restoring the target's default
    fn remove_tab_index(&self);

    fn add_listener(&self, kind: EventKind, handler: Handler, options: ListenerOptions);

    fn remove_listener(&self, kind: EventKind, handler: &Handler, options: ListenerOptions);

    fn supports_listener_removal(&self) -> bool {
        true
    }
}
