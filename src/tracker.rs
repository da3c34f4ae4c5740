//! Held-key tracking for a single key target.
//!
//! A [`KeyTracker`] registers key-down, key-up and focus-loss handlers on one
//! [`KeyTarget`], keeps the list of key codes currently held, and relays the
//! notifications to its own down/up listeners.

use crate::capability;
use crate::event::{EventKind, KeyEvent};
use crate::target::{Handler, KeyTarget, ListenerOptions};
use log::{debug, trace};
use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

/// A tracker subscriber. Identity is `Rc` pointer identity.
pub type Listener = Rc<dyn Fn(&KeyEvent)>;

pub(crate) type WeakState = Weak<RefCell<TrackerState>>;

/// Wrap a closure as a [`Listener`]
pub fn listener<F>(f: F) -> Listener
where
    F: Fn(&KeyEvent) + 'static,
{
    Rc::new(f)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListenerList {
    Down,
    Up,
}

pub(crate) struct TrackerState {
    prevent_default: bool,
    suppress_repeat: bool,
    /// Held key codes, oldest press first
    pressed: Vec<u32>,
    down_listeners: Vec<Listener>,
    up_listeners: Vec<Listener>,
    binding: Option<Binding>,
    /// Bumped on every attach; handlers of older bindings ignore events
    generation: u64,
}

/// Wiring installed on the bound target by `attach`
struct Binding {
    target: Weak<dyn KeyTarget>,
    handlers: Vec<(EventKind, Handler)>,
    options: ListenerOptions,
    made_focusable: bool,
    generation: u64,
}

impl Binding {
    /// Unwire the target. A target that cannot remove listeners keeps its
    /// wiring, and the binding is handed back.
    fn release(self) -> Option<Binding> {
        let Some(target) = self.target.upgrade() else {
            debug!("Bound target already dropped, clearing binding");
            return None;
        };

        if !target.supports_listener_removal() {
            debug!("Bound target does not support listener removal, staying attached");
            return Some(self);
        }

        for (kind, handler) in &self.handlers {
            target.remove_listener(*kind, handler, self.options);
        }

        if self.made_focusable && !target.is_text_input() && target.tab_index() < 0 {
            target.remove_tab_index();
        }

        debug!("Detached from target");
        None
    }
}

impl TrackerState {
    fn new() -> Self {
        TrackerState {
            prevent_default: false,
            suppress_repeat: false,
            pressed: Vec::new(),
            down_listeners: Vec::new(),
            up_listeners: Vec::new(),
            binding: None,
            generation: 0,
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.binding
            .as_ref()
            .is_some_and(|binding| binding.generation == generation)
    }

    fn listeners_mut(&mut self, list: ListenerList) -> &mut Vec<Listener> {
        match list {
            ListenerList::Down => &mut self.down_listeners,
            ListenerList::Up => &mut self.up_listeners,
        }
    }

    fn remove_listener(&mut self, list: ListenerList, listener: &Listener) {
        let listeners = self.listeners_mut(list);
        if let Some(index) = listeners.iter().position(|l| Rc::ptr_eq(l, listener)) {
            listeners.remove(index);
        }
    }

    /// Update held keys for one notification and return the listeners to fire
    fn handle(&mut self, kind: EventKind, event: &KeyEvent) -> Vec<Listener> {
        if self.prevent_default {
            event.prevent_default();
        }

        match kind {
            EventKind::KeyDown => {
                let Some(code) = event.code() else {
                    return Vec::new();
                };

                let is_new_press = !self.pressed.contains(&code);
                if is_new_press {
                    self.pressed.push(code);
                }

                if is_new_press || !self.suppress_repeat {
                    trace!("Key down {} (new: {})", code, is_new_press);
                    self.down_listeners.clone()
                } else {
                    trace!("Key down {} suppressed as repeat", code);
                    Vec::new()
                }
            }
            EventKind::KeyUp => {
                if let Some(code) = event.code() {
                    if let Some(index) = self.pressed.iter().position(|&c| c == code) {
                        self.pressed.remove(index);
                    }
                    trace!("Key up {}", code);
                }
                self.up_listeners.clone()
            }
            EventKind::Blur => {
                trace!("Focus lost, releasing {} held keys", self.pressed.len());
                self.pressed.clear();
                self.up_listeners.clone()
            }
        }
    }
}

impl Drop for TrackerState {
    fn drop(&mut self) {
        if let Some(binding) = self.binding.take() {
            let _ = binding.release();
        }
    }
}

fn make_handler(kind: EventKind, state: WeakState, generation: u64) -> Handler {
    Rc::new(move |event: &mut KeyEvent| {
        let Some(shared) = state.upgrade() else {
            return;
        };

        // Listeners run with the state unborrowed so they can call back in.
        let listeners = {
            let mut current = shared.borrow_mut();
            if !current.is_current(generation) {
                return;
            }
            event.set_keyboard(state.clone());
            current.handle(kind, event)
        };
        let event: &KeyEvent = event;
        for listener in &listeners {
            listener(event);
        }
    })
}

/// Tracks held keys on one target and relays its key notifications.
///
/// Cloning yields another handle to the same tracker. Dropping the last
/// handle detaches from the bound target.
#[derive(Clone)]
pub struct KeyTracker {
    state: Rc<RefCell<TrackerState>>,
}

impl KeyTracker {
    pub fn new() -> Self {
        KeyTracker {
            state: Rc::new(RefCell::new(TrackerState::new())),
        }
    }

    /// Create a tracker already attached to `target`
    pub fn with_target<T: KeyTarget + 'static>(target: &Rc<T>) -> Self {
        let tracker = Self::new();
        tracker.attach(target);
        tracker
    }

    pub(crate) fn from_state(state: Rc<RefCell<TrackerState>>) -> Self {
        KeyTracker { state }
    }

    /// Bind to `target`, detaching from any previously bound target first.
    ///
    /// A target that is not a text input and has a negative tab index gets an
    /// explicit tab index of -1 so it can receive focus. If the previous
    /// target cannot remove listeners, its handlers stay registered but
    /// ignore further events.
    pub fn attach<T: KeyTarget + 'static>(&self, target: &Rc<T>) {
        self.detach();

        let generation = {
            let mut state = self.state.borrow_mut();
            if state.binding.take().is_some() {
                debug!("Replacing a binding whose target cannot remove listeners");
            }
            state.generation += 1;
            state.generation
        };

        let target: Rc<dyn KeyTarget> = target.clone();

        let made_focusable = !target.is_text_input() && target.tab_index() < 0;
        if made_focusable {
            target.set_tab_index(-1);
        }

        let options = capability::listener_options();
        let handlers: Vec<(EventKind, Handler)> = EventKind::ALL
            .iter()
            .map(|&kind| {
                let handler = make_handler(kind, Rc::downgrade(&self.state), generation);
                (kind, handler)
            })
            .collect();

        for (kind, handler) in &handlers {
            target.add_listener(*kind, handler.clone(), options);
        }

        self.state.borrow_mut().binding = Some(Binding {
            target: Rc::downgrade(&target),
            handlers,
            options,
            made_focusable,
            generation,
        });

        debug!(
            "Attached to target (passive: {}, made focusable: {})",
            options.passive, made_focusable
        );
    }

    /// Remove all handlers from the bound target. Held keys and listeners are
    /// kept. No-op when unbound or when the target cannot remove listeners.
    pub fn detach(&self) {
        let binding = self.state.borrow_mut().binding.take();
        if let Some(kept) = binding.and_then(Binding::release) {
            self.state.borrow_mut().binding = Some(kept);
        }
    }

    pub fn is_attached(&self) -> bool {
        self.state.borrow().binding.is_some()
    }

    pub fn set_prevent_default(&self, prevent_default: bool) {
        self.state.borrow_mut().prevent_default = prevent_default;
    }

    pub fn prevent_default(&self) -> bool {
        self.state.borrow().prevent_default
    }

    /// When set, key-down listeners only hear the first press of a held key
    pub fn set_suppress_repeat(&self, suppress_repeat: bool) {
        self.state.borrow_mut().suppress_repeat = suppress_repeat;
    }

    pub fn suppress_repeat(&self) -> bool {
        self.state.borrow().suppress_repeat
    }

    pub fn on_key_down(&self, listener: Listener) -> Subscription {
        self.subscribe(ListenerList::Down, listener)
    }

    pub fn on_key_up(&self, listener: Listener) -> Subscription {
        self.subscribe(ListenerList::Up, listener)
    }

    fn subscribe(&self, list: ListenerList, listener: Listener) -> Subscription {
        self.state
            .borrow_mut()
            .listeners_mut(list)
            .push(listener.clone());

        Subscription {
            state: Rc::downgrade(&self.state),
            list,
            listener,
            active: Cell::new(true),
        }
    }

    pub fn remove_key_down(&self, listener: &Listener) {
        self.state
            .borrow_mut()
            .remove_listener(ListenerList::Down, listener);
    }

    pub fn remove_key_up(&self, listener: &Listener) {
        self.state
            .borrow_mut()
            .remove_listener(ListenerList::Up, listener);
    }

    pub fn clear_key_down(&self) {
        self.state.borrow_mut().down_listeners.clear();
    }

    pub fn clear_key_up(&self) {
        self.state.borrow_mut().up_listeners.clear();
    }

    pub fn has_key_pressed(&self, code: u32) -> bool {
        self.state.borrow().pressed.contains(&code)
    }

    /// Most recently pressed key that is still held
    pub fn last_key_pressed(&self) -> Option<u32> {
        self.state.borrow().pressed.last().copied()
    }

    /// Held key codes in press order
    pub fn pressed_codes(&self) -> Vec<u32> {
        self.state.borrow().pressed.clone()
    }
}

impl Default for KeyTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for KeyTracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("KeyTracker")
            .field("prevent_default", &state.prevent_default)
            .field("suppress_repeat", &state.suppress_repeat)
            .field("pressed", &state.pressed)
            .field("down_listeners", &state.down_listeners.len())
            .field("up_listeners", &state.up_listeners.len())
            .field("attached", &state.binding.is_some())
            .finish()
    }
}

/// Handle returned by `on_key_down` / `on_key_up`
pub struct Subscription {
    state: WeakState,
    list: ListenerList,
    listener: Listener,
    active: Cell<bool>,
}

impl Subscription {
    /// Remove the subscribed listener. Only the first call has an effect.
    pub fn unsubscribe(&self) {
        if !self.active.replace(false) {
            return;
        }
        if let Some(state) = self.state.upgrade() {
            state.borrow_mut().remove_listener(self.list, &self.listener);
        }
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Registration {
        kind: EventKind,
        handler: Handler,
        options: ListenerOptions,
    }

    struct MockTarget {
        text_input: bool,
        removable: bool,
        tab_index: Cell<Option<i32>>,
        registrations: RefCell<Vec<Registration>>,
    }

    impl MockTarget {
        fn new() -> Rc<Self> {
            Rc::new(MockTarget {
                text_input: false,
                removable: true,
                tab_index: Cell::new(None),
                registrations: RefCell::new(Vec::new()),
            })
        }

        fn emit(&self, mut event: KeyEvent) -> KeyEvent {
            let handlers: Vec<Handler> = self
                .registrations
                .borrow()
                .iter()
                .filter(|r| r.kind == event.kind())
                .map(|r| r.handler.clone())
                .collect();
            for handler in handlers {
                handler(&mut event);
            }
            event
        }

        fn press(&self, code: u32) -> KeyEvent {
            self.emit(KeyEvent::key_down(code))
        }

        fn release(&self, code: u32) -> KeyEvent {
            self.emit(KeyEvent::key_up(code))
        }

        fn registration_count(&self) -> usize {
            self.registrations.borrow().len()
        }
    }

    impl KeyTarget for MockTarget {
        fn is_text_input(&self) -> bool {
            self.text_input
        }

        fn tab_index(&self) -> i32 {
            self.tab_index.get().unwrap_or(-1)
        }

        fn set_tab_index(&self, index: i32) {
            self.tab_index.set(Some(index));
        }

        fn remove_tab_index(&self) {
            self.tab_index.set(None);
        }

        fn add_listener(&self, kind: EventKind, handler: Handler, options: ListenerOptions) {
            self.registrations.borrow_mut().push(Registration {
                kind,
                handler,
                options,
            });
        }

        fn remove_listener(&self, kind: EventKind, handler: &Handler, options: ListenerOptions) {
            self.registrations
                .borrow_mut()
                .retain(|r| !(r.kind == kind && r.options == options && Rc::ptr_eq(&r.handler, handler)));
        }

        fn supports_listener_removal(&self) -> bool {
            self.removable
        }
    }

    fn counter() -> (Rc<Cell<usize>>, Listener) {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        (count, listener(move |_| c.set(c.get() + 1)))
    }

    #[test]
    fn test_press_release_replay() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);

        target.press(65);
        target.press(83);
        target.press(13);
        target.release(83);
        target.press(65);
        target.press(16);
        target.release(99);

        assert_eq!(tracker.pressed_codes(), vec![65, 13, 16]);
        assert!(tracker.has_key_pressed(13));
        assert!(!tracker.has_key_pressed(83));
    }

    #[test]
    fn test_scenario_a_and_s() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let (ups, on_up) = counter();
        tracker.on_key_down(on_down);
        tracker.on_key_up(on_up);

        target.press(65);
        assert_eq!(tracker.pressed_codes(), vec![65]);
        assert_eq!(downs.get(), 1);

        target.press(65);
        assert_eq!(downs.get(), 2);

        tracker.set_suppress_repeat(true);
        target.press(65);
        assert_eq!(downs.get(), 2);
        assert_eq!(tracker.pressed_codes(), vec![65]);

        target.release(65);
        assert!(tracker.pressed_codes().is_empty());
        assert_eq!(ups.get(), 1);

        target.press(65);
        target.press(83);
        assert_eq!(downs.get(), 4);
        target.emit(KeyEvent::blur());
        assert!(tracker.pressed_codes().is_empty());
        assert_eq!(ups.get(), 2);
    }

    #[test]
    fn test_release_unpressed_still_notifies() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (ups, on_up) = counter();
        tracker.on_key_up(on_up);

        target.press(40);
        target.release(41);

        assert_eq!(tracker.pressed_codes(), vec![40]);
        assert_eq!(ups.get(), 1);
    }

    #[test]
    fn test_blur_on_empty_tracker_fires_once() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (ups, on_up) = counter();
        tracker.on_key_up(on_up);

        target.emit(KeyEvent::blur());

        assert_eq!(ups.get(), 1);
        assert!(tracker.pressed_codes().is_empty());
    }

    #[test]
    fn test_last_key_pressed() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        assert_eq!(tracker.last_key_pressed(), None);

        target.press(17);
        target.press(67);
        assert_eq!(tracker.last_key_pressed(), Some(67));

        target.press(17);
        assert_eq!(tracker.last_key_pressed(), Some(67));

        target.release(67);
        assert_eq!(tracker.last_key_pressed(), Some(17));
    }

    #[test]
    fn test_unsubscribe_only_removes_one_listener() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (first, on_first) = counter();
        let (second, on_second) = counter();
        let subscription = tracker.on_key_down(on_first);
        tracker.on_key_down(on_second);

        target.press(65);
        subscription.unsubscribe();
        subscription.unsubscribe();
        target.press(66);

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 2);
    }

    #[test]
    fn test_unsubscribe_removes_single_duplicate() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (count, on_down) = counter();
        let first = tracker.on_key_down(on_down.clone());
        tracker.on_key_down(on_down);

        first.unsubscribe();
        first.unsubscribe();
        target.press(65);

        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_remove_and_clear_listeners() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let (ups, on_up) = counter();
        let (other, on_other) = counter();
        tracker.on_key_down(on_down.clone());
        tracker.on_key_up(on_up.clone());
        tracker.on_key_up(on_other);

        tracker.remove_key_down(&on_down);
        tracker.remove_key_down(&on_down);
        tracker.remove_key_up(&on_down);
        target.press(65);
        target.release(65);
        assert_eq!(downs.get(), 0);
        assert_eq!(ups.get(), 1);

        tracker.clear_key_up();
        target.release(65);
        assert_eq!(ups.get(), 1);
        assert_eq!(other.get(), 1);

        tracker.on_key_down(on_down);
        tracker.clear_key_down();
        target.press(65);
        assert_eq!(downs.get(), 0);
    }

    #[test]
    fn test_prevent_default() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);

        assert!(!target.press(65).default_prevented());

        tracker.set_prevent_default(true);
        assert!(tracker.prevent_default());
        assert!(target.press(65).default_prevented());
        assert!(target.release(65).default_prevented());
        assert!(target.emit(KeyEvent::blur()).default_prevented());
    }

    #[test]
    fn test_suppressed_repeat_still_prevents_default() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        tracker.set_suppress_repeat(true);
        tracker.set_prevent_default(true);

        target.press(65);
        assert!(target.press(65).default_prevented());
    }

    #[test]
    fn test_event_carries_tracker() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s = seen.clone();
        tracker.on_key_down(listener(move |event| {
            if let Some(keyboard) = event.keyboard() {
                s.borrow_mut().push(keyboard.pressed_codes());
            }
        }));

        target.press(65);
        let event = target.press(83);

        assert_eq!(*seen.borrow(), vec![vec![65], vec![65, 83]]);
        assert!(event.keyboard().is_some());
    }

    #[test]
    fn test_attach_wires_target() {
        let target = MockTarget::new();
        let tracker = KeyTracker::new();
        assert!(!tracker.is_attached());

        tracker.attach(&target);

        assert!(tracker.is_attached());
        assert_eq!(target.registration_count(), 3);
        assert_eq!(target.tab_index.get(), Some(-1));
        let options = target.registrations.borrow()[0].options;
        assert!(target.registrations.borrow().iter().all(|r| r.options == options));
        for kind in EventKind::ALL {
            assert!(target.registrations.borrow().iter().any(|r| r.kind == kind));
        }
    }

    #[test]
    fn test_detach_unwires_target() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        tracker.on_key_down(on_down);
        target.press(65);

        tracker.detach();
        tracker.detach();

        assert!(!tracker.is_attached());
        assert_eq!(target.registration_count(), 0);
        assert_eq!(target.tab_index.get(), None);

        target.press(66);
        assert_eq!(downs.get(), 1);
        assert_eq!(tracker.pressed_codes(), vec![65]);
    }

    #[test]
    fn test_existing_tab_index_is_kept() {
        let target = MockTarget::new();
        target.set_tab_index(0);
        let tracker = KeyTracker::with_target(&target);
        assert_eq!(target.tab_index.get(), Some(0));

        tracker.detach();
        assert_eq!(target.tab_index.get(), Some(0));
    }

    #[test]
    fn test_text_input_tab_index_untouched() {
        let target = Rc::new(MockTarget {
            text_input: true,
            removable: true,
            tab_index: Cell::new(None),
            registrations: RefCell::new(Vec::new()),
        });
        let tracker = KeyTracker::with_target(&target);
        assert_eq!(target.tab_index.get(), None);

        tracker.detach();
        assert_eq!(target.registration_count(), 0);
    }

    #[test]
    fn test_tab_index_changed_while_attached_is_kept() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        target.set_tab_index(2);

        tracker.detach();
        assert_eq!(target.tab_index.get(), Some(2));
    }

    #[test]
    fn test_reattach_detaches_previous_target() {
        let first = MockTarget::new();
        let second = MockTarget::new();
        let tracker = KeyTracker::with_target(&first);
        let (downs, on_down) = counter();
        tracker.on_key_down(on_down);

        tracker.attach(&second);

        assert_eq!(first.registration_count(), 0);
        assert_eq!(first.tab_index.get(), None);
        assert_eq!(second.registration_count(), 3);

        first.press(65);
        second.press(66);
        assert_eq!(downs.get(), 1);
        assert_eq!(tracker.pressed_codes(), vec![66]);
    }

    fn unremovable_target() -> Rc<MockTarget> {
        Rc::new(MockTarget {
            text_input: false,
            removable: false,
            tab_index: Cell::new(None),
            registrations: RefCell::new(Vec::new()),
        })
    }

    #[test]
    fn test_detach_without_listener_removal() {
        let target = unremovable_target();
        let tracker = KeyTracker::with_target(&target);

        tracker.detach();

        assert!(tracker.is_attached());
        assert_eq!(target.registration_count(), 3);
        assert_eq!(target.tab_index.get(), Some(-1));

        target.press(65);
        assert_eq!(tracker.pressed_codes(), vec![65]);
    }

    #[test]
    fn test_reattach_from_unremovable_target() {
        let first = unremovable_target();
        let second = MockTarget::new();
        let tracker = KeyTracker::with_target(&first);
        let (downs, on_down) = counter();
        tracker.on_key_down(on_down);

        tracker.detach();
        tracker.attach(&second);

        assert!(tracker.is_attached());
        assert_eq!(first.registration_count(), 3);
        assert_eq!(second.registration_count(), 3);

        first.press(65);
        second.press(66);
        first.emit(KeyEvent::blur());
        assert_eq!(downs.get(), 1);
        assert_eq!(tracker.pressed_codes(), vec![66]);
        assert!(first.press(67).keyboard().is_none());
    }

    #[test]
    fn test_detach_after_target_dropped() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        drop(target);

        tracker.detach();
        assert!(!tracker.is_attached());
    }

    #[test]
    fn test_dropping_tracker_detaches() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let clone = tracker.clone();
        drop(tracker);
        assert_eq!(target.registration_count(), 3);

        drop(clone);
        assert_eq!(target.registration_count(), 0);
        assert_eq!(target.tab_index.get(), None);
    }

    #[test]
    fn test_listener_can_detach_during_dispatch() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let handle = tracker.clone();
        tracker.on_key_down(listener(move |_| handle.detach()));
        tracker.on_key_down(on_down);

        target.press(65);
        target.press(66);

        assert_eq!(downs.get(), 1);
        assert_eq!(target.registration_count(), 0);
    }

    #[test]
    fn test_removal_during_dispatch_applies_next_time() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let handle = tracker.clone();
        tracker.on_key_down(listener(move |_| handle.clear_key_down()));
        tracker.on_key_down(on_down);

        target.press(65);
        target.press(66);

        assert_eq!(downs.get(), 1);
    }

    #[test]
    fn test_unsubscribe_during_dispatch_applies_next_time() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let subscription = Rc::new(tracker.on_key_down(on_down));
        let s = subscription.clone();
        tracker.on_key_down(listener(move |_| s.unsubscribe()));

        target.press(65);
        assert_eq!(downs.get(), 1);

        target.press(66);
        assert_eq!(downs.get(), 1);
    }

    #[test]
    fn test_subscribe_during_dispatch_applies_next_time() {
        let target = MockTarget::new();
        let tracker = KeyTracker::with_target(&target);
        let (downs, on_down) = counter();
        let handle = tracker.clone();
        let added = Cell::new(false);
        tracker.on_key_down(listener(move |_| {
            if !added.replace(true) {
                handle.on_key_down(on_down.clone());
            }
        }));

        target.press(65);
        assert_eq!(downs.get(), 0);

        target.press(66);
        assert_eq!(downs.get(), 1);
    }

    #[test]
    fn test_unsubscribe_after_tracker_dropped() {
        let tracker = KeyTracker::new();
        let (_, on_down) = counter();
        let subscription = tracker.on_key_down(on_down);
        drop(tracker);

        subscription.unsubscribe();
    }

    proptest! {
        #[test]
        fn test_pressed_matches_replayed_stream(
            stream in prop::collection::vec((any::<bool>(), 60u32..68), 0..64),
            suppress_repeat in any::<bool>(),
        ) {
            let target = MockTarget::new();
            let tracker = KeyTracker::with_target(&target);
            tracker.set_suppress_repeat(suppress_repeat);
            let (downs, on_down) = counter();
            let (ups, on_up) = counter();
            tracker.on_key_down(on_down);
            tracker.on_key_up(on_up);

            let mut held: Vec<u32> = Vec::new();
            let mut expected_downs = 0;
            let mut expected_ups = 0;

            for (is_press, code) in stream {
                if is_press {
                    let is_new = !held.contains(&code);
                    if is_new {
                        held.push(code);
                    }
                    if is_new || !suppress_repeat {
                        expected_downs += 1;
                    }
                    target.press(code);
                } else {
                    held.retain(|&c| c != code);
                    expected_ups += 1;
                    target.release(code);
                }

                prop_assert_eq!(tracker.pressed_codes(), held.clone());
            }

            let mut unique = tracker.pressed_codes();
            unique.sort_unstable();
            unique.dedup();
            prop_assert_eq!(unique.len(), held.len());
            prop_assert_eq!(downs.get(), expected_downs);
            prop_assert_eq!(ups.get(), expected_ups);
        }
    }
}
