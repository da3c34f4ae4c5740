use crate::event::{EventKind, KeyEvent};
use crate::target::{Handler, KeyTarget, ListenerOptions};
use crate::tui::event::key_code_for;
use crossterm::event::{Event, KeyEventKind};
use log::trace;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

struct Registration {
    kind: EventKind,
    handler: Handler,
    options: ListenerOptions,
}

/// The terminal window as a key target.
///
/// The surface only takes key input while it has a tab index, mirroring an
/// element that cannot receive focus. Without key release reporting from the
/// terminal, every key down is followed by a synthesized key up.
pub struct TerminalSurface {
    tab_index: Cell<Option<i32>>,
    registrations: RefCell<Vec<Registration>>,
    release_events: bool,
}

impl TerminalSurface {
    pub fn new(release_events: bool) -> Rc<Self> {
        Rc::new(TerminalSurface {
            tab_index: Cell::new(None),
            registrations: RefCell::new(Vec::new()),
            release_events,
        })
    }

    pub fn is_focusable(&self) -> bool {
        self.tab_index.get().is_some()
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    pub fn handler_count(&self) -> usize {
        self.registrations.borrow().len()
    }

    /// Feed one terminal event to the registered handlers and return the key
    /// events that were delivered, in order
    pub fn dispatch(&self, event: &Event) -> Vec<KeyEvent> {
        match event {
            Event::Key(key) => {
                if !self.is_focusable() {
                    return Vec::new();
                }
                let Some(code) = key_code_for(key) else {
                    trace!("No key code for {:?}", key.code);
                    return Vec::new();
                };

                match key.kind {
                    KeyEventKind::Press | KeyEventKind::Repeat => {
                        let mut delivered = vec![self.emit(KeyEvent::key_down(code))];
                        if !self.release_events {
                            delivered.push(self.emit(KeyEvent::key_up(code)));
                        }
                        delivered
                    }
                    KeyEventKind::Release => vec![self.emit(KeyEvent::key_up(code))],
                }
            }
            Event::FocusLost => vec![self.emit(KeyEvent::blur())],
            _ => Vec::new(),
        }
    }

    fn emit(&self, mut event: KeyEvent) -> KeyEvent {
        // Snapshot so handlers may remove themselves.
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
}

impl KeyTarget for TerminalSurface {
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
        let mut registrations = self.registrations.borrow_mut();
        if let Some(index) = registrations.iter().position(|r| {
            r.kind == kind && r.options == options && Rc::ptr_eq(&r.handler, handler)
        }) {
            registrations.remove(index);
        }
    }
}
