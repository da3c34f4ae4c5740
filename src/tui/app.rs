use crate::config::Config;
use crate::event::EventKind;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::sync::mpsc;

/// One key notification as reported by the tracker's listeners
#[derive(Debug, Clone)]
pub struct KeyActivity {
    pub at: DateTime<Local>,
    pub kind: EventKind,
    pub code: Option<u32>,
    /// Held keys right after the tracker handled the event
    pub pressed: Vec<u32>,
}

/// Event counters
#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub key_downs: usize,
    pub key_ups: usize,
    pub focus_losses: usize,
    /// Most keys held at the same time
    pub max_held: usize,
}

/// Main application state
pub struct App {
    /// Whether the app is running
    pub running: bool,

    /// Held key codes, as last reported by the tracker
    pub pressed: Vec<u32>,

    /// Recent notifications (ring buffer)
    pub event_log: VecDeque<KeyActivity>,
    pub max_log_entries: usize,

    pub stats: Stats,

    /// Tracker flags mirrored for display
    pub attached: bool,
    pub suppress_repeat: bool,
    pub prevent_default: bool,

    /// Whether the terminal reports key releases
    pub release_events: bool,

    pub show_labels: bool,

    /// Help overlay visible
    pub show_help: bool,

    /// Listener reports
    pub event_rx: mpsc::Receiver<KeyActivity>,
}

impl App {
    pub fn new(event_rx: mpsc::Receiver<KeyActivity>, config: &Config, release_events: bool) -> Self {
        App {
            running: true,
            pressed: Vec::new(),
            event_log: VecDeque::new(),
            max_log_entries: config.display.max_log_entries.max(1),
            stats: Stats::default(),
            attached: false,
            suppress_repeat: config.tracker.suppress_repeat,
            prevent_default: config.tracker.prevent_default,
            release_events,
            show_labels: config.display.show_labels,
            show_help: false,
            event_rx,
        }
    }

    pub fn handle_activity(&mut self, activity: KeyActivity) {
        match activity.kind {
            EventKind::KeyDown => self.stats.key_downs += 1,
            EventKind::KeyUp => self.stats.key_ups += 1,
            EventKind::Blur => self.stats.focus_losses += 1,
        }

        self.pressed = activity.pressed.clone();
        self.stats.max_held = self.stats.max_held.max(self.pressed.len());

        if self.event_log.len() >= self.max_log_entries {
            self.event_log.pop_front();
        }
        self.event_log.push_back(activity);
    }

    /// Drain pending listener reports
    pub fn process_pending(&mut self) {
        while let Ok(activity) = self.event_rx.try_recv() {
            self.handle_activity(activity);
        }
    }

    pub fn last_pressed(&self) -> Option<u32> {
        self.pressed.last().copied()
    }
}
