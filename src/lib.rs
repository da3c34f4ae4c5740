pub mod capability;
pub mod config;
pub mod error;
pub mod event;
pub mod keys;
pub mod target;
pub mod tracker;
pub mod tui;

pub use config::Config;
pub use error::LookupError;
pub use event::{EventKind, KeyEvent};
pub use keys::{KeyCodes, Keys};
pub use target::{Handler, KeyTarget, ListenerOptions};
pub use tracker::{listener, KeyTracker, Listener, Subscription};
