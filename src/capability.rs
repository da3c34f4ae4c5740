//! Process-wide host capabilities, probed once.

use crate::target::ListenerOptions;
use log::debug;
use once_cell::sync::OnceCell;
use std::fmt::Display;

static PASSIVE_SUPPORTED: OnceCell<bool> = OnceCell::new();

/// Run `probe` the first time this is called and remember the answer.
///
/// A failing probe counts as "unsupported". Later calls return the stored
/// value without running their probe.
pub fn probe_passive_support<F, E>(probe: F) -> bool
where
    F: FnOnce() -> Result<bool, E>,
    E: Display,
{
    *PASSIVE_SUPPORTED.get_or_init(|| match probe() {
        Ok(supported) => {
            debug!("Passive listener support: {}", supported);
            supported
        }
        Err(e) => {
            debug!("Passive listener probe failed, assuming unsupported: {}", e);
            false
        }
    })
}

/// Whether passive listeners are supported; `false` until probed
pub fn passive_supported() -> bool {
    PASSIVE_SUPPORTED.get().copied().unwrap_or(false)
}

/// Options used for every handler a tracker registers
pub fn listener_options() -> ListenerOptions {
    ListenerOptions {
        passive: passive_supported(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_runs_once() {
        // Shared process state: whichever probe runs first wins, and every
        // later call must agree with it without running its own probe.
        let first = probe_passive_support(|| Ok::<_, String>(true));
        let second = probe_passive_support(|| -> Result<bool, String> {
            panic!("probe ran twice")
        });

        assert_eq!(first, second);
        assert_eq!(passive_supported(), first);
        assert_eq!(listener_options().passive, first);
    }
}
