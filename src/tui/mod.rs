pub mod app;
pub mod event;
pub mod surface;
pub mod ui;
pub mod widgets;

use crate::capability;
use crate::config::Config;
use crate::event::EventKind;
use crate::keys::Keys;
use crate::tracker::{listener, KeyTracker};
use anyhow::Result;
use chrono::Local;
use crossterm::{
    event::{
        DisableFocusChange, EnableFocusChange, Event, KeyEventKind, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use log::LevelFilter;
use ratatui::prelude::*;
use std::convert::Infallible;
use std::io;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::time::Duration;

pub use app::{App, KeyActivity, Stats};
pub use event::Control;
pub use surface::TerminalSurface;

/// Terminal features switched on for the session
#[derive(Debug, Clone, Copy)]
struct TerminalFeatures {
    keyboard_enhancement: bool,
    focus_events: bool,
}

/// Setup terminal for TUI mode
fn setup_terminal(features: TerminalFeatures) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if features.keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )?;
    }
    if features.focus_events {
        execute!(stdout, EnableFocusChange)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal to normal mode
fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    features: TerminalFeatures,
) -> Result<()> {
    if features.focus_events {
        execute!(terminal.backend_mut(), DisableFocusChange)?;
    }
    if features.keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the key tracking demo
pub fn run_tui(config: Config) -> Result<()> {
    // Terminal handlers never hold up the terminal's own processing.
    capability::probe_passive_support(|| Ok::<_, Infallible>(true));

    let features = TerminalFeatures {
        keyboard_enhancement: config.terminal.keyboard_enhancement
            && supports_keyboard_enhancement().unwrap_or(false),
        focus_events: config.terminal.focus_events,
    };

    // Disable logging to prevent interference with TUI display
    log::set_max_level(LevelFilter::Off);

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        if features.keyboard_enhancement {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableFocusChange);
        original_hook(panic);
    }));

    let surface = TerminalSurface::new(features.keyboard_enhancement);
    let tracker = KeyTracker::with_target(&surface);
    tracker.set_prevent_default(config.tracker.prevent_default);
    tracker.set_suppress_repeat(config.tracker.suppress_repeat);

    // Both listeners report the tracker's view of the held keys to the app.
    let (event_tx, event_rx) = mpsc::channel::<KeyActivity>();
    let report = listener(move |event| {
        let pressed = event
            .keyboard()
            .map(|keyboard| keyboard.pressed_codes())
            .unwrap_or_default();
        let _ = event_tx.send(KeyActivity {
            at: Local::now(),
            kind: event.kind(),
            code: event.code(),
            pressed,
        });
    });
    tracker.on_key_down(report.clone());
    tracker.on_key_up(report);

    let mut app = App::new(event_rx, &config, surface.release_events());
    app.attached = tracker.is_attached();

    let mut terminal = setup_terminal(features)?;

    let tick_rate = Duration::from_millis(config.display.tick_rate_ms.max(1));

    let result = run_event_loop(&mut terminal, &mut app, &tracker, &surface, tick_rate, running);

    tracker.detach();
    restore_terminal(&mut terminal, features)?;

    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tracker: &KeyTracker,
    surface: &Rc<TerminalSurface>,
    tick_rate: Duration,
    running: Arc<AtomicBool>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if crossterm::event::poll(tick_rate)? {
            let event = crossterm::event::read()?;
            handle_terminal_event(&event, app, tracker, surface);
        }

        // Listener reports from this turn
        app.process_pending();

        if !app.running || !running.load(Ordering::SeqCst) {
            running.store(false, Ordering::SeqCst);
            break;
        }
    }

    Ok(())
}

fn handle_terminal_event(
    input: &Event,
    app: &mut App,
    tracker: &KeyTracker,
    surface: &Rc<TerminalSurface>,
) {
    if let Event::Key(key) = input {
        if let Some(control) = event::control_for(key) {
            if key.kind != KeyEventKind::Release {
                apply_control(control, app, tracker, surface);
            }
            return;
        }
    }

    let escape = Keys::get("ESCAPE");
    for delivered in surface.dispatch(input) {
        // Default action of Esc
        if delivered.kind() == EventKind::KeyDown
            && delivered.code() == escape
            && !delivered.default_prevented()
        {
            app.running = false;
        }
    }
}

/// Apply a reserved control and mirror the tracker state into the app
pub fn apply_control(
    control: Control,
    app: &mut App,
    tracker: &KeyTracker,
    surface: &Rc<TerminalSurface>,
) {
    match control {
        Control::Quit => app.running = false,
        Control::ToggleHelp => app.show_help = !app.show_help,
        Control::ToggleSuppressRepeat => {
            tracker.set_suppress_repeat(!tracker.suppress_repeat());
        }
        Control::TogglePreventDefault => {
            tracker.set_prevent_default(!tracker.prevent_default());
        }
        Control::ToggleAttach => {
            if tracker.is_attached() {
                tracker.detach();
            } else {
                tracker.attach(surface);
            }
        }
    }

    app.attached = tracker.is_attached();
    app.suppress_repeat = tracker.suppress_repeat();
    app.prevent_default = tracker.prevent_default();
}
