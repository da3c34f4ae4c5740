pub mod event_log;
pub mod held_keys;
pub mod help_overlay;
pub mod stats_panel;
pub mod status_bar;
