use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub tracker: TrackerConfig,
    pub display: DisplayConfig,
    #[serde(default)]
    pub terminal: TerminalConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Suppress the host's default handling of tracked events
    pub prevent_default: bool,
    /// Only report the first key down of a held key
    pub suppress_repeat: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub tick_rate_ms: u64,
    pub max_log_entries: usize,
    /// Show key labels next to codes
    pub show_labels: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalConfig {
    /// Ask the terminal for key release and repeat reporting
    pub keyboard_enhancement: bool,
    /// Ask the terminal for focus change reporting
    pub focus_events: bool,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        TerminalConfig {
            keyboard_enhancement: true,
            focus_events: true,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config = serde_json::from_str(&content)
            .with_context(|| "Failed to parse config file")?;

        Ok(config)
    }

    pub fn default_config() -> Self {
        Config {
            tracker: TrackerConfig::default(),
            display: DisplayConfig {
                tick_rate_ms: 50,
                max_log_entries: 200,
                show_labels: true,
            },
            terminal: TerminalConfig::default(),
        }
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}
