use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use keytrack::config::Config;
use keytrack::keys;
use keytrack::tui;
use log::{info, LevelFilter};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "keytrack")]
#[command(author = "spikehead")]
#[command(version = "0.1.0")]
#[command(about = "Held-key tracking and key code lookup")]
struct Cli {
    /// Config file path
    #[arg(short, long, default_value = "keytrack.json")]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show held keys and key events live in the terminal
    Tui {
        /// Suppress default handling of tracked keys (Esc no longer quits)
        #[arg(long)]
        prevent_default: bool,

        /// Only report the first key down while a key is held
        #[arg(long)]
        suppress_repeat: bool,
    },

    /// Print the key table
    Keys,

    /// Look up a key by name or code
    Lookup {
        /// Key name (e.g. "enter", "numpad 5") or numeric key code
        query: String,
    },

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_secs()
        .init();

    match cli.command {
        Commands::Init { force } => handle_init(&cli.config, force),
        Commands::Keys => handle_keys(),
        Commands::Lookup { query } => handle_lookup(&query),
        Commands::Tui {
            prevent_default,
            suppress_repeat,
        } => {
            let mut config = load_config(&cli.config)?;

            // Override config with CLI args
            if prevent_default {
                config.tracker.prevent_default = true;
            }
            if suppress_repeat {
                config.tracker.suppress_repeat = true;
            }

            tui::run_tui(config)
        }
    }
}

fn load_config(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load(path).context("Failed to load config")
    } else {
        info!("Config file not found, using defaults");
        Ok(Config::default())
    }
}

fn handle_keys() -> Result<()> {
    println!("{:>4}  {:<22} {}", "CODE", "NAME", "LABEL");
    println!("{}", "-".repeat(50));

    for entry in keys::entries() {
        println!("{:>4}  {:<22} {}", entry.code, entry.name, entry.label);
    }

    Ok(())
}

fn handle_lookup(query: &str) -> Result<()> {
    let entry = keys::lookup(query)?;

    println!("Code:  {}", entry.code);
    println!("Name:  {}", entry.name);
    println!("Label: {}", entry.label);

    Ok(())
}

fn handle_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{:?} already exists (use --force to overwrite)", path);
    }

    let config = Config::default();
    config.save(path)?;
    info!("Created {:?}", path);
    info!("Edit it to customize settings, then run 'keytrack tui'.");

    Ok(())
}
