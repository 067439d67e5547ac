//! Clap derive structures for the `kiosync` CLI.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use kiosync_core::Action;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// kiosync -- sync a kiosk-browser tablet with your home-automation hub
#[derive(Debug, Parser)]
#[command(
    name = "kiosync",
    version,
    about = "Poll and remote-control a kiosk-browser tablet",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Tablet hostname or IP (overrides config file)
    #[arg(long, short = 'H', env = "KIOSYNC_HOST", global = true)]
    pub host: Option<String>,

    /// Tablet control port
    #[arg(long, env = "KIOSYNC_PORT", global = true)]
    pub port: Option<u16>,

    /// Remote-admin username
    #[arg(long, short = 'u', env = "KIOSYNC_USERNAME", global = true)]
    pub username: Option<String>,

    /// Remote-admin password
    #[arg(long, env = "KIOSYNC_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Refresh interval in seconds (non-numeric values fall back to 60)
    #[arg(long, short = 'i', env = "KIOSYNC_INTERVAL", global = true)]
    pub interval: Option<String>,

    /// Request timeout in seconds
    #[arg(long, env = "KIOSYNC_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Config file path
    #[arg(long, env = "KIOSYNC_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the sync daemon until interrupted
    Run,

    /// Fetch and print the current tablet snapshot
    #[command(alias = "st")]
    Status,

    /// Switch the screen on or off
    Screen {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Enable or disable the screensaver
    Screensaver {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Enable or disable motion detection
    Motion {
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Navigate the tablet back to its configured start URL
    Reload,

    /// Set the screen brightness (0-100)
    Brightness {
        #[arg(value_parser = clap::value_parser!(u8).range(0..=100))]
        level: u8,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl From<Toggle> for Action {
    fn from(toggle: Toggle) -> Self {
        match toggle {
            Toggle::On => Action::TurnOn,
            Toggle::Off => Action::TurnOff,
        }
    }
}
