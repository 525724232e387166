//! Clap derive structures for the `gigactl` CLI.
//!
//! Defines the command tree, global flags, and shared value enums.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// gigactl -- command-line client for Gigaset Elements
#[derive(Debug, Parser)]
#[command(
    name = "gigactl",
    version,
    about = "Control a Gigaset Elements home-security system from the command line",
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
    /// Configuration file (overrides the default search paths)
    #[arg(long, short = 'c', env = "GIGA_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Ignore configuration files at the predefined locations
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Username (email) in use with my.gigaset-elements.com
    #[arg(long, short = 'u', env = "GIGA_USERNAME", global = true)]
    pub username: Option<String>,

    /// Password in use with my.gigaset-elements.com
    #[arg(long, short = 'p', env = "GIGA_PASSWORD", global = true, hide_env = true)]
    pub password: Option<String>,

    /// Pushbullet token for command notifications
    #[arg(long, env = "GIGA_NOTIFY", global = true, value_name = "TOKEN", hide_env = true)]
    pub notify: Option<String>,

    /// Output format
    #[arg(long, short = 'o', env = "GIGA_OUTPUT", default_value = "table", global = true)]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output and notifications
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept invalid TLS certificates
    #[arg(long, short = 'k', env = "GIGA_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, env = "GIGA_TIMEOUT", default_value = "90", global = true)]
    pub timeout: u64,
}

// ── Value enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Formatted lines / tables (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// One identifier per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

/// Security mode of the basestation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Mode {
    Home,
    Away,
    Custom,
    Night,
}

impl Mode {
    /// Parse a mode name from the configuration file.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "home" => Some(Self::Home),
            "away" => Some(Self::Away),
            "custom" => Some(Self::Custom),
            "night" => Some(Self::Night),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Away => "away",
            Self::Custom => "custom",
            Self::Night => "night",
        }
    }
}

/// Event category filter, matching the API's `group` parameter.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EventGroup {
    Door,
    Window,
    Motion,
    Siren,
    Plug,
    Button,
    Homecoming,
    Intrusion,
    Systemhealth,
    Camera,
}

impl EventGroup {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Door => "door",
            Self::Window => "window",
            Self::Motion => "motion",
            Self::Siren => "siren",
            Self::Plug => "plug",
            Self::Button => "button",
            Self::Homecoming => "homecoming",
            Self::Intrusion => "intrusion",
            Self::Systemhealth => "systemhealth",
            Self::Camera => "camera",
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::On => "on",
            Self::Off => "off",
        }
    }
}

// ── Commands ─────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show system health and the active mode
    Status,

    /// Switch the active security mode
    Mode(ModeArgs),

    /// Show basestation and sensor status
    Sensors,

    /// Show camera status
    Cameras,

    /// Camera operations (stream, record, snapshot)
    Camera(CameraArgs),

    /// Turn the siren on or off
    Siren { state: Switch },

    /// Turn the smart plug on or off
    Plug { state: Switch },

    /// Toggle camera privacy mode
    Privacy { state: Switch },

    /// List historical events
    Events(EventsArgs),

    /// Poll for new events and print them as they appear
    Monitor(MonitorArgs),

    /// List automation rules
    Rules,

    /// List registered notification channels
    Notifications,

    /// Schedule mode switches via cron
    Cron(CronArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ModeArgs {
    /// Target mode (defaults to `modus` from the configuration file)
    pub mode: Option<Mode>,

    /// Arm with an entry delay (seconds)
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<u32>,
}

#[derive(Debug, Args)]
pub struct CameraArgs {
    #[command(subcommand)]
    pub command: CameraCommand,
}

#[derive(Debug, Subcommand)]
pub enum CameraCommand {
    /// Print the live stream URIs
    Stream {
        /// Camera id (defaults to the first registered camera)
        id: Option<String>,
    },
    /// Start or stop cloud recording
    Record {
        action: RecordAction,
        /// Camera id (defaults to the first registered camera)
        id: Option<String>,
    },
    /// Save a fresh snapshot
    Snapshot {
        /// Camera id (defaults to the first registered camera)
        id: Option<String>,
        /// Output file
        #[arg(long, short = 'f', default_value = "snapshot.jpg")]
        file: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RecordAction {
    Start,
    Stop,
}

impl RecordAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
        }
    }
}

#[derive(Debug, Args)]
pub struct EventsArgs {
    /// Show the last <N> events
    #[arg(long, short = 'n', default_value = "10")]
    pub limit: u32,

    /// Filter events on category
    #[arg(long, short = 'g')]
    pub group: Option<EventGroup>,

    /// Filter events on begin and end date
    #[arg(long, short = 'd', num_args = 2, value_names = ["DD/MM/YYYY", "DD/MM/YYYY"])]
    pub date: Option<Vec<String>>,
}

#[derive(Debug, Args)]
pub struct MonitorArgs {
    /// Only monitor one event category
    #[arg(long, short = 'g')]
    pub group: Option<EventGroup>,

    /// Forward events and state changes to the configured bridge
    #[arg(long)]
    pub bridge: bool,

    /// Reconnect and restart the loop after a transport failure
    #[arg(long)]
    pub restart: bool,

    /// Delay before a restart attempt (seconds)
    #[arg(long, default_value = "60", value_name = "SECONDS")]
    pub restart_delay: u64,
}

#[derive(Debug, Args)]
pub struct CronArgs {
    #[command(subcommand)]
    pub command: CronCommand,
}

#[derive(Debug, Subcommand)]
pub enum CronCommand {
    /// Schedule a one-shot mode switch at HH:MM
    Add {
        /// Time of day, HH:MM
        at: String,
        /// Mode to switch to (defaults to `modus` from the configuration file)
        #[arg(long, short = 'm')]
        mode: Option<Mode>,
    },
    /// Remove all cron jobs created by gigactl
    Remove,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell
    pub shell: clap_complete::Shell,
}
