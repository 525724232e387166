//! CLI-owned configuration: TOML file, credential resolution, and
//! translation to `giga_core::SessionConfig`.
//!
//! Core never sees these types -- it receives a pre-built `SessionConfig`.
//! The file is searched across fixed OS paths plus the per-user config
//! directory; an explicitly given path must exist.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use url::Url;

use giga_core::{BridgeConfig, SessionConfig};

use crate::cli::{GlobalOpts, Mode};
use crate::error::CliError;

const DEFAULT_TIMEOUT_SECS: u64 = 90;

// ── TOML config structs ──────────────────────────────────────────────

/// On-disk configuration. Sections mirror the classic config file.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub accounts: Accounts,
    #[serde(default)]
    pub options: Options,
    #[serde(default)]
    pub bridge: BridgeSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Accounts {
    pub username: Option<String>,
    pub password: Option<String>,
    /// Pushbullet token.
    pub pbtoken: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Options {
    /// Default security mode for `mode` and `cron add`.
    pub modus: Option<String>,
    #[serde(default)]
    pub insecure: bool,
    pub timeout: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct BridgeSection {
    /// Home-automation server base URL.
    pub url: Option<String>,
    /// Lower-cased device id -> bridge idx.
    #[serde(default)]
    pub ids: HashMap<String, u32>,
}

// ── Resolution result ────────────────────────────────────────────────

/// Effective options after merging flags, env, file, and defaults.
pub struct Resolved {
    pub session: SessionConfig,
    pub pbtoken: Option<String>,
    pub bridge: Option<BridgeConfig>,
    /// `modus` from the file, used when `mode`/`cron add` get no
    /// explicit mode.
    pub default_mode: Option<Mode>,
    /// Whether both credentials came from the file (cron embeds -u/-p
    /// only when they did not).
    pub creds_from_file: bool,
}

// ── Config file discovery ────────────────────────────────────────────

/// Fixed search locations, lowest to highest precedence. The last
/// existing file wins.
pub fn search_paths() -> Vec<PathBuf> {
    let mut paths = vec![
        PathBuf::from("/opt/etc/gigactl.toml"),
        PathBuf::from("/usr/local/etc/gigactl.toml"),
        PathBuf::from("/etc/gigactl.toml"),
    ];
    if let Some(dirs) = ProjectDirs::from("de", "gigactl", "gigactl") {
        paths.push(dirs.config_dir().join("gigactl.toml"));
    }
    paths
}

fn find_config(global: &GlobalOpts) -> Result<Option<PathBuf>, CliError> {
    if let Some(ref path) = global.config {
        if !path.exists() {
            return Err(CliError::NoConfig { path: path.display().to_string() });
        }
        return Ok(Some(path.clone()));
    }
    if global.no_config {
        return Ok(None);
    }
    Ok(search_paths().into_iter().filter(|p| p.exists()).next_back())
}

fn load_file(path: Option<&PathBuf>) -> Result<FileConfig, CliError> {
    let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));
    if let Some(path) = path {
        tracing::info!("reading configuration from {}", path.display());
        figment = figment.merge(Toml::file(path));
    }
    let config: FileConfig = figment.merge(Env::prefixed("GIGA_").split("_")).extract()?;
    Ok(config)
}

// ── Merge ────────────────────────────────────────────────────────────

/// An empty string in the file means "absent", not a literal empty
/// credential.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Resolve the effective options for this run. Flag > env > file.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let file = load_file(find_config(global)?.as_ref())?;
    merge(global, file)
}

fn merge(global: &GlobalOpts, file: FileConfig) -> Result<Resolved, CliError> {
    let file_username = non_empty(file.accounts.username);
    let file_password = non_empty(file.accounts.password);
    let creds_from_file =
        global.username.is_none() && global.password.is_none() && file_username.is_some();

    let username = global
        .username
        .clone()
        .or(file_username)
        .ok_or(CliError::NoCredentials)?;
    let password = global
        .password
        .clone()
        .or(file_password)
        .ok_or(CliError::NoCredentials)?;

    let timeout = if global.timeout == DEFAULT_TIMEOUT_SECS {
        file.options.timeout.unwrap_or(DEFAULT_TIMEOUT_SECS)
    } else {
        global.timeout
    };

    let default_mode = match non_empty(file.options.modus) {
        Some(name) => Some(Mode::parse(&name).ok_or_else(|| CliError::Validation {
            field: "options.modus".into(),
            reason: format!("'{name}' is not one of home, away, custom, night"),
        })?),
        None => None,
    };

    let bridge = match non_empty(file.bridge.url) {
        Some(raw) => {
            let base_url: Url = raw.parse().map_err(|_| CliError::Validation {
                field: "bridge.url".into(),
                reason: format!("invalid URL: {raw}"),
            })?;
            Some(BridgeConfig { base_url, ids: file.bridge.ids })
        }
        None => None,
    };

    Ok(Resolved {
        session: SessionConfig {
            username,
            password: SecretString::from(password),
            timeout: Duration::from_secs(timeout),
            insecure: global.insecure || file.options.insecure,
        },
        pbtoken: global.notify.clone().or(non_empty(file.accounts.pbtoken)),
        bridge,
        default_mode,
        creds_from_file,
    })
}
