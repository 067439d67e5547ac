//! Config-file loading and `TabletConfig` resolution.
//!
//! Sources, lowest to highest priority: TOML config file, `KIOSYNC_*`
//! environment variables (wired through clap), CLI flags. The engine
//! itself never reads any of this -- it receives a resolved
//! [`TabletConfig`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Format, Toml};
use serde::Deserialize;
use tracing::warn;

use kiosync_core::TabletConfig;
use kiosync_core::config::{DEFAULT_PORT, DEFAULT_REFRESH};

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// On-disk configuration. Every field is optional; flags fill the gaps.
#[derive(Debug, Default, Deserialize)]
pub struct FileConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub refresh_interval: Option<RawInterval>,
    pub timeout: Option<u64>,
}

/// A refresh interval as it appears in the file: ideally a number, but a
/// quoted string is tolerated and parsed -- and an unparseable one falls
/// back to the default instead of failing startup.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawInterval {
    Seconds(u64),
    Text(String),
}

impl RawInterval {
    fn resolve(&self) -> Duration {
        match self {
            RawInterval::Seconds(secs) => Duration::from_secs(*secs),
            RawInterval::Text(text) => parse_interval(text),
        }
    }
}

/// Parse an interval string, falling back to the default on garbage.
pub fn parse_interval(raw: &str) -> Duration {
    match raw.trim().parse::<u64>() {
        Ok(secs) => Duration::from_secs(secs),
        Err(_) => {
            warn!(
                "invalid refresh interval {raw:?}, using default {}s",
                DEFAULT_REFRESH.as_secs()
            );
            DEFAULT_REFRESH
        }
    }
}

/// Default config file location (`~/.config/kiosync/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "kiosync")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or_else(|| PathBuf::from("kiosync.toml"))
}

/// Load the config file, tolerating absence and malformed content.
///
/// Config problems never abort startup -- a broken file logs a warning
/// and resolution continues from flags and defaults.
pub fn load_file_config(path: &Path) -> FileConfig {
    match Figment::from(Toml::file(path)).extract() {
        Ok(config) => config,
        Err(err) => {
            warn!("ignoring config file {}: {err}", path.display());
            FileConfig::default()
        }
    }
}

/// Resolve the final `TabletConfig` from file + flags.
pub fn resolve(global: &GlobalOpts) -> Result<TabletConfig, CliError> {
    let path = global.config.clone().unwrap_or_else(config_path);
    let file = load_file_config(&path);

    let host = global
        .host
        .clone()
        .or(file.host)
        .ok_or_else(|| CliError::NoHost {
            path: path.display().to_string(),
        })?;

    let interval = global
        .interval
        .as_deref()
        .map(parse_interval)
        .or_else(|| file.refresh_interval.as_ref().map(RawInterval::resolve))
        .unwrap_or(DEFAULT_REFRESH);

    let mut config = TabletConfig::new(host).with_refresh_interval(interval);
    config.port = global.port.or(file.port).unwrap_or(DEFAULT_PORT);
    config.username = global.username.clone().or(file.username);
    if let Some(password) = global.password.clone().or(file.password) {
        config.password = password.into();
    }
    if let Some(timeout) = global.timeout.or(file.timeout) {
        config.timeout = Duration::from_secs(timeout);
    }

    Ok(config)
}
