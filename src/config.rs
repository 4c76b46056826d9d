use crate::sysfs::DEFAULT_ROOT;
use eyre::{eyre, Result, WrapErr};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

pub const CONFIG_FILE: &str = "blinky.toml";
pub const ENV_PREFIX: &str = "BLINKY_";

/// Settings as they appear in `blinky.toml` and `BLINKY_*` variables.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Settings {
    pub pin: u32,
    pub cycles: u32,
    pub period_ms: u64,
    pub sysfs_root: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            pin: 12,
            cycles: 10,
            period_ms: 1000,
            sysfs_root: PathBuf::from(DEFAULT_ROOT),
        }
    }
}

/// Values given on the command line. Unset fields leave lower layers alone.
#[derive(Serialize, Debug, Default, Clone)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pin: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sysfs_root: Option<PathBuf>,
}

/// What the pin controller runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlinkConfig {
    pub pin: u32,
    pub cycles: u32,
    pub period: Duration,
    pub sysfs_root: PathBuf,
}

impl Default for BlinkConfig {
    fn default() -> Self {
        Settings::default().into()
    }
}

impl From<Settings> for BlinkConfig {
    fn from(s: Settings) -> Self {
        Self {
            pin: s.pin,
            cycles: s.cycles,
            period: Duration::from_millis(s.period_ms),
            sysfs_root: s.sysfs_root,
        }
    }
}

/// Finds `blinky/blinky.toml` in the XDG config directories.
fn discover_config_file() -> Option<PathBuf> {
    match xdg::BaseDirectories::with_prefix("blinky") {
        Ok(dirs) => dirs.find_config_file(CONFIG_FILE),
        Err(e) => {
            warn!("Cannot resolve XDG config directories: {}", e);
            None
        }
    }
}

/// Layers defaults, the config file, `BLINKY_*` variables and `overrides`, in
/// increasing precedence.
///
/// An explicitly named config file must exist; a discovered one is optional.
pub fn load_config(explicit: Option<&Path>, overrides: &Overrides) -> Result<BlinkConfig> {
    let file = match explicit {
        Some(path) if !path.is_file() => {
            return Err(eyre!("configuration file {} not found", path.display()))
        }
        Some(path) => Some(path.to_path_buf()),
        None => discover_config_file(),
    };

    let mut figment = Figment::from(Serialized::defaults(Settings::default()));
    if let Some(path) = &file {
        debug!("Loading configuration from {}", path.display());
        figment = figment.merge(Toml::file(path));
    }
    let settings: Settings = figment
        .merge(Env::prefixed(ENV_PREFIX))
        .merge(Serialized::defaults(overrides))
        .extract()
        .wrap_err("invalid configuration")?;
    debug!("{:#?}", settings);
    Ok(settings.into())
}
