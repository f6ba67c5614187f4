//! Configuration file loading and flag merging

use anyhow::{Context, Result};
use lin_trace_decoder::MonitorConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Application configuration (loaded from a TOML file)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub port: PortConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PortConfig {
    pub device: Option<String>,
    /// Baud rate, 0 for the device default
    pub speed: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub diff: bool,
    #[serde(default)]
    pub strip_cr: bool,
}

/// Values given explicitly on the command line
#[derive(Debug, Clone, Default)]
pub struct FlagOverrides {
    pub device: Option<String>,
    pub speed: Option<u32>,
    pub diff: bool,
    pub strip_cr: bool,
}

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    Ok(config)
}

/// Combine file settings and flags into a validated monitor configuration
///
/// Flags win over the file; the file wins over built-in defaults. Boolean
/// flags can only switch a mode on.
pub fn resolve(file: Option<AppConfig>, flags: FlagOverrides) -> Result<MonitorConfig> {
    let file = file.unwrap_or_default();
    let mut config = MonitorConfig::new();

    if let Some(device) = flags.device.or(file.port.device) {
        config = config.with_device(device);
    }
    if let Some(speed) = flags.speed.or(file.port.speed) {
        config = config.with_baud(speed);
    }
    config = config
        .with_diff_mode(flags.diff || file.output.diff)
        .with_strip_cr(flags.strip_cr || file.output.strip_cr);

    config.validate().context("Invalid configuration")
}
