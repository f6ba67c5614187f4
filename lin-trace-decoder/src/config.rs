//! Monitor configuration types
//!
//! This module defines the immutable configuration record consumed by the
//! monitor and by the device layer. It is built once at startup (from flags,
//! a config file or both) and validated before the port is opened.

use crate::types::{MonitorError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Serial port used when none is given
pub const DEFAULT_DEVICE: &str = "/dev/cu.usbserial-A600dOYP";

/// Baud rate used when none is given
pub const DEFAULT_BAUD: u32 = 115_200;

/// Serial line speed
///
/// A numeric value of 0 means "leave the device's current speed alone" and
/// is kept distinct from any real rate. Serializes as the plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum BaudRate {
    /// Do not configure the port speed
    DeviceDefault,
    /// Configure the port to this many bits per second
    Fixed(u32),
}

impl From<u32> for BaudRate {
    fn from(value: u32) -> Self {
        match value {
            0 => BaudRate::DeviceDefault,
            rate => BaudRate::Fixed(rate),
        }
    }
}

impl From<BaudRate> for u32 {
    fn from(baud: BaudRate) -> Self {
        match baud {
            BaudRate::DeviceDefault => 0,
            BaudRate::Fixed(rate) => rate,
        }
    }
}

impl Default for BaudRate {
    fn default() -> Self {
        BaudRate::Fixed(DEFAULT_BAUD)
    }
}

impl fmt::Display for BaudRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaudRate::DeviceDefault => write!(f, "device default"),
            BaudRate::Fixed(rate) => write!(f, "{}", rate),
        }
    }
}

/// What the monitor prints for each line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Every line, timestamped, verbatim
    Raw,
    /// Only changed bits of parsed frames
    Diff,
}

/// Configuration for a monitoring session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Serial device path
    #[serde(default = "default_device")]
    pub device: String,

    /// Port speed (0 = device default)
    #[serde(default)]
    pub baud: BaudRate,

    /// Show only data changes instead of raw lines
    #[serde(default)]
    pub diff_mode: bool,

    /// Drop a carriage return preceding each line feed
    #[serde(default)]
    pub strip_cr: bool,
}

fn default_device() -> String {
    DEFAULT_DEVICE.to_string()
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            device: default_device(),
            baud: BaudRate::default(),
            diff_mode: false,
            strip_cr: false,
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the device path
    pub fn with_device(mut self, device: impl Into<String>) -> Self {
        self.device = device.into();
        self
    }

    /// Builder method: set the baud rate (0 = device default)
    pub fn with_baud(mut self, baud: impl Into<BaudRate>) -> Self {
        self.baud = baud.into();
        self
    }

    /// Builder method: enable or disable diff mode
    pub fn with_diff_mode(mut self, enabled: bool) -> Self {
        self.diff_mode = enabled;
        self
    }

    /// Builder method: enable or disable carriage return stripping
    pub fn with_strip_cr(mut self, enabled: bool) -> Self {
        self.strip_cr = enabled;
        self
    }

    pub fn output_mode(&self) -> OutputMode {
        if self.diff_mode {
            OutputMode::Diff
        } else {
            OutputMode::Raw
        }
    }

    /// Check the configuration before it is used
    pub fn validate(self) -> Result<Self> {
        if self.device.trim().is_empty() {
            return Err(MonitorError::InvalidConfig(
                "device path must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_config_builder() {
        let config = MonitorConfig::new()
            .with_device("/dev/ttyUSB0")
            .with_baud(19_200)
            .with_diff_mode(true)
            .with_strip_cr(true);

        assert_eq!(config.device, "/dev/ttyUSB0");
        assert_eq!(config.baud, BaudRate::Fixed(19_200));
        assert_eq!(config.output_mode(), OutputMode::Diff);
        assert!(config.strip_cr);
    }

    #[test]
    fn test_defaults() {
        let config = MonitorConfig::new();
        assert_eq!(config.device, DEFAULT_DEVICE);
        assert_eq!(config.baud, BaudRate::Fixed(115_200));
        assert_eq!(config.output_mode(), OutputMode::Raw);
    }

    #[test]
    fn test_zero_baud_means_device_default() {
        let config = MonitorConfig::new().with_baud(0);
        assert_eq!(config.baud, BaudRate::DeviceDefault);
        assert_eq!(u32::from(config.baud), 0);
        assert_eq!(config.baud.to_string(), "device default");
    }

    #[test]
    fn test_baud_serializes_as_number() {
        let config = MonitorConfig::new().with_baud(0);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["baud"], 0);

        let parsed: MonitorConfig =
            serde_json::from_str(r#"{"device": "/dev/ttyS1", "baud": 9600}"#).unwrap();
        assert_eq!(parsed.baud, BaudRate::Fixed(9600));
        assert!(!parsed.diff_mode);
    }

    #[test]
    fn test_validate() {
        assert!(MonitorConfig::new().validate().is_ok());
        assert!(matches!(
            MonitorConfig::new().with_device("  ").validate(),
            Err(MonitorError::InvalidConfig(_))
        ));
    }
}
