//! # Configuration Management Module
//!
//! Persistent application settings stored in platform-appropriate locations.
//! Handles loading, saving, and providing defaults for configuration options.
//!
//! ## Settings
//! The `[stream]` table carries everything the acquisition session passes
//! through to the driver (device selection, scan rate, AIN2 range/negative
//! channel) plus the poll interval, plot history length, and log directory.
//!
//! ## Storage Location
//! - macOS: ~/Library/Application Support/daqview/config.toml
//! - Linux: ~/.config/daqview/config.toml
//! - Windows: %APPDATA%\daqview\config.toml
//!
//! ## Why TOML
//! Human-readable format allows manual editing if needed. Serde provides
//! automatic serialization/deserialization.

use crate::driver::{DeviceConfig, StreamSettings};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub stream: StreamConfig,
}

/// Fixed acquisition parameters, passed through to the driver unmodified.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    pub device_type: String,
    pub connection_type: String,
    pub identifier: String,
    pub scan_rate_hz: f64,
    pub scans_per_read: usize,
    pub poll_interval_ms: u64,
    /// Plot history length in samples
    pub buffer_capacity: usize,
    /// AIN2 input range in volts (±10 mV for the thermocouple)
    pub ain2_range: f64,
    /// Negative channel for differential AIN2 measurement
    pub ain2_negative_channel: u8,
    /// Directory for CSV log files
    pub log_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stream: StreamConfig::default(),
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            device_type: "ANY".to_string(),
            connection_type: "ANY".to_string(),
            identifier: "ANY".to_string(),
            scan_rate_hz: 1000.0,
            scans_per_read: 500,
            poll_interval_ms: 100,
            buffer_capacity: 500,
            ain2_range: 0.01,
            ain2_negative_channel: 3,
            log_dir: PathBuf::from("."),
        }
    }
}

impl StreamConfig {
    /// Device selection for `DaqDriver::open`
    pub fn device(&self) -> DeviceConfig {
        DeviceConfig {
            device_type: self.device_type.clone(),
            connection_type: self.connection_type.clone(),
            identifier: self.identifier.clone(),
        }
    }

    /// Stream parameters for `DaqDriver::stream_start`
    pub fn stream_settings(&self) -> StreamSettings {
        StreamSettings {
            scan_list: vec!["AIN0".to_string(), "AIN2".to_string()],
            scan_rate_hz: self.scan_rate_hz,
            scans_per_read: self.scans_per_read,
        }
    }
}

impl Config {
    /// Get the path to the config file
    fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("daqview").join("config.toml")
    }

    /// Load config from file, or create default if it doesn't exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        match fs::read_to_string(&path) {
            Ok(contents) => {
                let config = toml::from_str(&contents).map_err(ConfigError::ParseFailed)?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                // File doesn't exist, create default
                let config = Self::default();
                config.save()?; // Save default config
                Ok(config)
            }
            Err(e) => Err(ConfigError::ReadFailed(e)),
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path();

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::WriteFailed)?;
        }

        let toml_string = toml::to_string_pretty(self).map_err(ConfigError::SerializeFailed)?;
        fs::write(&path, toml_string).map_err(ConfigError::WriteFailed)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_observed_hardware_setup() {
        let config = Config::default();
        assert_eq!(config.stream.scan_rate_hz, 1000.0);
        assert_eq!(config.stream.scans_per_read, 500);
        assert_eq!(config.stream.poll_interval_ms, 100);
        assert_eq!(config.stream.buffer_capacity, 500);
        assert_eq!(config.stream.ain2_range, 0.01);
        assert_eq!(config.stream.ain2_negative_channel, 3);
    }

    #[test]
    fn test_stream_settings_scan_list() {
        let settings = StreamConfig::default().stream_settings();
        assert_eq!(settings.scan_list, vec!["AIN0", "AIN2"]);
        assert_eq!(settings.scans_per_read, 500);
    }

    #[test]
    fn test_config_round_trip() {
        let mut config = Config::default();
        config.stream.identifier = "470012345".to_string();
        config.stream.poll_interval_ms = 50;

        let toml_str = toml::to_string(&config).expect("Failed to serialize");
        let parsed: Config = toml::from_str(&toml_str).expect("Failed to deserialize");
        assert_eq!(parsed.stream.identifier, "470012345");
        assert_eq!(parsed.stream.poll_interval_ms, 50);
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
            [stream]
            device_type = "T7"
            connection_type = "USB"
            identifier = "ANY"
            scan_rate_hz = 2000.0
            scans_per_read = 1000
            poll_interval_ms = 100
            buffer_capacity = 500
            ain2_range = 0.01
            ain2_negative_channel = 3
            log_dir = "/tmp/daq-logs"
        "#;

        let config: Config = toml::from_str(toml_str).expect("Failed to deserialize");
        assert_eq!(config.stream.device_type, "T7");
        assert_eq!(config.stream.scan_rate_hz, 2000.0);
        assert_eq!(config.stream.log_dir, PathBuf::from("/tmp/daq-logs"));
    }
}
