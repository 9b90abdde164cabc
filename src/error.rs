//! # Error Types Module
//!
//! Centralized error handling for the DaqView application.
//! Provides custom error types for each module with proper context and error chaining.
//!
//! ## Error Types
//! - `DaqError`: Device driver failures (open, configure, stream)
//! - `LogError`: CSV log sink I/O failures
//! - `SessionError`: Anything fatal to a running acquisition session
//! - `ConfigError`: Configuration file I/O and parsing errors
//!
//! ## Propagation Policy
//! Any error during `start()` aborts the transition to Running and releases
//! everything acquired so far. Any error during `poll_step()` is fatal to the
//! current session: the stream is stopped and the handle closed. There is no
//! retry or reconnect; the policy is fail-stop.

use std::fmt;

/// Errors originating at the device driver boundary
#[derive(Debug)]
pub enum DaqError {
    /// Driver could not open a device handle
    DeviceOpen(String),
    /// A configuration register write was rejected
    ConfigWrite { name: String, reason: String },
    /// Streaming could not begin
    StreamStart(String),
    /// A stream read failed mid-session
    StreamRead(String),
    /// `start()` was called while a session is already running
    AlreadyRunning,
}

impl fmt::Display for DaqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DaqError::DeviceOpen(msg) => {
                write!(f, "Failed to open DAQ device: {}", msg)
            }
            DaqError::ConfigWrite { name, reason } => {
                write!(f, "Failed to write device config {}: {}", name, reason)
            }
            DaqError::StreamStart(msg) => {
                write!(f, "Failed to start stream: {}", msg)
            }
            DaqError::StreamRead(msg) => {
                write!(f, "Stream read failed: {}", msg)
            }
            DaqError::AlreadyRunning => {
                write!(f, "Acquisition session is already running")
            }
        }
    }
}

impl std::error::Error for DaqError {}

/// Errors from the CSV log sink
#[derive(Debug)]
pub enum LogError {
    /// Failed to create the log file
    Create(std::io::Error),
    /// Failed to append a row
    Write(std::io::Error),
}

impl fmt::Display for LogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogError::Create(e) => {
                write!(f, "Failed to create log file: {}", e)
            }
            LogError::Write(e) => {
                write!(f, "Failed to write log row: {}", e)
            }
        }
    }
}

impl std::error::Error for LogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogError::Create(e) => Some(e),
            LogError::Write(e) => Some(e),
        }
    }
}

/// Anything that can end a session, from `start()` or `poll_step()`
#[derive(Debug)]
pub enum SessionError {
    /// Driver-side failure
    Driver(DaqError),
    /// Log sink failure
    Log(LogError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Driver(e) => write!(f, "{}", e),
            SessionError::Log(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Driver(e) => Some(e),
            SessionError::Log(e) => Some(e),
        }
    }
}

impl From<DaqError> for SessionError {
    fn from(e: DaqError) -> Self {
        SessionError::Driver(e)
    }
}

impl From<LogError> for SessionError {
    fn from(e: LogError) -> Self {
        SessionError::Log(e)
    }
}

/// Errors that can occur during configuration operations
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to read config file
    ReadFailed(std::io::Error),
    /// Failed to write config file
    WriteFailed(std::io::Error),
    /// Failed to parse config file
    ParseFailed(toml::de::Error),
    /// Failed to serialize config
    SerializeFailed(toml::ser::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ReadFailed(e) => {
                write!(f, "Failed to read config file: {}", e)
            }
            ConfigError::WriteFailed(e) => {
                write!(f, "Failed to write config file: {}", e)
            }
            ConfigError::ParseFailed(e) => {
                write!(f, "Failed to parse config file: {}", e)
            }
            ConfigError::SerializeFailed(e) => {
                write!(f, "Failed to serialize config: {}", e)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ReadFailed(e) => Some(e),
            ConfigError::WriteFailed(e) => Some(e),
            ConfigError::ParseFailed(e) => Some(e),
            ConfigError::SerializeFailed(e) => Some(e),
        }
    }
}
