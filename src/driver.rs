//! # Device Driver Boundary Module
//!
//! Trait interface over the DAQ hardware abstraction layer. The acquisition
//! session only sees this trait, so it can run against real hardware, the
//! built-in simulator, or a scripted test double.
//!
//! The surface mirrors the vendor streaming API: open a handle, write named
//! configuration registers, start a stream with a scan list, read batches,
//! stop, close. Channel addressing and range settings are passed through
//! unmodified; nothing here negotiates with the device.

use crate::error::DaqError;
use chrono::{DateTime, Local};

/// Device selection passed through to the driver, LJM `openS` style.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceConfig {
    /// Device type, e.g. "T7" or "ANY"
    pub device_type: String,
    /// Connection type, e.g. "USB" or "ANY"
    pub connection_type: String,
    /// Serial number, IP, or "ANY"
    pub identifier: String,
}

/// Stream configuration passed through to `stream_start`.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamSettings {
    /// Channel names in scan order
    pub scan_list: Vec<String>,
    /// Scans per second across the whole scan list
    pub scan_rate_hz: f64,
    /// Scans returned by a single `stream_read`
    pub scans_per_read: usize,
}

/// One simultaneous sample of both configured channels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawScan {
    pub ain0_volts: f64,
    pub ain2_volts: f64,
    /// Stamped by the driver when the batch is read back
    pub timestamp: DateTime<Local>,
}

/// A group of scans returned by a single read call.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanBatch {
    pub scans: Vec<RawScan>,
}

/// Unified interface to a streaming DAQ device.
///
/// Implementations must be `Send` so the acquisition thread can own them.
/// Calls arrive in a fixed order per session: `open`, zero or more
/// `write_config`, `stream_start`, repeated `stream_read`, `stream_stop`,
/// `close`. Implementations should reject out-of-order calls.
pub trait DaqDriver: Send {
    /// Open a device handle
    fn open(&mut self, config: &DeviceConfig) -> Result<(), DaqError>;

    /// Write a named configuration register, e.g. `AIN2_RANGE`
    fn write_config(&mut self, name: &str, value: f64) -> Result<(), DaqError>;

    /// Begin streaming with the given scan list and rate
    fn stream_start(&mut self, settings: &StreamSettings) -> Result<(), DaqError>;

    /// Pull one batch of scans; blocks until `scans_per_read` are available
    fn stream_read(&mut self) -> Result<ScanBatch, DaqError>;

    /// Stop the stream; the handle stays open
    fn stream_stop(&mut self) -> Result<(), DaqError>;

    /// Release the device handle
    fn close(&mut self);
}
