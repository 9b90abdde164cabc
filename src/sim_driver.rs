//! # Simulated Driver Module
//!
//! In-tree `DaqDriver` implementation that synthesizes plausible channel
//! voltages, so the application runs without attached hardware. The generator
//! is a pair of deterministic sine patterns advanced by a scan counter: AIN0
//! sweeps the pressure transducer span around mid-scale, AIN2 drifts slowly
//! within the ±10 mV thermocouple range.
//!
//! The simulator also enforces the driver call order (open before configure,
//! stream before read) so session-level sequencing bugs surface in tests
//! instead of against real hardware.

use crate::driver::{DaqDriver, DeviceConfig, RawScan, ScanBatch, StreamSettings};
use crate::error::DaqError;
use chrono::Local;
use std::collections::HashMap;
use std::f64::consts::TAU;

// Signal shape constants
const AIN0_CENTER_VOLTS: f64 = 2.5;
const AIN0_SWING_VOLTS: f64 = 1.0;
const AIN0_PERIOD_SCANS: f64 = 4000.0;
const AIN2_CENTER_VOLTS: f64 = 0.002;
const AIN2_SWING_VOLTS: f64 = 0.0015;
const AIN2_PERIOD_SCANS: f64 = 20_000.0;

/// Deterministic stand-in for a streaming DAQ device.
pub struct SimulatedDaq {
    open: bool,
    streaming: bool,
    scans_per_read: usize,
    /// Total scans generated since `stream_start`; drives both waveforms
    scan_counter: u64,
    /// Last written value per register, kept for inspection
    registers: HashMap<String, f64>,
}

impl SimulatedDaq {
    pub fn new() -> Self {
        Self {
            open: false,
            streaming: false,
            scans_per_read: 0,
            scan_counter: 0,
            registers: HashMap::new(),
        }
    }

    /// Last value written to a named register, if any
    #[allow(dead_code)]
    pub fn register(&self, name: &str) -> Option<f64> {
        self.registers.get(name).copied()
    }

    fn generate_scan(&self, scan_index: u64) -> RawScan {
        let ain0_phase = scan_index as f64 / AIN0_PERIOD_SCANS * TAU;
        let ain2_phase = scan_index as f64 / AIN2_PERIOD_SCANS * TAU;
        RawScan {
            ain0_volts: AIN0_CENTER_VOLTS + AIN0_SWING_VOLTS * ain0_phase.sin(),
            ain2_volts: AIN2_CENTER_VOLTS + AIN2_SWING_VOLTS * ain2_phase.sin(),
            timestamp: Local::now(),
        }
    }
}

impl Default for SimulatedDaq {
    fn default() -> Self {
        Self::new()
    }
}

impl DaqDriver for SimulatedDaq {
    fn open(&mut self, config: &DeviceConfig) -> Result<(), DaqError> {
        if self.open {
            return Err(DaqError::DeviceOpen("handle already open".to_string()));
        }
        log::debug!(
            "Simulated open: type={} connection={} identifier={}",
            config.device_type,
            config.connection_type,
            config.identifier
        );
        self.open = true;
        Ok(())
    }

    fn write_config(&mut self, name: &str, value: f64) -> Result<(), DaqError> {
        if !self.open {
            return Err(DaqError::ConfigWrite {
                name: name.to_string(),
                reason: "device not open".to_string(),
            });
        }
        self.registers.insert(name.to_string(), value);
        Ok(())
    }

    fn stream_start(&mut self, settings: &StreamSettings) -> Result<(), DaqError> {
        if !self.open {
            return Err(DaqError::StreamStart("device not open".to_string()));
        }
        if self.streaming {
            return Err(DaqError::StreamStart("stream already running".to_string()));
        }
        if settings.scans_per_read == 0 {
            return Err(DaqError::StreamStart("scans_per_read must be > 0".to_string()));
        }
        self.scans_per_read = settings.scans_per_read;
        self.scan_counter = 0;
        self.streaming = true;
        Ok(())
    }

    fn stream_read(&mut self) -> Result<ScanBatch, DaqError> {
        if !self.streaming {
            return Err(DaqError::StreamRead("stream not running".to_string()));
        }
        let mut scans = Vec::with_capacity(self.scans_per_read);
        for _ in 0..self.scans_per_read {
            scans.push(self.generate_scan(self.scan_counter));
            self.scan_counter += 1;
        }
        Ok(ScanBatch { scans })
    }

    fn stream_stop(&mut self) -> Result<(), DaqError> {
        self.streaming = false;
        Ok(())
    }

    fn close(&mut self) {
        self.streaming = false;
        self.open = false;
    }
}
