//! # Acquisition Session Module
//!
//! Orchestrates one streaming session: opens the device, runs the
//! convert/store/log pass over each batch of scans, and publishes the plot
//! window to the display sink. The session is a two-state machine
//! (Stopped/Running); `start()` is only valid from Stopped and any fatal
//! error during polling returns the session to Stopped with all resources
//! released.
//!
//! ## Why Sink Traits
//! The session owns device and buffer state but calls out through
//! `DisplaySink` for rendering, so session logic is not bound to any
//! particular UI toolkit object and tests can observe publications directly.

use crate::config::StreamConfig;
use crate::convert::{voltage_to_fahrenheit, voltage_to_psi};
use crate::driver::DaqDriver;
use crate::error::{DaqError, SessionError};
use crate::recorder::ScanLogger;
use crate::samples::{EngineeringSample, SampleBuffer};

/// Receives the plot window and latest readout once per poll step.
pub trait DisplaySink: Send {
    fn publish(&mut self, snapshot: Vec<EngineeringSample>, latest: EngineeringSample);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Stopped,
    Running,
}

pub struct AcquisitionSession {
    driver: Box<dyn DaqDriver>,
    display: Box<dyn DisplaySink>,
    buffer: SampleBuffer,
    logger: Option<ScanLogger>,
    /// Next sequence index; increases monotonically while running
    next_index: u64,
    state: SessionState,
}

impl AcquisitionSession {
    pub fn new(
        driver: Box<dyn DaqDriver>,
        display: Box<dyn DisplaySink>,
        buffer_capacity: usize,
    ) -> Self {
        Self {
            driver,
            display,
            buffer: SampleBuffer::new(buffer_capacity),
            logger: None,
            next_index: 0,
            state: SessionState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    /// Open the device, configure AIN2, start streaming, and open the log sink.
    ///
    /// On any failure everything acquired so far is released and the session
    /// remains Stopped. Starting while already Running is an explicit error.
    pub fn start(&mut self, config: &StreamConfig) -> Result<(), SessionError> {
        if self.is_running() {
            return Err(DaqError::AlreadyRunning.into());
        }

        self.driver.open(&config.device())?;

        // Differential thermocouple input: small range, AIN3 as negative channel
        let ain2_setup = [
            ("AIN2_RANGE", config.ain2_range),
            ("AIN2_NEGATIVE_CH", f64::from(config.ain2_negative_channel)),
        ];
        for (name, value) in ain2_setup {
            if let Err(e) = self.driver.write_config(name, value) {
                self.driver.close();
                return Err(e.into());
            }
        }

        if let Err(e) = self.driver.stream_start(&config.stream_settings()) {
            self.driver.close();
            return Err(e.into());
        }

        let logger = match ScanLogger::create(&config.log_dir) {
            Ok(logger) => logger,
            Err(e) => {
                if let Err(stop_err) = self.driver.stream_stop() {
                    log::warn!("Failed to stop stream during aborted start: {}", stop_err);
                }
                self.driver.close();
                return Err(e.into());
            }
        };

        self.logger = Some(logger);
        self.buffer.clear();
        self.next_index = 0;
        self.state = SessionState::Running;
        log::info!("Streaming started");
        Ok(())
    }

    /// Process one batch: read, convert, buffer, log, publish.
    ///
    /// Invoked once per poll tick by the acquisition manager. Any read or log
    /// failure stops the session and releases the device handle before the
    /// error is returned; there is no per-scan skip-and-continue.
    pub fn poll_step(&mut self) -> Result<(), SessionError> {
        if !self.is_running() {
            return Ok(());
        }

        let batch = match self.driver.stream_read() {
            Ok(batch) => batch,
            Err(e) => {
                log::error!("{}", e);
                self.shutdown();
                return Err(e.into());
            }
        };

        for scan in &batch.scans {
            let sample = EngineeringSample {
                index: self.next_index,
                pressure_psi: voltage_to_psi(scan.ain0_volts),
                temperature_f: voltage_to_fahrenheit(scan.ain2_volts),
                timestamp: scan.timestamp,
            };
            self.next_index += 1;
            self.buffer.append(sample);

            let logged = match &mut self.logger {
                Some(logger) => logger.write_row(scan.ain0_volts, scan.ain2_volts, &sample),
                None => Ok(()),
            };
            if let Err(e) = logged {
                log::error!("{}", e);
                self.shutdown();
                return Err(e.into());
            }
        }

        if let Some(latest) = self.buffer.last().copied() {
            self.display.publish(self.buffer.snapshot(), latest);
        }

        Ok(())
    }

    /// Stop streaming and release the device and log sink.
    ///
    /// Idempotent: stopping a session that never started is a no-op.
    pub fn stop(&mut self) {
        if !self.is_running() {
            return;
        }
        self.shutdown();
        log::info!("Stream stopped");
    }

    /// Release everything and return to Stopped. Teardown errors are logged,
    /// never propagated; stopping must always succeed.
    fn shutdown(&mut self) {
        if let Err(e) = self.driver.stream_stop() {
            log::warn!("Failed to stop stream: {}", e);
        }
        self.driver.close();
        if let Some(mut logger) = self.logger.take() {
            if let Err(e) = logger.finish() {
                log::warn!("Failed to flush log file: {}", e);
            }
        }
        self.state = SessionState::Stopped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{DeviceConfig, RawScan, ScanBatch, StreamSettings};
    use chrono::Local;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    /// Observable driver state shared with the test
    #[derive(Default)]
    struct FakeDriverState {
        open: bool,
        streaming: bool,
        closed: bool,
        reads: usize,
        config_writes: Vec<(String, f64)>,
    }

    /// Scripted driver double: returns a fixed batch per read, with
    /// configurable failure points.
    struct FakeDriver {
        state: Arc<Mutex<FakeDriverState>>,
        batch_scans: Vec<RawScan>,
        fail_open: bool,
        fail_stream_start: bool,
        fail_read_at: Option<usize>,
    }

    impl FakeDriver {
        fn new(batch_scans: Vec<RawScan>) -> (Self, Arc<Mutex<FakeDriverState>>) {
            let state = Arc::new(Mutex::new(FakeDriverState::default()));
            (
                Self {
                    state: state.clone(),
                    batch_scans,
                    fail_open: false,
                    fail_stream_start: false,
                    fail_read_at: None,
                },
                state,
            )
        }
    }

    impl DaqDriver for FakeDriver {
        fn open(&mut self, _config: &DeviceConfig) -> Result<(), DaqError> {
            if self.fail_open {
                return Err(DaqError::DeviceOpen("no device".to_string()));
            }
            self.state.lock().unwrap().open = true;
            Ok(())
        }

        fn write_config(&mut self, name: &str, value: f64) -> Result<(), DaqError> {
            self.state
                .lock()
                .unwrap()
                .config_writes
                .push((name.to_string(), value));
            Ok(())
        }

        fn stream_start(&mut self, _settings: &StreamSettings) -> Result<(), DaqError> {
            if self.fail_stream_start {
                return Err(DaqError::StreamStart("stream refused".to_string()));
            }
            self.state.lock().unwrap().streaming = true;
            Ok(())
        }

        fn stream_read(&mut self) -> Result<ScanBatch, DaqError> {
            let mut state = self.state.lock().unwrap();
            if self.fail_read_at == Some(state.reads) {
                return Err(DaqError::StreamRead("device unplugged".to_string()));
            }
            state.reads += 1;
            Ok(ScanBatch {
                scans: self.batch_scans.clone(),
            })
        }

        fn stream_stop(&mut self) -> Result<(), DaqError> {
            self.state.lock().unwrap().streaming = false;
            Ok(())
        }

        fn close(&mut self) {
            let mut state = self.state.lock().unwrap();
            state.open = false;
            state.closed = true;
        }
    }

    /// Display double that records each publication
    #[derive(Clone)]
    struct CollectingDisplay {
        published: Arc<Mutex<Vec<(usize, EngineeringSample)>>>,
    }

    impl CollectingDisplay {
        fn new() -> Self {
            Self {
                published: Arc::new(Mutex::new(Vec::new())),
            }
        }
    }

    impl DisplaySink for CollectingDisplay {
        fn publish(&mut self, snapshot: Vec<EngineeringSample>, latest: EngineeringSample) {
            self.published.lock().unwrap().push((snapshot.len(), latest));
        }
    }

    fn fixed_batch(count: usize, ain0: f64, ain2: f64) -> Vec<RawScan> {
        (0..count)
            .map(|_| RawScan {
                ain0_volts: ain0,
                ain2_volts: ain2,
                timestamp: Local::now(),
            })
            .collect()
    }

    fn test_config(log_dir: PathBuf) -> StreamConfig {
        StreamConfig {
            log_dir,
            ..StreamConfig::default()
        }
    }

    fn log_file_in(dir: &std::path::Path) -> Option<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .find(|p| p.extension().map(|ext| ext == "csv").unwrap_or(false))
    }

    #[test]
    fn test_batch_of_500_known_voltages() {
        let dir = tempdir().unwrap();
        let (driver, _state) = FakeDriver::new(fixed_batch(500, 2.5, 0.001));
        let display = CollectingDisplay::new();
        let published = display.published.clone();
        let mut session =
            AcquisitionSession::new(Box::new(driver), Box::new(display), 500);

        session.start(&test_config(dir.path().to_path_buf())).unwrap();
        session.poll_step().unwrap();
        session.stop();

        // Buffer holds the full batch; last entry carries the converted values
        let publications = published.lock().unwrap();
        assert_eq!(publications.len(), 1);
        let (snapshot_len, latest) = publications[0];
        assert_eq!(snapshot_len, 500);
        assert_eq!(latest.index, 499);
        assert_eq!(latest.pressure_psi, voltage_to_psi(2.5));
        assert_eq!(latest.temperature_f, voltage_to_fahrenheit(0.001));

        // 500 log rows after the header
        let log_path = log_file_in(dir.path()).expect("log file created");
        let contents = std::fs::read_to_string(log_path).unwrap();
        assert_eq!(contents.lines().count(), 501);
    }

    #[test]
    fn test_ain2_configured_before_streaming() {
        let dir = tempdir().unwrap();
        let (driver, state) = FakeDriver::new(fixed_batch(1, 2.5, 0.0));
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        session.start(&test_config(dir.path().to_path_buf())).unwrap();
        session.stop();

        let writes = &state.lock().unwrap().config_writes;
        assert_eq!(writes[0], ("AIN2_RANGE".to_string(), 0.01));
        assert_eq!(writes[1], ("AIN2_NEGATIVE_CH".to_string(), 3.0));
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let (driver, state) = FakeDriver::new(Vec::new());
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        session.stop();
        session.stop();
        assert!(!session.is_running());
        assert!(!state.lock().unwrap().closed);
    }

    #[test]
    fn test_failed_open_leaves_nothing_behind() {
        let dir = tempdir().unwrap();
        let (mut driver, _state) = FakeDriver::new(Vec::new());
        driver.fail_open = true;
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        let result = session.start(&test_config(dir.path().to_path_buf()));
        assert!(matches!(
            result,
            Err(SessionError::Driver(DaqError::DeviceOpen(_)))
        ));
        assert!(!session.is_running());
        // No log sink was created
        assert!(log_file_in(dir.path()).is_none());
    }

    #[test]
    fn test_failed_stream_start_closes_handle() {
        let dir = tempdir().unwrap();
        let (mut driver, state) = FakeDriver::new(Vec::new());
        driver.fail_stream_start = true;
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        let result = session.start(&test_config(dir.path().to_path_buf()));
        assert!(matches!(
            result,
            Err(SessionError::Driver(DaqError::StreamStart(_)))
        ));
        assert!(!session.is_running());
        assert!(state.lock().unwrap().closed);
        assert!(log_file_in(dir.path()).is_none());
    }

    #[test]
    fn test_double_start_is_rejected() {
        let dir = tempdir().unwrap();
        let (driver, _state) = FakeDriver::new(fixed_batch(1, 2.5, 0.0));
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        session.start(&test_config(dir.path().to_path_buf())).unwrap();
        let result = session.start(&test_config(dir.path().to_path_buf()));
        assert!(matches!(
            result,
            Err(SessionError::Driver(DaqError::AlreadyRunning))
        ));
        // Original session is still running
        assert!(session.is_running());
        session.stop();
    }

    #[test]
    fn test_read_failure_stops_session_and_releases_handle() {
        let dir = tempdir().unwrap();
        let (mut driver, state) = FakeDriver::new(fixed_batch(10, 2.5, 0.0));
        driver.fail_read_at = Some(1); // second read fails
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        session.start(&test_config(dir.path().to_path_buf())).unwrap();
        session.poll_step().unwrap();
        let result = session.poll_step();

        assert!(matches!(
            result,
            Err(SessionError::Driver(DaqError::StreamRead(_)))
        ));
        assert!(!session.is_running());
        let state = state.lock().unwrap();
        assert!(state.closed);
        assert!(!state.streaming);
    }

    #[test]
    fn test_sequence_indices_across_poll_steps() {
        let dir = tempdir().unwrap();
        let (driver, _state) = FakeDriver::new(fixed_batch(500, 2.5, 0.0));
        let display = CollectingDisplay::new();
        let published = display.published.clone();
        let mut session =
            AcquisitionSession::new(Box::new(driver), Box::new(display), 500);

        session.start(&test_config(dir.path().to_path_buf())).unwrap();
        session.poll_step().unwrap();
        session.poll_step().unwrap();
        session.stop();

        // Two batches of 500: window stays at 500, latest index is 999
        let publications = published.lock().unwrap();
        let (snapshot_len, latest) = publications[1];
        assert_eq!(snapshot_len, 500);
        assert_eq!(latest.index, 999);
    }

    #[test]
    fn test_poll_step_when_stopped_is_noop() {
        let (driver, state) = FakeDriver::new(fixed_batch(10, 2.5, 0.0));
        let mut session = AcquisitionSession::new(
            Box::new(driver),
            Box::new(CollectingDisplay::new()),
            500,
        );

        assert!(session.poll_step().is_ok());
        assert_eq!(state.lock().unwrap().reads, 0);
    }
}
