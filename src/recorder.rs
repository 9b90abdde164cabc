//! # Log Sink Module
//!
//! Append-only CSV logging of every acquired scan. One file per acquisition
//! session, named with the session start time so repeated runs never clobber
//! each other. Rows carry both the raw channel voltages and the converted
//! engineering values so a recording is self-contained for offline analysis.
//!
//! ## File Format
//! ```text
//! ain_log_YYYYMMDD_HHMMSS.csv
//! Timestamp,AIN0 (V),Pressure (PSI),AIN2 (V),Temperature (°F)
//! 14:02:11,2.500000,50.000000,0.002000,164.198275
//! ...
//! ```

use crate::error::LogError;
use crate::samples::EngineeringSample;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

const HEADER: &str = "Timestamp,AIN0 (V),Pressure (PSI),AIN2 (V),Temperature (°F)";

/// CSV writer for one acquisition session.
pub struct ScanLogger {
    writer: BufWriter<File>,
    path: PathBuf,
    rows_written: u64,
}

impl ScanLogger {
    /// Create a timestamped log file in `output_dir` and write the header row.
    pub fn create(output_dir: impl AsRef<Path>) -> Result<Self, LogError> {
        let output_dir = output_dir.as_ref();
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir).map_err(LogError::Create)?;
        }

        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = output_dir.join(format!("ain_log_{}.csv", timestamp));

        log::info!("Logging scans to: {}", path.display());

        let file = File::create(&path).map_err(LogError::Create)?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "{}", HEADER).map_err(LogError::Write)?;

        Ok(Self {
            writer,
            path,
            rows_written: 0,
        })
    }

    /// Append one row: wall-clock time, raw volts, and converted values.
    pub fn write_row(
        &mut self,
        ain0_volts: f64,
        ain2_volts: f64,
        sample: &EngineeringSample,
    ) -> Result<(), LogError> {
        writeln!(
            self.writer,
            "{},{:.6},{:.6},{:.6},{:.6}",
            sample.timestamp.format("%H:%M:%S"),
            ain0_volts,
            sample.pressure_psi,
            ain2_volts,
            sample.temperature_f,
        )
        .map_err(LogError::Write)?;
        self.rows_written += 1;
        Ok(())
    }

    /// Flush buffered rows to disk. Called on session stop; also happens on drop.
    pub fn finish(&mut self) -> Result<(), LogError> {
        self.writer.flush().map_err(LogError::Write)
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[allow(dead_code)]
    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

impl Drop for ScanLogger {
    fn drop(&mut self) {
        if let Err(e) = self.writer.flush() {
            log::error!("Failed to flush log file on drop: {}", e);
        }
    }
}
