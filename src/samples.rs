//! # Sample Storage Module
//!
//! Bounded, time-ordered history of converted samples used for plotting.
//! The buffer holds the most recent `capacity` entries; once full, appending
//! evicts from the head so the window scrolls forward in O(1) amortized time.
//!
//! ## Why Separate from the Session
//! Keeping storage free of driver and UI concerns makes the eviction and
//! ordering invariants directly testable.

use chrono::{DateTime, Local};
use std::collections::VecDeque;

/// One converted scan, immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineeringSample {
    /// Monotonically increasing sequence index, assigned by the session
    pub index: u64,
    pub pressure_psi: f64,
    pub temperature_f: f64,
    pub timestamp: DateTime<Local>,
}

/// Capacity-bounded history of engineering samples.
///
/// Invariants after every operation:
/// - `len() <= capacity`
/// - entries are in non-decreasing `index` order
/// - only whole entries are ever evicted, oldest first
pub struct SampleBuffer {
    data: VecDeque<EngineeringSample>,
    capacity: usize,
}

impl SampleBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            data: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append to the tail, evicting from the head once over capacity.
    pub fn append(&mut self, sample: EngineeringSample) {
        self.data.push_back(sample);
        while self.data.len() > self.capacity {
            self.data.pop_front();
        }
    }

    /// Copy of the current contents, oldest first.
    ///
    /// Returns an owned Vec so callers can never mutate internal storage.
    pub fn snapshot(&self) -> Vec<EngineeringSample> {
        self.data.iter().copied().collect()
    }

    /// Empty the buffer; used when a new acquisition session starts.
    pub fn clear(&mut self) {
        self.data.clear();
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn last(&self) -> Option<&EngineeringSample> {
        self.data.back()
    }
}

/// Min/max helpers for computing chart axis ranges from a snapshot.
pub trait SampleSliceExt {
    fn min_max_index(&self) -> Option<(u64, u64)>;
    fn min_max_pressure(&self) -> Option<(f64, f64)>;
    fn min_max_temperature(&self) -> Option<(f64, f64)>;
}

// Implement the trait for a slice of samples
impl SampleSliceExt for &[EngineeringSample] {
    fn min_max_index(&self) -> Option<(u64, u64)> {
        self.iter().fold(None, |acc, s| match acc {
            None => Some((s.index, s.index)),
            Some((min, max)) => Some((min.min(s.index), max.max(s.index))),
        })
    }

    fn min_max_pressure(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, s| match acc {
            None => Some((s.pressure_psi, s.pressure_psi)),
            Some((min, max)) => Some((min.min(s.pressure_psi), max.max(s.pressure_psi))),
        })
    }

    fn min_max_temperature(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |acc, s| match acc {
            None => Some((s.temperature_f, s.temperature_f)),
            Some((min, max)) => Some((min.min(s.temperature_f), max.max(s.temperature_f))),
        })
    }
}
