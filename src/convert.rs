//! # Engineering Unit Conversion Module
//!
//! Pure voltage-to-engineering-unit conversions for the two acquired channels.
//! Both functions are total over f64, deterministic, and side-effect free so
//! they can be verified bit-for-bit in tests.
//!
//! ## Calibration
//! - AIN0 carries a ratiometric pressure transducer: 0.5 V at 0 PSI,
//!   4.5 V at 100 PSI (25 PSI per volt).
//! - AIN2 carries a type-K thermocouple measured differentially against AIN3
//!   on the ±10 mV range. The Seebeck coefficient is approximated as linear
//!   (~41.276 uV/°C) with the cold junction held at ambient.
//!
//! The calibration is fixed at compile time; it is not reconfigurable at
//! runtime in this scope.

/// Transducer output at 0 PSI, in volts
const PSI_ZERO_VOLTS: f64 = 0.5;

/// Transducer span: 0.5-4.5 V maps to 0-100 PSI
const PSI_PER_VOLT: f64 = 25.0;

/// Inverse type-K Seebeck coefficient, in °C per volt
const DEG_C_PER_VOLT: f64 = 1.0 / 41.276e-6;

/// Cold junction reference in °F (ambient)
const COLD_JUNCTION_F: f64 = 77.0;

/// Convert a raw AIN0 voltage to pressure in PSI.
pub fn voltage_to_psi(volts: f64) -> f64 {
    (volts - PSI_ZERO_VOLTS) * PSI_PER_VOLT
}

/// Convert a raw AIN2 differential voltage to temperature in °F.
pub fn voltage_to_fahrenheit(volts: f64) -> f64 {
    COLD_JUNCTION_F + volts * DEG_C_PER_VOLT * 1.8
}
