//! Unified error type for the pH probe crate.
//!
//! A single `CalibrationError` enum that every layer (model, engine, storage
//! adapters) returns, so callers handle one set of variants.

use core::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Calibration error
// ---------------------------------------------------------------------------

/// Every fallible operation in the crate funnels into this type.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Target directory is missing and automatic creation is disabled.
    StorageUnavailable { dir: PathBuf },
    /// The persisted record could not be parsed or lacks a required field.
    MalformedRecord { location: String, reason: String },
    /// A voltage failed its range check.
    InvalidCalibrationData { field: &'static str, value: f64 },
    /// Neutral and acid points coincide; the linear model is undefined.
    DegenerateCalibration { neutral: f64, acid: f64 },
    /// Temperature compensation factor evaluated to zero.
    DegenerateCompensation { temperature: f64, coefficient: f64 },
    /// Auto-calibration could not place the voltage in either buffer range.
    AmbiguousCalibrationInput { value: f64 },
    /// Persisting a validated record failed.
    StorageWriteFailure { target: String, reason: String },
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable { dir } => write!(
                f,
                "the directory {} does not exist; enable directory creation to create it automatically",
                dir.display()
            ),
            Self::MalformedRecord { location, reason } => {
                write!(f, "malformed calibration record in {location}: {reason}")
            }
            Self::InvalidCalibrationData { field, value } => {
                write!(f, "the mV value {value} for {field} is not valid")
            }
            Self::DegenerateCalibration { neutral, acid } => write!(
                f,
                "neutral ({neutral} mV) and acid ({acid} mV) calibration points coincide"
            ),
            Self::DegenerateCompensation {
                temperature,
                coefficient,
            } => write!(
                f,
                "compensation factor is zero at {temperature} \u{00b0}C with coefficient {coefficient}"
            ),
            Self::AmbiguousCalibrationInput { value } => write!(
                f,
                "auto calibration does not work for {value} mV; use a designated calibration method"
            ),
            Self::StorageWriteFailure { target, reason } => {
                write!(f, "failed to store calibration data in {target}: {reason}")
            }
        }
    }
}

impl std::error::Error for CalibrationError {}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, CalibrationError>;
