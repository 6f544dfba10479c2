//! Two-point linear calibration for analog pH probes.
//!
//! The probe outputs a millivolt signal that is (close to) linear in pH.
//! Two buffer solutions pin the line: pH 7.0 (neutral) and pH 4.0 (acid).
//!
//! ```text
//!   normalise(v) = (v - 1500) / 3
//!   slope        = (7 - 4) / (normalise(neutral) - normalise(acid))
//!   intercept    = 7 - slope * normalise(neutral)
//!   pH(mv)       = slope * normalise(mv) + intercept
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CalibrationError, Result};

const NEUTRAL_PH: f64 = 7.0;
const ACID_PH: f64 = 4.0;

/// Centre of the probe's native output range (mV).
const VOLTAGE_OFFSET_MV: f64 = 1500.0;
/// Native mV-per-unit scale of the probe.
const VOLTAGE_SCALE: f64 = 3.0;

/// Exclusive bounds of a plausible pH 7 buffer reading (mV).
pub const PH7_VOLTAGE_RANGE: (f64, f64) = (1322.0, 1678.0);
/// Exclusive bounds of a plausible pH 4 buffer reading (mV).
pub const PH4_VOLTAGE_RANGE: (f64, f64) = (1854.0, 2210.0);

/// Reference temperature at which the probe was characterised (°C).
pub const REFERENCE_TEMPERATURE_C: f64 = 25.0;

// Both ranges already exclude 0; the zero check stays explicit so an unset
// reading is rejected even if a range is ever widened.
fn within(mv: f64, (low, high): (f64, f64)) -> bool {
    mv != 0.0 && low < mv && mv < high
}

/// True if `mv` is a plausible reading for the pH 7 buffer.
pub fn is_valid_ph7_voltage(mv: f64) -> bool {
    within(mv, PH7_VOLTAGE_RANGE)
}

/// True if `mv` is a plausible reading for the pH 4 buffer.
pub fn is_valid_ph4_voltage(mv: f64) -> bool {
    within(mv, PH4_VOLTAGE_RANGE)
}

/// Decimal digits beyond which an `f64` carries no further precision.
const MAX_SIGNIFICANT_DIGITS: u32 = 15;

/// Round half away from zero to `digits` decimal places.
///
/// Past `f64` precision, or if scaling would overflow, `value` is returned
/// unchanged.
pub fn round_to(value: f64, digits: u32) -> f64 {
    if digits > MAX_SIGNIFICANT_DIGITS {
        return value;
    }
    let scale = 10f64.powi(digits as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

// ---------------------------------------------------------------------------
// Calibration points
// ---------------------------------------------------------------------------

/// One of the two buffer solutions the probe is calibrated against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationPoint {
    /// pH 7.0 buffer.
    Neutral,
    /// pH 4.0 buffer.
    Acid,
}

impl CalibrationPoint {
    /// Decide which buffer a raw reading belongs to, if any.
    pub fn classify(mv: f64) -> Option<Self> {
        if is_valid_ph7_voltage(mv) {
            Some(Self::Neutral)
        } else if is_valid_ph4_voltage(mv) {
            Some(Self::Acid)
        } else {
            None
        }
    }

    /// Record field holding this point's voltage.
    pub const fn field(self) -> &'static str {
        match self {
            Self::Neutral => "neutral_voltage",
            Self::Acid => "acid_voltage",
        }
    }

    /// Nominal pH of the buffer, as an integer label for operator output.
    pub const fn ph_label(self) -> u8 {
        match self {
            Self::Neutral => 7,
            Self::Acid => 4,
        }
    }

    /// Check that `mv` is valid for this point.
    pub fn check(self, mv: f64) -> Result<f64> {
        let ok = match self {
            Self::Neutral => is_valid_ph7_voltage(mv),
            Self::Acid => is_valid_ph4_voltage(mv),
        };
        if ok {
            Ok(mv)
        } else {
            Err(CalibrationError::InvalidCalibrationData {
                field: self.field(),
                value: mv,
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Calibration state
// ---------------------------------------------------------------------------

/// The persisted calibration record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalibrationState {
    /// Probe output in the pH 7.0 buffer (mV).
    pub neutral_voltage: f64,
    /// Probe output in the pH 4.0 buffer (mV).
    pub acid_voltage: f64,
}

impl CalibrationState {
    pub const DEFAULT_NEUTRAL_VOLTAGE: f64 = 1500.0;
    pub const DEFAULT_ACID_VOLTAGE: f64 = 2032.44;

    /// Build a state after validating both voltages.
    pub fn new(neutral_voltage: f64, acid_voltage: f64) -> Result<Self> {
        let state = Self {
            neutral_voltage,
            acid_voltage,
        };
        state.validate()?;
        Ok(state)
    }

    /// Range-check both fields, reporting the first one that fails.
    pub fn validate(&self) -> Result<()> {
        CalibrationPoint::Neutral.check(self.neutral_voltage)?;
        CalibrationPoint::Acid.check(self.acid_voltage)?;
        Ok(())
    }

    /// Copy of this state with one point replaced, validated.
    pub fn with_point(&self, point: CalibrationPoint, mv: f64) -> Result<Self> {
        let mv = point.check(mv)?;
        let mut next = *self;
        match point {
            CalibrationPoint::Neutral => next.neutral_voltage = mv,
            CalibrationPoint::Acid => next.acid_voltage = mv,
        }
        next.validate()?;
        Ok(next)
    }

    /// Derive the mV → pH line for this calibration.
    pub fn model(&self) -> Result<LinearModel> {
        LinearModel::from_points(self.neutral_voltage, self.acid_voltage)
    }
}

impl Default for CalibrationState {
    fn default() -> Self {
        Self {
            neutral_voltage: Self::DEFAULT_NEUTRAL_VOLTAGE,
            acid_voltage: Self::DEFAULT_ACID_VOLTAGE,
        }
    }
}

// ---------------------------------------------------------------------------
// Linear model
// ---------------------------------------------------------------------------

/// Straight line through (neutral, 7.0) and (acid, 4.0) in normalised mV.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearModel {
    pub slope: f64,
    pub intercept: f64,
}

fn normalise(mv: f64) -> f64 {
    (mv - VOLTAGE_OFFSET_MV) / VOLTAGE_SCALE
}

impl LinearModel {
    /// Fit the line through both buffer voltages (mV).
    pub fn from_points(neutral_mv: f64, acid_mv: f64) -> Result<Self> {
        let neutral = normalise(neutral_mv);
        let span = neutral - normalise(acid_mv);
        if span == 0.0 {
            return Err(CalibrationError::DegenerateCalibration {
                neutral: neutral_mv,
                acid: acid_mv,
            });
        }
        let slope = (NEUTRAL_PH - ACID_PH) / span;
        Ok(Self {
            slope,
            intercept: NEUTRAL_PH - slope * neutral,
        })
    }

    /// Unrounded pH for a raw reading. Out-of-range input extrapolates.
    pub fn ph(&self, mv: f64) -> f64 {
        self.slope * normalise(mv) + self.intercept
    }
}

/// Divide out the probe's temperature drift, referenced to 25 °C.
pub fn compensate(mv: f64, temperature_c: f64, coefficient: f64) -> Result<f64> {
    let factor = 1.0 + coefficient * (temperature_c - REFERENCE_TEMPERATURE_C);
    if factor == 0.0 {
        return Err(CalibrationError::DegenerateCompensation {
            temperature: temperature_c,
            coefficient,
        });
    }
    Ok(mv / factor)
}
