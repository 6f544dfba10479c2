//! Port traits — the boundary between the calibration engine and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ PhSensor (domain)
//! ```
//!
//! ## Contract notes
//!
//! - **CalibrationStore** implementations MUST validate a loaded record
//!   before handing it back, and MUST write both voltages in one step.
//! - There is no locking. Two processes sharing one record can race; the
//!   engine assumes a single writer.

use crate::calibration::CalibrationState;
use crate::error::Result;

use super::events::CalibrationEvent;

// ───────────────────────────────────────────────────────────────
// Calibration store (driven adapter: domain ↔ durable storage)
// ───────────────────────────────────────────────────────────────

/// Loads and persists the calibration record.
pub trait CalibrationStore {
    /// Read the stored record.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet (first boot).
    /// A record that exists but cannot be decoded is
    /// [`MalformedRecord`](crate::error::CalibrationError::MalformedRecord);
    /// one that decodes but fails range checks is
    /// [`InvalidCalibrationData`](crate::error::CalibrationError::InvalidCalibrationData).
    fn load(&self) -> Result<Option<CalibrationState>>;

    /// Persist a validated record, replacing any previous one.
    fn save(&mut self, state: &CalibrationState) -> Result<()>;

    /// Human-readable location of the record, for operator output.
    fn describe(&self) -> String;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The engine emits structured [`CalibrationEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &CalibrationEvent);
}
