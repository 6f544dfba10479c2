//! Outbound calibration events.
//!
//! The [`PhSensor`](crate::sensors::ph::PhSensor) emits these through the
//! [`EventSink`](super::ports::EventSink) port. Adapters on the other side
//! decide what to do with them: log to the console, forward to telemetry.

use crate::calibration::CalibrationPoint;

/// Structured events emitted by the calibration engine.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationEvent {
    /// An existing record is about to be read.
    Loading { source: String },

    /// A validated record is about to be written.
    Storing { target: String },

    /// One buffer point was successfully recalibrated.
    Calibrated { point: CalibrationPoint, voltage: f64 },

    /// The voltages now in effect. Sent after construction and after every
    /// successful mutation.
    ActiveVoltages { neutral: f64, acid: f64 },
}
