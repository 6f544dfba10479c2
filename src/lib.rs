//! pH probe calibration library.
//!
//! Converts analog pH probe readings (mV) into pH with a persisted
//! two-point calibration. Storage and operator output sit behind the port
//! traits in [`app::ports`], so the engine runs the same against a JSON
//! file, a key-value blob store, or test mocks.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod calibration;
pub mod config;
pub mod error;
pub mod sensors;

pub use calibration::{
    CalibrationPoint, CalibrationState, is_valid_ph4_voltage, is_valid_ph7_voltage,
};
pub use error::{CalibrationError, Result};
pub use sensors::ph::PhSensor;
