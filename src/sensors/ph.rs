//! Analog pH probe driver (DFRobot-style, two-point calibration).
//!
//! Converts a millivolt reading into pH using the neutral (pH 7) and acid
//! (pH 4) calibration voltages, and keeps those voltages persisted through
//! a [`CalibrationStore`].
//!
//! ## Commit order
//!
//! Every mutation builds a candidate [`CalibrationState`], validates it,
//! writes it to the store, and only then replaces the live state. A rejected
//! or unpersisted calibration leaves both memory and storage as they were.

use std::path::PathBuf;

use crate::adapters::json_file::JsonFileStore;
use crate::adapters::log_sink::LogEventSink;
use crate::app::events::CalibrationEvent;
use crate::app::ports::{CalibrationStore, EventSink};
use crate::calibration::{self, CalibrationPoint, CalibrationState, LinearModel};
use crate::config::SensorConfig;
use crate::error::{CalibrationError, Result};

/// Decimal digits kept by [`PhSensor::read_ph`].
pub const DEFAULT_ROUND_TO: u32 = 2;
/// Fractional drift per °C used by [`PhSensor::read_ph_compensated`].
pub const DEFAULT_TEMPERATURE_COEFFICIENT: f64 = 0.01;

/// Two-point calibration engine: converts mV to pH and owns the persisted
/// calibration.
pub struct PhSensor<S = JsonFileStore, E = LogEventSink> {
    store: S,
    sink: E,
    state: CalibrationState,
    model: LinearModel,
    temperature_coefficient: f64,
    round_to: u32,
}

impl PhSensor {
    /// Open (or create) the JSON calibration record at `path`.
    pub fn open(path: impl Into<PathBuf>, create_dirs: bool) -> Result<Self> {
        Self::with_ports(JsonFileStore::new(path, create_dirs), LogEventSink::new())
    }

    /// Open the record named by `config` and adopt its read settings.
    pub fn from_config(config: &SensorConfig) -> Result<Self> {
        let mut sensor = Self::open(config.calibration_path.clone(), config.create_dirs)?;
        sensor.temperature_coefficient = config.temperature_coefficient;
        sensor.round_to = config.round_to;
        Ok(sensor)
    }
}

impl<S: CalibrationStore, E: EventSink> PhSensor<S, E> {
    /// Build an engine on arbitrary ports.
    ///
    /// Loads the stored record if there is one. Otherwise the defaults are
    /// written out first, so storage always holds the active calibration.
    pub fn with_ports(mut store: S, mut sink: E) -> Result<Self> {
        let state = match store.load()? {
            Some(state) => {
                sink.emit(&CalibrationEvent::Loading {
                    source: store.describe(),
                });
                state
            }
            None => {
                let state = CalibrationState::default();
                sink.emit(&CalibrationEvent::Storing {
                    target: store.describe(),
                });
                store.save(&state)?;
                state
            }
        };
        let model = state.model()?;

        let mut sensor = Self {
            store,
            sink,
            state,
            model,
            temperature_coefficient: DEFAULT_TEMPERATURE_COEFFICIENT,
            round_to: DEFAULT_ROUND_TO,
        };
        sensor.report_active_voltages();
        Ok(sensor)
    }

    pub fn neutral_voltage(&self) -> f64 {
        self.state.neutral_voltage
    }

    pub fn acid_voltage(&self) -> f64 {
        self.state.acid_voltage
    }

    pub fn state(&self) -> &CalibrationState {
        &self.state
    }

    pub fn model(&self) -> &LinearModel {
        &self.model
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn sink(&self) -> &E {
        &self.sink
    }

    // ── Reads ─────────────────────────────────────────────────

    /// pH for `mv`, rounded half away from zero to `round_to` digits.
    ///
    /// Infallible: a degenerate calibration can never become the live one.
    pub fn read(&self, mv: f64, round_to: u32) -> f64 {
        calibration::round_to(self.model.ph(mv), round_to)
    }

    /// [`read`](Self::read) with the configured rounding.
    pub fn read_ph(&self, mv: f64) -> f64 {
        self.read(mv, self.round_to)
    }

    /// pH for `mv` after removing the probe's temperature drift.
    pub fn read_with_temperature_compensation(
        &self,
        mv: f64,
        temperature_c: f64,
        coefficient: f64,
        round_to: u32,
    ) -> Result<f64> {
        let compensated = calibration::compensate(mv, temperature_c, coefficient)?;
        Ok(self.read(compensated, round_to))
    }

    /// Temperature-compensated read with the configured coefficient and
    /// rounding.
    pub fn read_ph_compensated(&self, mv: f64, temperature_c: f64) -> Result<f64> {
        self.read_with_temperature_compensation(
            mv,
            temperature_c,
            self.temperature_coefficient,
            self.round_to,
        )
    }

    // ── Calibration ───────────────────────────────────────────

    /// Record `mv` as the probe output in the pH 7.0 buffer.
    pub fn calibrate_ph7(&mut self, mv: f64) -> Result<()> {
        self.calibrate(CalibrationPoint::Neutral, mv)
    }

    /// Record `mv` as the probe output in the pH 4.0 buffer.
    pub fn calibrate_ph4(&mut self, mv: f64) -> Result<()> {
        self.calibrate(CalibrationPoint::Acid, mv)
    }

    /// Calibrate whichever buffer `mv` plausibly belongs to.
    pub fn auto_calibrate(&mut self, mv: f64) -> Result<CalibrationPoint> {
        let point = CalibrationPoint::classify(mv)
            .ok_or(CalibrationError::AmbiguousCalibrationInput { value: mv })?;
        self.calibrate(point, mv)?;
        Ok(point)
    }

    /// Restore and persist the factory voltages.
    pub fn reset_to_default(&mut self) -> Result<()> {
        self.commit(CalibrationState::default())?;
        self.report_active_voltages();
        Ok(())
    }

    /// Replace both voltages at once. Nothing changes unless both are valid.
    pub fn set_calibration_data(&mut self, neutral_voltage: f64, acid_voltage: f64) -> Result<()> {
        let next = CalibrationState::new(neutral_voltage, acid_voltage)?;
        self.commit(next)?;
        self.report_active_voltages();
        Ok(())
    }

    fn calibrate(&mut self, point: CalibrationPoint, mv: f64) -> Result<()> {
        let next = self.state.with_point(point, mv)?;
        self.commit(next)?;
        self.sink.emit(&CalibrationEvent::Calibrated { point, voltage: mv });
        self.report_active_voltages();
        Ok(())
    }

    /// Persist `next`, then make it live.
    fn commit(&mut self, next: CalibrationState) -> Result<()> {
        let model = next.model()?;
        self.sink.emit(&CalibrationEvent::Storing {
            target: self.store.describe(),
        });
        self.store.save(&next)?;
        self.state = next;
        self.model = model;
        Ok(())
    }

    fn report_active_voltages(&mut self) {
        self.sink.emit(&CalibrationEvent::ActiveVoltages {
            neutral: self.state.neutral_voltage,
            acid: self.state.acid_voltage,
        });
    }
}
