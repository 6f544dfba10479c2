//! Runtime configuration for the pH probe.
//!
//! Loaded from a JSON file when present, otherwise defaults apply.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::adapters::json_file::JsonFileStore;
use crate::sensors::ph::{DEFAULT_ROUND_TO, DEFAULT_TEMPERATURE_COEFFICIENT};

/// Largest `round_to` that still means something for an `f64` pH value.
const MAX_ROUND_TO: u32 = 15;

/// Probe configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Where the calibration record lives
    pub calibration_path: PathBuf,
    /// Create missing parent directories when first writing the record
    pub create_dirs: bool,
    /// Fractional mV drift per °C away from 25 °C
    pub temperature_coefficient: f64,
    /// Decimal digits kept in reported pH values
    pub round_to: u32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            calibration_path: PathBuf::from(JsonFileStore::DEFAULT_PATH),
            create_dirs: true,
            temperature_coefficient: DEFAULT_TEMPERATURE_COEFFICIENT,
            round_to: DEFAULT_ROUND_TO,
        }
    }
}

impl SensorConfig {
    /// Load configuration from a JSON file.
    ///
    /// A missing, unparsable or invalid file is logged and replaced by
    /// [`SensorConfig::default()`].
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) => {
                log::info!("[Config] No config at {:?} ({}), using defaults", path, err);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&contents) {
            Ok(config) => match config.validate() {
                Ok(()) => {
                    log::info!("[Config] Loaded configuration from {:?}", path);
                    config
                }
                Err(reason) => {
                    log::warn!("[Config] Rejected {:?}: {}. Using defaults.", path, reason);
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                    path,
                    err
                );
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.temperature_coefficient.is_finite() {
            return Err("temperature_coefficient must be finite");
        }
        if self.round_to > MAX_ROUND_TO {
            return Err("round_to must be 0-15");
        }
        Ok(())
    }
}
