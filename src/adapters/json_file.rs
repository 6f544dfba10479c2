//! JSON file adapter.
//!
//! Implements [`CalibrationStore`] over a single JSON document:
//!
//! ```json
//! {"neutral_voltage": 1500.0, "acid_voltage": 2032.44}
//! ```
//!
//! - Writes go to `<path>.tmp` and are renamed over the target, so a crash
//!   mid-write never leaves a half-updated pair on disk.
//! - Missing parent directories are created only when the store was built
//!   with `create_dirs = true`.
//! - No file locking: concurrent processes on one path can race.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::app::ports::CalibrationStore;
use crate::calibration::CalibrationState;
use crate::error::{CalibrationError, Result};

pub struct JsonFileStore {
    path: PathBuf,
    create_dirs: bool,
}

impl JsonFileStore {
    /// Record location used when nothing else is configured.
    pub const DEFAULT_PATH: &'static str = "ph_calibration_data.json";

    pub fn new(path: impl Into<PathBuf>, create_dirs: bool) -> Self {
        Self {
            path: path.into(),
            create_dirs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    fn write_failure(&self, err: impl ToString) -> CalibrationError {
        CalibrationError::StorageWriteFailure {
            target: self.describe(),
            reason: err.to_string(),
        }
    }

    /// Make sure the parent directory exists, creating it if allowed.
    fn ensure_parent_dir(&self) -> Result<()> {
        let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) else {
            return Ok(());
        };
        if dir.is_dir() {
            return Ok(());
        }
        if !self.create_dirs {
            return Err(CalibrationError::StorageUnavailable {
                dir: dir.to_path_buf(),
            });
        }
        debug!("JsonFileStore: creating {}", dir.display());
        fs::create_dir_all(dir).map_err(|e| self.write_failure(e))
    }
}

/// Decode and validate a JSON record read from `location`.
pub fn decode(text: &str, location: &str) -> Result<CalibrationState> {
    let state: CalibrationState =
        serde_json::from_str(text).map_err(|e| CalibrationError::MalformedRecord {
            location: location.to_owned(),
            reason: e.to_string(),
        })?;
    state.validate()?;
    Ok(state)
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PATH, true)
    }
}

impl CalibrationStore for JsonFileStore {
    fn load(&self) -> Result<Option<CalibrationState>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(CalibrationError::MalformedRecord {
                    location: self.describe(),
                    reason: e.to_string(),
                });
            }
        };
        decode(&text, &self.describe()).map(Some)
    }

    fn save(&mut self, state: &CalibrationState) -> Result<()> {
        state.validate()?;
        self.ensure_parent_dir()?;

        let json = serde_json::to_string(state).map_err(|e| self.write_failure(e))?;
        let tmp = self.temp_path();
        let written = fs::write(&tmp, json).and_then(|()| fs::rename(&tmp, &self.path));
        if let Err(e) = written {
            warn!("JsonFileStore: write to {} failed: {}", self.describe(), e);
            let _ = fs::remove_file(&tmp);
            return Err(self.write_failure(e));
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
