//! NVS-style key-value adapter.
//!
//! Implements [`CalibrationStore`] over a namespaced blob store, with the
//! record encoded by `postcard` (16 bytes: two little-endian `f64`s).
//!
//! On host targets the partition is an in-memory map. Clones of an
//! [`NvsStore`] share one partition, the way two handles on the same flash
//! partition would, so a "reboot" can be simulated by building a second
//! engine from a clone.
//!
//! - Validation: records are range-checked on load and before every save.
//! - Atomic writes: a blob insert replaces the previous record in one step.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use log::info;

use crate::app::ports::CalibrationStore;
use crate::calibration::CalibrationState;
use crate::error::{CalibrationError, Result};

const DEFAULT_NAMESPACE: &str = "phprobe";
const DEFAULT_KEY: &str = "phcal";

type Partition = Rc<RefCell<HashMap<String, Vec<u8>>>>;

#[derive(Clone)]
pub struct NvsStore {
    partition: Partition,
    namespace: String,
    key: String,
}

impl NvsStore {
    /// Open a fresh simulated partition under the default namespace/key.
    pub fn new() -> Self {
        info!("NvsStore: simulation backend");
        Self::with_key(DEFAULT_NAMESPACE, DEFAULT_KEY)
    }

    pub fn with_key(namespace: &str, key: &str) -> Self {
        Self {
            partition: Rc::new(RefCell::new(HashMap::new())),
            namespace: namespace.to_owned(),
            key: key.to_owned(),
        }
    }

    /// Another record on the same partition.
    pub fn sibling(&self, namespace: &str, key: &str) -> Self {
        Self {
            partition: Rc::clone(&self.partition),
            namespace: namespace.to_owned(),
            key: key.to_owned(),
        }
    }

    fn composite_key(&self) -> String {
        format!("{}::{}", self.namespace, self.key)
    }

    /// Erase this record (factory reset). The next engine built on this
    /// store starts from defaults.
    pub fn erase(&mut self) {
        self.partition.borrow_mut().remove(&self.composite_key());
    }
}

impl Default for NvsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalibrationStore for NvsStore {
    fn load(&self) -> Result<Option<CalibrationState>> {
        let partition = self.partition.borrow();
        let Some(bytes) = partition.get(&self.composite_key()) else {
            return Ok(None);
        };
        let state: CalibrationState =
            postcard::from_bytes(bytes).map_err(|e| CalibrationError::MalformedRecord {
                location: self.describe(),
                reason: e.to_string(),
            })?;
        state.validate()?;
        Ok(Some(state))
    }

    fn save(&mut self, state: &CalibrationState) -> Result<()> {
        state.validate()?;
        let bytes =
            postcard::to_allocvec(state).map_err(|e| CalibrationError::StorageWriteFailure {
                target: self.describe(),
                reason: e.to_string(),
            })?;
        self.partition
            .borrow_mut()
            .insert(self.composite_key(), bytes);
        Ok(())
    }

    fn describe(&self) -> String {
        format!("nvs://{}", self.composite_key())
    }
}
