//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing calibration events through the `log`
//! facade. Whatever logger the binary installs decides where they end up.

use log::info;

use crate::app::events::CalibrationEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`CalibrationEvent`] for the operator.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &CalibrationEvent) {
        match event {
            CalibrationEvent::Loading { source } => {
                info!("Loading calibration data from {}...", source);
            }
            CalibrationEvent::Storing { target } => {
                info!("Storing calibration data in {}...", target);
            }
            CalibrationEvent::Calibrated { point, voltage } => {
                info!(
                    "Successfully calibrated PH{} voltage to {} mV",
                    point.ph_label(),
                    voltage
                );
            }
            CalibrationEvent::ActiveVoltages { neutral, acid } => {
                info!("Active neutral voltage for PH 7:    {} mV", neutral);
                info!("Active acid voltage for PH 4:       {} mV", acid);
            }
        }
    }
}
