//! Fuzz target: JSON calibration record decoder
//!
//! Feeds arbitrary bytes to the record decoder and verifies:
//! - No panics under arbitrary input
//! - Anything that decodes is in range and reads back 7.00 / 4.00 at its
//!   own calibration points
//!
//! cargo fuzz run fuzz_calibration_record

#![no_main]

use libfuzzer_sys::fuzz_target;
use phprobe::PhSensor;
use phprobe::adapters::json_file::decode;
use phprobe::adapters::nvs::NvsStore;
use phprobe::app::events::CalibrationEvent;
use phprobe::app::ports::{CalibrationStore, EventSink};

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &CalibrationEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(state) = decode(text, "fuzz") else {
        return;
    };
    assert!(state.validate().is_ok(), "decoder accepted {state:?}");

    let mut store = NvsStore::new();
    store.save(&state).expect("validated state must store");
    let sensor = PhSensor::with_ports(store, Discard).expect("validated state must load");
    assert_eq!(sensor.read_ph(state.neutral_voltage), 7.0);
    assert_eq!(sensor.read_ph(state.acid_voltage), 4.0);
});
