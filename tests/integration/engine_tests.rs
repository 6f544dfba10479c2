//! Engine lifecycle against mock ports: event reporting, commit order,
//! rollback on storage failure.

use phprobe::adapters::nvs::NvsStore;
use phprobe::app::events::CalibrationEvent;
use phprobe::app::ports::CalibrationStore;
use phprobe::{CalibrationError, CalibrationPoint, CalibrationState, PhSensor};

use super::mock_ports::{FlakyStore, RecordingSink};

fn flaky_sensor() -> PhSensor<FlakyStore, RecordingSink> {
    PhSensor::with_ports(FlakyStore::new(NvsStore::new()), RecordingSink::default()).unwrap()
}

#[test]
fn every_successful_mutation_reports_active_voltages() {
    let mut s = flaky_sensor();
    assert_eq!(s.sink().active_voltage_reports(), 1);

    s.calibrate_ph7(1510.0).unwrap();
    s.calibrate_ph4(2010.0).unwrap();
    s.auto_calibrate(1490.0).unwrap();
    s.set_calibration_data(1505.0, 2020.0).unwrap();
    s.reset_to_default().unwrap();
    assert_eq!(s.sink().active_voltage_reports(), 6);

    // failures report nothing
    let _ = s.calibrate_ph7(0.0);
    let _ = s.auto_calibrate(1750.0);
    assert_eq!(s.sink().active_voltage_reports(), 6);
}

#[test]
fn every_mutation_persists_both_fields() {
    let mut s = flaky_sensor();
    s.calibrate_ph4(1990.0).unwrap();
    assert_eq!(
        s.store().inner.load(),
        Ok(Some(CalibrationState {
            neutral_voltage: 1500.0,
            acid_voltage: 1990.0,
        }))
    );
    assert_eq!(s.store().writes, 2);
}

#[test]
fn write_failure_rolls_back_in_memory_state() {
    let store = NvsStore::new();
    let mut flaky = FlakyStore::new(store.clone());
    flaky.fail_writes = true;
    // first boot needs a write, so seed the record through the shared partition
    let mut seed = store.clone();
    seed.save(&CalibrationState::new(1520.0, 2040.0).unwrap()).unwrap();

    let mut s = PhSensor::with_ports(flaky, RecordingSink::default()).unwrap();
    let before = *s.state();

    let err = s.calibrate_ph7(1515.0).unwrap_err();
    assert!(matches!(err, CalibrationError::StorageWriteFailure { .. }));
    assert_eq!(*s.state(), before);
    assert_eq!(store.load(), Ok(Some(before)));

    assert!(matches!(
        s.set_calibration_data(1400.0, 1900.0),
        Err(CalibrationError::StorageWriteFailure { .. })
    ));
    assert!(matches!(
        s.reset_to_default(),
        Err(CalibrationError::StorageWriteFailure { .. })
    ));
    assert_eq!(*s.state(), before);
    assert_eq!(s.read_ph(1520.0), 7.0);
}

#[test]
fn first_boot_write_failure_fails_construction() {
    let mut flaky = FlakyStore::new(NvsStore::new());
    flaky.fail_writes = true;
    assert!(matches!(
        PhSensor::with_ports(flaky, RecordingSink::default()),
        Err(CalibrationError::StorageWriteFailure { .. })
    ));
}

#[test]
fn existing_record_is_loaded_not_rewritten() {
    let mut store = NvsStore::new();
    let stored = CalibrationState::new(1450.0, 1950.0).unwrap();
    store.save(&stored).unwrap();

    let s = PhSensor::with_ports(FlakyStore::new(store), RecordingSink::default()).unwrap();
    assert_eq!(*s.state(), stored);
    assert_eq!(s.store().writes, 0);
    assert!(matches!(
        s.sink().events[0],
        CalibrationEvent::Loading { .. }
    ));
}

#[test]
fn auto_calibrate_routes_acid_readings() {
    let mut s = flaky_sensor();
    assert_eq!(s.auto_calibrate(2100.0), Ok(CalibrationPoint::Acid));
    assert_eq!(s.acid_voltage(), 2100.0);
    assert_eq!(s.neutral_voltage(), 1500.0);
    assert_eq!(s.read_ph(2100.0), 4.0);
}

#[test]
fn reboot_on_shared_partition_restores_calibration() {
    let store = NvsStore::new();
    {
        let mut s = PhSensor::with_ports(store.clone(), RecordingSink::default()).unwrap();
        s.set_calibration_data(1480.0, 2060.0).unwrap();
    }
    let s = PhSensor::with_ports(store, RecordingSink::default()).unwrap();
    assert_eq!(s.neutral_voltage(), 1480.0);
    assert_eq!(s.acid_voltage(), 2060.0);
}
