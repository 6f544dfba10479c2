//! Engine against a real JSON record on disk.

use std::fs;
use std::path::PathBuf;

use phprobe::config::SensorConfig;
use phprobe::{CalibrationError, PhSensor};

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("phprobe-it-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn set_calibration_data_survives_restart() {
    let dir = scratch_dir("restart");
    let path = dir.join("ph_calibration_data.json");
    {
        let mut s = PhSensor::open(&path, true).unwrap();
        s.set_calibration_data(1512.5, 2041.0).unwrap();
    }
    let s = PhSensor::open(&path, true).unwrap();
    assert_eq!(s.neutral_voltage(), 1512.5);
    assert_eq!(s.acid_voltage(), 2041.0);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn first_boot_creates_nested_directories() {
    let dir = scratch_dir("nested");
    let path = dir.join("a/b/cal.json");
    let s = PhSensor::open(&path, true).unwrap();
    assert!(path.is_file());
    assert_eq!(s.neutral_voltage(), 1500.0);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn missing_directory_without_create_is_unavailable() {
    let dir = scratch_dir("nocreate");
    let path = dir.join("cal.json");
    match PhSensor::open(&path, false) {
        Err(CalibrationError::StorageUnavailable { dir: missing }) => assert_eq!(missing, dir),
        Err(e) => panic!("unexpected error: {e}"),
        Ok(_) => panic!("construction must fail"),
    }
    assert!(!dir.exists());
}

#[test]
fn record_missing_acid_voltage_is_malformed() {
    let dir = scratch_dir("noacid");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cal.json");
    fs::write(&path, r#"{"neutral_voltage": 1500.0}"#).unwrap();
    assert!(matches!(
        PhSensor::open(&path, false),
        Err(CalibrationError::MalformedRecord { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn garbage_record_is_malformed() {
    let dir = scratch_dir("garbage");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cal.json");
    fs::write(&path, "not json at all").unwrap();
    assert!(matches!(
        PhSensor::open(&path, false),
        Err(CalibrationError::MalformedRecord { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn out_of_range_record_names_field() {
    let dir = scratch_dir("range");
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cal.json");
    fs::write(&path, r#"{"neutral_voltage": 1700.0, "acid_voltage": 2032.44}"#).unwrap();
    assert!(matches!(
        PhSensor::open(&path, false),
        Err(CalibrationError::InvalidCalibrationData {
            field: "neutral_voltage",
            ..
        })
    ));
    // the bad record is left for the operator to inspect
    assert!(fs::read_to_string(&path).unwrap().contains("1700"));
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn rejected_calibration_leaves_file_untouched() {
    let dir = scratch_dir("untouched");
    let path = dir.join("cal.json");
    let mut s = PhSensor::open(&path, true).unwrap();
    let before = fs::read_to_string(&path).unwrap();
    assert!(s.calibrate_ph4(1700.0).is_err());
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn from_config_applies_read_settings() {
    let dir = scratch_dir("config");
    let config = SensorConfig {
        calibration_path: dir.join("cal.json"),
        create_dirs: true,
        temperature_coefficient: 0.5,
        round_to: 3,
    };
    let s = PhSensor::from_config(&config).unwrap();
    assert_eq!(s.read_ph(1515.0), 6.915);
    // 1 + 0.5 * (23 - 25) == 0
    assert!(matches!(
        s.read_ph_compensated(1515.0, 23.0),
        Err(CalibrationError::DegenerateCompensation { .. })
    ));
    let _ = fs::remove_dir_all(&dir);
}
