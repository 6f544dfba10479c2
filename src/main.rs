//! PhProbe — demo entry point.
//!
//! ```text
//! phprobe [MV] [TEMPERATURE_C] [--auto-calibrate]
//! ```
//!
//! Reads `phprobe.json` for settings (defaults if absent), opens the
//! calibration record, and logs the pH for `MV` (default 1515 mV). With a
//! temperature the compensated pH is logged too. `--auto-calibrate` then
//! recalibrates whichever buffer `MV` belongs to.

use anyhow::{Context, Result};
use log::info;

use phprobe::PhSensor;
use phprobe::config::SensorConfig;

const CONFIG_PATH: &str = "phprobe.json";
const DEMO_MV: f64 = 1515.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut auto_calibrate = false;
    let mut numbers = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--auto-calibrate" {
            auto_calibrate = true;
        } else {
            let value: f64 = arg
                .parse()
                .with_context(|| format!("expected a number, got {arg:?}"))?;
            numbers.push(value);
        }
    }
    let mv = numbers.first().copied().unwrap_or(DEMO_MV);
    let temperature = numbers.get(1).copied();

    let config = SensorConfig::load_from_file(CONFIG_PATH);
    let mut sensor = PhSensor::from_config(&config).with_context(|| {
        format!(
            "opening calibration record {}",
            config.calibration_path.display()
        )
    })?;

    info!("pH at {} mV: {}", mv, sensor.read_ph(mv));
    if let Some(t) = temperature {
        let ph = sensor.read_ph_compensated(mv, t)?;
        info!("pH at {} mV, {} \u{00b0}C: {}", mv, t, ph);
    }

    if auto_calibrate {
        let point = sensor.auto_calibrate(mv)?;
        info!("Auto-calibrated {:?} buffer to {} mV", point, mv);
    }
    Ok(())
}
