//! Sensor drivers.
//!
//! Only the analog pH probe lives here. Acquisition of the raw millivolt
//! signal and of the compensation temperature happens upstream; the driver
//! takes both as plain numbers.

pub mod ph;
