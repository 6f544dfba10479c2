//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises the calibration engine
//! against a real JSON record or the mock adapters. Everything runs on the
//! host with no probe attached.

mod engine_tests;
mod file_store_tests;
