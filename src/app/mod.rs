//! Application boundary: port traits and the events the engine emits.
//!
//! The calibration engine never touches the filesystem or a logger
//! directly. Storage and operator output go through the traits in
//! [`ports`], keeping the engine testable against in-memory mocks.

pub mod events;
pub mod ports;
