//! Hardware drivers.
//!
//! Each driver is a dumb actuator/sensor wrapper: no protocol knowledge,
//! no policy.  Real peripheral access goes through `hw_init`; on host
//! targets the same code runs against in-memory stubs.

pub mod color_sensor;
pub mod hw_init;
pub mod led_stick;
pub mod pump;
