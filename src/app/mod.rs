//! Application layer: the port traits the comms core is written against.

pub mod ports;
