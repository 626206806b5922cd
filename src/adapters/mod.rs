//! Adapters: concrete implementations of the port traits.

pub mod hardware;
pub mod time;

#[cfg(target_os = "espidf")]
pub mod uart;
