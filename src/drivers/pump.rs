//! Dispensing-pump relay driver.
//!
//! Each pump sits behind a relay board channel that energises on LOW; the
//! GPIO idles HIGH.  A pump run is a timed pulse: drive LOW, block for the
//! requested duration, drive HIGH again.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real GPIO via hw_init helpers.
//! On host/test: tracks state in-memory only (the delay still runs).

use log::{info, warn};

use crate::drivers::hw_init;
use crate::pins;

pub struct PumpDriver {
    /// GPIO of the relay currently energised, if any.
    active_pin: Option<i32>,
}

impl PumpDriver {
    pub fn new() -> Self {
        Self { active_pin: None }
    }

    /// Energise `pin` for `duration_secs` seconds, then release it.
    ///
    /// Blocks for the whole run.  The pin is driven as addressed even when
    /// it is not a known pump relay — the host owns the pin map — but the
    /// mismatch is logged.  Non-positive durations release immediately.
    pub fn run_timed(&mut self, pin: i32, duration_secs: f32) {
        if !pins::is_pump_pin(pin) {
            warn!("pump run on unmapped GPIO {}", pin);
        }
        info!("pump: GPIO {} on for {:.2}s", pin, duration_secs);

        self.start(pin);
        hw_init::delay_ms((duration_secs * 1000.0).max(0.0) as u32);
        self.stop(pin);
    }

    fn start(&mut self, pin: i32) {
        hw_init::gpio_write(pin, false); // LOW energises the relay
        self.active_pin = Some(pin);
    }

    fn stop(&mut self, pin: i32) {
        hw_init::gpio_write(pin, true);
        self.active_pin = None;
    }

    pub fn is_running(&self) -> bool {
        self.active_pin.is_some()
    }
}

impl Default for PumpDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_releases_relay_when_done() {
        let mut pump = PumpDriver::new();
        pump.run_timed(4, 0.0);
        assert!(!pump.is_running());
    }
}
