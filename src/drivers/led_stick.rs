//! Qwiic LED stick driver (10-LED I²C stick).
//!
//! Only the three operations the measurement sequence needs: global
//! brightness, per-LED colour, all-off.  Register layout follows the
//! SparkFun Qwiic LED Stick command set.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real I²C writes via hw_init helpers.
//! On host/test: tracks the last commanded state in-memory only.

use log::warn;

use crate::drivers::hw_init;
use crate::pins;

// Qwiic LED stick I²C commands.
const CMD_WRITE_SINGLE_LED_COLOR: u8 = 0x71;
const CMD_WRITE_ALL_LED_OFF: u8 = 0x78;
const CMD_WRITE_ALL_LED_BRIGHTNESS: u8 = 0x77;

pub const LED_COUNT: u8 = 10;

pub struct LedStick {
    addr: u8,
    brightness: u8,
}

impl LedStick {
    pub fn new() -> Self {
        Self {
            addr: pins::LED_STICK_I2C_ADDR,
            brightness: 0,
        }
    }

    /// Set global brightness, 0-31.
    pub fn set_brightness(&mut self, level: u8) {
        let level = level.min(31);
        if !hw_init::i2c_write(self.addr, &[CMD_WRITE_ALL_LED_BRIGHTNESS, level]) {
            warn!("LED stick: brightness write NACKed");
        }
        self.brightness = level;
    }

    /// Set one LED (0-based position).
    pub fn set_led_color(&mut self, number: u8, r: u8, g: u8, b: u8) {
        if number >= LED_COUNT {
            warn!("LED stick: position {} out of range", number);
            return;
        }
        if !hw_init::i2c_write(self.addr, &[CMD_WRITE_SINGLE_LED_COLOR, number, r, g, b]) {
            warn!("LED stick: colour write NACKed");
        }
    }

    /// Turn every LED off.
    pub fn all_off(&mut self) {
        if !hw_init::i2c_write(self.addr, &[CMD_WRITE_ALL_LED_OFF]) {
            warn!("LED stick: off write NACKed");
        }
    }

    pub fn brightness(&self) -> u8 {
        self.brightness
    }
}

impl Default for LedStick {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brightness_clamps_to_hardware_max() {
        let mut stick = LedStick::new();
        stick.set_brightness(255);
        assert_eq!(stick.brightness(), 31);
    }
}
