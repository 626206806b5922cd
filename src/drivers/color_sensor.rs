//! TCS34725 colour sensor driver.
//!
//! Configured the way the measurement cell is calibrated for: 50 ms
//! integration time, 4× analog gain, interrupt output asserted so the
//! breakout's on-board LED stays dark (illumination comes from the LED
//! stick, not the sensor).
//!
//! ## Dual-target design
//!
//! On ESP-IDF: real I²C transactions via hw_init helpers.
//! On host/test: reads come back zeroed; the maths still runs.

use log::warn;

use crate::drivers::hw_init;
use crate::pins;

// Register addresses (all OR'd with the command bit).
const CMD_BIT: u8 = 0x80;
const REG_ENABLE: u8 = 0x00;
const REG_ATIME: u8 = 0x01;
const REG_CONTROL: u8 = 0x0F;
const REG_CDATAL: u8 = 0x14;

// ENABLE bits.
const ENABLE_PON: u8 = 0x01;
const ENABLE_AEN: u8 = 0x02;
const ENABLE_AIEN: u8 = 0x10;

/// 50 ms integration time (datasheet encoding).
const ATIME_50MS: u8 = 0xEB;
/// 4x analog gain.
const GAIN_4X: u8 = 0x01;

pub struct ColorSensor {
    addr: u8,
}

impl ColorSensor {
    pub fn new() -> Self {
        Self {
            addr: pins::COLOR_SENSOR_I2C_ADDR,
        }
    }

    /// Power up and configure the sensor.  Returns false when the sensor
    /// does not respond; the measurement path then reads zeros, which the
    /// host sees as an all-dark result rather than an error.
    pub fn init(&mut self) -> bool {
        let ok = self.write_reg(REG_ATIME, ATIME_50MS)
            && self.write_reg(REG_CONTROL, GAIN_4X)
            // AIEN asserted keeps the breakout's LED transistor off.
            && self.write_reg(REG_ENABLE, ENABLE_PON | ENABLE_AEN | ENABLE_AIEN);
        if !ok {
            warn!("colour sensor: init transaction NACKed");
        }
        ok
    }

    /// One clear-normalised RGB reading, each channel scaled to 0-255.
    ///
    /// Returns floats so averaging over several samples keeps fractional
    /// precision; the caller truncates for the wire.
    pub fn read_rgb(&mut self) -> (f32, f32, f32) {
        // C, R, G, B as consecutive little-endian u16 pairs.
        let mut raw = [0u8; 8];
        if !hw_init::i2c_write_read(self.addr, CMD_BIT | REG_CDATAL, &mut raw) {
            warn!("colour sensor: data read NACKed");
            return (0.0, 0.0, 0.0);
        }

        let clear = u16::from_le_bytes([raw[0], raw[1]]) as f32;
        let red = u16::from_le_bytes([raw[2], raw[3]]) as f32;
        let green = u16::from_le_bytes([raw[4], raw[5]]) as f32;
        let blue = u16::from_le_bytes([raw[6], raw[7]]) as f32;

        if clear == 0.0 {
            return (0.0, 0.0, 0.0);
        }
        (
            red / clear * 255.0,
            green / clear * 255.0,
            blue / clear * 255.0,
        )
    }

    fn write_reg(&mut self, reg: u8, value: u8) -> bool {
        hw_init::i2c_write(self.addr, &[CMD_BIT | reg, value])
    }
}

impl Default for ColorSensor {
    fn default() -> Self {
        Self::new()
    }
}
