//! GPIO / peripheral pin assignments for the MixCell main board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.  Change a pin here and it propagates everywhere.

// ---------------------------------------------------------------------------
// Pump relay bank (active-LOW relay board)
// ---------------------------------------------------------------------------

/// Digital outputs driving the six dispensing-pump relays.  The host
/// addresses pumps by this GPIO number directly (`Mix,<pin>,<secs>`).
/// Relays energise on LOW; all pins idle HIGH.
pub const PUMP_RELAY_GPIOS: [i32; 6] = [2, 3, 4, 5, 6, 7];

/// Spare relay outputs, wired but unused.  Held HIGH (de-energised) so a
/// floating input cannot latch a relay on.
pub const SPARE_RELAY_GPIOS: [i32; 2] = [8, 9];

// ---------------------------------------------------------------------------
// I²C bus (Qwiic LED stick + TCS34725 colour sensor)
// ---------------------------------------------------------------------------

pub const I2C_SDA_GPIO: i32 = 14;
pub const I2C_SCL_GPIO: i32 = 15;

/// Qwiic LED stick default address.
pub const LED_STICK_I2C_ADDR: u8 = 0x23;
/// TCS34725 colour sensor fixed address.
pub const COLOR_SENSOR_I2C_ADDR: u8 = 0x29;

// ---------------------------------------------------------------------------
// UART host link
// ---------------------------------------------------------------------------

pub const UART_TX_GPIO: i32 = 17;
pub const UART_RX_GPIO: i32 = 18;

/// Is `pin` one of the wired pump relays?
pub fn is_pump_pin(pin: i32) -> bool {
    PUMP_RELAY_GPIOS.contains(&pin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pump_pins_exclude_spares() {
        for p in PUMP_RELAY_GPIOS {
            assert!(is_pump_pin(p));
            assert!(!SPARE_RELAY_GPIOS.contains(&p));
        }
        assert!(!is_pump_pin(8));
        assert!(!is_pump_pin(0));
    }
}
