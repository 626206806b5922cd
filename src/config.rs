//! System configuration parameters
//!
//! All tunable parameters for the MixCell firmware.  The wire-protocol
//! constants (frame markers, buffer capacity) live in `comms::frame` because
//! the host-side consumer depends on them byte-for-byte; everything here is
//! free to tune per board revision.

use serde::{Deserialize, Serialize};

/// Core system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Host link ---
    /// Serial baud rate (must match the host controller).
    pub baud_rate: u32,

    // --- Colour measurement ---
    /// Settle time after the illumination LEDs switch on (milliseconds).
    pub illum_settle_ms: u32,
    /// Number of colour samples averaged per measurement.
    pub sample_count: u8,
    /// Delay between consecutive samples (milliseconds).
    pub sample_gap_ms: u32,
    /// LED stick brightness, 0-31 (hardware maximum 31).
    pub illum_brightness: u8,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            baud_rate: 9600,

            illum_settle_ms: 500,
            sample_count: 3,
            sample_gap_ms: 100,
            illum_brightness: 31,
        }
    }
}
