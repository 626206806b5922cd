//! Hardware adapter — bridges the real peripherals to the port traits.
//!
//! Owns the pump, illumination and colour-sensor drivers and exposes them
//! through [`ActuatorPort`].  This is the only module that sequences real
//! hardware; on non-espidf targets the underlying drivers use cfg-gated
//! simulation stubs.

use log::info;

use crate::app::ports::{ActuatorPort, Rgb};
use crate::config::SystemConfig;
use crate::drivers::color_sensor::ColorSensor;
use crate::drivers::hw_init;
use crate::drivers::led_stick::LedStick;
use crate::drivers::pump::PumpDriver;

/// LED stick positions lit during a measurement (the ones facing the
/// cell window; 0-based).
const ILLUM_LEDS: core::ops::RangeInclusive<u8> = 3..=9;

pub struct HardwareAdapter {
    config: SystemConfig,
    pump: PumpDriver,
    stick: LedStick,
    sensor: ColorSensor,
}

impl HardwareAdapter {
    /// Wrap the drivers.  `ColorSensor::init` must have been called on
    /// `sensor` during startup.
    pub fn new(
        config: SystemConfig,
        pump: PumpDriver,
        stick: LedStick,
        sensor: ColorSensor,
    ) -> Self {
        Self {
            config,
            pump,
            stick,
            sensor,
        }
    }
}

impl ActuatorPort for HardwareAdapter {
    fn run_pump(&mut self, pin: i32, duration_secs: f32) {
        self.pump.run_timed(pin, duration_secs);
    }

    fn run_measurement(&mut self) -> Rgb {
        info!("measurement: illumination on");
        self.stick.all_off();
        self.stick.set_brightness(self.config.illum_brightness);
        for led in ILLUM_LEDS {
            self.stick.set_led_color(led, 255, 255, 255);
        }
        hw_init::delay_ms(self.config.illum_settle_ms);

        let samples = self.config.sample_count.max(1);
        let (mut r, mut g, mut b) = (0.0f32, 0.0f32, 0.0f32);
        for _ in 0..samples {
            let (sr, sg, sb) = self.sensor.read_rgb();
            r += sr;
            g += sg;
            b += sb;
            hw_init::delay_ms(self.config.sample_gap_ms);
        }

        hw_init::delay_ms(self.config.illum_settle_ms);
        self.stick.all_off();
        info!("measurement: illumination off");

        let n = f32::from(samples);
        Rgb {
            r: (r / n) as u8,
            g: (g / n) as u8,
            b: (b / n) as u8,
        }
    }
}
