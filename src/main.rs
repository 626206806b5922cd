//! MixCell firmware — main entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                │
//! │                                                      │
//! │  UartTransport      HardwareAdapter   MonotonicClock │
//! │  (Transport)        (ActuatorPort)    (TimePort)     │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ──────────────    │
//! │                                                      │
//! │  ┌────────────────────────────────────────────────┐  │
//! │  │     CommandLink (FrameReceiver + Dispatcher)   │  │
//! │  └────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! One unbounded poll loop, no tasks, no interrupts.  Commands execute
//! synchronously and block the loop for their full duration; that is the
//! protocol contract the host is written against.

use anyhow::Result;
use log::info;

use mixcell::adapters::hardware::HardwareAdapter;
use mixcell::adapters::time::MonotonicClock;
use mixcell::adapters::uart::UartTransport;
use mixcell::comms::{self, CommandLink};
use mixcell::config::SystemConfig;
use mixcell::drivers::color_sensor::ColorSensor;
use mixcell::drivers::hw_init;
use mixcell::drivers::led_stick::LedStick;
use mixcell::drivers::pump::PumpDriver;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("MixCell v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();

    if let Err(e) = hw_init::init_peripherals() {
        // Relay bank state is undefined without GPIO init — halt rather
        // than risk energising a pump.
        log::error!("HAL init failed: {} — halting", e);
        #[allow(clippy::empty_loop)]
        loop {}
    }

    let mut port = UartTransport::install(config.baud_rate)?;
    let mut sensor = ColorSensor::new();
    if !sensor.init() {
        log::warn!("colour sensor absent; Meas will report all-dark");
    }

    let mut actuator = HardwareAdapter::new(config, PumpDriver::new(), LedStick::new(), sensor);
    let clock = MonotonicClock::new();
    let mut link = CommandLink::new();

    // Tell the host we are up; it blocks on this banner before sending.
    comms::send_ready_banner(&mut port);
    info!("entering poll loop");

    loop {
        link.poll(&mut port, &mut actuator, &clock);
        // Yield so the idle task can feed the task watchdog.
        hw_init::delay_ms(1);
    }
}
