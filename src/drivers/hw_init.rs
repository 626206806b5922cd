//! One-shot hardware peripheral initialization.
//!
//! Configures the relay GPIO bank and the I²C bus using raw ESP-IDF sys
//! calls.  Called once from `main()` before the poll loop starts.
//!
//! On non-espidf targets every helper is an in-memory stub so the logic
//! above the drivers runs unmodified in host tests.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use crate::pins;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    GpioConfigFailed(i32),
    I2cInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::I2cInitFailed(rc) => write!(f, "I2C driver install failed (rc={})", rc),
        }
    }
}

// ── Bring-up ──────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn init_peripherals() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the poll loop; single-threaded.
    unsafe {
        init_relay_outputs()?;
        init_i2c()?;
    }
    log::info!("hw_init: all peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_peripherals() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): peripheral init skipped");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_relay_outputs() -> Result<(), HwInitError> {
    for &pin in pins::PUMP_RELAY_GPIOS
        .iter()
        .chain(pins::SPARE_RELAY_GPIOS.iter())
    {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        // Relays are active-LOW: park every output HIGH (de-energised)
        // before anything downstream can run.
        unsafe { gpio_set_level(pin, 1) };
    }

    log::info!("hw_init: relay outputs configured, all de-energised");
    Ok(())
}

#[cfg(target_os = "espidf")]
unsafe fn init_i2c() -> Result<(), HwInitError> {
    let mut cfg = i2c_config_t {
        mode: i2c_mode_t_I2C_MODE_MASTER,
        sda_io_num: pins::I2C_SDA_GPIO,
        scl_io_num: pins::I2C_SCL_GPIO,
        sda_pullup_en: true,
        scl_pullup_en: true,
        ..Default::default()
    };
    cfg.__bindgen_anon_1.master.clk_speed = 100_000; // standard-mode I2C
    let ret = unsafe { i2c_param_config(0, &cfg) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }
    let ret = unsafe { i2c_driver_install(0, i2c_mode_t_I2C_MODE_MASTER, 0, 0, 0) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::I2cInitFailed(ret));
    }

    log::info!("hw_init: I2C master configured");
    Ok(())
}

// ── GPIO helpers ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin;
    // pin was validated during init_relay_outputs(). Main-loop only.
    unsafe {
        gpio_set_level(pin, if high { 1 } else { 0 });
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── I²C helper ────────────────────────────────────────────────

/// Write `data` to the device at `addr` on I²C port 0.
/// Returns false on NACK or bus error.
#[cfg(target_os = "espidf")]
pub fn i2c_write(addr: u8, data: &[u8]) -> bool {
    // SAFETY: driver installed in init_i2c(); main-loop only, so the
    // port-0 handle is never used concurrently.
    let ret = unsafe {
        i2c_master_write_to_device(
            0,
            addr,
            data.as_ptr(),
            data.len(),
            100, // ticks; generous for a 9600-baud-paced loop
        )
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write(_addr: u8, _data: &[u8]) -> bool {
    true
}

/// Write `reg` then read `buf.len()` bytes from the device at `addr`.
#[cfg(target_os = "espidf")]
pub fn i2c_write_read(addr: u8, reg: u8, buf: &mut [u8]) -> bool {
    // SAFETY: see i2c_write.
    let ret = unsafe {
        i2c_master_write_read_device(0, addr, &reg, 1, buf.as_mut_ptr(), buf.len(), 100)
    };
    ret == ESP_OK as i32
}

#[cfg(not(target_os = "espidf"))]
pub fn i2c_write_read(_addr: u8, _reg: u8, buf: &mut [u8]) -> bool {
    buf.fill(0);
    true
}

// ── Blocking delay ────────────────────────────────────────────

/// Block the calling thread for `ms` milliseconds.
///
/// The poll loop deliberately stalls on this during pump runs and
/// measurement sequences; incoming bytes wait in the UART FIFO.
pub fn delay_ms(ms: u32) {
    std::thread::sleep(std::time::Duration::from_millis(u64::from(ms)));
}
