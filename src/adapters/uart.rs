//! UART transport adapter (device target only).
//!
//! Wraps UART0 behind the [`Transport`] trait.  Reads are non-blocking —
//! `read` returns whatever the driver FIFO currently holds — which is what
//! the poll loop expects.  Bytes arriving while a command blocks the loop
//! accumulate in the driver FIFO and are drained afterwards.

use esp_idf_svc::sys::*;

use crate::comms::transport::Transport;
use crate::error::{CommsError, Error};
use crate::pins;

const UART_PORT: uart_port_t = 0;
const DRIVER_RX_BUF: i32 = 512;

pub struct UartTransport;

impl UartTransport {
    /// Install the UART driver at `baud_rate`, 8N1.
    pub fn install(baud_rate: u32) -> Result<Self, Error> {
        let cfg = uart_config_t {
            baud_rate: baud_rate as i32,
            data_bits: uart_word_length_t_UART_DATA_8_BITS,
            parity: uart_parity_t_UART_PARITY_DISABLE,
            stop_bits: uart_stop_bits_t_UART_STOP_BITS_1,
            flow_ctrl: uart_hw_flowcontrol_t_UART_HW_FLOWCTRL_DISABLE,
            ..Default::default()
        };

        // SAFETY: Called once from main() before the poll loop starts;
        // UART_PORT is used from the main thread only afterwards.
        let ok = unsafe {
            uart_param_config(UART_PORT, &cfg) == ESP_OK as i32
                && uart_set_pin(
                    UART_PORT,
                    pins::UART_TX_GPIO,
                    pins::UART_RX_GPIO,
                    -1,
                    -1,
                ) == ESP_OK as i32
                && uart_driver_install(UART_PORT, DRIVER_RX_BUF, 0, 0, core::ptr::null_mut(), 0)
                    == ESP_OK as i32
        };
        if ok {
            Ok(Self)
        } else {
            Err(Error::Init("UART driver install failed"))
        }
    }
}

impl Transport for UartTransport {
    type Error = Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Error> {
        // SAFETY: driver installed in install(); main-loop only.
        let n = unsafe {
            uart_read_bytes(
                UART_PORT,
                buf.as_mut_ptr().cast(),
                buf.len() as u32,
                0, // no wait: drain what is already in the FIFO
            )
        };
        if n < 0 {
            return Err(CommsError::ReadFailed.into());
        }
        Ok(n as usize)
    }

    fn write(&mut self, data: &[u8]) -> Result<usize, Error> {
        // SAFETY: see read().
        let n = unsafe { uart_write_bytes(UART_PORT, data.as_ptr().cast(), data.len()) };
        if n < 0 {
            return Err(CommsError::WriteFailed.into());
        }
        Ok(n as usize)
    }

    fn flush(&mut self) -> Result<(), Error> {
        // SAFETY: see read().
        let ret = unsafe { uart_wait_tx_done(UART_PORT, 100) };
        if ret != ESP_OK as i32 {
            return Err(CommsError::WriteFailed.into());
        }
        Ok(())
    }
}
