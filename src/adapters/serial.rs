//! UART command channel adapter.
//!
//! Implements [`CommandChannel`] over an ESP-IDF UART driver configured
//! 8N1 at `AlarmConfig::serial_baud`.  Reads are non-blocking: the UART is
//! drained into an [`RxQueue`] only when the queue is empty, and each call
//! hands out a single byte.

use esp_idf_hal::delay::NON_BLOCK;
use esp_idf_hal::uart::UartDriver;
use log::warn;

use super::rx_queue::{RX_QUEUE_CAP, RxQueue};
use crate::app::ports::CommandChannel;
use crate::error::CommsError;

pub struct SerialCommandChannel<'d> {
    uart: UartDriver<'d>,
    rx: RxQueue,
    read_errors: u32,
    write_errors: u32,
}

impl<'d> SerialCommandChannel<'d> {
    pub fn new(uart: UartDriver<'d>) -> Self {
        Self {
            uart,
            rx: RxQueue::new(),
            read_errors: 0,
            write_errors: 0,
        }
    }

    /// (read, write) failures since boot.  Queue overflows count as read
    /// failures.
    pub fn error_counts(&self) -> (u32, u32) {
        (
            self.read_errors.saturating_add(self.rx.dropped()),
            self.write_errors,
        )
    }
}

impl CommandChannel for SerialCommandChannel<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        if self.rx.is_empty() {
            let mut buf = [0u8; RX_QUEUE_CAP];
            let want = self.rx.free();
            match self.uart.read(&mut buf[..want], NON_BLOCK) {
                Ok(n) => {
                    self.rx.extend(&buf[..n]);
                }
                Err(e) => {
                    self.read_errors = self.read_errors.wrapping_add(1);
                    warn!("Serial: {} ({})", CommsError::UartReadFailed, e);
                }
            }
        }
        self.rx.pop()
    }

    fn write_byte(&mut self, byte: u8) {
        match self.uart.write(&[byte]) {
            Ok(1) => {}
            Ok(n) => {
                self.write_errors = self.write_errors.wrapping_add(1);
                warn!("Serial: {} (wrote {} of 1)", CommsError::UartWriteFailed, n);
            }
            Err(e) => {
                self.write_errors = self.write_errors.wrapping_add(1);
                warn!("Serial: {} ({})", CommsError::UartWriteFailed, e);
            }
        }
    }
}
