//! Fixed-capacity receive queue for the command UART.
//!
//! The UART driver is drained in bursts; the controller consumes at most
//! one byte per tick.  Bytes that arrive while the queue is full are
//! dropped (newest first) and counted.

use heapless::Deque;
use log::warn;

/// Queue depth in bytes.
pub const RX_QUEUE_CAP: usize = 16;

pub struct RxQueue {
    bytes: Deque<u8, RX_QUEUE_CAP>,
    dropped: u32,
}

impl Default for RxQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl RxQueue {
    pub const fn new() -> Self {
        Self {
            bytes: Deque::new(),
            dropped: 0,
        }
    }

    /// Append a received burst.  Returns how many bytes were dropped.
    pub fn extend(&mut self, burst: &[u8]) -> usize {
        let mut lost = 0;
        for &b in burst {
            if self.bytes.push_back(b).is_err() {
                lost += 1;
            }
        }
        if lost > 0 {
            self.dropped = self.dropped.saturating_add(lost as u32);
            warn!("Serial: rx queue full, dropped {} byte(s)", lost);
        }
        lost
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.bytes.pop_front()
    }

    /// Free slots; the adapter never reads more than this from the UART.
    pub fn free(&self) -> usize {
        RX_QUEUE_CAP - self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}
