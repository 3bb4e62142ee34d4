//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements             | Connects to                 |
//! |------------|------------------------|-----------------------------|
//! | `hardware` | OutputPort, ButtonPort | LED, buzzer, relay, button  |
//! | `log_sink` | EventSink              | Serial log output           |
//! | `rx_queue` | (used by `serial`)     | Command byte buffering      |
//! | `serial`   | CommandChannel         | UART1 (ESP-IDF only)        |
//! | `time`     | TimerPort              | ESP32 high-resolution timer |

pub mod hardware;
pub mod log_sink;
pub mod rx_queue;
#[cfg(target_os = "espidf")]
pub mod serial;
pub mod time;
