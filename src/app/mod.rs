//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the rules for the PanicGuard controller: command
//! handling, button edge detection, panic locking and FSM orchestration.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
