//! Application core: pure domain logic, zero I/O.
//!
//! This module contains the control rules for the rover: the lifecycle
//! shell, the periodic task bodies, and the host-event routing table.
//! All interaction with hardware happens through **port traits** defined
//! in [`ports`], keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
pub mod tasks;
