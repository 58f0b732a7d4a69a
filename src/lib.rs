//! RCC rover controller library.
//!
//! Exposes the controller core, drivers and adapters for the binary and for
//! integration testing.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod evaluator;
pub mod runtime;

pub mod adapters;
pub mod board;
pub mod drivers;
pub mod pins;
pub mod sensors;
