#![allow(dead_code)]
//! # PnP Station Core
//!
//! Core types for the pick-and-place control layer: the G-code command
//! vocabulary and motion encoder, jog state (step size and feed rates),
//! machine configuration, and the error taxonomy shared by all crates.
//!
//! Everything here is pure state and formatting. Serial I/O lives in
//! `pnpstation-communication`.

pub mod config;
pub mod error;
pub mod gcode;
pub mod jog;

pub use config::ControlConfig;
pub use error::{ConnectionError, DiscoveryError, Error, Result, WriteError};
pub use gcode::{encode_move, Axis, Direction, EMERGENCY_HALT, FANS_OFF, RELATIVE_POSITIONING};
pub use jog::{JogState, StepSize};
