//! Machine configuration
//!
//! Fixed operating parameters for the control layer: serial baud rate,
//! per-axis feed rates, and the post-connect settle delay. Nothing is
//! persisted; defaults match the target machine and serve as the single
//! source for seeding [`crate::jog::JogState`] and the device session.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Control layer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Serial baud rate
    pub baud_rate: u32,
    /// Feed rate for X/Y jog moves, in mm/min
    pub xy_feed_rate: u32,
    /// Feed rate for Z jog moves, in mm/min
    pub z_feed_rate: u32,
    /// Wait after opening the port before the first command, in milliseconds.
    /// Covers the controller's bootloader reset on connect.
    pub settle_delay_ms: u64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            baud_rate: 115_200,
            xy_feed_rate: 1500,
            z_feed_rate: 300,
            settle_delay_ms: 2000,
        }
    }
}

impl ControlConfig {
    /// The settle delay as a [`Duration`]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.baud_rate == 0 {
            return Err(Error::other("Baud rate must be non-zero"));
        }
        if self.xy_feed_rate == 0 || self.z_feed_rate == 0 {
            return Err(Error::other("Feed rates must be non-zero"));
        }
        Ok(())
    }
}
