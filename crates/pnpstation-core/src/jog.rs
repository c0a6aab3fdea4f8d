//! Jog state: step size selection and per-axis feed rates
//!
//! Manual moves are always one step at the currently selected increment.
//! The step size is one of four fixed increments; modelling it as an enum
//! makes out-of-set values unrepresentable, so callers never need to
//! validate it.

use crate::config::ControlConfig;
use crate::gcode::Axis;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four jog increments offered to the operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepSize {
    /// 0.01 mm
    Fine,
    /// 0.1 mm
    Small,
    /// 1.0 mm
    Medium,
    /// 10.0 mm
    Large,
}

impl StepSize {
    /// All increments in ascending order, as presented to the operator
    pub const ALL: [StepSize; 4] = [
        StepSize::Fine,
        StepSize::Small,
        StepSize::Medium,
        StepSize::Large,
    ];

    /// The increment in millimetres
    pub fn value(self) -> f64 {
        match self {
            StepSize::Fine => 0.01,
            StepSize::Small => 0.1,
            StepSize::Medium => 1.0,
            StepSize::Large => 10.0,
        }
    }

    /// Map a numeric selection back to an increment.
    ///
    /// Returns `None` for anything outside the fixed set; front-ends only
    /// ever offer the four values.
    pub fn from_value(value: f64) -> Option<StepSize> {
        StepSize::ALL.iter().copied().find(|s| s.value() == value)
    }
}

impl fmt::Display for StepSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Current jog settings: active step size and per-axis feed rates.
///
/// Created once at startup from [`ControlConfig`] and mutated only by
/// explicit operator selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JogState {
    /// Active jog increment
    pub step_size: StepSize,
    /// Feed rate for X and Y moves, in mm/min
    pub xy_feed_rate: u32,
    /// Feed rate for Z moves, in mm/min
    pub z_feed_rate: u32,
}

impl JogState {
    /// Build the initial jog state from configuration
    pub fn from_config(config: &ControlConfig) -> Self {
        Self {
            step_size: StepSize::Medium,
            xy_feed_rate: config.xy_feed_rate,
            z_feed_rate: config.z_feed_rate,
        }
    }

    /// Select a new step size
    pub fn set_step_size(&mut self, step_size: StepSize) {
        self.step_size = step_size;
        tracing::info!("Step size: {}mm", step_size);
    }

    /// The feed rate used for moves on the given axis.
    ///
    /// Z uses the slow Z feed rate; X and Y share the XY feed rate.
    pub fn feed_rate_for(&self, axis: Axis) -> u32 {
        match axis {
            Axis::Z => self.z_feed_rate,
            Axis::X | Axis::Y => self.xy_feed_rate,
        }
    }
}
