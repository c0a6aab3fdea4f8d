//! G-code command vocabulary and motion encoding
//!
//! The machine speaks a line-oriented text dialect: one command per line,
//! newline terminated, no acknowledgment protocol. This module holds the
//! fixed vocabulary consumed by the session layer and the pure encoder that
//! turns a jog request into a relative linear-move command.

use std::fmt;

/// Switch the firmware to relative positioning mode.
///
/// Sent as the first command of every session so that subsequent moves are
/// interpreted as offsets from the current position.
pub const RELATIVE_POSITIONING: &str = "G91";

/// Turn off the part-cooling fan.
pub const FANS_OFF: &str = "M107";

/// Emergency halt. The firmware stops all motion immediately.
pub const EMERGENCY_HALT: &str = "M112";

/// Machine axis addressed by a move command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal X axis
    X,
    /// Horizontal Y axis
    Y,
    /// Vertical Z axis
    Z,
}

impl Axis {
    /// The single-letter address used in the line protocol
    pub fn letter(self) -> char {
        match self {
            Axis::X => 'X',
            Axis::Y => 'Y',
            Axis::Z => 'Z',
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Direction of travel along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the axis minimum
    Negative,
    /// Toward the axis maximum
    Positive,
}

impl Direction {
    /// The sign applied to the step distance
    pub fn sign(self) -> f64 {
        match self {
            Direction::Negative => -1.0,
            Direction::Positive => 1.0,
        }
    }
}

/// Encode a relative linear move.
///
/// The signed distance is `step_mm` times the direction sign, rendered to
/// exactly 3 decimal places. Pure function, no I/O.
///
/// # Examples
///
/// ```
/// use pnpstation_core::gcode::{encode_move, Axis, Direction};
///
/// let cmd = encode_move(Axis::X, Direction::Positive, 1.0, 1500);
/// assert_eq!(cmd, "G0 X1.000 F1500");
/// ```
pub fn encode_move(axis: Axis, direction: Direction, step_mm: f64, feed_rate: u32) -> String {
    let distance = step_mm * direction.sign();
    format!("G0 {}{:.3} F{}", axis, distance, feed_rate)
}
