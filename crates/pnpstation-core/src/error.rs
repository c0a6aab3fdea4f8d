//! Error handling for PnP Station
//!
//! Provides error types for the control layer:
//! - Connection errors (port selection, transport open)
//! - Write errors (transport write while connected)
//! - Discovery errors (port enumeration)
//!
//! All error types use `thiserror`. Policy: every error in this layer is
//! caught at its origin, logged with a human-readable message, and never
//! escalates past the component boundary — the worst observable effect of
//! any failure is that the action silently did not happen.

use thiserror::Error;

/// Connection error type
///
/// Represents failures while establishing a device session.
#[derive(Error, Debug, Clone)]
pub enum ConnectionError {
    /// The selected port identifier is empty or a UI placeholder
    #[error("No valid port selected: {selection:?}")]
    InvalidSelection {
        /// The rejected selection string.
        selection: String,
    },

    /// Failed to open the serial transport
    #[error("Failed to open port {port}: {reason}")]
    FailedToOpen {
        /// The name of the port that failed to open.
        port: String,
        /// The reason the port failed to open.
        reason: String,
    },
}

/// Write error type
///
/// Represents a transport write failure while connected. Write failures do
/// not change connection state.
#[derive(Error, Debug, Clone)]
pub enum WriteError {
    /// The underlying transport write failed
    #[error("Serial write failed for {command:?}: {reason}")]
    Io {
        /// The command that was being written.
        command: String,
        /// The reason the write failed.
        reason: String,
    },
}

/// Discovery error type
///
/// Represents a port enumeration failure. Consumers treat this as
/// "zero devices found", never as fatal.
#[derive(Error, Debug, Clone)]
pub enum DiscoveryError {
    /// System port enumeration failed
    #[error("Port enumeration failed: {reason}")]
    EnumerationFailed {
        /// The reason enumeration failed.
        reason: String,
    },
}

/// Main error type for PnP Station
///
/// A unified error type that can represent any error from the control
/// layer. This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Connection error
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Write error
    #[error(transparent)]
    Write(#[from] WriteError),

    /// Discovery error
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a connection error
    pub fn is_connection_error(&self) -> bool {
        matches!(self, Error::Connection(_))
    }

    /// Check if this is a discovery error
    pub fn is_discovery_error(&self) -> bool {
        matches!(self, Error::Discovery(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
