//! Device session: serial connection lifecycle and command dispatch
//!
//! Owns the serial transport for the lifetime of a connection. Commands are
//! fire-and-forget over a newline-terminated text protocol; the machine is
//! assumed to process them in order with no acknowledgment, so there is no
//! retry, no flow control, and no response parsing here.
//!
//! Failure policy: connect failures surface as [`ConnectionError`] for the
//! caller to log-and-continue; write failures are logged and swallowed and
//! do not change connection state. A `send` while disconnected is silently
//! dropped.

use crate::discovery::{NO_PORTS_PLACEHOLDER, SCANNING_PLACEHOLDER};
use crate::transport::{SerialTransport, SystemSerialFactory, TransportFactory};
use pnpstation_core::gcode::{self, Axis, Direction};
use pnpstation_core::{ConnectionError, ControlConfig, JogState, WriteError};
use std::thread;
use std::time::Duration;

/// A session with the motion controller over one serial port.
///
/// Created empty at startup; holds a transport iff connected. The session
/// is owned exclusively by the interactive thread — command issuance is
/// serialized by construction, not by locking.
pub struct DeviceSession {
    factory: Box<dyn TransportFactory>,
    transport: Option<Box<dyn SerialTransport>>,
    baud_rate: u32,
    settle_delay: Duration,
}

impl DeviceSession {
    /// Create a disconnected session using the given transport factory
    pub fn new(factory: Box<dyn TransportFactory>, config: &ControlConfig) -> Self {
        Self {
            factory,
            transport: None,
            baud_rate: config.baud_rate,
            settle_delay: config.settle_delay(),
        }
    }

    /// Create a disconnected session over real OS serial ports
    pub fn system(config: &ControlConfig) -> Self {
        Self::new(Box::new(SystemSerialFactory), config)
    }

    /// Whether a transport is currently held
    pub fn is_connected(&self) -> bool {
        self.transport.is_some()
    }

    /// The port the session is connected on, if any
    pub fn port_name(&self) -> Option<&str> {
        self.transport.as_deref().map(|t| t.name())
    }

    /// Open a connection to the device on `port`.
    ///
    /// Rejects empty and placeholder selections without touching the
    /// transport layer. On success the session waits out the settle delay
    /// (the controller resets its bootloader when the port opens) and then
    /// puts the firmware into relative positioning mode as the first
    /// command of the session.
    ///
    /// On failure the session stays disconnected.
    pub fn connect(&mut self, port: &str) -> Result<(), ConnectionError> {
        if port.is_empty() || port == SCANNING_PLACEHOLDER || port == NO_PORTS_PLACEHOLDER {
            let err = ConnectionError::InvalidSelection {
                selection: port.to_string(),
            };
            tracing::warn!("{}", err);
            return Err(err);
        }

        // Reconnecting over a live session drops the old transport first
        self.disconnect();

        let transport = self.factory.open(port, self.baud_rate).map_err(|e| {
            tracing::warn!("{}", e);
            e
        })?;
        self.transport = Some(transport);

        thread::sleep(self.settle_delay);
        self.send(gcode::RELATIVE_POSITIONING);

        tracing::info!("Connected: {}", port);
        Ok(())
    }

    /// Close the connection if one is open. Idempotent; the session always
    /// ends disconnected regardless of how the transport teardown goes.
    pub fn disconnect(&mut self) {
        if self.transport.take().is_some() {
            tracing::info!("Disconnected");
        }
    }

    /// Send one command line to the device.
    ///
    /// A no-op unless connected. Appends the newline terminator and writes
    /// the raw bytes; the literal command text is logged. Write failures
    /// are logged and do not change connection state.
    pub fn send(&mut self, command: &str) {
        let Some(transport) = self.transport.as_mut() else {
            return;
        };

        let line = format!("{}\n", command);
        match transport.write_all(line.as_bytes()) {
            Ok(()) => tracing::info!("> {}", command),
            Err(e) => {
                let err = WriteError::Io {
                    command: command.to_string(),
                    reason: e.to_string(),
                };
                tracing::warn!("{}", err);
            }
        }
    }

    /// Jog one step along `axis` at the jog state's current increment.
    ///
    /// Z moves use the Z feed rate, X/Y the shared XY feed rate. A no-op
    /// when disconnected.
    pub fn jog(&mut self, axis: Axis, direction: Direction, jog: &JogState) {
        if !self.is_connected() {
            return;
        }
        let command = gcode::encode_move(
            axis,
            direction,
            jog.step_size.value(),
            jog.feed_rate_for(axis),
        );
        self.send(&command);
    }

    /// Turn off the part-cooling fan
    pub fn fans_off(&mut self) {
        self.send(gcode::FANS_OFF);
        tracing::info!("Sent {} (Fans Off)", gcode::FANS_OFF);
    }

    /// Halt the machine and latch the session disconnected.
    ///
    /// The halt command is only transmitted if connected, but the session
    /// always ends disconnected: after an emergency stop the operator must
    /// explicitly reconnect before any further motion.
    pub fn emergency_stop(&mut self) {
        self.send(gcode::EMERGENCY_HALT);
        tracing::warn!("!!! EMERGENCY STOP !!!");
        self.transport = None;
    }
}

impl Drop for DeviceSession {
    fn drop(&mut self) {
        self.disconnect();
    }
}
