//! Serial transport abstraction
//!
//! Provides the low-level transport seam between the device session and the
//! OS serial driver. The session only ever writes whole lines; reads are
//! never performed because the command protocol is fire-and-forget.
//!
//! [`TransportFactory`] is the injection point: production code uses
//! [`SystemSerialFactory`] backed by the `serialport` crate, tests supply a
//! recording mock.

use pnpstation_core::ConnectionError;
use std::io;
use std::time::Duration;

/// An open, line-oriented serial connection owned by the session.
pub trait SerialTransport: Send {
    /// Write raw bytes to the device
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// The port name this transport was opened on
    fn name(&self) -> &str;
}

/// Opens serial transports at a given port and baud rate.
pub trait TransportFactory: Send {
    /// Open a transport, or explain why it could not be opened
    fn open(
        &self,
        port: &str,
        baud_rate: u32,
    ) -> Result<Box<dyn SerialTransport>, ConnectionError>;
}

/// Real serial transport backed by the `serialport` crate.
pub struct SystemSerialPort {
    inner: Box<dyn serialport::SerialPort>,
    name: String,
}

impl SerialTransport for SystemSerialPort {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Factory that opens real OS serial ports.
pub struct SystemSerialFactory;

impl TransportFactory for SystemSerialFactory {
    fn open(
        &self,
        port: &str,
        baud_rate: u32,
    ) -> Result<Box<dyn SerialTransport>, ConnectionError> {
        // Short timeout: writes are small and the protocol never reads
        let builder = serialport::new(port, baud_rate).timeout(Duration::from_millis(100));

        match builder.open() {
            Ok(inner) => Ok(Box::new(SystemSerialPort {
                inner,
                name: port.to_string(),
            })),
            Err(e) => Err(ConnectionError::FailedToOpen {
                port: port.to_string(),
                reason: e.to_string(),
            }),
        }
    }
}
