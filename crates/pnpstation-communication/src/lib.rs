//! # PnP Station Communication
//!
//! Serial plumbing for the pick-and-place control core: non-blocking port
//! discovery, the device session (connection lifecycle, command dispatch,
//! emergency stop), and the transport abstraction that separates the
//! session from the OS serial driver.

pub mod discovery;
pub mod session;
pub mod transport;

pub use discovery::{
    filter_ports, DiscoveredPort, PortEnumerator, PortScanner, ScanOutcome, ScanState,
    SystemPortEnumerator, NO_PORTS_PLACEHOLDER, SCANNING_PLACEHOLDER,
};
pub use session::DeviceSession;
pub use transport::{SerialTransport, SystemSerialFactory, SystemSerialPort, TransportFactory};
