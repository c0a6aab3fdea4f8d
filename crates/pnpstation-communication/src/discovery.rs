//! Serial port discovery
//!
//! Enumerates system serial devices, filters out bluetooth/wireless virtual
//! ports, and hands the result back over a bounded channel so enumeration
//! never blocks the interactive thread.
//!
//! A scan is a one-shot detached worker: it runs to completion, delivers
//! exactly one [`ScanOutcome`], and restores the scanner to [`ScanState::Idle`]
//! on every path. Requesting a scan while one is in flight is a no-op, which
//! keeps rapid repeated requests from piling up worker threads.

use parking_lot::Mutex;
use pnpstation_core::DiscoveryError;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::sync::Arc;
use std::thread;

/// Placeholder shown by front-ends while a scan is in flight.
/// Never a valid connect target.
pub const SCANNING_PLACEHOLDER: &str = "Scanning...";

/// Placeholder shown by front-ends when a scan found no devices.
/// Never a valid connect target.
pub const NO_PORTS_PLACEHOLDER: &str = "No USB Found";

/// Name fragments that mark a port as a wireless virtual device
const EXCLUDED_NAME_FRAGMENTS: [&str; 2] = ["bluetooth", "wireless"];

/// A system serial device as reported by enumeration.
#[derive(Debug, Clone)]
pub struct DiscoveredPort {
    /// Platform device identifier (e.g. "/dev/ttyUSB0", "COM3")
    pub identifier: String,
    /// Human-readable description (e.g. "USB FTDI Serial Port")
    pub description: String,
}

impl DiscoveredPort {
    /// Create a new discovered port
    pub fn new(identifier: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            description: description.into(),
        }
    }
}

/// Drop wireless/bluetooth virtual ports, keeping enumeration order.
///
/// The match is a case-insensitive substring check against both the device
/// identifier and its description.
pub fn filter_ports<I>(ports: I) -> Vec<String>
where
    I: IntoIterator<Item = DiscoveredPort>,
{
    ports
        .into_iter()
        .filter(|port| {
            let identifier = port.identifier.to_lowercase();
            let description = port.description.to_lowercase();
            !EXCLUDED_NAME_FRAGMENTS
                .iter()
                .any(|frag| identifier.contains(frag) || description.contains(frag))
        })
        .map(|port| port.identifier)
        .collect()
}

/// Source of raw serial device listings.
pub trait PortEnumerator: Send + Sync {
    /// Enumerate all system-visible serial devices
    fn enumerate(&self) -> Result<Vec<DiscoveredPort>, DiscoveryError>;
}

/// Enumerator backed by `serialport::available_ports`.
pub struct SystemPortEnumerator;

impl PortEnumerator for SystemPortEnumerator {
    fn enumerate(&self) -> Result<Vec<DiscoveredPort>, DiscoveryError> {
        match serialport::available_ports() {
            Ok(ports) => Ok(ports
                .into_iter()
                .map(|p| {
                    let description = describe_port_type(&p.port_type);
                    DiscoveredPort::new(p.port_name, description)
                })
                .collect()),
            Err(e) => Err(DiscoveryError::EnumerationFailed {
                reason: e.to_string(),
            }),
        }
    }
}

/// Get a user-friendly description for a port
fn describe_port_type(port_type: &serialport::SerialPortType) -> String {
    match port_type {
        serialport::SerialPortType::UsbPort(usb_info) => {
            format!(
                "USB {} {}",
                usb_info.manufacturer.as_deref().unwrap_or("Device"),
                usb_info.product.as_deref().unwrap_or("Serial Port")
            )
        }
        serialport::SerialPortType::BluetoothPort => "Bluetooth Serial".to_string(),
        serialport::SerialPortType::PciPort => "PCI Serial".to_string(),
        _ => "Serial Port".to_string(),
    }
}

/// Whether a scan is currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// No scan running; results may be pending in the channel
    Idle,
    /// A worker thread is enumerating
    Scanning,
}

/// The single message a scan worker delivers.
///
/// An empty port list is a valid terminal outcome — either nothing is
/// plugged in or enumeration failed (already logged at the origin). It is
/// distinct from "scan still running", which is [`ScanState::Scanning`].
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    /// Filtered device identifiers, in enumeration order
    pub ports: Vec<String>,
}

/// Asynchronous port scanner.
///
/// Owned by the interactive thread; worker threads only touch the shared
/// scan state and the sending half of the result channel.
pub struct PortScanner {
    enumerator: Arc<dyn PortEnumerator>,
    state: Arc<Mutex<ScanState>>,
    tx: SyncSender<ScanOutcome>,
    rx: Receiver<ScanOutcome>,
}

impl PortScanner {
    /// Create a scanner over the given enumerator
    pub fn new(enumerator: Arc<dyn PortEnumerator>) -> Self {
        // One pending outcome at most; a new scan cannot start until the
        // previous worker finished, so the channel never grows
        let (tx, rx) = sync_channel(1);
        Self {
            enumerator,
            state: Arc::new(Mutex::new(ScanState::Idle)),
            tx,
            rx,
        }
    }

    /// Create a scanner over the real system port list
    pub fn system() -> Self {
        Self::new(Arc::new(SystemPortEnumerator))
    }

    /// Current scan state
    pub fn state(&self) -> ScanState {
        *self.state.lock()
    }

    /// Whether a scan is currently in flight
    pub fn scan_in_flight(&self) -> bool {
        self.state() == ScanState::Scanning
    }

    /// Start a background scan.
    ///
    /// Returns `false` without doing anything if a scan is already in
    /// flight. The worker always delivers exactly one outcome and resets
    /// the state to `Idle`, including when enumeration fails.
    pub fn spawn_scan(&self) -> bool {
        {
            let mut state = self.state.lock();
            if *state == ScanState::Scanning {
                return false;
            }
            *state = ScanState::Scanning;
        }

        let enumerator = Arc::clone(&self.enumerator);
        let state = Arc::clone(&self.state);
        let tx = self.tx.clone();

        thread::spawn(move || {
            let ports = match enumerator.enumerate() {
                Ok(found) => filter_ports(found),
                Err(e) => {
                    // Enumeration failure is not fatal: deliver zero ports
                    tracing::warn!("{}", e);
                    Vec::new()
                }
            };
            tracing::info!("Found {} device(s)", ports.len());

            if tx.try_send(ScanOutcome { ports }).is_err() {
                // Consumer abandoned the previous outcome without draining it
                tracing::debug!("Dropping scan outcome: previous result not consumed");
            }
            *state.lock() = ScanState::Idle;
        });

        true
    }

    /// Take the pending scan outcome, if a worker has delivered one.
    ///
    /// Non-blocking; intended to be polled cooperatively from the
    /// interactive thread.
    pub fn try_take_result(&self) -> Option<ScanOutcome> {
        self.rx.try_recv().ok()
    }
}
