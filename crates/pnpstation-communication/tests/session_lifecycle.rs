//! Device session lifecycle tests against a recording mock transport

use parking_lot::Mutex;
use pnpstation_communication::{
    DeviceSession, SerialTransport, TransportFactory, NO_PORTS_PLACEHOLDER, SCANNING_PLACEHOLDER,
};
use pnpstation_core::{Axis, ConnectionError, ControlConfig, Direction, JogState};
use std::io;
use std::sync::Arc;

/// Everything the mock observed, shared between the test and the transport
#[derive(Default)]
struct Recorder {
    /// Complete lines written to the transport, as text
    writes: Mutex<Vec<String>>,
    /// Ports the factory was asked to open, with the requested baud
    open_calls: Mutex<Vec<(String, u32)>>,
}

struct MockTransport {
    name: String,
    recorder: Arc<Recorder>,
    fail_writes: bool,
}

impl SerialTransport for MockTransport {
    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        if self.fail_writes {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "device unplugged"));
        }
        self.recorder
            .writes
            .lock()
            .push(String::from_utf8_lossy(data).into_owned());
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

struct MockFactory {
    recorder: Arc<Recorder>,
    fail_open: bool,
    fail_writes: bool,
}

impl MockFactory {
    fn working(recorder: Arc<Recorder>) -> Self {
        Self {
            recorder,
            fail_open: false,
            fail_writes: false,
        }
    }
}

impl TransportFactory for MockFactory {
    fn open(
        &self,
        port: &str,
        baud_rate: u32,
    ) -> Result<Box<dyn SerialTransport>, ConnectionError> {
        self.recorder
            .open_calls
            .lock()
            .push((port.to_string(), baud_rate));
        if self.fail_open {
            return Err(ConnectionError::FailedToOpen {
                port: port.to_string(),
                reason: "no such device".to_string(),
            });
        }
        Ok(Box::new(MockTransport {
            name: port.to_string(),
            recorder: Arc::clone(&self.recorder),
            fail_writes: self.fail_writes,
        }))
    }
}

/// Config with a zero settle delay so tests do not sleep
fn test_config() -> ControlConfig {
    ControlConfig {
        settle_delay_ms: 0,
        ..ControlConfig::default()
    }
}

fn session_with(factory: MockFactory) -> DeviceSession {
    DeviceSession::new(Box::new(factory), &test_config())
}

#[test]
fn rejects_empty_and_placeholder_selections() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    for selection in ["", SCANNING_PLACEHOLDER, NO_PORTS_PLACEHOLDER] {
        let result = session.connect(selection);
        assert!(matches!(
            result,
            Err(ConnectionError::InvalidSelection { .. })
        ));
        assert!(!session.is_connected());
    }

    // The transport layer was never touched
    assert!(recorder.open_calls.lock().is_empty());
}

#[test]
fn connect_sends_relative_positioning_first() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.connect("COM5").unwrap();

    assert!(session.is_connected());
    assert_eq!(session.port_name(), Some("COM5"));
    assert_eq!(
        recorder.open_calls.lock().as_slice(),
        &[("COM5".to_string(), 115_200)]
    );
    assert_eq!(recorder.writes.lock().first().map(String::as_str), Some("G91\n"));
}

#[test]
fn open_failure_leaves_session_disconnected() {
    let recorder = Arc::new(Recorder::default());
    let factory = MockFactory {
        recorder: Arc::clone(&recorder),
        fail_open: true,
        fail_writes: false,
    };
    let mut session = session_with(factory);

    let result = session.connect("COM5");

    assert!(matches!(result, Err(ConnectionError::FailedToOpen { .. })));
    assert!(!session.is_connected());
    assert!(recorder.writes.lock().is_empty());
}

#[test]
fn send_after_disconnect_is_a_noop() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.connect("COM5").unwrap();
    session.disconnect();

    assert!(!session.is_connected());
    session.send("G0 X1.000 F1500");
    // Only the initial mode command ever went out
    assert_eq!(recorder.writes.lock().as_slice(), &["G91\n".to_string()]);
}

#[test]
fn disconnect_is_idempotent() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(recorder));

    session.disconnect();
    assert!(!session.is_connected());

    session.connect("COM5").unwrap();
    session.disconnect();
    session.disconnect();
    assert!(!session.is_connected());
}

#[test]
fn write_failure_does_not_change_connection_state() {
    let recorder = Arc::new(Recorder::default());
    let factory = MockFactory {
        recorder: Arc::clone(&recorder),
        fail_open: false,
        fail_writes: true,
    };
    let mut session = session_with(factory);

    // The initial mode command fails to write; the session stays up
    session.connect("COM5").unwrap();
    assert!(session.is_connected());

    session.send("M107");
    assert!(session.is_connected());
    assert!(recorder.writes.lock().is_empty());
}

#[test]
fn jog_encodes_step_direction_and_per_axis_feed() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));
    let mut jog = JogState::from_config(&test_config());

    session.connect("COM5").unwrap();

    jog.set_step_size(pnpstation_core::StepSize::Small);
    session.jog(Axis::Z, Direction::Negative, &jog);
    session.jog(Axis::X, Direction::Positive, &jog);

    let writes = recorder.writes.lock();
    assert_eq!(
        writes.as_slice(),
        &[
            "G91\n".to_string(),
            "G0 Z-0.100 F300\n".to_string(),
            "G0 X0.100 F1500\n".to_string(),
        ]
    );
}

#[test]
fn jog_while_disconnected_is_a_noop() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));
    let jog = JogState::from_config(&test_config());

    session.jog(Axis::X, Direction::Positive, &jog);
    assert!(recorder.writes.lock().is_empty());
}

#[test]
fn fans_off_sends_m107() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.connect("COM5").unwrap();
    session.fans_off();

    assert_eq!(recorder.writes.lock().last().map(String::as_str), Some("M107\n"));
}

#[test]
fn emergency_stop_halts_and_latches_disconnected() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.connect("COM5").unwrap();
    session.emergency_stop();

    assert!(!session.is_connected());
    assert_eq!(recorder.writes.lock().last().map(String::as_str), Some("M112\n"));

    // Jogging after the stop is inert until a fresh connect
    let jog = JogState::from_config(&test_config());
    session.jog(Axis::Y, Direction::Positive, &jog);
    assert_eq!(recorder.writes.lock().last().map(String::as_str), Some("M112\n"));
}

#[test]
fn emergency_stop_while_disconnected_stays_disconnected() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.emergency_stop();

    assert!(!session.is_connected());
    assert!(recorder.writes.lock().is_empty());
}

#[test]
fn emergency_stop_latches_even_when_the_send_fails() {
    let recorder = Arc::new(Recorder::default());
    let factory = MockFactory {
        recorder: Arc::clone(&recorder),
        fail_open: false,
        fail_writes: true,
    };
    let mut session = session_with(factory);

    session.connect("COM5").unwrap();
    session.emergency_stop();

    assert!(!session.is_connected());
}

#[test]
fn reconnecting_replaces_the_live_transport() {
    let recorder = Arc::new(Recorder::default());
    let mut session = session_with(MockFactory::working(Arc::clone(&recorder)));

    session.connect("COM5").unwrap();
    session.connect("COM7").unwrap();

    assert_eq!(session.port_name(), Some("COM7"));
    let opened: Vec<String> = recorder
        .open_calls
        .lock()
        .iter()
        .map(|(port, _)| port.clone())
        .collect();
    assert_eq!(opened, vec!["COM5", "COM7"]);
}
