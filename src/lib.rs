//! # PnP Station
//!
//! Headless control core for a pick-and-place machine:
//! - Serial port discovery with background scanning
//! - Device session lifecycle over a line-oriented G-code dialect
//! - Manual jog with selectable step sizes and per-axis feed rates
//! - Emergency stop with a reconnect safety latch
//!
//! ## Architecture
//!
//! PnP Station is organized as a workspace:
//!
//! 1. **pnpstation-core** - Types, jog state, configuration, command encoding
//! 2. **pnpstation-communication** - Port discovery, serial transport, device session
//! 3. **pnpstation** - Operator console binary that integrates the crates
//!
//! Rendering, video overlay, and widget construction are deliberately out of
//! scope; the console in `main.rs` is the only front-end.

pub use pnpstation_core::{
    encode_move, Axis, ConnectionError, ControlConfig, Direction, DiscoveryError, Error, JogState,
    Result, StepSize, WriteError, EMERGENCY_HALT, FANS_OFF, RELATIVE_POSITIONING,
};

pub use pnpstation_communication::{
    filter_ports, DeviceSession, DiscoveredPort, PortEnumerator, PortScanner, ScanOutcome,
    ScanState, SerialTransport, SystemPortEnumerator, SystemSerialFactory, TransportFactory,
    NO_PORTS_PLACEHOLDER, SCANNING_PLACEHOLDER,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with console output, `RUST_LOG` environment
/// variable support, and an INFO default level. The log is the only
/// user-visible failure channel in this layer, so it stays on stdout where
/// the operator console lives.
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    Ok(())
}
