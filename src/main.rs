//! Operator console for PnP Station
//!
//! A line-oriented front-end over the control core: connect/jog/step/estop,
//! driven by typed commands. Scan results from the background worker are
//! drained cooperatively at the top of each prompt cycle.

use anyhow::Result;
use pnpstation::{
    init_logging, Axis, ControlConfig, DeviceSession, Direction, JogState, PortScanner, StepSize,
    NO_PORTS_PLACEHOLDER,
};
use std::io::{self, BufRead, Write};

const HELP: &str = "\
Commands:
  scan                 rescan serial ports
  ports                list discovered ports
  connect [port]       connect (defaults to the first discovered port)
  disconnect           close the connection
  step <mm>            set jog step size (0.01, 0.1, 1, 10)
  x+ x- y+ y- z+ z-    jog one step along an axis
  fans                 turn off the part-cooling fan (M107)
  estop                EMERGENCY STOP (M112), requires reconnect
  status               show connection and jog state
  quit                 exit";

struct Console {
    session: DeviceSession,
    jog: JogState,
    scanner: PortScanner,
    ports: Vec<String>,
}

impl Console {
    fn new(config: &ControlConfig) -> Self {
        Self {
            session: DeviceSession::system(config),
            jog: JogState::from_config(config),
            scanner: PortScanner::system(),
            ports: Vec::new(),
        }
    }

    /// Pick up a finished background scan, if any
    fn drain_scan_result(&mut self) {
        if let Some(outcome) = self.scanner.try_take_result() {
            self.ports = outcome.ports;
            if self.ports.is_empty() {
                println!("{}", NO_PORTS_PLACEHOLDER);
            } else {
                self.print_ports();
            }
        }
    }

    fn print_ports(&self) {
        if self.ports.is_empty() {
            println!("{}", NO_PORTS_PLACEHOLDER);
            return;
        }
        for (i, port) in self.ports.iter().enumerate() {
            println!("  [{}] {}", i, port);
        }
    }

    /// Handle one console command. Returns false when the operator quits.
    fn dispatch(&mut self, line: &str) -> bool {
        let mut tokens = line.split_whitespace();
        let Some(command) = tokens.next() else {
            return true;
        };
        let arg = tokens.next();

        match command {
            "scan" => {
                if self.scanner.spawn_scan() {
                    println!("Scanning...");
                } else {
                    println!("Scan already in progress");
                }
            }
            "ports" => self.print_ports(),
            "connect" => {
                let port = arg
                    .map(str::to_string)
                    .or_else(|| self.ports.first().cloned())
                    .unwrap_or_default();
                // Failures are already logged at the origin; the visible
                // signal is simply that status stays disconnected
                let _ = self.session.connect(&port);
            }
            "disconnect" => self.session.disconnect(),
            "step" => match arg.and_then(|v| v.parse::<f64>().ok()).and_then(StepSize::from_value)
            {
                Some(step) => self.jog.set_step_size(step),
                None => println!("Step size must be one of: 0.01, 0.1, 1, 10"),
            },
            "x+" => self.session.jog(Axis::X, Direction::Positive, &self.jog),
            "x-" => self.session.jog(Axis::X, Direction::Negative, &self.jog),
            "y+" => self.session.jog(Axis::Y, Direction::Positive, &self.jog),
            "y-" => self.session.jog(Axis::Y, Direction::Negative, &self.jog),
            "z+" => self.session.jog(Axis::Z, Direction::Positive, &self.jog),
            "z-" => self.session.jog(Axis::Z, Direction::Negative, &self.jog),
            "fans" => self.session.fans_off(),
            "estop" => self.session.emergency_stop(),
            "status" => {
                match self.session.port_name() {
                    Some(port) => println!("Connected: {}", port),
                    None => println!("Disconnected"),
                }
                println!(
                    "Step: {}mm  Feed: XY {} / Z {} mm/min",
                    self.jog.step_size, self.jog.xy_feed_rate, self.jog.z_feed_rate
                );
            }
            "quit" | "exit" => return false,
            "help" => println!("{}", HELP),
            other => println!("Unknown command: {} (try 'help')", other),
        }
        true
    }
}

fn main() -> Result<()> {
    init_logging()?;

    let config = ControlConfig::default();
    config.validate()?;

    println!(
        "PnP Station v{} ({}) - type 'help' for commands",
        pnpstation::VERSION,
        pnpstation::BUILD_DATE
    );

    let mut console = Console::new(&config);
    // Kick off the first port scan right away
    console.scanner.spawn_scan();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        console.drain_scan_result();
        print!("pnp> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        if !console.dispatch(line?.trim()) {
            break;
        }
    }

    console.session.disconnect();
    Ok(())
}
