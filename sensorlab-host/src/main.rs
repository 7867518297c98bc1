//! `sensorlab` command-line tool

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::{info, warn};

use sensorlab_core::config::{DEFAULT_BAUDRATE, DEFAULT_WINDOW_LEN};
use sensorlab_host::capture::{self, CaptureOptions, MAX_WINDOW};
use sensorlab_host::simulate::{self, SimulatedAccelerometer};
use sensorlab_host::{led, port};

/// Companion tools for the Sensorlab LED controller and IMU streamer
#[derive(Parser)]
#[command(name = "sensorlab", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive LED control prompt
    Led {
        #[command(flatten)]
        port: PortArgs,
        /// How long to wait for a status reply, in milliseconds
        #[arg(long, default_value_t = 1000)]
        timeout_ms: u64,
    },
    /// Capture accelerometer samples and print rolling statistics
    Capture {
        #[command(flatten)]
        port: PortArgs,
        /// Measurement time in seconds
        #[arg(long, default_value_t = 10)]
        seconds: u64,
        /// Time between statistics reports, in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
        /// Number of samples kept for statistics (at most 1000)
        #[arg(long, default_value_t = DEFAULT_WINDOW_LEN)]
        window: usize,
        /// Write the final window to this CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Stream simulated accelerometer samples to stdout
    Simulate {
        /// Time between samples, in milliseconds
        #[arg(long, default_value_t = 10)]
        rate_ms: u64,
        /// Stop after this many samples
        #[arg(long)]
        count: Option<u64>,
        /// Seed for reproducible noise
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(clap::Args)]
struct PortArgs {
    /// Serial device path
    #[arg(short, long, default_value = "/dev/ttyACM0")]
    port: PathBuf,
    /// Nominal baud rate. Put a tty in raw mode first with
    /// `stty -F <port> <baud> raw -echo`, otherwise replies are echoed back
    /// to the board
    #[arg(short, long, default_value_t = DEFAULT_BAUDRATE)]
    baud: u32,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Led {
            port: args,
            timeout_ms,
        } => {
            let (rx, mut tx) = open(&args)?;
            let replies = port::spawn_line_reader(rx);
            let stdin = io::stdin();
            led::run(
                stdin.lock(),
                &mut io::stdout(),
                &mut tx,
                &replies,
                Duration::from_millis(timeout_ms),
            )
            .context("LED prompt failed")?;
        }
        Command::Capture {
            port: args,
            seconds,
            interval_ms,
            window,
            csv,
        } => {
            if window > MAX_WINDOW {
                warn!("Window limited to {} samples", MAX_WINDOW);
            }
            let (rx, _tx) = open(&args)?;
            let options = CaptureOptions {
                duration: Duration::from_secs(seconds),
                interval: Duration::from_millis(interval_ms),
                window,
                csv,
            };
            let kept = capture::run(rx, &options, &mut io::stdout()).context("capture failed")?;
            info!("Capture finished with {} samples", kept);
        }
        Command::Simulate {
            rate_ms,
            count,
            seed,
        } => {
            let period = Duration::from_millis(rate_ms);
            let sensor = SimulatedAccelerometer::new(period, seed);
            let sent = simulate::run(sensor, io::stdout().lock(), period, count)
                .context("simulation failed")?;
            info!("Sent {} samples", sent);
        }
    }

    Ok(())
}

fn open(args: &PortArgs) -> Result<(port::SerialRx<std::fs::File>, port::SerialTx<std::fs::File>)> {
    info!("Opening {} ({} baud)", args.port.display(), args.baud);
    port::open(&args.port).with_context(|| format!("opening {}", args.port.display()))
}
