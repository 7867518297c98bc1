//! Serial device adapters
//!
//! A device path (`/dev/ttyACM0`, a pty, a FIFO) is opened read-write and
//! split into a receive and a transmit half implementing the
//! `sensorlab-hal` UART traits.

use std::fs::{File, OpenOptions};
use std::io::{self, Read, Write};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::thread;

use log::{debug, warn};
use sensorlab_hal::{UartRx, UartTx};
use sensorlab_protocol::{Line, LineError, LineParser};

use crate::error::{HostError, Result};

/// Receive half over any byte source
#[derive(Debug)]
pub struct SerialRx<R> {
    inner: R,
}

impl<R: Read> SerialRx<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

impl<R: Read> UartRx for SerialRx<R> {
    type Error = io::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        loop {
            match self.inner.read(buf) {
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

/// Transmit half over any byte sink
#[derive(Debug)]
pub struct SerialTx<W> {
    inner: W,
}

impl<W: Write> SerialTx<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Release the sink
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> UartTx for SerialTx<W> {
    type Error = io::Error;

    fn write_blocking(&mut self, data: &[u8]) -> io::Result<()> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Open a serial device and split it into receive and transmit halves
///
/// Line settings are left alone. A tty must already be in raw mode
/// without echo (`stty -F <path> raw -echo`), otherwise the kernel
/// echoes status replies back to the board as commands.
pub fn open(path: &Path) -> Result<(SerialRx<File>, SerialTx<File>)> {
    let open_err = |source| HostError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .open(path)
        .map_err(open_err)?;
    let writer = file.try_clone().map_err(open_err)?;

    debug!("Opened {}", path.display());
    Ok((SerialRx::new(file), SerialTx::new(writer)))
}

/// Read the next non-empty line
///
/// Overlong lines are skipped. Returns `None` at end of stream.
pub fn read_line<R: UartRx>(
    rx: &mut R,
    parser: &mut LineParser,
) -> std::result::Result<Option<Line>, R::Error> {
    while let Some(byte) = rx.read_byte()? {
        match parser.feed(byte) {
            Ok(Some(line)) => return Ok(Some(line)),
            Ok(None) => {}
            Err(LineError::Overflow) => warn!("Discarding overlong line"),
            Err(LineError::InvalidUtf8) => warn!("Discarding line with invalid UTF-8"),
        }
    }
    Ok(None)
}

/// Forward every received line to a channel from a background thread
///
/// The thread ends at end of stream, on a read error, or when the
/// receiver is dropped.
pub fn spawn_line_reader<R>(mut rx: R) -> Receiver<String>
where
    R: UartRx<Error = io::Error> + Send + 'static,
{
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        let mut parser = LineParser::new();
        loop {
            match read_line(&mut rx, &mut parser) {
                Ok(Some(line)) => {
                    if sender.send(line.as_str().to_owned()).is_err() {
                        break;
                    }
                }
                Ok(None) => {
                    debug!("Serial stream ended");
                    break;
                }
                Err(e) => {
                    warn!("Serial read failed: {}", e);
                    break;
                }
            }
        }
    });

    receiver
}
