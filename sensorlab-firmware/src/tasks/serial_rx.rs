//! Serial receive task
//!
//! Splits incoming bytes into lines and forwards recognised LED commands
//! to the LED task.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use sensorlab_core::led::{CommandDecoder, DecodeError};

use crate::channels::LED_COMMANDS;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 32;

/// Serial RX task - parses command lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut decoder = CommandDecoder::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match decoder.feed(byte) {
                        Ok(Some(command)) => {
                            debug!("Command: {}", command.as_str());
                            LED_COMMANDS.send(command).await;
                        }
                        Ok(None) => {}
                        Err(DecodeError::UnknownCommand(line)) => {
                            warn!("Ignoring unknown command {=str}", line.as_str());
                        }
                        Err(DecodeError::Line(e)) => {
                            warn!("Line error: {:?}", e);
                        }
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
                decoder.reset();
            }
        }
    }
}
