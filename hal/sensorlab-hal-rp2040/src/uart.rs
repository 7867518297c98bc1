//! UART adapters
//!
//! RP2040 has two UART peripherals; the firmwares use UART0 on GPIO0/1.

use embassy_rp::uart::{self, Blocking};
use sensorlab_hal::uart::{DataBits, Parity, StopBits};
use sensorlab_hal::{UartConfig, UartTx};

/// Build an `embassy-rp` UART configuration
pub fn uart_config(config: &UartConfig) -> uart::Config {
    let mut rp = uart::Config::default();
    rp.baudrate = config.baudrate;
    rp.data_bits = match config.data_bits {
        DataBits::Seven => uart::DataBits::DataBits7,
        DataBits::Eight => uart::DataBits::DataBits8,
    };
    rp.parity = match config.parity {
        Parity::None => uart::Parity::ParityNone,
        Parity::Even => uart::Parity::ParityEven,
        Parity::Odd => uart::Parity::ParityOdd,
    };
    rp.stop_bits = match config.stop_bits {
        StopBits::One => uart::StopBits::STOP1,
        StopBits::Two => uart::StopBits::STOP2,
    };
    rp
}

/// Blocking serial transmitter
pub struct SerialTx<'d> {
    tx: uart::UartTx<'d, Blocking>,
}

impl<'d> SerialTx<'d> {
    pub fn new(tx: uart::UartTx<'d, Blocking>) -> Self {
        Self { tx }
    }
}

impl UartTx for SerialTx<'_> {
    type Error = uart::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.blocking_write(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.blocking_flush()
    }
}
