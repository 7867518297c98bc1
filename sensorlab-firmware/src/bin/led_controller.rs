//! Sensorlab LED controller
//!
//! Reads `on`, `off`, `blink` and `status` lines from UART0 and drives the
//! board LED. `status` is answered with `0`, `1` or `2`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use sensorlab_drivers::led::GpioLed;
use sensorlab_firmware::config::BOARD;
use sensorlab_firmware::tasks;
use sensorlab_hal_rp2040::{uart_config, LedPin};

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 128]> = StaticCell::new();

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sensorlab LED controller starting...");

    let p = embassy_rp::init(Default::default());

    // Arduino Nano RP2040 Connect: LED on GPIO6
    let led_pin = LedPin::new(Output::new(p.PIN_6, Level::Low));
    let led = GpioLed::from_config(led_pin, &BOARD.led);

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 128]);

    let uart = Uart::new_blocking(
        p.UART0,
        p.PIN_0,
        p.PIN_1,
        uart_config(&BOARD.serial.uart_config()),
    );
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART0 ready at {} baud", BOARD.serial.baudrate);

    spawner.spawn(tasks::serial_rx_task(rx)).unwrap();
    spawner.spawn(tasks::led_task(led, tx, BOARD.led)).unwrap();
}
