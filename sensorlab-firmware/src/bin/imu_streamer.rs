//! Sensorlab IMU streamer
//!
//! Streams accelerometer samples from the on-board LSM6DSOX as `x,y,z`
//! lines on UART0.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::I2c;
use embassy_rp::uart::UartTx;
use {defmt_rtt as _, panic_probe as _};

use sensorlab_drivers::imu::Lsm6ds3;
use sensorlab_firmware::config::{imu_i2c_config, BOARD};
use sensorlab_firmware::tasks;
use sensorlab_hal_rp2040::{i2c_config, uart_config, SerialTx};

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Sensorlab IMU streamer starting...");

    let p = embassy_rp::init(Default::default());

    // Arduino Nano RP2040 Connect: IMU on I2C0, SDA GPIO12, SCL GPIO13
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_13, p.PIN_12, i2c_config(&imu_i2c_config()));
    let imu = Lsm6ds3::new(i2c, &BOARD.imu);

    let tx = UartTx::new_blocking(p.UART0, p.PIN_0, uart_config(&BOARD.serial.uart_config()));
    let tx = SerialTx::new(tx);

    info!("UART0 ready at {} baud", BOARD.serial.baudrate);

    spawner.spawn(tasks::imu_task(imu, tx, BOARD.imu)).unwrap();
}
