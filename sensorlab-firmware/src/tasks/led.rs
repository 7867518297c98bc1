//! LED task
//!
//! Applies commands from the serial RX task and toggles the LED while
//! blinking. Status replies are written straight back to the UART.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::BufferedUartTx;
use embassy_time::{Instant, Timer};
use embedded_io_async::Write;

use sensorlab_core::config::LedConfig;
use sensorlab_core::led::LedController;
use sensorlab_drivers::led::GpioLed;
use sensorlab_hal_rp2040::LedPin;
use sensorlab_protocol::LedStatus;

use crate::channels::LED_COMMANDS;

/// LED wired to a board GPIO
pub type BoardLed = GpioLed<LedPin<'static>>;

/// LED task - command dispatcher and blink timer
#[embassy_executor::task]
pub async fn led_task(led: BoardLed, mut tx: BufferedUartTx, config: LedConfig) {
    info!(
        "LED task started (blink interval {} ms)",
        config.blink_interval_ms
    );

    let start = Instant::now();
    let mut controller = LedController::new(led, &config);

    loop {
        let now_ms = start.elapsed().as_millis() as u32;
        let until_toggle = controller
            .state()
            .is_blinking()
            .then(|| controller.timer().remaining(now_ms));

        match select(LED_COMMANDS.receive(), wait_for_toggle(until_toggle)).await {
            Either::First(command) => {
                let now_ms = start.elapsed().as_millis() as u32;
                if let Some(status) = controller.handle(command, now_ms) {
                    send_status(&mut tx, status).await;
                }
                debug!("LED state: {:?}", controller.state());
            }
            Either::Second(()) => {
                let now_ms = start.elapsed().as_millis() as u32;
                if controller.tick(now_ms) {
                    trace!("LED toggled, lit={}", controller.is_lit());
                }
            }
        }
    }
}

/// Resolve after `remaining_ms`, or never when not blinking
async fn wait_for_toggle(remaining_ms: Option<u32>) {
    match remaining_ms {
        Some(ms) => Timer::after_millis(ms as u64).await,
        None => core::future::pending::<()>().await,
    }
}

/// Write a status reply line
async fn send_status(tx: &mut BufferedUartTx, status: LedStatus) {
    let result = async {
        tx.write_all(status.reply()).await?;
        tx.flush().await
    }
    .await;

    match result {
        Ok(()) => trace!("Status sent: {}", status.as_str()),
        Err(e) => warn!("Failed to send status: {:?}", e),
    }
}
