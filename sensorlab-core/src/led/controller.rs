//! LED command dispatcher
//!
//! Owns the LED output, the state machine and the blink timer. The
//! firmware calls [`LedController::handle`] for every parsed command and
//! [`LedController::tick`] whenever time passes.

use sensorlab_protocol::{LedCommand, LedStatus};

use super::blink::BlinkTimer;
use crate::config::LedConfig;
use crate::state::LedState;
use crate::traits::LedOutput;

/// LED controller
pub struct LedController<L: LedOutput> {
    led: L,
    state: LedState,
    timer: BlinkTimer,
}

impl<L: LedOutput> LedController<L> {
    /// Create a controller in the OFF state
    ///
    /// The output is driven dark immediately.
    pub fn new(mut led: L, config: &LedConfig) -> Self {
        led.set_lit(false);
        Self {
            led,
            state: LedState::Off,
            timer: BlinkTimer::new(config.blink_interval_ms),
        }
    }

    /// Current state
    pub fn state(&self) -> LedState {
        self.state
    }

    /// Whether the output is currently lit
    pub fn is_lit(&self) -> bool {
        self.led.is_lit()
    }

    /// Blink timer, for scheduling the next tick
    pub fn timer(&self) -> &BlinkTimer {
        &self.timer
    }

    /// Apply a command
    ///
    /// Returns the reply to send back for `status`, `None` otherwise.
    pub fn handle(&mut self, command: LedCommand, now_ms: u32) -> Option<LedStatus> {
        if command == LedCommand::Status {
            return Some(self.state.status());
        }

        self.state = self.state.transition(command);

        match self.state.steady_level() {
            Some(lit) => self.led.set_lit(lit),
            None => self.timer.restart(now_ms),
        }

        None
    }

    /// Advance the blink timer
    ///
    /// Returns true if the output was toggled.
    pub fn tick(&mut self, now_ms: u32) -> bool {
        if !self.state.is_blinking() {
            return false;
        }

        if self.timer.poll(now_ms) {
            self.led.toggle();
            true
        } else {
            false
        }
    }

    /// Release the LED output
    pub fn into_inner(self) -> L {
        self.led
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct MockLed {
        lit: bool,
        writes: u32,
    }

    impl LedOutput for MockLed {
        fn set_lit(&mut self, lit: bool) {
            self.lit = lit;
            self.writes += 1;
        }

        fn is_lit(&self) -> bool {
            self.lit
        }
    }

    fn controller() -> LedController<MockLed> {
        LedController::new(MockLed::default(), &LedConfig::default())
    }

    #[test]
    fn test_starts_off_and_dark() {
        let ctrl = controller();
        assert_eq!(ctrl.state(), LedState::Off);
        assert!(!ctrl.is_lit());
        assert_eq!(ctrl.into_inner().writes, 1);
    }

    #[test]
    fn test_on_off() {
        let mut ctrl = controller();
        assert_eq!(ctrl.handle(LedCommand::On, 0), None);
        assert_eq!(ctrl.state(), LedState::On);
        assert!(ctrl.is_lit());

        assert_eq!(ctrl.handle(LedCommand::Off, 10), None);
        assert_eq!(ctrl.state(), LedState::Off);
        assert!(!ctrl.is_lit());
    }

    #[test]
    fn test_status_replies_without_changing_state() {
        let mut ctrl = controller();
        assert_eq!(ctrl.handle(LedCommand::Status, 0), Some(LedStatus::Off));

        ctrl.handle(LedCommand::On, 0);
        assert_eq!(ctrl.handle(LedCommand::Status, 5), Some(LedStatus::On));
        assert_eq!(ctrl.state(), LedState::On);
        assert!(ctrl.is_lit());

        ctrl.handle(LedCommand::Blink, 10);
        assert_eq!(ctrl.handle(LedCommand::Status, 20), Some(LedStatus::Blinking));
    }

    #[test]
    fn test_blink_keeps_level_until_first_toggle() {
        let mut ctrl = controller();
        ctrl.handle(LedCommand::On, 0);
        ctrl.handle(LedCommand::Blink, 1000);
        assert!(ctrl.is_lit());

        assert!(!ctrl.tick(1499));
        assert!(ctrl.is_lit());

        assert!(ctrl.tick(1500));
        assert!(!ctrl.is_lit());

        assert!(!ctrl.tick(1999));
        assert!(ctrl.tick(2000));
        assert!(ctrl.is_lit());
    }

    #[test]
    fn test_tick_ignored_when_steady() {
        let mut ctrl = controller();
        assert!(!ctrl.tick(10_000));
        assert!(!ctrl.is_lit());

        ctrl.handle(LedCommand::On, 0);
        assert!(!ctrl.tick(20_000));
        assert!(ctrl.is_lit());
    }

    #[test]
    fn test_leaving_blink_sets_steady_level() {
        let mut ctrl = controller();
        ctrl.handle(LedCommand::Blink, 0);
        ctrl.tick(500);
        assert!(ctrl.is_lit());

        ctrl.handle(LedCommand::Off, 600);
        assert!(!ctrl.is_lit());
        assert!(!ctrl.tick(1200));
        assert!(!ctrl.is_lit());
    }

    #[test]
    fn test_blink_again_restarts_timer() {
        let mut ctrl = controller();
        ctrl.handle(LedCommand::Blink, 0);
        ctrl.handle(LedCommand::Blink, 400);
        assert!(!ctrl.tick(500));
        assert!(ctrl.tick(900));
    }

    #[test]
    fn test_blink_across_tick_wraparound() {
        let mut ctrl = controller();
        ctrl.handle(LedCommand::Blink, u32::MAX - 200);
        assert!(!ctrl.tick(u32::MAX));
        assert!(!ctrl.tick(100));
        assert!(ctrl.tick(299));
        assert!(ctrl.is_lit());
    }

    #[test]
    fn test_custom_interval() {
        let config = LedConfig {
            blink_interval_ms: 100,
            ..Default::default()
        };
        let mut ctrl = LedController::new(MockLed::default(), &config);
        ctrl.handle(LedCommand::Blink, 0);
        assert!(ctrl.tick(100));
        assert!(ctrl.tick(200));
        assert!(!ctrl.is_lit());
    }
}
