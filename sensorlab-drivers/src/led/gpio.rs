//! GPIO LED output
//!
//! Drives an indicator LED straight from a digital output pin.

use sensorlab_core::config::LedConfig;
use sensorlab_core::traits::LedOutput;
use sensorlab_hal::OutputPin;

/// GPIO LED output
///
/// The pin can be configured as active-high (default) or active-low.
pub struct GpioLed<P> {
    pin: P,
    /// If true, LED lit = pin LOW
    inverted: bool,
    lit: bool,
}

impl<P: OutputPin> GpioLed<P> {
    /// Create a new GPIO LED output
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, the LED is lit when the pin is LOW
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut led = Self {
            pin,
            inverted,
            lit: false,
        };
        led.set_lit(false);
        led
    }

    /// Create an LED output wired as described by `config`
    pub fn from_config(pin: P, config: &LedConfig) -> Self {
        Self::new(pin, config.active_low)
    }

    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> LedOutput for GpioLed<P> {
    fn set_lit(&mut self, lit: bool) {
        self.lit = lit;
        self.pin.set_state(lit != self.inverted);
    }

    fn is_lit(&self) -> bool {
        self.lit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockPin {
        high: bool,
        writes: u32,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                writes: 0,
            }
        }
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) {
            self.high = true;
            self.writes += 1;
        }

        fn set_low(&mut self) {
            self.high = false;
            self.writes += 1;
        }

        fn is_set_high(&self) -> bool {
            self.high
        }
    }

    #[test]
    fn test_active_high_led() {
        let mut led = GpioLed::new_active_high(MockPin::new());

        assert!(!led.is_lit());
        assert!(!led.pin.is_set_high());

        led.set_lit(true);
        assert!(led.is_lit());
        assert!(led.pin.is_set_high());

        led.set_lit(false);
        assert!(!led.pin.is_set_high());
    }

    #[test]
    fn test_active_low_led() {
        let mut led = GpioLed::new_active_low(MockPin::new());

        // Dark means pin high
        assert!(!led.is_lit());
        assert!(led.pin.is_set_high());

        led.set_lit(true);
        assert!(led.is_lit());
        assert!(!led.pin.is_set_high());
    }

    #[test]
    fn test_starts_dark_with_one_write() {
        let led = GpioLed::new_active_high(MockPin::new());
        assert_eq!(led.into_inner().writes, 1);
    }

    #[test]
    fn test_toggle() {
        let mut led = GpioLed::from_config(MockPin::new(), &LedConfig::default());
        led.toggle();
        assert!(led.is_lit());
        led.toggle();
        assert!(!led.is_lit());
        assert!(!led.pin.is_set_high());
    }
}
