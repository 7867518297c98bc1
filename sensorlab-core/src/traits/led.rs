//! LED output trait

/// Trait for indicator LED control
///
/// Implementations drive the LED via a GPIO pin, a PWM channel, or a
/// recorded value in tests. "Lit" is the logical state, independent of
/// whether the pin is active-high or active-low.
pub trait LedOutput {
    /// Light or darken the LED
    fn set_lit(&mut self, lit: bool);

    /// Check if the LED is currently lit
    fn is_lit(&self) -> bool;

    /// Flip the LED
    fn toggle(&mut self) {
        let lit = self.is_lit();
        self.set_lit(!lit);
    }
}
