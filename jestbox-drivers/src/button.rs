//! Push buttons
//!
//! The Pico Display buttons short the pin to ground, so a pressed
//! button reads low with the internal pull-up enabled.

use embedded_hal::digital::InputPin as HalInputPin;
use jestbox_hal::InputPin;

/// Button wired between the pin and ground
pub struct ActiveLowButton<P> {
    pin: P,
}

impl<P: HalInputPin> ActiveLowButton<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Release the pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P: HalInputPin> InputPin for ActiveLowButton<P> {
    fn is_high(&mut self) -> bool {
        // A read error counts as released
        self.pin.is_low().unwrap_or(false)
    }
}
