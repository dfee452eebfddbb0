//! GPIO pin abstractions
//!
//! Buttons are read as plain levels. Polarity is resolved by the
//! implementation, so `is_high` always means "pressed".

/// Digital input pin
///
/// Reads must not block; the scheduler polls every pin once per
/// iteration.
pub trait InputPin {
    /// Check if the input is asserted
    fn is_high(&mut self) -> bool;

    /// Check if the input is released
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

impl<T: InputPin + ?Sized> InputPin for &mut T {
    fn is_high(&mut self) -> bool {
        T::is_high(self)
    }
}
