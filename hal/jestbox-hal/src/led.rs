//! Status LED abstraction

/// An RGB color with 8 bits per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// All channels off
    pub const OFF: Rgb = Rgb::new(0, 0, 0);
}

/// RGB status LED
///
/// Implementations drive the three channels (PWM, addressable LED, etc.).
/// Setting a color is fire-and-forget.
pub trait RgbLed {
    /// Set the LED to the given channel values
    fn set_rgb(&mut self, r: u8, g: u8, b: u8);

    /// Set the LED to a color
    fn set_color(&mut self, color: Rgb) {
        self.set_rgb(color.r, color.g, color.b);
    }
}
