//! PWM RGB LED
//!
//! Each channel is one PWM output. The Pico Display LED is common-anode,
//! so full duty means off.

use embedded_hal::pwm::SetDutyCycle;
use jestbox_hal::RgbLed;

/// RGB LED on three PWM channels
pub struct PwmRgbLed<R, G, B> {
    red: R,
    green: G,
    blue: B,
    /// If true, channel ON = output LOW
    inverted: bool,
}

impl<R, G, B> PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    /// Create an LED and switch it off
    pub fn new(red: R, green: G, blue: B, inverted: bool) -> Self {
        let mut led = Self {
            red,
            green,
            blue,
            inverted,
        };
        led.set_rgb(0, 0, 0);
        led
    }

    /// Create an LED whose channels sink current (common anode)
    pub fn new_active_low(red: R, green: G, blue: B) -> Self {
        Self::new(red, green, blue, true)
    }

    fn level(&self, value: u8) -> u16 {
        if self.inverted {
            u16::from(u8::MAX - value)
        } else {
            u16::from(value)
        }
    }
}

impl<R, G, B> RgbLed for PwmRgbLed<R, G, B>
where
    R: SetDutyCycle,
    G: SetDutyCycle,
    B: SetDutyCycle,
{
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        let max = u16::from(u8::MAX);
        let (r, g, b) = (self.level(r), self.level(g), self.level(b));
        // A status LED that misses an update is harmless
        let _ = self.red.set_duty_cycle_fraction(r, max);
        let _ = self.green.set_duty_cycle_fraction(g, max);
        let _ = self.blue.set_duty_cycle_fraction(b, max);
    }
}
