//! Busy/idle status indicator
//!
//! The LED shows whether a fetch is in flight. Busy is entered through a
//! [`BusyGuard`], which restores Idle when it is dropped, so every exit
//! path of a fetch (including early returns) ends Idle again.

use jestbox_hal::{Rgb, RgbLed};

/// Indicator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IndicatorState {
    /// Nothing in flight
    Idle,
    /// One fetch in flight
    Busy,
}

/// Colors used for each state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IndicatorColors {
    pub idle: Rgb,
    pub busy: Rgb,
}

impl Default for IndicatorColors {
    fn default() -> Self {
        Self {
            idle: Rgb::new(0, 0, 10),
            busy: Rgb::new(10, 5, 0),
        }
    }
}

/// Status indicator driving an RGB LED
pub struct Indicator<L: RgbLed> {
    led: L,
    colors: IndicatorColors,
    state: IndicatorState,
    /// Completed Busy -> Idle transitions
    cycles: u32,
}

impl<L: RgbLed> Indicator<L> {
    /// Create an indicator and show Idle
    pub fn new(mut led: L, colors: IndicatorColors) -> Self {
        led.set_color(colors.idle);
        Self {
            led,
            colors,
            state: IndicatorState::Idle,
            cycles: 0,
        }
    }

    /// Set the state directly
    pub fn set(&mut self, state: IndicatorState) {
        if self.state == IndicatorState::Busy && state == IndicatorState::Idle {
            self.cycles = self.cycles.wrapping_add(1);
        }
        self.state = state;
        let color = match state {
            IndicatorState::Idle => self.colors.idle,
            IndicatorState::Busy => self.colors.busy,
        };
        self.led.set_color(color);
    }

    /// Enter Busy until the returned guard is dropped
    pub fn busy(&mut self) -> BusyGuard<'_, L> {
        self.set(IndicatorState::Busy);
        BusyGuard { indicator: self }
    }

    /// Current state
    pub fn state(&self) -> IndicatorState {
        self.state
    }

    /// Number of completed busy periods
    pub fn cycles(&self) -> u32 {
        self.cycles
    }

    /// Access the underlying LED
    pub fn led(&self) -> &L {
        &self.led
    }
}

/// Keeps the indicator Busy for its lifetime
pub struct BusyGuard<'a, L: RgbLed> {
    indicator: &'a mut Indicator<L>,
}

impl<L: RgbLed> Drop for BusyGuard<'_, L> {
    fn drop(&mut self) {
        self.indicator.set(IndicatorState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingLed;

    #[test]
    fn test_starts_idle() {
        let indicator = Indicator::new(RecordingLed::default(), IndicatorColors::default());
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(indicator.led().colors, [Rgb::new(0, 0, 10)]);
    }

    #[test]
    fn test_guard_restores_idle() {
        let mut indicator = Indicator::new(RecordingLed::default(), IndicatorColors::default());
        {
            let _busy = indicator.busy();
        }
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(indicator.cycles(), 1);
        assert_eq!(
            indicator.led().colors,
            [Rgb::new(0, 0, 10), Rgb::new(10, 5, 0), Rgb::new(0, 0, 10)]
        );
    }

    #[test]
    fn test_guard_restores_idle_on_early_return() {
        fn failing_operation(indicator: &mut Indicator<RecordingLed>) -> Result<(), ()> {
            let _busy = indicator.busy();
            Err(())?;
            Ok(())
        }

        let mut indicator = Indicator::new(RecordingLed::default(), IndicatorColors::default());
        assert!(failing_operation(&mut indicator).is_err());
        assert_eq!(indicator.state(), IndicatorState::Idle);
        assert_eq!(indicator.cycles(), 1);
    }

    #[test]
    fn test_idle_to_idle_is_not_a_cycle() {
        let mut indicator = Indicator::new(RecordingLed::default(), IndicatorColors::default());
        indicator.set(IndicatorState::Idle);
        assert_eq!(indicator.cycles(), 0);
    }
}
