//! Input triggers
//!
//! Four buttons, read as levels once per iteration. A held button fires
//! on every iteration; a press shorter than the poll interval can be
//! missed.

use jestbox_hal::InputPin;

/// What a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Trigger {
    LocalJoke,
    RemoteJoke,
    Weather,
    EchoProbe,
}

impl Trigger {
    /// Priority order, highest first
    pub const ALL: [Trigger; 4] = [
        Trigger::LocalJoke,
        Trigger::RemoteJoke,
        Trigger::Weather,
        Trigger::EchoProbe,
    ];

    /// Check if servicing this trigger needs the network
    pub fn needs_network(&self) -> bool {
        !matches!(self, Trigger::LocalJoke)
    }
}

/// One poll of all inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Triggers {
    pub local_joke: bool,
    pub remote_joke: bool,
    pub weather: bool,
    pub echo_probe: bool,
}

impl Triggers {
    pub const NONE: Triggers = Triggers {
        local_joke: false,
        remote_joke: false,
        weather: false,
        echo_probe: false,
    };

    /// Only `trigger` active
    pub fn only(trigger: Trigger) -> Self {
        let mut triggers = Self::NONE;
        match trigger {
            Trigger::LocalJoke => triggers.local_joke = true,
            Trigger::RemoteJoke => triggers.remote_joke = true,
            Trigger::Weather => triggers.weather = true,
            Trigger::EchoProbe => triggers.echo_probe = true,
        }
        triggers
    }

    pub fn is_active(&self, trigger: Trigger) -> bool {
        match trigger {
            Trigger::LocalJoke => self.local_joke,
            Trigger::RemoteJoke => self.remote_joke,
            Trigger::Weather => self.weather,
            Trigger::EchoProbe => self.echo_probe,
        }
    }

    /// Any input held
    pub fn any(&self) -> bool {
        Trigger::ALL.into_iter().any(|t| self.is_active(t))
    }

    /// Pick the one trigger to service this iteration
    ///
    /// Network triggers are skipped until `connected`.
    pub fn select(&self, connected: bool) -> Option<Trigger> {
        Trigger::ALL
            .into_iter()
            .filter(|t| connected || !t.needs_network())
            .find(|t| self.is_active(*t))
    }
}

/// Non-blocking source of triggers
pub trait InputSignals {
    fn poll(&mut self) -> Triggers;
}

/// Four buttons, one per trigger
pub struct Buttons<P: InputPin> {
    pub local_joke: P,
    pub remote_joke: P,
    pub weather: P,
    pub echo_probe: P,
}

impl<P: InputPin> InputSignals for Buttons<P> {
    fn poll(&mut self) -> Triggers {
        Triggers {
            local_joke: self.local_joke.is_high(),
            remote_joke: self.remote_joke.is_high(),
            weather: self.weather.is_high(),
            echo_probe: self.echo_probe.is_high(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct Level(bool);

    impl InputPin for Level {
        fn is_high(&mut self) -> bool {
            self.0
        }
    }

    #[test]
    fn test_local_wins_over_network() {
        let all = Triggers {
            local_joke: true,
            remote_joke: true,
            weather: true,
            echo_probe: true,
        };
        assert_eq!(all.select(true), Some(Trigger::LocalJoke));
    }

    #[test]
    fn test_network_triggers_need_connection() {
        let weather = Triggers::only(Trigger::Weather);
        assert_eq!(weather.select(false), None);
        assert_eq!(weather.select(true), Some(Trigger::Weather));
    }

    #[test]
    fn test_any() {
        assert!(!Triggers::NONE.any());
        assert!(Triggers::only(Trigger::EchoProbe).any());
    }

    #[test]
    fn test_priority_between_network_triggers() {
        let triggers = Triggers {
            weather: true,
            echo_probe: true,
            ..Triggers::NONE
        };
        assert_eq!(triggers.select(true), Some(Trigger::Weather));
    }

    #[test]
    fn test_buttons_poll() {
        let mut buttons = Buttons {
            local_joke: Level(false),
            remote_joke: Level(true),
            weather: Level(false),
            echo_probe: Level(true),
        };
        let triggers = buttons.poll();
        assert!(triggers.remote_joke && triggers.echo_probe);
        assert!(!triggers.local_joke && !triggers.weather);
    }

    proptest! {
        #[test]
        fn prop_selected_is_first_eligible(
            local in any::<bool>(),
            remote in any::<bool>(),
            weather in any::<bool>(),
            echo in any::<bool>(),
            connected in any::<bool>(),
        ) {
            let triggers = Triggers { local_joke: local, remote_joke: remote, weather, echo_probe: echo };
            match triggers.select(connected) {
                Some(t) => {
                    prop_assert!(triggers.is_active(t));
                    prop_assert!(connected || !t.needs_network());
                    for earlier in Trigger::ALL.iter().take_while(|e| **e != t) {
                        prop_assert!(!triggers.is_active(*earlier) || (!connected && earlier.needs_network()));
                    }
                }
                None => {
                    prop_assert!(!local);
                    prop_assert!(!connected || !(remote || weather || echo));
                }
            }
        }
    }
}
