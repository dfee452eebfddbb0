//! Configuration type definitions
//!
//! These types represent the device configuration. Missing keys keep
//! their defaults, which reproduce the stock Pico Display behavior.

use heapless::String;

use crate::indicator::IndicatorColors;

/// Maximum URL or URL template length
pub const MAX_URL_LEN: usize = 256;

/// A URL held without allocation
pub type UrlString = String<MAX_URL_LEN>;

/// Stock Open-Meteo request: current conditions plus today's rain
pub const DEFAULT_WEATHER_TEMPLATE: &str = "http://api.open-meteo.com/v1/forecast?latitude={latitude}&longitude={longitude}&current=temperature_2m,weather_code&daily=precipitation_sum,precipitation_probability_max&timezone=auto&forecast_days=1";

/// Joke API over plain HTTP; the device has no TLS stack
pub const DEFAULT_JOKES_URL: &str = "http://witzapi.de/api/joke";

pub const DEFAULT_ECHO_URL: &str = "http://httpbin.org/get";

fn url(text: &str) -> UrlString {
    // Defaults are all shorter than MAX_URL_LEN
    String::try_from(text).unwrap_or_default()
}

/// Display settings
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayConfig {
    /// Backlight brightness (0-100)
    pub backlight_percent: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            backlight_percent: 50,
        }
    }
}

/// Remote joke endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct JokesConfig {
    pub url: UrlString,
}

impl Default for JokesConfig {
    fn default() -> Self {
        Self {
            url: url(DEFAULT_JOKES_URL),
        }
    }
}

/// Forecast request
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherConfig {
    pub latitude: f32,
    pub longitude: f32,
    /// URL with `{latitude}`, `{longitude}` and `{api_key}` placeholders
    pub url_template: UrlString,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        // Hamburg
        Self {
            latitude: 53.55,
            longitude: 10.0,
            url_template: url(DEFAULT_WEATHER_TEMPLATE),
        }
    }
}

/// Diagnostic endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EchoConfig {
    pub url: UrlString,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            url: url(DEFAULT_ECHO_URL),
        }
    }
}

/// Main loop timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SchedulerConfig {
    pub poll_interval_ms: u32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
        }
    }
}

/// Connectivity task timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NetworkConfig {
    pub check_interval_ms: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            check_interval_ms: 500,
        }
    }
}

/// Complete device configuration
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceConfig {
    pub display: DisplayConfig,
    pub led: IndicatorColors,
    pub jokes: JokesConfig,
    pub weather: WeatherConfig,
    pub echo: EchoConfig,
    pub scheduler: SchedulerConfig,
    pub network: NetworkConfig,
}
