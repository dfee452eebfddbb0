//! Forecast documents
//!
//! Sample response (trimmed):
//!
//! ```text
//! {
//!   "latitude": 53.56, "longitude": 10.0,
//!   "current": { "time": "2024-06-13T08:15", "temperature_2m": 14.3, "weather_code": 61 },
//!   "daily": {
//!     "time": ["2024-06-13"],
//!     "precipitation_sum": [3.2],
//!     "precipitation_probability_max": [80]
//!   }
//! }
//! ```

use alloc::string::String;
use alloc::vec::Vec;
use serde::Deserialize;

use crate::error::DecodeError;

#[derive(Deserialize)]
struct ForecastResponse {
    current: Current,
    #[serde(default)]
    daily: Daily,
}

#[derive(Deserialize)]
struct Current {
    time: String,
    temperature_2m: f32,
    weather_code: u16,
}

#[derive(Deserialize, Default)]
struct Daily {
    #[serde(default)]
    precipitation_sum: Vec<Option<f32>>,
    #[serde(default)]
    precipitation_probability_max: Vec<Option<u8>>,
}

/// Current conditions plus today's precipitation outlook
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSnapshot {
    /// Local time of the observation, ISO 8601 without seconds
    pub time: String,
    /// WMO weather interpretation code
    pub weather_code: u16,
    /// Air temperature at 2 m in degrees Celsius
    pub temperature_c: f32,
    /// Precipitation sum for today in mm
    pub precipitation_mm: Option<f32>,
    /// Maximum precipitation probability for today in percent
    pub precipitation_probability: Option<u8>,
}

/// Decode a forecast response body
pub fn decode_forecast(body: &str) -> Result<WeatherSnapshot, DecodeError> {
    let response: ForecastResponse = serde_json::from_str(body)?;
    let ForecastResponse { current, daily } = response;

    Ok(WeatherSnapshot {
        time: current.time,
        weather_code: current.weather_code,
        temperature_c: current.temperature_2m,
        precipitation_mm: daily.precipitation_sum.first().copied().flatten(),
        precipitation_probability: daily
            .precipitation_probability_max
            .first()
            .copied()
            .flatten(),
    })
}
