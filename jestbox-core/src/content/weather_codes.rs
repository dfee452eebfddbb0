//! WMO weather interpretation codes

use core::fmt;

const LABELS: &[(u16, &str)] = &[
    (0, "Clear sky"),
    (1, "Mainly clear"),
    (2, "Partly cloudy"),
    (3, "Overcast"),
    (45, "Fog"),
    (48, "Depositing rime fog"),
    (51, "Light drizzle"),
    (53, "Moderate drizzle"),
    (55, "Dense drizzle"),
    (56, "Light freezing drizzle"),
    (57, "Dense freezing drizzle"),
    (61, "Light rain"),
    (63, "Moderate rain"),
    (65, "Heavy rain"),
    (66, "Light freezing rain"),
    (67, "Heavy freezing rain"),
    (71, "Light snow"),
    (73, "Moderate snow"),
    (75, "Heavy snow"),
    (77, "Snow grains"),
    (80, "Light rain showers"),
    (81, "Moderate rain showers"),
    (82, "Violent rain showers"),
    (85, "Light snow showers"),
    (86, "Heavy snow showers"),
    (95, "Thunderstorm"),
    (96, "Thunderstorm, light hail"),
    (99, "Thunderstorm, heavy hail"),
];

/// Human readable label for a weather code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WeatherLabel {
    Known(&'static str),
    Unknown(u16),
}

impl fmt::Display for WeatherLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WeatherLabel::Known(label) => f.write_str(label),
            WeatherLabel::Unknown(code) => write!(f, "Unknown weather code ({})", code),
        }
    }
}

/// Look up the label for `code`
pub fn weather_label(code: u16) -> WeatherLabel {
    LABELS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(WeatherLabel::Unknown(code), |(_, label)| {
            WeatherLabel::Known(label)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code() {
        assert_eq!(weather_label(61), WeatherLabel::Known("Light rain"));
        assert_eq!(weather_label(61).to_string(), "Light rain");
    }

    #[test]
    fn test_unknown_code() {
        assert_eq!(weather_label(42).to_string(), "Unknown weather code (42)");
    }

    #[test]
    fn test_labels_fit_one_line() {
        // 240 px / 6 px font
        for (code, label) in LABELS {
            assert!(label.len() <= 40, "label for {} is too long", code);
            assert!(label.is_ascii());
        }
    }
}
