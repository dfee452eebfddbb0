//! Simple TOML parser for the device configuration
//!
//! This is a minimal TOML parser that handles only the subset needed for
//! `device.toml`. It does NOT support the full TOML grammar.
//!
//! Supported features:
//! - Key = value pairs (string, integer, float)
//! - [section] headers
//! - Colors as `[r, g, b]` arrays
//! - Comments (# ...)
//!
//! NOT supported:
//! - Multi-line strings
//! - Escape sequences in strings
//! - Booleans and datetimes
//! - Inline tables and nested arrays
//! - Dotted keys

use core::fmt;

use jestbox_hal::Rgb;

use super::types::{DeviceConfig, UrlString};

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Unknown or malformed section header (1-based line)
    InvalidSection(usize),
    /// Line is neither a header nor `key = value`
    InvalidLine(usize),
    /// Value has the wrong type or is out of range
    InvalidValue(usize),
    /// String does not fit its buffer
    TooLong(usize),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidSection(line) => write!(f, "invalid section on line {}", line),
            ParseError::InvalidLine(line) => write!(f, "invalid line {}", line),
            ParseError::InvalidValue(line) => write!(f, "invalid value on line {}", line),
            ParseError::TooLong(line) => write!(f, "value too long on line {}", line),
        }
    }
}

/// Value-level error, tagged with a line number by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueError {
    Invalid,
    TooLong,
}

/// Current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Display,
    Led,
    Jokes,
    Weather,
    Echo,
    Scheduler,
    Network,
}

/// Parse TOML configuration into DeviceConfig
pub fn parse_config(input: &str) -> Result<DeviceConfig, ParseError> {
    let mut config = DeviceConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = line.trim();

        // Skip empty lines and comments
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        // Check for section header
        if let Some(header) = line.strip_prefix('[') {
            let header = strip_comment(header);
            let name = header
                .strip_suffix(']')
                .ok_or(ParseError::InvalidSection(line_no))?;
            section = parse_section_header(name).ok_or(ParseError::InvalidSection(line_no))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(ParseError::InvalidLine(line_no))?;
        apply_value(section, key, value, &mut config).map_err(|e| match e {
            ValueError::Invalid => ParseError::InvalidValue(line_no),
            ValueError::TooLong => ParseError::TooLong(line_no),
        })?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "display" => Some(Section::Display),
        "led" => Some(Section::Led),
        "jokes" => Some(Section::Jokes),
        "weather" => Some(Section::Weather),
        "echo" => Some(Section::Echo),
        "scheduler" => Some(Section::Scheduler),
        "network" => Some(Section::Network),
        _ => None,
    }
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut DeviceConfig,
) -> Result<(), ValueError> {
    match section {
        Section::Display => {
            if key == "backlight" {
                let percent: u8 = parse_int(value)?;
                if percent > 100 {
                    return Err(ValueError::Invalid);
                }
                config.display.backlight_percent = percent;
            }
        }
        Section::Led => match key {
            "idle" => config.led.idle = parse_rgb(value)?,
            "busy" => config.led.busy = parse_rgb(value)?,
            _ => {} // Ignore unknown keys
        },
        Section::Jokes => {
            if key == "url" {
                config.jokes.url = parse_url(value)?;
            }
        }
        Section::Weather => match key {
            "latitude" => config.weather.latitude = parse_float(value)?,
            "longitude" => config.weather.longitude = parse_float(value)?,
            "url_template" | "url" => config.weather.url_template = parse_url(value)?,
            _ => {}
        },
        Section::Echo => {
            if key == "url" {
                config.echo.url = parse_url(value)?;
            }
        }
        Section::Scheduler => {
            if key == "poll_interval_ms" {
                config.scheduler.poll_interval_ms = parse_int(value)?;
            }
        }
        Section::Network => {
            if key == "check_interval_ms" {
                config.network.check_interval_ms = parse_int(value)?;
            }
        }
        Section::Root => {}
    }
    Ok(())
}

/// Cut a trailing comment that is not inside a string
fn strip_comment(value: &str) -> &str {
    let mut in_string = false;
    for (i, c) in value.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return value[..i].trim(),
            _ => {}
        }
    }
    value.trim()
}

fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let eq_pos = line.find('=')?;
    let key = line[..eq_pos].trim();
    let value = strip_comment(&line[eq_pos + 1..]);

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

/// Parse a string value (removes quotes)
fn parse_string(value: &str) -> Result<&str, ValueError> {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        Ok(&value[1..value.len() - 1])
    } else {
        Err(ValueError::Invalid)
    }
}

/// Parse a string value into a URL buffer
fn parse_url(value: &str) -> Result<UrlString, ValueError> {
    let text = parse_string(value)?;
    UrlString::try_from(text).map_err(|_| ValueError::TooLong)
}

/// Parse an integer value
fn parse_int<T: core::str::FromStr>(value: &str) -> Result<T, ValueError> {
    value.parse().map_err(|_| ValueError::Invalid)
}

/// Parse a float value; integers are accepted
fn parse_float(value: &str) -> Result<f32, ValueError> {
    let parsed: f32 = value.parse().map_err(|_| ValueError::Invalid)?;
    if parsed.is_finite() {
        Ok(parsed)
    } else {
        Err(ValueError::Invalid)
    }
}

/// Parse a color like `[10, 5, 0]`
fn parse_rgb(value: &str) -> Result<Rgb, ValueError> {
    let inner = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .ok_or(ValueError::Invalid)?;

    let mut channels = inner.split(',').map(|c| parse_int::<u8>(c.trim()));
    let r = channels.next().ok_or(ValueError::Invalid)??;
    let g = channels.next().ok_or(ValueError::Invalid)??;
    let b = channels.next().ok_or(ValueError::Invalid)??;
    if channels.next().is_some() {
        return Err(ValueError::Invalid);
    }

    Ok(Rgb::new(r, g, b))
}
