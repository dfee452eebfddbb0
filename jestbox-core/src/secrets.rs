//! Network credentials and API keys
//!
//! Secrets are supplied by the board (compile-time environment on the
//! firmware). Missing Wi-Fi credentials stop the device at startup.

use core::fmt;

/// Variable names looked up in the provider
pub const WIFI_SSID: &str = "WIFI_SSID";
pub const WIFI_PASS: &str = "WIFI_PASS";
pub const WEATHER_API_KEY: &str = "WEATHER_API_KEY";

/// Fatal startup errors caused by missing secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SecretsError {
    /// No network name
    MissingSsid,
    /// No network password
    MissingPassword,
    /// The weather URL template needs a key but none was given
    MissingApiKey,
}

impl fmt::Display for SecretsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            SecretsError::MissingSsid => "WIFI_SSID is not set",
            SecretsError::MissingPassword => "WIFI_PASS is not set",
            SecretsError::MissingApiKey => "WEATHER_API_KEY is not set",
        };
        f.write_str(msg)
    }
}

/// Source of named secrets
pub trait SecretProvider<'a> {
    fn secret(&self, name: &str) -> Option<&'a str>;
}

impl<'a, F> SecretProvider<'a> for F
where
    F: Fn(&str) -> Option<&'a str>,
{
    fn secret(&self, name: &str) -> Option<&'a str> {
        self(name)
    }
}

/// Validated secrets
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Secrets<'a> {
    pub wifi_ssid: &'a str,
    pub wifi_password: &'a str,
    pub weather_api_key: Option<&'a str>,
}

impl<'a> Secrets<'a> {
    /// Read and validate all secrets
    ///
    /// Empty values count as missing.
    pub fn from_provider<P: SecretProvider<'a>>(provider: &P) -> Result<Self, SecretsError> {
        let lookup = |name| provider.secret(name).filter(|v| !v.is_empty());

        Ok(Self {
            wifi_ssid: lookup(WIFI_SSID).ok_or(SecretsError::MissingSsid)?,
            wifi_password: lookup(WIFI_PASS).ok_or(SecretsError::MissingPassword)?,
            weather_api_key: lookup(WEATHER_API_KEY),
        })
    }
}

// Never print the password or key
impl fmt::Debug for Secrets<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Secrets")
            .field("wifi_ssid", &self.wifi_ssid)
            .field("weather_api_key", &self.weather_api_key.map(|_| "<REDACTED>"))
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(name: &str) -> Option<&'static str> {
        match name {
            WIFI_SSID => Some("home"),
            WIFI_PASS => Some("hunter22"),
            _ => None,
        }
    }

    #[test]
    fn test_valid_secrets() {
        let secrets = Secrets::from_provider(&provider).unwrap();
        assert_eq!(secrets.wifi_ssid, "home");
        assert_eq!(secrets.wifi_password, "hunter22");
        assert_eq!(secrets.weather_api_key, None);
    }

    #[test]
    fn test_missing_ssid() {
        let empty = |_: &str| -> Option<&'static str> { None };
        assert_eq!(
            Secrets::from_provider(&empty),
            Err(SecretsError::MissingSsid)
        );
    }

    #[test]
    fn test_empty_values_are_missing() {
        let blank = |name: &str| -> Option<&'static str> {
            match name {
                WIFI_SSID => Some("home"),
                WIFI_PASS => Some(""),
                WEATHER_API_KEY => Some(""),
                _ => None,
            }
        };
        assert_eq!(
            Secrets::from_provider(&blank),
            Err(SecretsError::MissingPassword)
        );
    }

    #[test]
    fn test_debug_hides_secrets() {
        let with_key = |name: &str| -> Option<&'static str> {
            match name {
                WEATHER_API_KEY => Some("k3y"),
                other => provider(other),
            }
        };
        let secrets = Secrets::from_provider(&with_key).unwrap();
        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("hunter22"));
        assert!(!debug.contains("k3y"));
    }
}
