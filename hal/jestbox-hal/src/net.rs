//! Network abstractions
//!
//! Two capabilities are needed by the core: associating with an access
//! point ([`NetworkLink`]) and issuing a single HTTP GET
//! ([`HttpTransport`]). Both are async; association checks are expected
//! to return immediately.

use alloc::string::String;
use core::fmt;

/// Errors from the HTTP transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportError {
    /// URL could not be parsed
    InvalidUrl,
    /// URL scheme is not supported by this transport (e.g. https)
    UnsupportedScheme,
    /// Host name could not be resolved
    Dns,
    /// TCP connection could not be established
    Connect,
    /// Sending the request failed
    Write,
    /// Receiving the response failed
    Read,
    /// Peer did not answer in time
    Timeout,
    /// Response was not valid HTTP
    MalformedResponse,
    /// Response did not fit the receive buffer
    ResponseTooLarge,
    /// Network stack is not up
    NotConnected,
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            TransportError::InvalidUrl => "invalid URL",
            TransportError::UnsupportedScheme => "unsupported URL scheme",
            TransportError::Dns => "DNS lookup failed",
            TransportError::Connect => "connection failed",
            TransportError::Write => "request write failed",
            TransportError::Read => "response read failed",
            TransportError::Timeout => "timed out",
            TransportError::MalformedResponse => "malformed HTTP response",
            TransportError::ResponseTooLarge => "response too large",
            TransportError::NotConnected => "network not connected",
        };
        f.write_str(msg)
    }
}

/// A complete HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body decoded as UTF-8 (lossy)
    pub text: String,
}

impl HttpResponse {
    /// Check for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One-shot HTTP client
///
/// Only one request is ever in flight; callers await the full response.
#[allow(async_fn_in_trait)]
pub trait HttpTransport {
    /// Issue a GET request with optional extra headers
    async fn get(
        &mut self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError>;
}

/// Errors from network association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// Radio could not be brought up
    Activation,
    /// Join request was rejected (driver status code)
    Join(u32),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkError::Activation => f.write_str("radio activation failed"),
            LinkError::Join(status) => write!(f, "join failed (status {})", status),
        }
    }
}

/// IPv4 configuration obtained after association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkConfig {
    /// Local address
    pub address: [u8; 4],
    /// Network prefix length
    pub prefix_len: u8,
    /// Default gateway
    pub gateway: Option<[u8; 4]>,
    /// First DNS server
    pub dns: Option<[u8; 4]>,
}

struct Ipv4([u8; 4]);

impl fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "{}.{}.{}.{}", a, b, c, d)
    }
}

impl fmt::Display for LinkConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4(self.address), self.prefix_len)?;
        if let Some(gw) = self.gateway {
            write!(f, " gw {}", Ipv4(gw))?;
        }
        if let Some(dns) = self.dns {
            write!(f, " dns {}", Ipv4(dns))?;
        }
        Ok(())
    }
}

/// Wi-Fi station interface
///
/// `connect` starts association; completion is observed by polling
/// `is_connected`, which must not block.
#[allow(async_fn_in_trait)]
pub trait NetworkLink {
    /// Power up the radio in station mode
    async fn activate(&mut self) -> Result<(), LinkError>;

    /// Request association with an access point
    async fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError>;

    /// Check whether the link is associated and has an address
    fn is_connected(&self) -> bool;

    /// Current IPv4 configuration, if any
    fn config(&self) -> Option<LinkConfig>;
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::string::ToString;

    #[test]
    fn test_link_config_display() {
        let config = LinkConfig {
            address: [192, 168, 1, 20],
            prefix_len: 24,
            gateway: Some([192, 168, 1, 1]),
            dns: Some([1, 1, 1, 1]),
        };
        assert_eq!(
            config.to_string(),
            "192.168.1.20/24 gw 192.168.1.1 dns 1.1.1.1"
        );
    }

    #[test]
    fn test_link_config_display_without_gateway() {
        let config = LinkConfig {
            address: [10, 0, 0, 7],
            prefix_len: 8,
            gateway: None,
            dns: None,
        };
        assert_eq!(config.to_string(), "10.0.0.7/8");
    }

    #[test]
    fn test_response_success_range() {
        let mut response = HttpResponse {
            status: 200,
            text: String::new(),
        };
        assert!(response.is_success());
        response.status = 204;
        assert!(response.is_success());
        response.status = 301;
        assert!(!response.is_success());
        response.status = 503;
        assert!(!response.is_success());
    }

    #[test]
    fn test_link_error_display() {
        assert_eq!(LinkError::Join(3).to_string(), "join failed (status 3)");
    }
}
