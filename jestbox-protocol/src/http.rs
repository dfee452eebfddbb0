//! Minimal HTTP/1.1 client wire format
//!
//! Only what a one-shot `GET` with `Connection: close` needs:
//!
//! - [`Url::parse`] splits `http://host[:port]/path?query`
//! - [`encode_request`] builds the request head
//! - [`ResponseHead::parse`] reads the status line and framing headers
//! - [`ResponseHead::body`] strips chunked transfer encoding or applies
//!   `Content-Length`
//!
//! TLS is not handled here; `https` URLs are rejected with
//! [`UrlError::UnsupportedScheme`].

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::{self, Write};

/// Default port for `http`
pub const DEFAULT_PORT: u16 = 80;

/// User agent sent with every request
pub const USER_AGENT: &str = "jestbox/0.1";

/// Errors that can occur while parsing a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UrlError {
    /// Scheme is valid but needs TLS
    UnsupportedScheme,
    /// No `scheme://` prefix
    InvalidScheme,
    /// Empty host
    MissingHost,
    /// Port is not a number in range
    InvalidPort,
}

/// Errors that can occur while parsing a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HttpError {
    /// Status line is not `HTTP/1.x NNN ...`
    InvalidStatusLine,
    /// Header line without a colon or with a bad value
    InvalidHeader,
    /// Chunk size line could not be parsed
    InvalidChunk,
    /// Body ended before the announced length
    Truncated,
}

impl fmt::Display for HttpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            HttpError::InvalidStatusLine => "invalid status line",
            HttpError::InvalidHeader => "invalid header",
            HttpError::InvalidChunk => "invalid chunk",
            HttpError::Truncated => "truncated body",
        };
        f.write_str(msg)
    }
}

/// A parsed `http://` URL borrowing from the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Url<'a> {
    /// Host name or address literal
    pub host: &'a str,
    /// TCP port
    pub port: u16,
    /// Path and query, possibly empty
    pub path: &'a str,
}

impl<'a> Url<'a> {
    /// Parse an absolute `http://` URL
    pub fn parse(url: &'a str) -> Result<Self, UrlError> {
        let rest = if let Some(rest) = url.strip_prefix("http://") {
            rest
        } else if url.starts_with("https://") {
            return Err(UrlError::UnsupportedScheme);
        } else {
            return Err(UrlError::InvalidScheme);
        };

        let split = rest.find(['/', '?']).unwrap_or(rest.len());
        let (authority, path) = rest.split_at(split);

        let (host, port) = match authority.rsplit_once(':') {
            Some((host, port)) => (
                host,
                port.parse::<u16>().map_err(|_| UrlError::InvalidPort)?,
            ),
            None => (authority, DEFAULT_PORT),
        };

        if host.is_empty() {
            return Err(UrlError::MissingHost);
        }

        Ok(Self { host, port, path })
    }

    /// Write the request target (`/path?query`)
    fn write_target<W: Write>(&self, out: &mut W) -> fmt::Result {
        if !self.path.starts_with('/') {
            out.write_char('/')?;
        }
        out.write_str(self.path)
    }
}

/// Build the head of a `GET` request
///
/// The connection is always closed by the server after the response,
/// so the body can be read until EOF.
pub fn encode_request(url: &Url<'_>, headers: &[(&str, &str)]) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_request(&mut out, url, headers);
    out
}

fn write_request<W: Write>(out: &mut W, url: &Url<'_>, headers: &[(&str, &str)]) -> fmt::Result {
    out.write_str("GET ")?;
    url.write_target(out)?;
    out.write_str(" HTTP/1.1\r\n")?;

    if url.port == DEFAULT_PORT {
        write!(out, "Host: {}\r\n", url.host)?;
    } else {
        write!(out, "Host: {}:{}\r\n", url.host, url.port)?;
    }
    write!(out, "User-Agent: {}\r\n", USER_AGENT)?;
    out.write_str("Connection: close\r\n")?;

    for (name, value) in headers {
        write!(out, "{}: {}\r\n", name, value)?;
    }
    out.write_str("\r\n")
}

/// Status and framing of a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ResponseHead {
    /// Status code
    pub status: u16,
    /// `Content-Length`, if present
    pub content_length: Option<usize>,
    /// `Transfer-Encoding: chunked`
    pub chunked: bool,
}

impl ResponseHead {
    /// Parse the response head at the start of `buf`
    ///
    /// Returns `Ok(None)` if the blank line ending the head has not been
    /// received yet, otherwise the head and the offset of the body.
    pub fn parse(buf: &[u8]) -> Result<Option<(Self, usize)>, HttpError> {
        let Some(end) = find(buf, b"\r\n\r\n") else {
            return Ok(None);
        };
        let head = core::str::from_utf8(&buf[..end]).map_err(|_| HttpError::InvalidHeader)?;
        let mut lines = head.split("\r\n");

        let status = parse_status_line(lines.next().unwrap_or(""))?;
        let mut parsed = Self {
            status,
            content_length: None,
            chunked: false,
        };

        for line in lines {
            let (name, value) = line.split_once(':').ok_or(HttpError::InvalidHeader)?;
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                parsed.content_length =
                    Some(value.parse().map_err(|_| HttpError::InvalidHeader)?);
            } else if name.eq_ignore_ascii_case("transfer-encoding") {
                parsed.chunked = value
                    .rsplit(',')
                    .next()
                    .is_some_and(|enc| enc.trim().eq_ignore_ascii_case("chunked"));
            }
        }

        Ok(Some((parsed, end + 4)))
    }

    /// Extract the payload from the raw bytes following the head
    pub fn body(&self, raw: &[u8]) -> Result<Vec<u8>, HttpError> {
        if self.chunked {
            return decode_chunked(raw);
        }
        match self.content_length {
            Some(len) if raw.len() < len => Err(HttpError::Truncated),
            Some(len) => Ok(raw[..len].to_vec()),
            None => Ok(raw.to_vec()),
        }
    }
}

fn parse_status_line(line: &str) -> Result<u16, HttpError> {
    let mut parts = line.splitn(3, ' ');
    let version = parts.next().unwrap_or("");
    if !version.starts_with("HTTP/1.") {
        return Err(HttpError::InvalidStatusLine);
    }
    let code = parts.next().ok_or(HttpError::InvalidStatusLine)?;
    if code.len() != 3 {
        return Err(HttpError::InvalidStatusLine);
    }
    code.parse().map_err(|_| HttpError::InvalidStatusLine)
}

/// Remove chunked transfer encoding
fn decode_chunked(mut raw: &[u8]) -> Result<Vec<u8>, HttpError> {
    let mut body = Vec::new();

    loop {
        let line_end = find(raw, b"\r\n").ok_or(HttpError::Truncated)?;
        let size_line =
            core::str::from_utf8(&raw[..line_end]).map_err(|_| HttpError::InvalidChunk)?;
        // Chunk extensions follow a ';'
        let size_hex = size_line.split(';').next().unwrap_or("").trim();
        let size = usize::from_str_radix(size_hex, 16).map_err(|_| HttpError::InvalidChunk)?;
        raw = &raw[line_end + 2..];

        if size == 0 {
            return Ok(body);
        }
        // Size comes from the peer; compare without adding to it
        if size > raw.len().saturating_sub(2) {
            return Err(HttpError::Truncated);
        }
        body.extend_from_slice(&raw[..size]);
        if &raw[size..size + 2] != b"\r\n" {
            return Err(HttpError::InvalidChunk);
        }
        raw = &raw[size + 2..];
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
