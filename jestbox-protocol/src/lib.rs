//! Jestbox wire formats
//!
//! Everything that crosses the network or comes out of the record file
//! is decoded here, so the core only ever sees typed values.
//!
//! # Formats
//!
//! - Local joke records: one JSON array per line
//!   ```text
//!   ["setup", "punchline"]
//!   ```
//! - Remote joke endpoint: JSON array, the first element carries `text`
//! - Forecast endpoint: Open-Meteo style `current` and `daily` blocks
//! - HTTP/1.1: request encoding, response head parsing, chunked bodies

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod http;
pub mod joke;
pub mod weather;

pub use error::DecodeError;
pub use http::{encode_request, HttpError, ResponseHead, Url, UrlError};
pub use joke::{decode_record, decode_remote_joke, JokeRecord};
pub use weather::{decode_forecast, WeatherSnapshot};
