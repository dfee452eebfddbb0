//! Device configuration
//!
//! `device.toml` is embedded in the firmware and parsed at boot by a
//! small no_std parser. The build script checks the same file with the
//! full `toml` crate, so parse failures here mean a stale binary.

pub mod toml;
pub mod types;

pub use self::toml::{parse_config, ParseError};
pub use types::*;
