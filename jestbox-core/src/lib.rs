//! Board-agnostic core logic for the Jestbox display
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Text sanitizer for the narrow display font
//! - Content sources (local joke, remote joke, weather, echo probe)
//! - Background connectivity task
//! - Busy/idle status indicator
//! - Cooperative scheduler (the main loop)
//! - Configuration types and the embedded config parser
//! - Secrets validation
//!
//! Hardware is reached only through the traits in `jestbox-hal` and
//! `jestbox-display`.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

extern crate alloc;

pub mod config;
pub mod connectivity;
pub mod content;
pub mod indicator;
pub mod sanitize;
pub mod scheduler;
pub mod secrets;

#[cfg(test)]
pub(crate) mod testing;

pub use sanitize::sanitize;
