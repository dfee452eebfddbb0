//! Jestbox Hardware Abstraction Layer
//!
//! This crate defines the capability traits the core logic talks to.
//! Board crates implement them on top of their drivers and network
//! stacks, and host tests implement them with scripted fakes.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (jestbox-core scheduler)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  jestbox-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │    jestbox-   │       │    jestbox-   │
//! │    drivers    │       │    firmware   │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::InputPin`] - Button reads
//! - [`led::RgbLed`] - Status LED
//! - [`net::HttpTransport`] - One-shot HTTP GET
//! - [`net::NetworkLink`] - Wi-Fi association
//! - [`storage::RecordStore`] - Read-only line records

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod gpio;
pub mod led;
pub mod net;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use gpio::InputPin;
pub use led::{Rgb, RgbLed};
pub use net::{
    HttpResponse, HttpTransport, LinkConfig, LinkError, NetworkLink, TransportError,
};
pub use storage::RecordStore;
