//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in jestbox-hal and jestbox-display on top of the embedded ecosystem:
//!
//! - Buttons (embedded-hal digital inputs)
//! - RGB status LED (embedded-hal PWM channels)
//! - Text surface on any embedded-graphics RGB565 display
//! - Line records from an embedded text file

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

pub mod button;
pub mod led;
pub mod records;
pub mod surface;

pub use button::ActiveLowButton;
pub use led::PwmRgbLed;
pub use records::LineRecords;
pub use surface::{GraphicsSurface, SurfaceStyle};
