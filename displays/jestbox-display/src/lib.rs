//! Display abstraction and shared text handling for Jestbox
//!
//! This crate provides:
//! - `RenderSurface` trait implemented by every display binding
//! - `wrap` for breaking text into lines that fit a narrow screen
//! - `TextScreen`, a character-grid surface kept in memory
//!
//! # Layout
//!
//! Every surface is split into a content area and a single status line
//! at the bottom, separated by a horizontal rule:
//!
//! ```text
//! ┌────────────────────────┐
//! │ content area           │  clear() / draw_text()
//! │                        │
//! ├────────────────────────┤
//! │ status line            │  log()
//! └────────────────────────┘
//! ```
//!
//! Surfaces only promise to render printable ASCII. Text from the
//! network must be sanitized before it gets here.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod backend;
pub mod layout;
pub mod screen;

// Re-export key types
pub use backend::{DisplayError, RenderSurface, TextMetrics};
pub use layout::wrap;
pub use screen::TextScreen;
