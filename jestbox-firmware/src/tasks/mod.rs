//! Embassy async tasks
//!
//! The radio and network stack runners, the one-shot connectivity task
//! and the app task that owns the scheduler.

pub mod app;
pub mod connectivity;
pub mod wifi;

pub use app::{app_task, log_dispatch, App, Pad, Screen};
pub use connectivity::connectivity_task;
pub use wifi::{net_task, wifi_task};
