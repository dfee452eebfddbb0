//! State shared between Embassy tasks
//!
//! The connectivity task publishes its progress here and the app task
//! observes it once per scheduler iteration.

use jestbox_core::connectivity::Connectivity;

/// Wi-Fi association progress and the resulting IPv4 configuration
pub static CONNECTIVITY: Connectivity = Connectivity::new();
