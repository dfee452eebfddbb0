//! Wi-Fi association task
//!
//! Runs once: activates the radio, joins the configured network and
//! waits for DHCP. Progress is published through
//! [`CONNECTIVITY`](crate::channels::CONNECTIVITY) and picked up by the
//! scheduler, which owns the status line.

use defmt::*;
use embassy_time::Delay;

use jestbox_core::connectivity::ConnectivityTask;

use crate::channels::CONNECTIVITY;
use crate::net::Cyw43Link;

#[embassy_executor::task]
pub async fn connectivity_task(
    link: Cyw43Link,
    ssid: &'static str,
    password: &'static str,
    check_interval_ms: u32,
) {
    info!("Connectivity task started, joining {}", ssid);

    let mut task = ConnectivityTask::new(&CONNECTIVITY, link, ssid, password, check_interval_ms);
    let report = task.run(&mut Delay).await;

    if let Some(e) = report.last_error {
        debug!("Recovered from: {}", e);
    }

    match report.config {
        Some(config) => info!(
            "Connected to {} after {} join attempt(s): {}",
            ssid, report.join_attempts, config
        ),
        None => warn!("Connected to {} without an IPv4 configuration", ssid),
    }
}
