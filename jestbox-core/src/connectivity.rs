//! Background network association
//!
//! The [`ConnectivityTask`] brings the link up while the scheduler keeps
//! serving local content. Progress is published through a shared
//! [`Connectivity`] cell:
//!
//! ```text
//! NotStarted ──run()──► InProgress ──is_connected()──► Connected
//! ```
//!
//! The state only ever moves forward. The task is the only writer.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embedded_hal_async::delay::DelayNs;
use jestbox_hal::{LinkConfig, LinkError, NetworkLink};
use portable_atomic::{AtomicU8, Ordering};

/// Association progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConnectivityState {
    NotStarted = 0,
    InProgress = 1,
    Connected = 2,
}

impl ConnectivityState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => ConnectivityState::NotStarted,
            1 => ConnectivityState::InProgress,
            _ => ConnectivityState::Connected,
        }
    }
}

/// State shared between the connectivity task and the scheduler
pub struct Connectivity {
    state: AtomicU8,
    config: Mutex<CriticalSectionRawMutex, Cell<Option<LinkConfig>>>,
}

impl Connectivity {
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(ConnectivityState::NotStarted as u8),
            config: Mutex::new(Cell::new(None)),
        }
    }

    /// Current state
    pub fn state(&self) -> ConnectivityState {
        ConnectivityState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectivityState::Connected
    }

    /// Configuration recorded when the link came up
    pub fn config(&self) -> Option<LinkConfig> {
        self.config.lock(|c| c.get())
    }

    /// Move forward to `state`; earlier states are ignored
    ///
    /// Returns true if the state changed.
    fn advance(&self, state: ConnectivityState) -> bool {
        self.state.fetch_max(state as u8, Ordering::AcqRel) < state as u8
    }

    fn record(&self, config: Option<LinkConfig>) {
        self.config.lock(|c| c.set(config));
    }
}

impl Default for Connectivity {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a completed association
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConnectReport {
    /// Address configuration, if the link reported one
    pub config: Option<LinkConfig>,
    /// Join requests issued, including the successful one
    pub join_attempts: u32,
    /// Last error seen before success
    pub last_error: Option<LinkError>,
}

/// One-shot task that associates with the configured network
pub struct ConnectivityTask<'a, N: NetworkLink> {
    shared: &'a Connectivity,
    link: N,
    ssid: &'a str,
    password: &'a str,
    check_interval_ms: u32,
}

impl<'a, N: NetworkLink> ConnectivityTask<'a, N> {
    pub fn new(
        shared: &'a Connectivity,
        link: N,
        ssid: &'a str,
        password: &'a str,
        check_interval_ms: u32,
    ) -> Self {
        Self {
            shared,
            link,
            ssid,
            password,
            check_interval_ms,
        }
    }

    /// Access the link
    pub fn link(&self) -> &N {
        &self.link
    }

    /// Associate and wait until the link is up
    ///
    /// Every wait goes through `delay`, so other tasks run in between.
    /// There is no timeout: failures are retried after the check
    /// interval until the link comes up.
    pub async fn run<D: DelayNs>(&mut self, delay: &mut D) -> ConnectReport {
        self.shared.advance(ConnectivityState::InProgress);

        let mut report = ConnectReport {
            config: None,
            join_attempts: 0,
            last_error: None,
        };

        while let Err(e) = self.link.activate().await {
            report.last_error = Some(e);
            delay.delay_ms(self.check_interval_ms).await;
        }

        loop {
            report.join_attempts += 1;
            match self.link.connect(self.ssid, self.password).await {
                Ok(()) => break,
                Err(e) => {
                    report.last_error = Some(e);
                    delay.delay_ms(self.check_interval_ms).await;
                }
            }
        }

        while !self.link.is_connected() {
            delay.delay_ms(self.check_interval_ms).await;
        }

        report.config = self.link.config();
        self.shared.record(report.config);
        self.shared.advance(ConnectivityState::Connected);
        report
    }
}
