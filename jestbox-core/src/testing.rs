//! Host fakes for the hal traits

use std::cell::Cell;
use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use jestbox_hal::{
    HttpResponse, HttpTransport, LinkConfig, LinkError, NetworkLink, RecordStore, Rgb, RgbLed,
    TransportError,
};

use crate::scheduler::{InputSignals, Triggers};

/// LED that remembers every color it was set to
#[derive(Debug, Default)]
pub struct RecordingLed {
    pub colors: Vec<Rgb>,
}

impl RgbLed for RecordingLed {
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.colors.push(Rgb::new(r, g, b));
    }
}

/// Transport answering from a queue; fails with `Timeout` once empty
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    pub responses: VecDeque<Result<HttpResponse, TransportError>>,
    pub requests: Vec<String>,
}

impl ScriptedTransport {
    pub fn respond(&mut self, status: u16, text: &str) {
        self.responses.push_back(Ok(HttpResponse {
            status,
            text: text.into(),
        }));
    }

    pub fn fail(&mut self, error: TransportError) {
        self.responses.push_back(Err(error));
    }
}

impl HttpTransport for ScriptedTransport {
    async fn get(
        &mut self,
        url: &str,
        _headers: &[(&str, &str)],
    ) -> Result<HttpResponse, TransportError> {
        self.requests.push(url.into());
        self.responses
            .pop_front()
            .unwrap_or(Err(TransportError::Timeout))
    }
}

/// Link that comes up after a number of `is_connected` polls
#[derive(Debug, Default)]
pub struct ScriptedLink {
    pub activations: u32,
    pub join_results: VecDeque<Result<(), LinkError>>,
    pub joins: Vec<(String, String)>,
    pub polls_until_up: u32,
    pub polls: Cell<u32>,
    pub joined: bool,
}

impl ScriptedLink {
    pub fn up_after(polls: u32) -> Self {
        Self {
            polls_until_up: polls,
            ..Self::default()
        }
    }
}

pub const LINK_CONFIG: LinkConfig = LinkConfig {
    address: [192, 168, 1, 20],
    prefix_len: 24,
    gateway: Some([192, 168, 1, 1]),
    dns: Some([192, 168, 1, 1]),
};

impl NetworkLink for ScriptedLink {
    async fn activate(&mut self) -> Result<(), LinkError> {
        self.activations += 1;
        Ok(())
    }

    async fn connect(&mut self, ssid: &str, password: &str) -> Result<(), LinkError> {
        self.joins.push((ssid.into(), password.into()));
        let result = self.join_results.pop_front().unwrap_or(Ok(()));
        self.joined = result.is_ok();
        result
    }

    fn is_connected(&self) -> bool {
        if !self.joined {
            return false;
        }
        let polls = self.polls.get() + 1;
        self.polls.set(polls);
        polls > self.polls_until_up
    }

    fn config(&self) -> Option<LinkConfig> {
        self.joined.then_some(LINK_CONFIG)
    }
}

/// Records held in memory
#[derive(Debug, Default)]
pub struct VecRecords(Vec<String>);

impl VecRecords {
    pub fn new(lines: Vec<String>) -> Self {
        Self(lines)
    }
}

impl RecordStore for VecRecords {
    fn len(&self) -> usize {
        self.0.len()
    }

    fn record(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

/// Inputs replayed from a script, then `held` forever
#[derive(Debug, Default)]
pub struct ScriptedInputs {
    pub script: VecDeque<Triggers>,
    pub held: Triggers,
    pub polls: u32,
}

impl ScriptedInputs {
    pub fn holding(held: Triggers) -> Self {
        Self {
            held,
            ..Self::default()
        }
    }
}

impl InputSignals for ScriptedInputs {
    fn poll(&mut self) -> Triggers {
        self.polls += 1;
        self.script.pop_front().unwrap_or(self.held)
    }
}

/// Delay that only yields to the other future in a `join`
#[derive(Debug, Default)]
pub struct YieldDelay {
    pub calls: u32,
}

impl DelayNs for YieldDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        embassy_futures::yield_now().await;
    }
}
