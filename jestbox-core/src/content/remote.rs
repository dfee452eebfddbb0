//! Joke from a JSON endpoint

use alloc::string::String;

use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::HttpTransport;
use jestbox_protocol::decode_remote_joke;

use super::{get_success, report, ContentSource, FetchError, Slot, SlotStatus};
use crate::sanitize::sanitize;

const HEADERS: &[(&str, &str)] = &[("Accept", "application/json")];

/// Fetches one joke per request
pub struct RemoteJoke {
    url: String,
    slot: Slot<String>,
}

impl RemoteJoke {
    pub fn new(url: &str) -> Self {
        Self {
            url: String::from(url),
            slot: Slot::Empty,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn slot(&self) -> &Slot<String> {
        &self.slot
    }

    async fn request<T: HttpTransport>(&self, transport: &mut T) -> Result<String, FetchError> {
        let body = get_success(transport, &self.url, HEADERS).await?;
        let text = decode_remote_joke(&body)?;
        Ok(sanitize(&text))
    }
}

impl ContentSource for RemoteJoke {
    async fn fetch<S: RenderSurface, T: HttpTransport>(&mut self, surface: &mut S, transport: &mut T) {
        report(surface, "Fetching joke...");
        self.slot.begin();
        let result = self.request(transport).await;
        self.slot.settle(result);
    }

    fn display<S: RenderSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        self.slot
            .render(surface, |text, surface| surface.draw_text(0, 0, text))
    }

    fn status(&self) -> SlotStatus {
        self.slot.status()
    }
}
