//! Connectivity diagnostics
//!
//! Requests a fixed endpoint and shows the body exactly as received.
//! Any status code counts as an answer; only transport failures are
//! errors.

use alloc::format;
use alloc::string::String;

use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::HttpTransport;

use super::{report, ContentSource, FetchError, Slot, SlotStatus};

/// Raw answer of the echo endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EchoReply {
    pub status: u16,
    pub body: String,
}

/// Echo probe source
pub struct EchoProbe {
    url: String,
    slot: Slot<EchoReply>,
}

impl EchoProbe {
    pub fn new(url: &str) -> Self {
        Self {
            url: String::from(url),
            slot: Slot::Empty,
        }
    }

    pub fn slot(&self) -> &Slot<EchoReply> {
        &self.slot
    }
}

impl ContentSource for EchoProbe {
    async fn fetch<S: RenderSurface, T: HttpTransport>(&mut self, surface: &mut S, transport: &mut T) {
        report(surface, &format!("Probing {}", self.url));
        self.slot.begin();

        let result = transport
            .get(&self.url, &[])
            .await
            .map(|response| EchoReply {
                status: response.status,
                body: response.text,
            })
            .map_err(FetchError::from);

        if let Ok(reply) = &result {
            report(surface, &format!("HTTP {}", reply.status));
        }
        self.slot.settle(result);
    }

    fn display<S: RenderSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        self.slot
            .render(surface, |reply, surface| surface.draw_text(0, 0, &reply.body))
    }

    fn status(&self) -> SlotStatus {
        self.slot.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedTransport;
    use embassy_futures::block_on;
    use jestbox_display::TextScreen;
    use jestbox_hal::TransportError;

    #[test]
    fn test_body_is_verbatim() {
        let mut transport = ScriptedTransport::default();
        transport.respond(404, "{\"origin\": \"1.2.3.4\"}");
        let mut probe = EchoProbe::new("http://httpbin.org/ip");
        let mut screen = TextScreen::new(40, 4);

        block_on(probe.fetch(&mut screen, &mut transport));
        probe.display(&mut screen).unwrap();

        assert_eq!(probe.slot().payload().map(|r| r.status), Some(404));
        assert_eq!(screen.text(), "{\"origin\": \"1.2.3.4\"}");
        assert_eq!(
            screen.log_history(),
            ["Probing http://httpbin.org/ip", "HTTP 404"]
        );
    }

    #[test]
    fn test_body_is_not_sanitized() {
        let mut transport = ScriptedTransport::default();
        transport.respond(200, "grün");
        let mut probe = EchoProbe::new("http://x/");
        let mut screen = TextScreen::new(40, 4);

        block_on(probe.fetch(&mut screen, &mut transport));
        assert_eq!(probe.slot().payload().map(|r| r.body.as_str()), Some("grün"));
    }

    #[test]
    fn test_transport_error() {
        let mut transport = ScriptedTransport::default();
        transport.fail(TransportError::Connect);
        let mut probe = EchoProbe::new("http://x/");
        let mut screen = TextScreen::new(40, 4);

        block_on(probe.fetch(&mut screen, &mut transport));
        probe.display(&mut screen).unwrap();
        assert_eq!(screen.status(), "Error: connection failed");
    }
}
