//! Content sources
//!
//! Each source fills one slot: the last fetch either produced a payload
//! or an error, never both. `fetch` never fails outward; failures are
//! stored and rendered by the next `display`.
//!
//! | Source        | Payload            | Network |
//! |---------------|--------------------|---------|
//! | [`LocalJoke`] | setup + punchline  | no      |
//! | [`RemoteJoke`]| joke text          | yes     |
//! | [`Weather`]   | forecast snapshot  | yes     |
//! | [`EchoProbe`] | raw response body  | yes     |

pub mod echo;
pub mod local;
pub mod remote;
pub mod weather;
pub mod weather_codes;

use alloc::format;
use alloc::string::String;
use core::fmt;

use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::{HttpTransport, TransportError};
use jestbox_protocol::DecodeError;

pub use echo::{EchoProbe, EchoReply};
pub use local::LocalJoke;
pub use remote::RemoteJoke;
pub use weather::{Weather, WeatherRequest};
pub use weather_codes::{weather_label, WeatherLabel};

/// Shown before the first fetch
pub const NO_DATA: &str = "No data yet";

/// Why a fetch did not produce a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// Request could not be completed
    Transport(TransportError),
    /// Server answered with a non-2xx status
    Status(u16),
    /// Body did not have the expected shape
    Decode(DecodeError),
    /// The local record store is empty
    NoRecords,
    /// The chosen record could not be read
    RecordMissing(usize),
}

impl From<TransportError> for FetchError {
    fn from(e: TransportError) -> Self {
        FetchError::Transport(e)
    }
}

impl From<DecodeError> for FetchError {
    fn from(e: DecodeError) -> Self {
        FetchError::Decode(e)
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Transport(e) => write!(f, "{}", e),
            FetchError::Status(status) => write!(f, "HTTP status {}", status),
            FetchError::Decode(e) => write!(f, "{}", e),
            FetchError::NoRecords => f.write_str("no local jokes"),
            FetchError::RecordMissing(index) => write!(f, "joke record {} missing", index),
        }
    }
}

/// Coarse state of a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SlotStatus {
    /// Never fetched, or a fetch is running
    Empty,
    /// Last fetch succeeded
    Ready,
    /// Last fetch failed
    Failed(FetchError),
}

/// Result of the most recent fetch of one source
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<P> {
    Empty,
    Ready(P),
    Failed(FetchError),
}

impl<P> Default for Slot<P> {
    fn default() -> Self {
        Slot::Empty
    }
}

impl<P> Slot<P> {
    /// Drop the previous payload or error before a new attempt
    pub fn begin(&mut self) {
        *self = Slot::Empty;
    }

    /// Store the outcome of an attempt
    pub fn settle(&mut self, result: Result<P, FetchError>) {
        *self = match result {
            Ok(payload) => Slot::Ready(payload),
            Err(e) => Slot::Failed(e),
        };
    }

    pub fn payload(&self) -> Option<&P> {
        match self {
            Slot::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<FetchError> {
        match self {
            Slot::Failed(e) => Some(*e),
            _ => None,
        }
    }

    pub fn status(&self) -> SlotStatus {
        match self {
            Slot::Empty => SlotStatus::Empty,
            Slot::Ready(_) => SlotStatus::Ready,
            Slot::Failed(e) => SlotStatus::Failed(*e),
        }
    }

    /// Render the slot into the content area
    ///
    /// Errors take precedence and are mirrored on the status line.
    pub fn render<S, F>(&self, surface: &mut S, draw: F) -> Result<(), DisplayError>
    where
        S: RenderSurface,
        F: FnOnce(&P, &mut S) -> Result<(), DisplayError>,
    {
        surface.clear()?;
        match self {
            Slot::Failed(e) => {
                let message = error_message(e);
                surface.draw_text(0, 0, &message)?;
                surface.log(&message)?;
            }
            Slot::Ready(payload) => draw(payload, surface)?,
            Slot::Empty => surface.draw_text(0, 0, NO_DATA)?,
        }
        surface.update()
    }
}

/// Text shown for a failed fetch
pub fn error_message(e: &FetchError) -> String {
    format!("Error: {}", e)
}

/// A unit that can fetch content and render its current state
#[allow(async_fn_in_trait)]
pub trait ContentSource {
    /// Replace the slot with a fresh payload or error
    ///
    /// Progress is reported on the status line of `surface`.
    async fn fetch<S: RenderSurface, T: HttpTransport>(&mut self, surface: &mut S, transport: &mut T);

    /// Draw the current slot; never fetches
    fn display<S: RenderSurface>(&self, surface: &mut S) -> Result<(), DisplayError>;

    /// State of the slot
    fn status(&self) -> SlotStatus;
}

/// Best-effort status line update
///
/// A failing status line must not abort a fetch.
pub(crate) fn report<S: RenderSurface>(surface: &mut S, text: &str) {
    let _ = surface.log(text);
}

/// Issue a GET and require a 2xx answer
pub(crate) async fn get_success<T: HttpTransport>(
    transport: &mut T,
    url: &str,
    headers: &[(&str, &str)],
) -> Result<String, FetchError> {
    let response = transport.get(url, headers).await?;
    if !response.is_success() {
        return Err(FetchError::Status(response.status));
    }
    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use jestbox_display::TextScreen;

    #[test]
    fn test_slot_is_exclusive() {
        let mut slot: Slot<u32> = Slot::default();
        assert_eq!(slot.status(), SlotStatus::Empty);

        slot.settle(Ok(7));
        assert_eq!(slot.payload(), Some(&7));
        assert_eq!(slot.error(), None);

        slot.begin();
        assert_eq!(slot.payload(), None);

        slot.settle(Err(FetchError::Status(500)));
        assert_eq!(slot.payload(), None);
        assert_eq!(slot.error(), Some(FetchError::Status(500)));
    }

    #[test]
    fn test_render_placeholder() {
        let slot: Slot<u32> = Slot::Empty;
        let mut screen = TextScreen::new(20, 3);
        slot.render(&mut screen, |_, _| Ok(())).unwrap();
        assert_eq!(screen.text(), NO_DATA);
        assert_eq!(screen.updates(), 1);
    }

    #[test]
    fn test_render_error_mirrors_status_line() {
        let slot: Slot<u32> = Slot::Failed(FetchError::Transport(TransportError::Dns));
        let mut screen = TextScreen::new(40, 3);
        slot.render(&mut screen, |_, _| Ok(())).unwrap();
        assert_eq!(screen.text(), "Error: DNS lookup failed");
        assert_eq!(screen.status(), "Error: DNS lookup failed");
    }

    #[test]
    fn test_error_descriptions() {
        assert_eq!(FetchError::Status(404).to_string(), "HTTP status 404");
        assert_eq!(
            FetchError::Decode(DecodeError::Empty).to_string(),
            "empty response"
        );
        assert_eq!(FetchError::NoRecords.to_string(), "no local jokes");
    }
}
