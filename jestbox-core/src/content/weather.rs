//! Current weather from a forecast endpoint
//!
//! The request URL is rendered once from a template with `{latitude}`,
//! `{longitude}` and `{api_key}` placeholders. The status line shows a
//! copy with the key replaced by `<REDACTED>`.

use alloc::format;
use alloc::string::String;

use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::HttpTransport;
use jestbox_protocol::{decode_forecast, WeatherSnapshot};

use super::weather_codes::weather_label;
use super::{get_success, report, ContentSource, FetchError, Slot, SlotStatus};
use crate::secrets::SecretsError;

const REDACTED: &str = "<REDACTED>";
const API_KEY: &str = "{api_key}";

/// Rendered request URL and its loggable form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherRequest {
    url: String,
    redacted: String,
}

impl WeatherRequest {
    /// Fill in the template
    ///
    /// A template that needs an API key fails without one.
    pub fn render(
        template: &str,
        latitude: f32,
        longitude: f32,
        api_key: Option<&str>,
    ) -> Result<Self, SecretsError> {
        let base = template
            .replace("{latitude}", &format!("{:.2}", latitude))
            .replace("{longitude}", &format!("{:.2}", longitude));

        if !base.contains(API_KEY) {
            return Ok(Self {
                redacted: base.clone(),
                url: base,
            });
        }

        let key = api_key.ok_or(SecretsError::MissingApiKey)?;
        Ok(Self {
            url: base.replace(API_KEY, key),
            redacted: base.replace(API_KEY, REDACTED),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// URL safe to show and log
    pub fn redacted(&self) -> &str {
        &self.redacted
    }
}

/// Weather source
pub struct Weather {
    request: WeatherRequest,
    slot: Slot<WeatherSnapshot>,
}

impl Weather {
    pub fn new(request: WeatherRequest) -> Self {
        Self {
            request,
            slot: Slot::Empty,
        }
    }

    pub fn request(&self) -> &WeatherRequest {
        &self.request
    }

    pub fn slot(&self) -> &Slot<WeatherSnapshot> {
        &self.slot
    }

    async fn query<T: HttpTransport>(&self, transport: &mut T) -> Result<WeatherSnapshot, FetchError> {
        let body = get_success(transport, self.request.url(), &[]).await?;
        Ok(decode_forecast(&body)?)
    }
}

/// Lines shown for a snapshot, top to bottom
fn snapshot_lines(snapshot: &WeatherSnapshot) -> [String; 4] {
    let rain = match (snapshot.precipitation_mm, snapshot.precipitation_probability) {
        (Some(mm), Some(pct)) => format!("Rain: {:.1} mm ({}%)", mm, pct),
        (Some(mm), None) => format!("Rain: {:.1} mm", mm),
        (None, Some(pct)) => format!("Rain: {}%", pct),
        (None, None) => String::from("Rain: n/a"),
    };

    [
        snapshot.time.replace('T', " "),
        format!("{}", weather_label(snapshot.weather_code)),
        format!("Temp: {:.1} C", snapshot.temperature_c),
        rain,
    ]
}

impl ContentSource for Weather {
    async fn fetch<S: RenderSurface, T: HttpTransport>(&mut self, surface: &mut S, transport: &mut T) {
        let message = format!("Requesting weather data from {}", self.request.redacted());
        report(surface, &message);
        self.slot.begin();
        let result = self.query(transport).await;
        self.slot.settle(result);
    }

    fn display<S: RenderSurface>(&self, surface: &mut S) -> Result<(), DisplayError> {
        self.slot.render(surface, |snapshot, surface| {
            let metrics = surface.metrics();
            for (row, line) in snapshot_lines(snapshot).iter().enumerate() {
                surface.draw_text(0, metrics.row_y(row as u16), line)?;
            }
            Ok(())
        })
    }

    fn status(&self) -> SlotStatus {
        self.slot.status()
    }
}
