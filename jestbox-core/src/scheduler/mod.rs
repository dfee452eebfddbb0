//! Cooperative main loop
//!
//! One iteration:
//!
//! 1. Poll the four inputs
//! 2. Local joke pressed: fetch and display it
//! 3. Else remote joke pressed and connected: fetch and display
//! 4. Else weather pressed and connected: fetch and display
//! 5. Else echo probe pressed and connected: fetch and display
//! 6. Latch `network_connected` once the connectivity task is done
//! 7. Sleep for the poll interval
//!
//! At most one source is serviced per iteration and its fetch and
//! display finish before the next iteration starts, so there is never
//! more than one fetch in flight. The connected latch is never cleared.

mod input;

pub use input::{Buttons, InputSignals, Trigger, Triggers};

use alloc::format;

use embedded_hal_async::delay::DelayNs;
use jestbox_display::{DisplayError, RenderSurface};
use jestbox_hal::{HttpTransport, RecordStore, RgbLed};
use rand_core::RngCore;

use crate::connectivity::{Connectivity, ConnectivityState};
use crate::content::{ContentSource, EchoProbe, LocalJoke, RemoteJoke, SlotStatus, Weather};
use crate::indicator::Indicator;

/// Everything a fetch may touch
pub struct Context<S, L, T>
where
    S: RenderSurface,
    L: RgbLed,
    T: HttpTransport,
{
    pub surface: S,
    pub indicator: Indicator<L>,
    pub transport: T,
}

/// The four content sources
pub struct Sources<R: RecordStore, G: RngCore> {
    pub local_joke: LocalJoke<R, G>,
    pub remote_joke: RemoteJoke,
    pub weather: Weather,
    pub echo_probe: EchoProbe,
}

/// Outcome of servicing one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    pub trigger: Trigger,
    /// Slot state after the fetch
    pub status: SlotStatus,
    /// Result of drawing the slot
    pub render: Result<(), DisplayError>,
}

/// What happened during one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepReport {
    /// Inputs as polled
    pub triggers: Triggers,
    /// Trigger serviced, if any
    pub dispatch: Option<Dispatch>,
    /// Connectivity state, if it changed since the last iteration
    pub connectivity: Option<ConnectivityState>,
}

/// The main loop
pub struct Scheduler<'a, S, L, T, R, G>
where
    S: RenderSurface,
    L: RgbLed,
    T: HttpTransport,
    R: RecordStore,
    G: RngCore,
{
    ctx: Context<S, L, T>,
    sources: Sources<R, G>,
    connectivity: &'a Connectivity,
    network_name: &'a str,
    poll_interval_ms: u32,
    last_seen: ConnectivityState,
    network_connected: bool,
}

impl<'a, S, L, T, R, G> Scheduler<'a, S, L, T, R, G>
where
    S: RenderSurface,
    L: RgbLed,
    T: HttpTransport,
    R: RecordStore,
    G: RngCore,
{
    pub fn new(
        ctx: Context<S, L, T>,
        sources: Sources<R, G>,
        connectivity: &'a Connectivity,
        network_name: &'a str,
        poll_interval_ms: u32,
    ) -> Self {
        Self {
            ctx,
            sources,
            connectivity,
            network_name,
            poll_interval_ms,
            last_seen: ConnectivityState::NotStarted,
            network_connected: false,
        }
    }

    /// Show a local joke right away, before the network is up
    pub async fn boot(&mut self) -> Dispatch {
        self.dispatch(Trigger::LocalJoke).await
    }

    /// Run steps 1 to 6 of one iteration
    pub async fn step<I: InputSignals>(&mut self, inputs: &mut I) -> StepReport {
        let triggers = inputs.poll();

        let dispatch = match triggers.select(self.network_connected) {
            Some(trigger) => Some(self.dispatch(trigger).await),
            None => None,
        };

        let connectivity = self.observe_connectivity();

        StepReport {
            triggers,
            dispatch,
            connectivity,
        }
    }

    /// Run one full iteration including the trailing sleep
    pub async fn tick<I: InputSignals, D: DelayNs>(
        &mut self,
        inputs: &mut I,
        delay: &mut D,
    ) -> StepReport {
        let report = self.step(inputs).await;
        delay.delay_ms(self.poll_interval_ms).await;
        report
    }

    /// Fetch and display one source
    ///
    /// The indicator is Busy for the fetch and Idle again before the
    /// slot is drawn.
    pub async fn dispatch(&mut self, trigger: Trigger) -> Dispatch {
        let ctx = &mut self.ctx;
        let (status, render) = match trigger {
            Trigger::LocalJoke => service(&mut self.sources.local_joke, ctx).await,
            Trigger::RemoteJoke => service(&mut self.sources.remote_joke, ctx).await,
            Trigger::Weather => service(&mut self.sources.weather, ctx).await,
            Trigger::EchoProbe => service(&mut self.sources.echo_probe, ctx).await,
        };

        Dispatch {
            trigger,
            status,
            render,
        }
    }

    /// Latch the connection and report state changes on the status line
    fn observe_connectivity(&mut self) -> Option<ConnectivityState> {
        let state = self.connectivity.state();
        if state == self.last_seen {
            return None;
        }
        self.last_seen = state;

        let surface = &mut self.ctx.surface;
        match state {
            ConnectivityState::NotStarted => {}
            ConnectivityState::InProgress => {
                let _ = surface.log(&format!("Connecting to WiFi {}", self.network_name));
            }
            ConnectivityState::Connected => {
                self.network_connected = true;
                let _ = surface.log(&format!("Connected to WiFi {}", self.network_name));
                if let Some(config) = self.connectivity.config() {
                    let _ = surface.log(&format!("{}", config));
                }
            }
        }
        Some(state)
    }

    /// Whether network triggers are enabled
    pub fn network_connected(&self) -> bool {
        self.network_connected
    }

    pub fn poll_interval_ms(&self) -> u32 {
        self.poll_interval_ms
    }

    pub fn context(&self) -> &Context<S, L, T> {
        &self.ctx
    }
}

async fn service<C, S, L, T>(
    source: &mut C,
    ctx: &mut Context<S, L, T>,
) -> (SlotStatus, Result<(), DisplayError>)
where
    C: ContentSource,
    S: RenderSurface,
    L: RgbLed,
    T: HttpTransport,
{
    let Context {
        surface,
        indicator,
        transport,
    } = ctx;

    {
        let _busy = indicator.busy();
        source.fetch(surface, transport).await;
    }

    (source.status(), source.display(surface))
}

#[cfg(test)]
mod tests;
