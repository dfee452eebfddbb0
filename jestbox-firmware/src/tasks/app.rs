//! App task
//!
//! Owns the scheduler and runs its loop forever. Each iteration's
//! report is logged here; the core crates don't log themselves.

use defmt::*;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Output};
use embassy_rp::peripherals::SPI0;
use embassy_rp::pwm::PwmOutput;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::Delay;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::NoResetPin;

use jestbox_core::content::SlotStatus;
use jestbox_core::scheduler::{Buttons, Dispatch, Scheduler};
use jestbox_drivers::{ActiveLowButton, GraphicsSurface, LineRecords, PwmRgbLed};

use crate::net::TcpTransport;

/// SPI device of the Pico Display panel
pub type DisplaySpi = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, Delay>;

/// ST7789 panel wrapped as a text surface
pub type Screen = GraphicsSurface<
    mipidsi::Display<SpiInterface<'static, DisplaySpi, Output<'static>>, ST7789, NoResetPin>,
>;

/// Active-low RGB LED on three PWM channels
pub type StatusLed = PwmRgbLed<PwmOutput<'static>, PwmOutput<'static>, PwmOutput<'static>>;

/// The four Pico Display buttons
pub type Pad = Buttons<ActiveLowButton<Input<'static>>>;

pub type App = Scheduler<'static, Screen, StatusLed, TcpTransport, LineRecords<'static>, RoscRng>;

/// Log the outcome of one fetch and display
pub fn log_dispatch(dispatch: &Dispatch) {
    match dispatch.status {
        SlotStatus::Failed(e) => warn!("{} failed: {}", dispatch.trigger, e),
        status => info!("{}: {}", dispatch.trigger, status),
    }
    if let Err(e) = dispatch.render {
        warn!("Render failed: {}", e);
    }
}

#[embassy_executor::task]
pub async fn app_task(mut app: App, mut pad: Pad) -> ! {
    info!(
        "App task started (poll every {} ms)",
        app.poll_interval_ms()
    );

    let mut delay = Delay;
    loop {
        let report = app.tick(&mut pad, &mut delay).await;

        if let Some(dispatch) = report.dispatch {
            log_dispatch(&dispatch);
        } else if report.triggers.any() {
            trace!("Ignored {}: network not connected", report.triggers);
        }

        if let Some(state) = report.connectivity {
            info!("Connectivity: {}", state);
            if app.network_connected() {
                info!("Network sources enabled");
            }
        }
    }
}
