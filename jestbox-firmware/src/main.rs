//! Jestbox - Joke & Weather Display Firmware
//!
//! Firmware for a Raspberry Pi Pico W with a Pimoroni Pico Display.
//! Shows a local joke right after boot, joins Wi-Fi in the background
//! and then also serves remote jokes, the local weather and an HTTP
//! echo probe on button press.

#![no_std]
#![no_main]

extern crate alloc;

use alloc::format;

use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use defmt::*;
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::clocks::RoscRng;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::peripherals::PIO0;
use embassy_rp::pio::{InterruptHandler, Pio};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::spi::{Config as SpiConfig, Spi};
use embassy_time::Delay;
use embedded_alloc::LlffHeap as Heap;
use embedded_hal_bus::spi::ExclusiveDevice;
use mipidsi::interface::SpiInterface;
use mipidsi::models::ST7789;
use mipidsi::options::{ColorInversion, Orientation, Rotation};
use mipidsi::Builder;
use rand_core::RngCore;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use jestbox_core::config::{parse_config, DeviceConfig};
use jestbox_core::content::{EchoProbe, LocalJoke, RemoteJoke, Weather, WeatherRequest};
use jestbox_core::indicator::Indicator;
use jestbox_core::scheduler::{Buttons, Context, Scheduler, Sources};
use jestbox_core::secrets::{Secrets, WEATHER_API_KEY, WIFI_PASS, WIFI_SSID};
use jestbox_display::RenderSurface;
use jestbox_drivers::{ActiveLowButton, GraphicsSurface, LineRecords, PwmRgbLed, SurfaceStyle};

use crate::net::{Cyw43Link, TcpTransport};
use crate::tasks::{App, Pad, Screen};

mod channels;
mod net;
mod tasks;

// Heap allocator for JSON decoding and HTTP responses
#[global_allocator]
static HEAP: Heap = Heap::empty();

// Heap size: 64KB
const HEAP_SIZE: usize = 64 * 1024;

/// Embedded device configuration (compiled into firmware)
/// Edit device.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../device.toml");

/// Local jokes, one `[setup, punchline]` pair per line
const JOKES: &str = include_str!("../jokes.min.json");

/// ST7789 panel as mounted on the Pico Display (portrait native)
const PANEL_WIDTH: u16 = 135;
const PANEL_HEIGHT: u16 = 240;
const PANEL_OFFSET: (u16, u16) = (52, 40);

const DISPLAY_SPI_HZ: u32 = 62_500_000;

/// PWM top for backlight and LED (125 MHz / 10k = 12.5 kHz)
const PWM_TOP: u16 = 10_000;

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => InterruptHandler<PIO0>;
});

static DISPLAY_BUF: StaticCell<[u8; 512]> = StaticCell::new();
static CYW43_STATE: StaticCell<cyw43::State> = StaticCell::new();
static NET_RESOURCES: StaticCell<StackResources<4>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Jestbox firmware starting...");

    init_heap();

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Display: SPI0 (SCK=GPIO18, MOSI=GPIO19, CS=GPIO17, DC=GPIO16)
    let mut spi_config = SpiConfig::default();
    spi_config.frequency = DISPLAY_SPI_HZ;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_18, p.PIN_19, spi_config);
    let cs = Output::new(p.PIN_17, Level::High);
    let dc = Output::new(p.PIN_16, Level::Low);
    let spi_device = match ExclusiveDevice::new(spi, cs, Delay) {
        Ok(device) => device,
        Err(e) => match e {},
    };
    let interface = SpiInterface::new(spi_device, dc, DISPLAY_BUF.init([0u8; 512]));

    let panel = match Builder::new(ST7789, interface)
        .display_size(PANEL_WIDTH, PANEL_HEIGHT)
        .display_offset(PANEL_OFFSET.0, PANEL_OFFSET.1)
        .orientation(Orientation::new().rotate(Rotation::Deg90))
        .invert_colors(ColorInversion::Inverted)
        .init(&mut Delay)
    {
        Ok(panel) => panel,
        Err(_) => panic!("Display init failed"),
    };

    let mut screen: Screen = GraphicsSurface::new(panel, SurfaceStyle::default());
    if let Err(e) = screen.init() {
        warn!("Screen init failed: {}", e);
    }
    let _ = screen.draw_text(0, 0, "Initializing...");
    let _ = screen.update();
    info!("Display initialized");

    let config = load_config(&mut screen);

    // Backlight: GPIO20 (PWM slice 2, channel A)
    let mut backlight_config = PwmConfig::default();
    backlight_config.top = PWM_TOP;
    backlight_config.compare_a = backlight_duty(config.display.backlight_percent);
    let _backlight = Pwm::new_output_a(p.PWM_SLICE2, p.PIN_20, backlight_config);

    // RGB LED: GPIO6/7 (PWM slice 3 A/B), GPIO8 (PWM slice 4 A), active low
    let mut led_config = PwmConfig::default();
    led_config.top = PWM_TOP;
    let (red, green) =
        Pwm::new_output_ab(p.PWM_SLICE3, p.PIN_6, p.PIN_7, led_config.clone()).split();
    let (blue, _) = Pwm::new_output_a(p.PWM_SLICE4, p.PIN_8, led_config).split();
    let led = PwmRgbLed::new_active_low(unwrap!(red), unwrap!(green), unwrap!(blue));
    let indicator = Indicator::new(led, config.led);

    // Buttons: A=GPIO12, B=GPIO13, X=GPIO14, Y=GPIO15 (pull-up, active low)
    let pad: Pad = Buttons {
        local_joke: ActiveLowButton::new(Input::new(p.PIN_15, Pull::Up)),
        remote_joke: ActiveLowButton::new(Input::new(p.PIN_14, Pull::Up)),
        weather: ActiveLowButton::new(Input::new(p.PIN_12, Pull::Up)),
        echo_probe: ActiveLowButton::new(Input::new(p.PIN_13, Pull::Up)),
    };

    // Secrets are baked in at compile time
    let _ = screen.log("Reading secrets");
    let secrets = match Secrets::from_provider(&|name: &str| match name {
        WIFI_SSID => option_env!("WIFI_SSID"),
        WIFI_PASS => option_env!("WIFI_PASS"),
        WEATHER_API_KEY => option_env!("WEATHER_API_KEY"),
        _ => None,
    }) {
        Ok(secrets) => secrets,
        Err(e) => halt(&mut screen, &format!("Error: {}", e)),
    };
    info!("Secrets loaded for network {}", secrets.wifi_ssid);

    let weather_request = match WeatherRequest::render(
        &config.weather.url_template,
        config.weather.latitude,
        config.weather.longitude,
        secrets.weather_api_key,
    ) {
        Ok(request) => request,
        Err(e) => halt(&mut screen, &format!("Error: {}", e)),
    };

    // Radio: CYW43 over PIO0 SPI (PWR=GPIO23, CS=GPIO25, DIO=GPIO24, CLK=GPIO29)
    let fw = cyw43_firmware::CYW43_43439A0;
    let clm = cyw43_firmware::CYW43_43439A0_CLM;

    let pwr = Output::new(p.PIN_23, Level::Low);
    let cs = Output::new(p.PIN_25, Level::High);
    let mut pio = Pio::new(p.PIO0, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        p.PIN_24,
        p.PIN_29,
        p.DMA_CH0,
    );

    let state = CYW43_STATE.init(cyw43::State::new());
    let (net_device, control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(unwrap!(tasks::wifi_task(runner)));

    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        NET_RESOURCES.init(StackResources::new()),
        RoscRng.next_u64(),
    );
    spawner.spawn(unwrap!(tasks::net_task(runner)));
    info!("Network stack initialized");

    let sources = Sources {
        local_joke: LocalJoke::new(LineRecords::new(JOKES), RoscRng),
        remote_joke: RemoteJoke::new(&config.jokes.url),
        weather: Weather::new(weather_request),
        echo_probe: EchoProbe::new(&config.echo.url),
    };
    let ctx = Context {
        surface: screen,
        indicator,
        transport: TcpTransport::new(stack),
    };
    let mut app: App = Scheduler::new(
        ctx,
        sources,
        &channels::CONNECTIVITY,
        secrets.wifi_ssid,
        config.scheduler.poll_interval_ms,
    );

    // Something to read while the network comes up
    let dispatch = app.boot().await;
    tasks::log_dispatch(&dispatch);

    let link = Cyw43Link::new(control, stack, clm);
    spawner.spawn(unwrap!(tasks::connectivity_task(
        link,
        secrets.wifi_ssid,
        secrets.wifi_password,
        config.network.check_interval_ms,
    )));
    spawner.spawn(unwrap!(tasks::app_task(app, pad)));

    info!("All tasks spawned, firmware running");

    // Keeps the backlight PWM alive
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}

/// Parse the embedded configuration
fn load_config(screen: &mut Screen) -> DeviceConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration loaded: backlight {}%, poll {} ms",
                config.display.backlight_percent, config.scheduler.poll_interval_ms
            );
            config
        }
        Err(e) => halt(screen, &format!("Config error: {}", e)),
    }
}

/// Show a fatal startup error and stop
fn halt(screen: &mut Screen, message: &str) -> ! {
    error!("{}", message);
    let _ = screen.clear();
    let _ = screen.draw_text(0, 0, message);
    let _ = screen.log(message);
    let _ = screen.update();
    panic!("{}", message)
}

fn backlight_duty(percent: u8) -> u16 {
    (u32::from(PWM_TOP) * u32::from(percent.min(100)) / 100) as u16
}

/// Initialize the heap allocator
fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
