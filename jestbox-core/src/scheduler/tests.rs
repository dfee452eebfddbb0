use super::*;
use crate::connectivity::ConnectivityTask;
use crate::content::{FetchError, WeatherRequest};
use crate::indicator::{IndicatorColors, IndicatorState};
use crate::testing::{
    RecordingLed, ScriptedInputs, ScriptedLink, ScriptedTransport, VecRecords, YieldDelay,
};
use embassy_futures::block_on;
use embassy_futures::join::join;
use jestbox_display::TextScreen;
use jestbox_hal::{Rgb, TransportError};
use rand::rngs::StdRng;
use rand::SeedableRng;

type TestScheduler<'a> =
    Scheduler<'a, TextScreen, RecordingLed, ScriptedTransport, VecRecords, StdRng>;

const REMOTE_JOKE: &str = r#"[{"text": "Remote joke"}]"#;

fn sources() -> Sources<VecRecords, StdRng> {
    Sources {
        local_joke: LocalJoke::new(
            VecRecords::new(vec![r#"["Setup", "Punchline"]"#.into()]),
            StdRng::seed_from_u64(7),
        ),
        remote_joke: RemoteJoke::new("http://jokes.test/api"),
        weather: Weather::new(
            WeatherRequest::render("http://weather.test/f?lat={latitude}", 53.55, 10.0, None)
                .unwrap(),
        ),
        echo_probe: EchoProbe::new("http://echo.test/"),
    }
}

fn scheduler(connectivity: &Connectivity, transport: ScriptedTransport) -> TestScheduler<'_> {
    let ctx = Context {
        surface: TextScreen::new(60, 10),
        indicator: Indicator::new(RecordingLed::default(), IndicatorColors::default()),
        transport,
    };
    Scheduler::new(ctx, sources(), connectivity, "home", 100)
}

/// Connectivity that has already completed
fn connected() -> Connectivity {
    let connectivity = Connectivity::new();
    {
        let mut task =
            ConnectivityTask::new(&connectivity, ScriptedLink::up_after(0), "home", "pw", 1);
        block_on(task.run(&mut YieldDelay::default()));
    }
    connectivity
}

fn all_held() -> ScriptedInputs {
    ScriptedInputs::holding(Triggers {
        local_joke: true,
        remote_joke: true,
        weather: true,
        echo_probe: true,
    })
}

fn network_held() -> ScriptedInputs {
    ScriptedInputs::holding(Triggers {
        local_joke: false,
        remote_joke: true,
        weather: true,
        echo_probe: true,
    })
}

#[test]
fn test_boot_shows_local_joke() {
    let connectivity = Connectivity::new();
    let mut sched = scheduler(&connectivity, ScriptedTransport::default());

    let dispatch = block_on(sched.boot());

    assert_eq!(dispatch.trigger, Trigger::LocalJoke);
    assert_eq!(dispatch.status, SlotStatus::Ready);
    assert_eq!(dispatch.render, Ok(()));
    let screen = &sched.context().surface;
    assert_eq!(screen.text(), "Setup\n---\nPunchline");
    assert_eq!(screen.status(), "Reading local joke...");
    assert_eq!(sched.context().indicator.cycles(), 1);
}

#[test]
fn test_network_triggers_ignored_until_connected() {
    let connectivity = Connectivity::new();
    let mut sched = scheduler(&connectivity, ScriptedTransport::default());
    let mut inputs = network_held();

    for _ in 0..5 {
        let report = block_on(sched.step(&mut inputs));
        assert_eq!(report.dispatch, None);
        assert_eq!(report.connectivity, None);
    }

    assert!(!sched.network_connected());
    assert!(sched.context().transport.requests.is_empty());
    assert_eq!(sched.context().surface.text(), "");
    assert_eq!(sched.context().indicator.cycles(), 0);
}

#[test]
fn test_local_trigger_works_offline() {
    let connectivity = Connectivity::new();
    let mut sched = scheduler(&connectivity, ScriptedTransport::default());
    let mut inputs = all_held();

    let report = block_on(sched.step(&mut inputs));

    assert_eq!(report.dispatch.map(|d| d.trigger), Some(Trigger::LocalJoke));
    assert!(sched.context().transport.requests.is_empty());
}

#[test]
fn test_one_dispatch_per_iteration() {
    let connectivity = connected();
    let mut transport = ScriptedTransport::default();
    transport.respond(200, REMOTE_JOKE);
    let mut sched = scheduler(&connectivity, transport);

    // First step only latches the connection
    let mut inputs = ScriptedInputs::holding(Triggers::NONE);
    let report = block_on(sched.step(&mut inputs));
    assert_eq!(report.connectivity, Some(ConnectivityState::Connected));
    assert!(sched.network_connected());

    let mut inputs = all_held();
    inputs.script.push_back(all_held().held);
    inputs.script.push_back(network_held().held);

    let first = block_on(sched.step(&mut inputs));
    let second = block_on(sched.step(&mut inputs));

    assert_eq!(first.dispatch.map(|d| d.trigger), Some(Trigger::LocalJoke));
    assert_eq!(second.dispatch.map(|d| d.trigger), Some(Trigger::RemoteJoke));
    assert_eq!(sched.context().transport.requests, ["http://jokes.test/api"]);
    assert_eq!(sched.context().surface.text(), "Remote joke");
}

#[test]
fn test_connected_status_messages() {
    let connectivity = connected();
    let mut sched = scheduler(&connectivity, ScriptedTransport::default());
    let mut inputs = ScriptedInputs::default();

    block_on(sched.step(&mut inputs));

    let screen = &sched.context().surface;
    assert_eq!(
        screen.log_history(),
        [
            "Connected to WiFi home",
            "192.168.1.20/24 gw 192.168.1.1 dns 192.168.1.1"
        ]
    );
    assert_eq!(
        screen.status(),
        "192.168.1.20/24 gw 192.168.1.1 dns 192.168.1.1"
    );
}

#[test]
fn test_latch_survives_transport_failures() {
    let connectivity = connected();
    let mut transport = ScriptedTransport::default();
    transport.fail(TransportError::NotConnected);
    transport.fail(TransportError::NotConnected);
    let mut sched = scheduler(&connectivity, transport);
    let mut inputs = ScriptedInputs::holding(Triggers::only(Trigger::Weather));

    let reports: Vec<_> = (0..3).map(|_| block_on(sched.step(&mut inputs))).collect();

    assert!(sched.network_connected());
    // Latched during the first step, so the next two are serviced
    assert_eq!(reports[0].dispatch, None);
    for report in &reports[1..] {
        let dispatch = report.dispatch.unwrap();
        assert_eq!(dispatch.trigger, Trigger::Weather);
        assert_eq!(
            dispatch.status,
            SlotStatus::Failed(FetchError::Transport(TransportError::NotConnected))
        );
    }
    assert_eq!(sched.context().transport.requests.len(), 2);
}

#[test]
fn test_failed_fetch_renders_error() {
    let connectivity = connected();
    let mut transport = ScriptedTransport::default();
    transport.fail(TransportError::Dns);
    let mut sched = scheduler(&connectivity, transport);
    block_on(sched.step(&mut ScriptedInputs::default()));

    let dispatch = block_on(sched.dispatch(Trigger::EchoProbe));

    assert_eq!(
        dispatch.status,
        SlotStatus::Failed(FetchError::Transport(TransportError::Dns))
    );
    let screen = &sched.context().surface;
    assert_eq!(screen.text(), "Error: DNS lookup failed");
    assert_eq!(screen.status(), "Error: DNS lookup failed");
    assert_eq!(sched.context().indicator.state(), IndicatorState::Idle);
}

#[test]
fn test_busy_idle_pairs_per_fetch() {
    let connectivity = connected();
    let mut transport = ScriptedTransport::default();
    transport.respond(200, REMOTE_JOKE);
    transport.fail(TransportError::Read);
    let mut sched = scheduler(&connectivity, transport);
    block_on(sched.step(&mut ScriptedInputs::default()));

    for trigger in [
        Trigger::LocalJoke,
        Trigger::RemoteJoke,
        Trigger::Weather,
        Trigger::EchoProbe,
    ] {
        block_on(sched.dispatch(trigger));
    }

    let indicator = &sched.context().indicator;
    assert_eq!(indicator.cycles(), 4);

    let idle = Rgb::new(0, 0, 10);
    let busy = Rgb::new(10, 5, 0);
    let colors = &indicator.led().colors;
    // Initial idle, then one busy/idle pair per fetch
    assert_eq!(colors.len(), 1 + 2 * 4);
    assert_eq!(colors[0], idle);
    for pair in colors[1..].chunks(2) {
        assert_eq!(pair, [busy, idle]);
    }
}

#[test]
fn test_tick_sleeps_for_poll_interval() {
    let connectivity = Connectivity::new();
    let mut sched = scheduler(&connectivity, ScriptedTransport::default());
    let mut delay = YieldDelay::default();

    block_on(sched.tick(&mut ScriptedInputs::default(), &mut delay));
    block_on(sched.tick(&mut ScriptedInputs::default(), &mut delay));

    assert_eq!(delay.calls, 2);
    assert_eq!(sched.poll_interval_ms(), 100);
}

#[test]
fn test_main_loop_runs_while_connecting() {
    let connectivity = Connectivity::new();
    let mut task =
        ConnectivityTask::new(&connectivity, ScriptedLink::up_after(3), "home", "pw", 500);
    let mut transport = ScriptedTransport::default();
    for _ in 0..8 {
        transport.respond(200, REMOTE_JOKE);
    }
    let mut sched = scheduler(&connectivity, transport);
    let mut inputs = ScriptedInputs::holding(Triggers::only(Trigger::RemoteJoke));
    let mut task_delay = YieldDelay::default();
    let mut loop_delay = YieldDelay::default();
    let mut reports = Vec::new();

    let (connect, ()) = block_on(join(task.run(&mut task_delay), async {
        for _ in 0..8 {
            reports.push(sched.tick(&mut inputs, &mut loop_delay).await);
        }
    }));

    assert!(connect.config.is_some());
    assert_eq!(inputs.polls, 8);

    let latched_at = reports
        .iter()
        .position(|r| r.connectivity == Some(ConnectivityState::Connected))
        .unwrap();
    assert!(latched_at > 0, "the loop must not wait for the connection");

    // Nothing is fetched until the latch is set, then every iteration is
    for (i, report) in reports.iter().enumerate() {
        let trigger = report.dispatch.map(|d| d.trigger);
        if i <= latched_at {
            assert_eq!(trigger, None);
        } else {
            assert_eq!(trigger, Some(Trigger::RemoteJoke));
        }
    }

    let dispatched = reports.len() - latched_at - 1;
    assert_eq!(sched.context().transport.requests.len(), dispatched);
    assert_eq!(sched.context().indicator.cycles() as usize, dispatched);

    let history = sched.context().surface.log_history();
    assert_eq!(history[0], "Connecting to WiFi home");
    assert!(history.iter().any(|m| m == "Connected to WiFi home"));
}
