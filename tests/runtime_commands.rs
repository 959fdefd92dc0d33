//! Runtime loop: updates, commands, and their failure modes.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{recorder, Counter, CounterMsg, CounterState, Nav, NavMsg};
use mvu_kit::config::RuntimeConfig;
use mvu_kit::routing::{GlobalMsg, RouteRequest};
use mvu_kit::runtime::Runtime;
use mvu_kit::state::Immutable;
use parking_lot::Mutex;

fn later(by: i64, ms: u64) -> CounterMsg {
    CounterMsg::AddLater {
        by,
        delay: Duration::from_millis(ms),
    }
}

#[tokio::test(start_paused = true)]
async fn stale_command_applies_to_latest_state() {
    let handle = Runtime::<Counter>::builder().mount(0).await;

    handle.dispatch(later(10, 100));
    handle.dispatch(CounterMsg::Add(1));
    handle.dispatch(CounterMsg::Add(1));
    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime mounted");

    let state = handle.state();
    assert_eq!(state.count, 13, "transform must apply to the latest count");
    assert_eq!(state.log, vec!["saw 0".to_string()], "command read the count from when it was scheduled");
}

#[tokio::test]
async fn command_dispatch_reenters_update() {
    let handle = Runtime::<Counter>::builder().mount(0).await;

    handle.dispatch(CounterMsg::Echo(4));
    handle.settled().await.expect("runtime mounted");

    assert_eq!(handle.state().count, 4);
}

#[tokio::test]
async fn failing_command_is_a_noop() {
    let handle = Runtime::<Counter>::builder().mount(2).await;

    handle.dispatch(CounterMsg::Fail);
    handle.settled().await.expect("runtime mounted");
    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime mounted");

    assert_eq!(handle.state().count, 3);
}

#[tokio::test]
async fn panicking_command_leaves_state_untouched() {
    let handle = Runtime::<Counter>::builder().mount(5).await;
    let before = handle.state();

    handle.dispatch(CounterMsg::PanicInCommand);
    handle.settled().await.expect("runtime survives");

    assert!(Immutable::ptr_eq(&before, &handle.state()));
    assert_eq!(handle.stats().in_flight, 0);

    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime survives");
    assert_eq!(handle.state().count, 6);
}

#[tokio::test]
async fn panicking_transform_leaves_state_untouched() {
    let handle = Runtime::<Counter>::builder().mount(5).await;

    handle.dispatch(CounterMsg::PanicInTransform);
    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime survives");

    assert_eq!(handle.state().count, 6);
}

#[tokio::test(start_paused = true)]
async fn replace_drops_transforms_from_older_epoch() {
    let handle = Runtime::<Counter>::builder().mount(0).await;

    handle.dispatch(later(10, 100));
    handle
        .replace(Immutable::new(CounterState {
            count: 50,
            log: Vec::new(),
        }))
        .expect("runtime mounted");
    handle.dispatch(later(1, 10));
    handle.settled().await.expect("runtime mounted");

    let stats = handle.stats();
    assert_eq!(handle.state().count, 51);
    assert_eq!(stats.transforms_dropped, 1);
    assert_eq!(stats.epoch, 1);
}

#[tokio::test]
async fn unchanged_snapshot_skips_render() {
    let (frames, renderer) = recorder::<i64>();
    let handle = Runtime::<Counter>::builder().renderer(renderer).mount(1).await;

    handle.dispatch(CounterMsg::Noop);
    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime mounted");

    let bodies: Vec<i64> = frames.lock().iter().map(|frame| frame.body).collect();
    assert_eq!(bodies, vec![1, 2]);
    assert_eq!(handle.stats().renders, 2);
}

#[tokio::test]
async fn render_skipping_can_be_disabled() {
    let (frames, renderer) = recorder::<i64>();
    let config = RuntimeConfig {
        skip_unchanged_renders: false,
        ..RuntimeConfig::default()
    };
    let handle = Runtime::<Counter>::builder()
        .config(config)
        .renderer(renderer)
        .mount(1)
        .await;

    handle.dispatch(CounterMsg::Noop);
    handle.settled().await.expect("runtime mounted");

    assert_eq!(frames.lock().len(), 2);
}

#[tokio::test]
async fn route_requests_go_to_sink_not_update() {
    let routed = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&routed);
    let handle = Runtime::<Nav>::builder()
        .on_route(move |request| sink.lock().push(request))
        .mount(())
        .await;

    handle.dispatch(GlobalMsg::Local(NavMsg::Touch));
    handle.dispatcher().navigate("/sign-out".to_string());
    handle.settled().await.expect("runtime mounted");

    let state = handle.state();
    assert_eq!(state.touches, 1);
    assert!(state.routes_seen.is_empty());
    assert_eq!(
        *routed.lock(),
        vec![RouteRequest::Push("/sign-out".to_string())]
    );
}

#[tokio::test]
async fn route_requests_reach_update_without_sink() {
    let handle = Runtime::<Nav>::builder().mount(()).await;

    handle.dispatch(GlobalMsg::replace_route("/home".to_string()));
    handle.settled().await.expect("runtime mounted");

    assert_eq!(handle.state().routes_seen, vec!["/home".to_string()]);
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_committed_changes() {
    let handle = Runtime::<Counter>::builder().mount(0).await;
    let mut updates = handle.subscribe();

    handle.dispatch(CounterMsg::Add(3));
    updates.changed().await.expect("runtime mounted");

    assert_eq!(updates.borrow().count, 3);
}

#[tokio::test(start_paused = true)]
async fn unmount_returns_final_state_and_ignores_late_work() {
    let handle = Runtime::<Counter>::builder().mount(0).await;
    let dispatch = handle.dispatcher();

    handle.dispatch(CounterMsg::Add(2));
    handle.dispatch(later(100, 50));
    let final_state = handle.unmount().await.expect("runtime mounted");

    assert_eq!(final_state.count, 2);
    dispatch.dispatch(CounterMsg::Add(1));
    tokio::time::sleep(Duration::from_millis(100)).await;
}

#[tokio::test]
async fn mount_with_state_skips_init() {
    let start = Immutable::new(CounterState {
        count: 40,
        log: vec!["restored".to_string()],
    });
    let handle = Runtime::<Counter>::builder().mount_with_state(start.clone());

    assert!(Immutable::ptr_eq(&start, &handle.state()));
    handle.dispatch(CounterMsg::Add(2));
    handle.settled().await.expect("runtime mounted");
    assert_eq!(handle.state().count, 42);
}

#[tokio::test(start_paused = true)]
async fn dropping_handle_stops_runtime() {
    let (frames, renderer) = recorder::<i64>();
    let handle = Runtime::<Counter>::builder().renderer(renderer).mount(1).await;
    handle.dispatch(CounterMsg::Add(1));
    handle.settled().await.expect("runtime mounted");
    assert_eq!(Arc::strong_count(&frames), 2, "renderer held by the running loop");

    drop(handle);
    tokio::time::sleep(Duration::from_millis(200)).await;

    assert_eq!(Arc::strong_count(&frames), 1, "loop ended and released its renderer");
}

#[tokio::test(start_paused = true)]
async fn dropped_handle_waits_for_in_flight_command() {
    let (frames, renderer) = recorder::<i64>();
    let handle = Runtime::<Counter>::builder().renderer(renderer).mount(0).await;
    handle.dispatch(later(5, 100));
    tokio::time::sleep(Duration::from_millis(10)).await;

    drop(handle);
    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(Arc::strong_count(&frames), 2, "command still in flight");

    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(Arc::strong_count(&frames), 1);
    let bodies: Vec<i64> = frames.lock().iter().map(|frame| frame.body).collect();
    assert_eq!(bodies.last(), Some(&5), "result applied before the loop stopped");
}
