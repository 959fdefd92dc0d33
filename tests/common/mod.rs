//! Shared test components and fixtures.

#![allow(dead_code, unused_imports)]

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mvu_kit::demo::api::{SimulatedApi, User};
use mvu_kit::mvu::{Command, Component, Message, Transform, Update};
use mvu_kit::routing::GlobalMsg;
use mvu_kit::runtime::{Dispatcher, Frame};
use mvu_kit::state::Immutable;
use parking_lot::Mutex;
use tempfile::TempDir;

/// Frames captured by a renderer.
pub type Frames<V> = Arc<Mutex<Vec<Frame<V>>>>;

/// Renderer that keeps every frame for later inspection.
pub fn recorder<V: Send + 'static>() -> (Frames<V>, impl FnMut(Frame<V>) + Send + 'static) {
    let frames: Frames<V> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&frames);
    (frames, move |frame| sink.lock().push(frame))
}

pub fn user(id: u64) -> User {
    User {
        id,
        name: "Ada Lovelace".to_string(),
        email: "ada@example.com".to_string(),
        job_title: "Analyst".to_string(),
        active: true,
    }
}

pub fn api_with_user(latency: Duration) -> SimulatedApi {
    SimulatedApi::new(latency).with_user(user(1))
}

/// Create a temporary config file with the given contents.
pub fn temp_config(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, contents).expect("Failed to write config");
    (temp_dir, config_path)
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CounterState {
    pub count: i64,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CounterMsg {
    Add(i64),
    /// Add `by` after `delay`, to whatever the count is by then.
    AddLater { by: i64, delay: Duration },
    /// Dispatch `Add(n)` from a command.
    Echo(i64),
    Fail,
    PanicInCommand,
    PanicInTransform,
    Noop,
}

impl Message for CounterMsg {}

async fn explode() -> Transform<CounterState> {
    panic!("command blew up")
}

/// A small component exercising every kind of command outcome.
pub struct Counter;

impl Component for Counter {
    type Params = i64;
    type State = CounterState;
    type Msg = CounterMsg;
    type View = i64;

    fn init(start: i64) -> impl Future<Output = CounterState> + Send {
        async move {
            CounterState {
                count: start,
                log: Vec::new(),
            }
        }
    }

    fn update(state: Immutable<CounterState>, msg: CounterMsg) -> Update<CounterState, CounterMsg> {
        match msg {
            CounterMsg::Add(n) => Update::new(state.with(|s| s.count += n)),
            CounterMsg::AddLater { by, delay } => {
                let later = Command::new(move |snapshot: Immutable<CounterState>, _| async move {
                    let seen = snapshot.count;
                    tokio::time::sleep(delay).await;
                    Transform::new(move |current: Immutable<CounterState>| {
                        current.with(|s| {
                            s.count += by;
                            s.log.push(format!("saw {}", seen));
                        })
                    })
                });
                Update::new(state).with_command(later)
            }
            CounterMsg::Echo(n) => Update::new(state).with_command(Command::message(CounterMsg::Add(n))),
            CounterMsg::Fail => Update::new(state).with_command(Command::try_new(|_, _| async {
                Err::<Transform<CounterState>, _>("service unavailable")
            })),
            CounterMsg::PanicInCommand => {
                Update::new(state).with_command(Command::new(|_, _| explode()))
            }
            CounterMsg::PanicInTransform => {
                Update::new(state).with_command(Command::new(|_, _| async {
                    Transform::new(|_: Immutable<CounterState>| -> Immutable<CounterState> {
                        panic!("transform blew up")
                    })
                }))
            }
            CounterMsg::Noop => Update::new(state),
        }
    }

    fn view(state: &Immutable<CounterState>, _dispatch: &Dispatcher<CounterMsg>) -> i64 {
        state.count
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NavMsg {
    Touch,
}

impl Message for NavMsg {}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NavState {
    pub touches: u32,
    pub routes_seen: Vec<String>,
}

/// A component whose messages may carry route requests.
pub struct Nav;

impl Component for Nav {
    type Params = ();
    type State = NavState;
    type Msg = GlobalMsg<NavMsg, String>;
    type View = ();

    fn init(_: ()) -> impl Future<Output = NavState> + Send {
        async { NavState::default() }
    }

    fn update(state: Immutable<NavState>, msg: Self::Msg) -> Update<NavState, Self::Msg> {
        match msg {
            GlobalMsg::Local(NavMsg::Touch) => Update::new(state.with(|s| s.touches += 1)),
            GlobalMsg::Route(request) => {
                Update::new(state.with(|s| s.routes_seen.push(request.route().clone())))
            }
        }
    }

    fn view(_state: &Immutable<NavState>, _dispatch: &Dispatcher<Self::Msg>) {}
}
