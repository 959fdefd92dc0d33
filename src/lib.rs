//! A Model-Update-View runtime.
//!
//! Component state lives in [`Immutable`] snapshots addressed by typed
//! [`Lens`] paths. `update` is synchronous and returns the next snapshot plus
//! asynchronous [`Command`]s; the [`Runtime`] applies updates one at a time,
//! renders, runs commands on tokio, and applies their results to the latest
//! snapshot. Parents embed children with [`compose`].

pub mod compose;
pub mod config;
pub mod demo;
pub mod loading;
pub mod logging;
pub mod mvu;
pub mod routing;
pub mod runtime;
pub mod state;
pub mod validated;

pub use compose::{update_child, Embed};
pub use loading::{start_loading, stop_loading, Loading};
pub use mvu::{Command, Component, Message, Transform, Update};
pub use routing::{GlobalMsg, RouteRequest};
pub use runtime::{Dispatcher, Runtime, RuntimeHandle};
pub use state::{Immutable, Lens};
pub use validated::{Validated, ValidatedPage, ValidatedState};
