//! Dispatcher and runtime loop.
//!
//! A [`Runtime`] owns the authoritative snapshot of one component. Views and
//! commands talk to it through [`Dispatcher`] handles; the host talks to it
//! through a [`RuntimeHandle`].

mod dispatcher;
mod error;
mod event_loop;
mod handle;
mod render;

pub use dispatcher::Dispatcher;
pub use error::RuntimeError;
pub use event_loop::{Runtime, RuntimeBuilder, RuntimeStats};
pub use handle::RuntimeHandle;
pub use render::{Frame, NullRenderer, Renderer};
