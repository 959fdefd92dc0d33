//! Loading counters for overlapping operations on one state slice.
//!
//! Every operation that shows a busy indicator calls [`start_loading`] in the
//! synchronous part of `update` and [`stop_loading`] in its command's
//! transform. The indicator stays on until the last overlapping operation
//! finishes, whatever order they finish in.

use serde::Serialize;
use thiserror::Error;

use crate::state::{Immutable, Lens};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LoadingError {
    #[error("Loading counter stopped more times than it was started")]
    Underflow,
}

/// Number of operations currently in flight for one slice of state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Loading(u32);

impl Loading {
    pub fn count(self) -> u32 {
        self.0
    }

    pub fn is_busy(self) -> bool {
        self.0 > 0
    }

    pub fn start(self) -> Self {
        Self(self.0.saturating_add(1))
    }

    /// Decrement, reporting a stop without a matching start.
    pub fn try_stop(self) -> Result<Self, LoadingError> {
        self.0.checked_sub(1).map(Self).ok_or(LoadingError::Underflow)
    }

    /// Decrement, floored at zero.
    ///
    /// An unmatched stop is a bug in the caller. It is logged and otherwise
    /// ignored; use [`try_stop`](Self::try_stop) to detect it.
    pub fn stop(self) -> Self {
        match self.try_stop() {
            Ok(next) => next,
            Err(err) => {
                tracing::warn!(%err, "Unbalanced stop_loading");
                self
            }
        }
    }
}

/// Transform that increments the counter at `path`.
pub fn start_loading<S>(path: Lens<S, Loading>) -> impl Fn(Immutable<S>) -> Immutable<S> + Clone + Send + Sync
where
    S: 'static,
{
    move |state: Immutable<S>| state.update(&path, Loading::start)
}

/// Transform that decrements the counter at `path`, floored at zero.
pub fn stop_loading<S>(path: Lens<S, Loading>) -> impl Fn(Immutable<S>) -> Immutable<S> + Clone + Send + Sync
where
    S: 'static,
{
    move |state: Immutable<S>| state.update(&path, Loading::stop)
}
