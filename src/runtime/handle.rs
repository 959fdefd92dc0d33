use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::mvu::Component;
use crate::state::Immutable;

use super::dispatcher::Dispatcher;
use super::error::RuntimeError;
use super::event_loop::{Event, RuntimeStats};

/// Host-side handle to a mounted runtime.
///
/// The loop lives as long as this handle or a dispatcher cloned from it.
/// Once all of them are dropped it finishes the commands already in flight
/// and stops, releasing the renderer.
pub struct RuntimeHandle<C: Component> {
    id: Uuid,
    events: mpsc::UnboundedSender<Event<C::State, C::Msg>>,
    dispatcher: Dispatcher<C::Msg>,
    state: watch::Receiver<Immutable<C::State>>,
    stats: Arc<Mutex<RuntimeStats>>,
    task: JoinHandle<()>,
}

impl<C: Component> RuntimeHandle<C> {
    pub(super) fn new(
        id: Uuid,
        events: mpsc::UnboundedSender<Event<C::State, C::Msg>>,
        dispatcher: Dispatcher<C::Msg>,
        state: watch::Receiver<Immutable<C::State>>,
        stats: Arc<Mutex<RuntimeStats>>,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            id,
            events,
            dispatcher,
            state,
            stats,
            task,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn dispatch(&self, msg: C::Msg) {
        self.dispatcher.dispatch(msg);
    }

    pub fn dispatcher(&self) -> Dispatcher<C::Msg> {
        self.dispatcher.clone()
    }

    /// The latest committed snapshot.
    pub fn state(&self) -> Immutable<C::State> {
        self.state.borrow().clone()
    }

    /// Receiver notified on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<Immutable<C::State>> {
        self.state.clone()
    }

    pub fn stats(&self) -> RuntimeStats {
        *self.stats.lock()
    }

    /// Wait until every message dispatched before this call has been
    /// processed and no commands are in flight.
    pub async fn settled(&self) -> Result<(), RuntimeError> {
        let (reply, done) = oneshot::channel();
        self.events
            .send(Event::Settle(reply))
            .map_err(|_| RuntimeError::Unmounted)?;
        done.await.map_err(|_| RuntimeError::Unmounted)
    }

    /// Swap in a new root state, e.g. after navigating to another page.
    ///
    /// Commands spawned before the swap still run, but their transforms are
    /// discarded.
    pub fn replace(&self, state: Immutable<C::State>) -> Result<(), RuntimeError> {
        self.events
            .send(Event::Replace(state))
            .map_err(|_| RuntimeError::Unmounted)
    }

    /// Stop the loop and return the final snapshot.
    ///
    /// In-flight commands keep running; their results are dropped.
    pub async fn unmount(self) -> Result<Immutable<C::State>, RuntimeError> {
        let (reply, done) = oneshot::channel();
        self.events
            .send(Event::Unmount(reply))
            .map_err(|_| RuntimeError::Unmounted)?;
        let state = done.await.map_err(|_| RuntimeError::Unmounted)?;
        if let Err(err) = self.task.await {
            tracing::warn!(%err, "Runtime task ended abnormally");
        }
        Ok(state)
    }
}
