//! Fire-and-forget dispatch handles.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

/// A cloneable handle that feeds messages into a runtime.
///
/// Dispatching never blocks and never fails from the caller's point of
/// view: once the runtime behind the handle is gone, messages are dropped.
pub struct Dispatcher<M> {
    send: Arc<dyn Fn(M) + Send + Sync>,
}

impl<M> Clone for Dispatcher<M> {
    fn clone(&self) -> Self {
        Self {
            send: Arc::clone(&self.send),
        }
    }
}

impl<M> fmt::Debug for Dispatcher<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Dispatcher(..)")
    }
}

impl<M: Send + 'static> Dispatcher<M> {
    pub fn new<F>(send: F) -> Self
    where
        F: Fn(M) + Send + Sync + 'static,
    {
        Self {
            send: Arc::new(send),
        }
    }

    /// A dispatcher backed by a plain channel.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<M>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let dispatcher = Self::new(move |msg| {
            if sender.send(msg).is_err() {
                tracing::trace!("Dispatch dropped (receiver gone)");
            }
        });
        (dispatcher, receiver)
    }

    pub fn dispatch(&self, msg: M) {
        (self.send)(msg)
    }

    /// Child-typed handle whose messages are wrapped before reaching `self`.
    pub fn map<C, F>(&self, wrap: F) -> Dispatcher<C>
    where
        C: Send + 'static,
        F: Fn(C) -> M + Send + Sync + 'static,
    {
        let parent = self.clone();
        Dispatcher::new(move |msg| parent.dispatch(wrap(msg)))
    }
}

impl<M: fmt::Debug + Send + 'static> Dispatcher<M> {
    /// A dispatcher that drops everything. Useful for rendering a view
    /// outside of a runtime.
    pub fn detached() -> Self {
        Self::new(|msg| tracing::trace!(?msg, "Detached dispatch dropped"))
    }
}
