//! The runtime loop: the only place the authoritative state is replaced.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::Instrument;
use uuid::Uuid;

use crate::config::RuntimeConfig;
use crate::mvu::{Command, Component, Message, Transform, Update};
use crate::routing::{GlobalMsg, RouteRequest};
use crate::state::Immutable;

use super::dispatcher::Dispatcher;
use super::handle::RuntimeHandle;
use super::render::{Frame, NullRenderer, Renderer};

pub(super) enum Event<S, M> {
    Message(M),
    Resolved {
        id: u64,
        epoch: u64,
        outcome: Outcome<S>,
    },
    Settle(oneshot::Sender<()>),
    Replace(Immutable<S>),
    Unmount(oneshot::Sender<Immutable<S>>),
}

pub(super) enum Outcome<S> {
    Transform(Transform<S>),
    Failed(String),
    Panicked(String),
}

/// Counters describing a runtime's activity so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuntimeStats {
    pub renders: u64,
    pub commands_spawned: u64,
    pub in_flight: usize,
    pub transforms_dropped: u64,
    pub epoch: u64,
}

type Interceptor<M> = Box<dyn FnMut(M) -> Option<M> + Send>;

/// Configures and mounts a [`Runtime`].
pub struct RuntimeBuilder<C: Component> {
    config: RuntimeConfig,
    renderer: Box<dyn Renderer<C::View>>,
    interceptor: Option<Interceptor<C::Msg>>,
}

impl<C: Component> RuntimeBuilder<C> {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            renderer: Box::new(NullRenderer),
            interceptor: None,
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn renderer<R>(mut self, renderer: R) -> Self
    where
        R: Renderer<C::View>,
    {
        self.renderer = Box::new(renderer);
        self
    }

    /// Run `C::init` and start the loop.
    pub async fn mount(self, params: C::Params) -> RuntimeHandle<C> {
        let state = C::init(params).await;
        self.mount_with_state(Immutable::new(state))
    }

    /// Start the loop from an existing snapshot. Must be called from within
    /// a tokio runtime.
    pub fn mount_with_state(self, state: Immutable<C::State>) -> RuntimeHandle<C> {
        let id = Uuid::new_v4();
        let (events, receiver) = mpsc::unbounded_channel();
        let dispatcher = {
            let events = events.clone();
            Dispatcher::new(move |msg| {
                if events.send(Event::Message(msg)).is_err() {
                    tracing::trace!("Dispatch dropped (runtime unmounted)");
                }
            })
        };
        // The loop only keeps weak senders, so it ends once the handle and
        // every dispatcher taken from it are gone.
        let weak_events = events.downgrade();
        let loop_dispatcher = {
            let events = events.downgrade();
            Dispatcher::new(move |msg| match events.upgrade() {
                Some(events) => {
                    if events.send(Event::Message(msg)).is_err() {
                        tracing::trace!("Dispatch dropped (runtime unmounted)");
                    }
                }
                None => tracing::trace!("Dispatch dropped (runtime handle gone)"),
            })
        };
        let (published, subscriber) = watch::channel(state.clone());
        let stats = Arc::new(Mutex::new(RuntimeStats::default()));

        let runtime = Runtime::<C> {
            state,
            epoch: 0,
            next_command: 0,
            in_flight: 0,
            settling: Vec::new(),
            renderer: self.renderer,
            interceptor: self.interceptor,
            config: self.config,
            events: weak_events,
            dispatcher: loop_dispatcher,
            published,
            stats: Arc::clone(&stats),
        };

        let span = tracing::info_span!("runtime", id = %id);
        let task = tokio::spawn(runtime.run(receiver).instrument(span));
        RuntimeHandle::new(id, events, dispatcher, subscriber, stats, task)
    }
}

impl<C, M, R> RuntimeBuilder<C>
where
    C: Component<Msg = GlobalMsg<M, R>>,
    M: Message,
    R: fmt::Debug + Send + 'static,
{
    /// Forward route requests to `sink` instead of passing them to `update`.
    pub fn on_route<F>(mut self, sink: F) -> Self
    where
        F: Fn(RouteRequest<R>) + Send + 'static,
    {
        self.interceptor = Some(Box::new(move |msg: GlobalMsg<M, R>| match msg {
            GlobalMsg::Route(request) => {
                tracing::debug!(?request, "Forwarding route request");
                sink(request);
                None
            }
            local => Some(local),
        }));
        self
    }
}

/// Owns the authoritative state of one mounted component.
///
/// Processes one event at a time: messages run `update` synchronously, the
/// new snapshot is rendered, then the returned commands are spawned.
/// Command results come back through the same queue and are applied to the
/// snapshot current at that moment.
pub struct Runtime<C: Component> {
    state: Immutable<C::State>,
    epoch: u64,
    next_command: u64,
    in_flight: usize,
    settling: Vec<oneshot::Sender<()>>,
    renderer: Box<dyn Renderer<C::View>>,
    interceptor: Option<Interceptor<C::Msg>>,
    config: RuntimeConfig,
    events: mpsc::WeakUnboundedSender<Event<C::State, C::Msg>>,
    dispatcher: Dispatcher<C::Msg>,
    published: watch::Sender<Immutable<C::State>>,
    stats: Arc<Mutex<RuntimeStats>>,
}

impl<C: Component> Runtime<C> {
    pub fn builder() -> RuntimeBuilder<C> {
        RuntimeBuilder::new()
    }

    async fn run(mut self, mut receiver: mpsc::UnboundedReceiver<Event<C::State, C::Msg>>) {
        tracing::info!("Runtime mounted");
        self.render();

        while let Some(event) = receiver.recv().await {
            match event {
                Event::Message(msg) => self.handle_message(msg),
                Event::Resolved { id, epoch, outcome } => self.handle_resolved(id, epoch, outcome),
                Event::Settle(reply) => self.settling.push(reply),
                Event::Replace(state) => self.replace(state),
                Event::Unmount(reply) => {
                    tracing::info!(in_flight = self.in_flight, "Runtime unmounted");
                    if reply.send(self.state.clone()).is_err() {
                        tracing::trace!("Unmount reply dropped (receiver gone)");
                    }
                    return;
                }
            }
            self.release_settled();
        }
        tracing::info!("Runtime handle dropped; runtime stopped");
    }

    fn handle_message(&mut self, msg: C::Msg) {
        let msg = match self.interceptor.as_mut() {
            Some(intercept) => match intercept(msg) {
                Some(msg) => msg,
                None => return,
            },
            None => msg,
        };

        tracing::trace!(?msg, "Update");
        let Update { state, commands } = C::update(self.state.clone(), msg);
        self.commit(state);
        for command in commands {
            self.spawn(command);
        }
    }

    fn handle_resolved(&mut self, id: u64, epoch: u64, outcome: Outcome<C::State>) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.stats.lock().in_flight = self.in_flight;

        if epoch != self.epoch {
            tracing::debug!(
                command = id,
                epoch,
                current = self.epoch,
                "Dropping transform for replaced state"
            );
            self.stats.lock().transforms_dropped += 1;
            return;
        }

        match outcome {
            Outcome::Transform(transform) => self.apply(id, transform),
            Outcome::Failed(reason) => {
                tracing::warn!(command = id, %reason, "Command failed");
            }
            Outcome::Panicked(reason) => {
                tracing::warn!(command = id, %reason, "Command panicked");
            }
        }
    }

    fn apply(&mut self, id: u64, transform: Transform<C::State>) {
        if transform.is_none() {
            return;
        }
        let current = self.state.clone();
        match panic::catch_unwind(AssertUnwindSafe(|| transform.apply(current))) {
            Ok(next) => self.commit(next),
            Err(_) => {
                tracing::error!(command = id, "Transform panicked; state left unchanged");
            }
        }
    }

    fn replace(&mut self, state: Immutable<C::State>) {
        self.epoch += 1;
        self.stats.lock().epoch = self.epoch;
        tracing::debug!(epoch = self.epoch, "State replaced");
        self.commit(state);
    }

    fn commit(&mut self, next: Immutable<C::State>) {
        let changed = !Immutable::ptr_eq(&self.state, &next);
        self.state = next;
        if changed {
            self.published.send_replace(self.state.clone());
        }
        if changed || !self.config.skip_unchanged_renders {
            self.render();
        }
    }

    fn render(&mut self) {
        let frame = Frame {
            body: C::view(&self.state, &self.dispatcher),
            modal: C::modal(&self.state, &self.dispatcher),
            contextual_actions: C::contextual_actions(&self.state, &self.dispatcher),
            sidebar: C::sidebar(&self.state, &self.dispatcher),
        };
        self.renderer.render(frame);
        self.stats.lock().renders += 1;
    }

    fn spawn(&mut self, command: Command<C::State, C::Msg>) {
        let Some(events) = self.events.upgrade() else {
            tracing::debug!("Runtime handle gone; command not started");
            return;
        };
        let id = self.next_command;
        self.next_command += 1;
        let epoch = self.epoch;

        self.in_flight += 1;
        {
            let mut stats = self.stats.lock();
            stats.commands_spawned += 1;
            stats.in_flight = self.in_flight;
        }
        if self.in_flight > self.config.in_flight_warn_threshold {
            tracing::warn!(
                in_flight = self.in_flight,
                threshold = self.config.in_flight_warn_threshold,
                "Commands in flight above threshold"
            );
        }

        let work = tokio::spawn(command.run(self.state.clone(), self.dispatcher.clone()));
        tokio::spawn(
            async move {
                let outcome = match work.await {
                    Ok(Ok(transform)) => Outcome::Transform(transform),
                    Ok(Err(reason)) => Outcome::Failed(reason),
                    Err(err) => Outcome::Panicked(err.to_string()),
                };
                if events.send(Event::Resolved { id, epoch, outcome }).is_err() {
                    tracing::trace!(command = id, "Command resolved after unmount; dropped");
                }
            }
            .in_current_span(),
        );
    }

    fn release_settled(&mut self) {
        if self.in_flight > 0 {
            return;
        }
        for reply in self.settling.drain(..) {
            if reply.send(()).is_err() {
                tracing::trace!("Settle reply dropped (receiver gone)");
            }
        }
    }
}
