//! Parent/child wiring.
//!
//! A child component lives in a parent field of type `Immutable<Child::State>`.
//! The parent routes the child's messages through [`update_child`] (or an
//! [`Embed`] that bundles the path and the message mappings) and hands the
//! child a re-tagging dispatcher for its view.
//!
//! ```text
//!   parent msg ──unwrap──▶ child msg ──child update──▶ child state + commands
//!                                                        │          │
//!   parent state ◀──────────── set at path ──────────────┘          │
//!   parent commands ◀── Command::map(path, wrap) ───────────────────┘
//! ```

use std::sync::Arc;

use crate::mvu::{Command, Component, Update};
use crate::runtime::Dispatcher;
use crate::state::{Immutable, Lens};

/// Run a child update against the sub-state at `path` and embed the result.
///
/// Sibling fields of the parent keep their identity. If the child returns
/// the snapshot it was given, the parent snapshot itself is returned. A path
/// that does not exist in `state` makes the whole call a no-op.
pub fn update_child<P, PM, C, CM, U, W>(
    state: Immutable<P>,
    path: &Lens<P, Immutable<C>>,
    child_update: U,
    child_msg: CM,
    wrap: W,
) -> Update<P, PM>
where
    P: Send + Sync + 'static,
    PM: Send + 'static,
    C: Send + Sync + 'static,
    CM: Send + 'static,
    U: FnOnce(Immutable<C>, CM) -> Update<C, CM>,
    W: Fn(CM) -> PM + Send + Sync + 'static,
{
    let child = match state.try_get(path) {
        Ok(child) => child.clone(),
        Err(err) => {
            tracing::debug!(%err, "Ignoring message for missing child");
            return Update::new(state);
        }
    };

    let (next_child, commands) = child_update(child.clone(), child_msg).into_parts();

    let next = if Immutable::ptr_eq(&child, &next_child) {
        state
    } else {
        match state.try_set(path, next_child) {
            Ok(next) => next,
            Err(err) => {
                tracing::debug!(%err, "Dropping child update");
                return Update::new(state);
            }
        }
    };

    let wrap = Arc::new(wrap);
    let commands = commands.into_iter().map(|command| {
        let wrap = Arc::clone(&wrap);
        command.map(path.clone(), move |msg| wrap(msg))
    });
    Update::new(next).with_commands(commands.collect::<Vec<_>>())
}

/// A reusable delegate for one embedded child.
///
/// `unwrap` picks the child's messages out of the parent's message type and
/// hands back anything else; `wrap` is its inverse.
pub struct Embed<P, PM, C, CM> {
    path: Lens<P, Immutable<C>>,
    update: fn(Immutable<C>, CM) -> Update<C, CM>,
    unwrap: fn(PM) -> Result<CM, PM>,
    wrap: fn(CM) -> PM,
}

impl<P, PM, C, CM> Clone for Embed<P, PM, C, CM> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            update: self.update,
            unwrap: self.unwrap,
            wrap: self.wrap,
        }
    }
}

impl<P, PM, C, CM> Embed<P, PM, C, CM>
where
    P: Send + Sync + 'static,
    PM: Send + 'static,
    C: Send + Sync + 'static,
    CM: Send + 'static,
{
    pub fn new(
        path: Lens<P, Immutable<C>>,
        update: fn(Immutable<C>, CM) -> Update<C, CM>,
        unwrap: fn(PM) -> Result<CM, PM>,
        wrap: fn(CM) -> PM,
    ) -> Self {
        Self {
            path,
            update,
            unwrap,
            wrap,
        }
    }

    /// Embed a [`Component`] using its own `update`.
    pub fn component<K>(
        path: Lens<P, Immutable<C>>,
        unwrap: fn(PM) -> Result<CM, PM>,
        wrap: fn(CM) -> PM,
    ) -> Self
    where
        K: Component<State = C, Msg = CM>,
    {
        Self::new(path, K::update, unwrap, wrap)
    }

    /// Handle `msg` if it belongs to the child, otherwise give it back.
    pub fn delegate(&self, state: &Immutable<P>, msg: PM) -> Result<Update<P, PM>, PM> {
        let child_msg = (self.unwrap)(msg)?;
        Ok(update_child(state.clone(), &self.path, self.update, child_msg, self.wrap))
    }

    /// Child-typed dispatcher for rendering the child's view.
    pub fn dispatcher(&self, parent: &Dispatcher<PM>) -> Dispatcher<CM> {
        parent.map(self.wrap)
    }

    /// The child snapshot, if the path exists in `state`.
    pub fn get<'a>(&self, state: &'a Immutable<P>) -> Option<&'a Immutable<C>> {
        state.try_get(&self.path).ok()
    }

    /// Render the child with a re-tagging dispatcher.
    pub fn view<V>(
        &self,
        state: &Immutable<P>,
        dispatch: &Dispatcher<PM>,
        view: fn(&Immutable<C>, &Dispatcher<CM>) -> V,
    ) -> Option<V> {
        let child = self.get(state)?;
        Some(view(child, &self.dispatcher(dispatch)))
    }

    pub fn path(&self) -> &Lens<P, Immutable<C>> {
        &self.path
    }

    /// Wrap a child command so it runs in the parent's context.
    pub fn lift(&self, command: Command<C, CM>) -> Command<P, PM> {
        command.map(self.path.clone(), self.wrap)
    }
}
