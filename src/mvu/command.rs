//! Asynchronous commands and the deferred transforms they produce.

use std::fmt::{self, Display};
use std::future::Future;

use futures_core::future::BoxFuture;

use crate::runtime::Dispatcher;
use crate::state::{Immutable, Lens};

type TransformFn<S> = Box<dyn FnOnce(Immutable<S>) -> Immutable<S> + Send>;

/// A state change computed by a command, applied later against whatever
/// snapshot is current at that moment.
pub struct Transform<S>(Option<TransformFn<S>>);

impl<S: Send + Sync + 'static> Transform<S> {
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(Immutable<S>) -> Immutable<S> + Send + 'static,
    {
        Self(Some(Box::new(f)))
    }

    /// Leave the state as it is.
    pub fn none() -> Self {
        Self(None)
    }

    pub fn is_none(&self) -> bool {
        self.0.is_none()
    }

    pub fn apply(self, state: Immutable<S>) -> Immutable<S> {
        match self.0 {
            Some(f) => f(state),
            None => state,
        }
    }

    /// Run `self`, then `next`, as one transform.
    pub fn then(self, next: Transform<S>) -> Self {
        match (self.0, next.0) {
            (None, None) => Self(None),
            (Some(f), None) | (None, Some(f)) => Self(Some(f)),
            (Some(first), Some(second)) => Self::new(move |state| second(first(state))),
        }
    }

    /// Re-target at `path` inside a parent state.
    ///
    /// If the path no longer exists when the transform is applied, the parent
    /// is returned unchanged.
    pub fn lift<P>(self, path: Lens<P, Immutable<S>>) -> Transform<P>
    where
        P: Send + Sync + 'static,
    {
        let Some(f) = self.0 else {
            return Transform::none();
        };
        Transform::new(move |parent: Immutable<P>| {
            let child = match parent.try_get(&path) {
                Ok(child) => child.clone(),
                Err(err) => {
                    tracing::debug!(%err, "Dropping child transform");
                    return parent;
                }
            };
            let next = f(child.clone());
            if Immutable::ptr_eq(&child, &next) {
                return parent;
            }
            match parent.try_set(&path, next) {
                Ok(updated) => updated,
                Err(err) => {
                    tracing::debug!(%err, "Dropping child transform");
                    parent
                }
            }
        })
    }
}

impl<S> fmt::Debug for Transform<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => write!(f, "Transform(..)"),
            None => write!(f, "Transform(none)"),
        }
    }
}

type Run<S, M> =
    Box<dyn FnOnce(Immutable<S>, Dispatcher<M>) -> BoxFuture<'static, Result<Transform<S>, String>> + Send>;

/// An asynchronous unit of work returned by `update`.
///
/// The runtime hands it the snapshot current when it is scheduled and a
/// dispatcher. The command may dispatch further messages and resolves to a
/// [`Transform`]. Commands are never cancelled once started.
pub struct Command<S, M> {
    run: Run<S, M>,
}

impl<S, M> Command<S, M>
where
    S: Send + Sync + 'static,
    M: Send + 'static,
{
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: FnOnce(Immutable<S>, Dispatcher<M>) -> Fut + Send + 'static,
        Fut: Future<Output = Transform<S>> + Send + 'static,
    {
        Self {
            run: Box::new(
                move |state: Immutable<S>,
                      dispatch: Dispatcher<M>|
                      -> BoxFuture<'static, Result<Transform<S>, String>> {
                    Box::pin(async move { Ok(f(state, dispatch).await) })
                },
            ),
        }
    }

    /// A command whose failure is reported instead of converted into state.
    ///
    /// An `Err` is logged by the runtime and treated as [`Transform::none`].
    pub fn try_new<F, Fut, E>(f: F) -> Self
    where
        F: FnOnce(Immutable<S>, Dispatcher<M>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Transform<S>, E>> + Send + 'static,
        E: Display,
    {
        Self {
            run: Box::new(
                move |state: Immutable<S>,
                      dispatch: Dispatcher<M>|
                      -> BoxFuture<'static, Result<Transform<S>, String>> {
                    Box::pin(async move { f(state, dispatch).await.map_err(|err| err.to_string()) })
                },
            ),
        }
    }

    /// Dispatch `msg` without touching the state.
    pub fn message(msg: M) -> Self {
        Self::new(move |_, dispatch| {
            dispatch.dispatch(msg);
            async { Transform::none() }
        })
    }

    /// Embed into a parent: the command sees the child state at `path`, its
    /// messages pass through `wrap`, and its transform is lifted to `path`.
    pub fn map<P, PM, W>(self, path: Lens<P, Immutable<S>>, wrap: W) -> Command<P, PM>
    where
        P: Send + Sync + 'static,
        PM: Send + 'static,
        W: Fn(M) -> PM + Send + Sync + 'static,
    {
        let run = self.run;
        Command {
            run: Box::new(
                move |parent: Immutable<P>,
                      dispatch: Dispatcher<PM>|
                      -> BoxFuture<'static, Result<Transform<P>, String>> {
                    let child = match parent.try_get(&path) {
                        Ok(child) => child.clone(),
                        Err(err) => {
                            tracing::debug!(%err, "Skipping child command");
                            return Box::pin(async { Ok(Transform::none()) });
                        }
                    };
                    let child_dispatch = dispatch.map(wrap);
                    Box::pin(async move {
                        let transform = run(child, child_dispatch).await?;
                        Ok(transform.lift(path))
                    })
                },
            ),
        }
    }

    /// Start the command. The runtime calls this; tests may call it to
    /// drive a command without mounting anything.
    pub fn run(
        self,
        state: Immutable<S>,
        dispatch: Dispatcher<M>,
    ) -> BoxFuture<'static, Result<Transform<S>, String>> {
        (self.run)(state, dispatch)
    }
}

impl<S, M> fmt::Debug for Command<S, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Command(..)")
    }
}
