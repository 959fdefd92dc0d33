//! Pages whose initialization can fail.
//!
//! A page that needs a route parameter or a first fetch to succeed starts in
//! [`ValidatedState::Invalid`] when it doesn't. An invalid page renders its
//! reason and ignores every message; there is no way back to `Valid` short of
//! mounting it again.

use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;

use crate::compose::update_child;
use crate::mvu::{Component, Message, Update};
use crate::runtime::Dispatcher;
use crate::state::{Immutable, Lens};

/// The outcome of a page's initialization.
#[derive(Debug, PartialEq, Serialize)]
pub enum ValidatedState<S, R> {
    Valid(Immutable<S>),
    Invalid(R),
}

impl<S, R: Clone> Clone for ValidatedState<S, R> {
    fn clone(&self) -> Self {
        match self {
            ValidatedState::Valid(state) => ValidatedState::Valid(state.clone()),
            ValidatedState::Invalid(reason) => ValidatedState::Invalid(reason.clone()),
        }
    }
}

impl<S, R> ValidatedState<S, R> {
    pub fn valid(state: S) -> Self {
        ValidatedState::Valid(Immutable::new(state))
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, ValidatedState::Valid(_))
    }

    pub fn as_valid(&self) -> Option<&Immutable<S>> {
        match self {
            ValidatedState::Valid(state) => Some(state),
            ValidatedState::Invalid(_) => None,
        }
    }

    pub fn invalid_reason(&self) -> Option<&R> {
        match self {
            ValidatedState::Valid(_) => None,
            ValidatedState::Invalid(reason) => Some(reason),
        }
    }
}

impl<S, R> From<Result<S, R>> for ValidatedState<S, R> {
    fn from(result: Result<S, R>) -> Self {
        match result {
            Ok(state) => ValidatedState::valid(state),
            Err(reason) => ValidatedState::Invalid(reason),
        }
    }
}

/// Path to the inner state. Missing while the page is invalid.
pub fn valid_path<S, R>() -> Lens<ValidatedState<S, R>, Immutable<S>>
where
    S: 'static,
    R: Clone + 'static,
{
    Lens::optional(
        "valid",
        |validated| validated.as_valid(),
        |validated, state| match validated {
            ValidatedState::Valid(current) => {
                *current = state;
                true
            }
            ValidatedState::Invalid(_) => false,
        },
    )
}

/// Route `msg` to `update` when the page is valid; otherwise return the
/// snapshot untouched with no commands.
pub fn update_valid<S, R, M>(
    state: Immutable<ValidatedState<S, R>>,
    msg: M,
    update: fn(Immutable<S>, M) -> Update<S, M>,
) -> Update<ValidatedState<S, R>, M>
where
    S: Send + Sync + 'static,
    R: Clone + Send + Sync + 'static,
    M: Send + 'static,
{
    if let ValidatedState::Invalid(_) = &*state {
        tracing::debug!("Ignoring message for invalid page");
        return Update::new(state);
    }
    update_child(state, &valid_path(), update, msg, |msg| msg)
}

/// Render the page, or its invalid state.
pub fn view_valid<S, R, M, V>(
    state: &Immutable<ValidatedState<S, R>>,
    dispatch: &Dispatcher<M>,
    view: impl FnOnce(&Immutable<S>, &Dispatcher<M>) -> V,
    view_invalid: impl FnOnce(&R) -> V,
) -> V {
    match &**state {
        ValidatedState::Valid(inner) => view(inner, dispatch),
        ValidatedState::Invalid(reason) => view_invalid(reason),
    }
}

/// A page whose `init` may fail. Mount it as [`Validated<Self>`].
pub trait ValidatedPage: 'static {
    type Params: Send + 'static;
    type State: Send + Sync + 'static;
    type Reason: Clone + Send + Sync + 'static;
    type Msg: Message;
    type View: 'static;

    fn init(params: Self::Params) -> impl Future<Output = ValidatedState<Self::State, Self::Reason>> + Send;

    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg>;

    fn view(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Self::View;

    fn view_invalid(reason: &Self::Reason) -> Self::View;

    fn modal(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }

    fn contextual_actions(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }

    fn sidebar(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }
}

/// Adapts a [`ValidatedPage`] into a [`Component`].
pub struct Validated<P>(PhantomData<P>);

impl<P: ValidatedPage> Component for Validated<P> {
    type Params = P::Params;
    type State = ValidatedState<P::State, P::Reason>;
    type Msg = P::Msg;
    type View = P::View;

    fn init(params: Self::Params) -> impl Future<Output = Self::State> + Send {
        P::init(params)
    }

    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg> {
        update_valid(state, msg, P::update)
    }

    fn view(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Self::View {
        view_valid(state, dispatch, P::view, P::view_invalid)
    }

    fn modal(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Option<Self::View> {
        state.as_valid().and_then(|inner| P::modal(inner, dispatch))
    }

    fn contextual_actions(
        state: &Immutable<Self::State>,
        dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        state.as_valid().and_then(|inner| P::contextual_actions(inner, dispatch))
    }

    fn sidebar(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Option<Self::View> {
        state.as_valid().and_then(|inner| P::sidebar(inner, dispatch))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mvu::{Command, Transform};

    #[derive(Debug, Clone, PartialEq)]
    struct Count(u32);

    fn bump(state: Immutable<Count>, by: u32) -> Update<Count, u32> {
        let later = Command::new(move |_, _| async move {
            Transform::new(move |s: Immutable<Count>| Immutable::new(Count(s.0 + by)))
        });
        Update::new(Immutable::new(Count(state.0 + by))).with_command(later)
    }

    #[test]
    fn invalid_is_absorbing() {
        let state: Immutable<ValidatedState<Count, String>> =
            Immutable::new(ValidatedState::Invalid("missing id".to_string()));
        let update = update_valid(state.clone(), 3, bump);
        assert!(Immutable::ptr_eq(&state, &update.state));
        assert!(update.commands.is_empty());
    }

    #[test]
    fn valid_delegates_and_rewraps() {
        let state: Immutable<ValidatedState<Count, String>> =
            Immutable::new(ValidatedState::valid(Count(1)));
        let update = update_valid(state, 2, bump);
        assert_eq!(update.state.as_valid().map(|s| s.0), Some(3));
        assert_eq!(update.commands.len(), 1);
    }

    #[test]
    fn valid_path_is_missing_when_invalid() {
        let invalid: ValidatedState<Count, String> = ValidatedState::Invalid("gone".to_string());
        assert!(valid_path().get(&invalid).is_none());
    }

    #[test]
    fn view_valid_picks_branch() {
        let dispatch = Dispatcher::<u32>::detached();
        let invalid: Immutable<ValidatedState<Count, String>> =
            Immutable::new(Err::<Count, _>("no user".to_string()).into());
        let rendered = view_valid(&invalid, &dispatch, |s, _| format!("count {}", s.0), |r| r.clone());
        assert_eq!(rendered, "no user");
    }
}
