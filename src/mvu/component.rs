//! The component contract.

use std::future::Future;

use crate::runtime::Dispatcher;
use crate::state::Immutable;

use super::message::Message;
use super::update::Update;

/// A self-contained `(State, Msg, init, update, view)` unit.
///
/// Parents embed a child by storing `Immutable<Child::State>` in one of
/// their fields and routing the child's messages through
/// [`update_child`](crate::compose::update_child).
pub trait Component: 'static {
    /// Input to [`init`](Self::init).
    type Params: Send + 'static;

    /// The state this component owns.
    type State: Send + Sync + 'static;

    /// The messages this component handles.
    type Msg: Message;

    /// Whatever the host's view layer consumes.
    type View: 'static;

    /// Build the initial state.
    fn init(params: Self::Params) -> impl Future<Output = Self::State> + Send;

    /// Process a message and return the next state plus commands.
    ///
    /// Must not panic: recoverable failures are recorded in the state.
    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg>;

    /// Describe the current state for the view layer.
    fn view(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Self::View;

    /// Page-level modal, if one is open.
    fn modal(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }

    /// Page-level actions shown next to the page title.
    fn contextual_actions(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }

    /// Page-level sidebar.
    fn sidebar(
        _state: &Immutable<Self::State>,
        _dispatch: &Dispatcher<Self::Msg>,
    ) -> Option<Self::View> {
        None
    }
}
