//! Global messages: route requests that travel alongside a component's own
//! messages.
//!
//! Routes are opaque here. A component asks for navigation by dispatching
//! [`GlobalMsg::Route`]; the runtime forwards the request to the sink
//! registered with [`RuntimeBuilder::on_route`](crate::runtime::RuntimeBuilder::on_route).

use std::fmt::Debug;

use serde::Serialize;

use crate::mvu::Message;
use crate::runtime::Dispatcher;

/// How the host should move to a route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum RouteRequest<R> {
    /// Navigate, adding a history entry.
    Push(R),
    /// Navigate, replacing the current history entry.
    Replace(R),
}

impl<R> RouteRequest<R> {
    pub fn route(&self) -> &R {
        match self {
            RouteRequest::Push(route) | RouteRequest::Replace(route) => route,
        }
    }
}

/// A component's local messages plus route requests.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalMsg<M, R> {
    Local(M),
    Route(RouteRequest<R>),
}

impl<M, R> GlobalMsg<M, R> {
    pub fn new_route(route: R) -> Self {
        GlobalMsg::Route(RouteRequest::Push(route))
    }

    pub fn replace_route(route: R) -> Self {
        GlobalMsg::Route(RouteRequest::Replace(route))
    }

    /// Re-tag the local part, passing route requests through unchanged.
    pub fn map_local<N, F>(self, f: F) -> GlobalMsg<N, R>
    where
        F: FnOnce(M) -> N,
    {
        match self {
            GlobalMsg::Local(msg) => GlobalMsg::Local(f(msg)),
            GlobalMsg::Route(request) => GlobalMsg::Route(request),
        }
    }
}

impl<M: Message, R: Debug + Send + 'static> Message for GlobalMsg<M, R> {}

impl<M, R> Dispatcher<GlobalMsg<M, R>>
where
    M: Send + 'static,
    R: Send + 'static,
{
    pub fn navigate(&self, route: R) {
        self.dispatch(GlobalMsg::new_route(route));
    }

    /// Child-typed handle for the local part of the message.
    pub fn local(&self) -> Dispatcher<M> {
        self.map(GlobalMsg::Local)
    }
}
