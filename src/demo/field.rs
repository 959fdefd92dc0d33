//! Form fields as components.
//!
//! A field is embedded in a form like any other child: its state is an
//! `Immutable<FieldState<_>>` field of the form and its messages are routed
//! through the composition layer.

use std::fmt::Debug;
use std::future::Future;
use std::marker::PhantomData;

use serde::Serialize;

use crate::mvu::{Component, Message, Update};
use crate::runtime::Dispatcher;
use crate::state::Immutable;

use super::view::ViewNode;

/// The value type of a field and how it is shown.
pub trait FieldKind: 'static {
    type Value: Clone + Debug + PartialEq + Send + Sync + Serialize + 'static;

    fn display(value: &Self::Value) -> String;
}

pub struct Number;

impl FieldKind for Number {
    type Value = i64;

    fn display(value: &i64) -> String {
        value.to_string()
    }
}

pub struct Text;

impl FieldKind for Text {
    type Value = String;

    fn display(value: &String) -> String {
        value.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldState<V> {
    pub label: String,
    pub value: V,
    pub errors: Vec<String>,
    pub disabled: bool,
}

impl<V> FieldState<V> {
    pub fn new(label: impl Into<String>, value: V) -> Self {
        Self {
            label: label.into(),
            value,
            errors: Vec::new(),
            disabled: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldMsg<V> {
    Set(V),
    ClearErrors,
}

impl<V: Debug + Send + 'static> Message for FieldMsg<V> {}

pub struct FieldParams<V> {
    pub label: String,
    pub value: V,
}

/// A single-value input.
pub struct Field<K>(PhantomData<K>);

pub type NumberField = Field<Number>;
pub type TextField = Field<Text>;

impl<K: FieldKind> Component for Field<K> {
    type Params = FieldParams<K::Value>;
    type State = FieldState<K::Value>;
    type Msg = FieldMsg<K::Value>;
    type View = ViewNode;

    fn init(params: Self::Params) -> impl Future<Output = Self::State> + Send {
        async move { FieldState::new(params.label, params.value) }
    }

    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg> {
        match msg {
            FieldMsg::Set(value) if value == state.value && state.is_valid() => Update::new(state),
            FieldMsg::Set(value) => Update::new(state.with(|s| {
                s.value = value;
                s.errors.clear();
            })),
            FieldMsg::ClearErrors if state.is_valid() => Update::new(state),
            FieldMsg::ClearErrors => Update::new(state.with(|s| s.errors.clear())),
        }
    }

    fn view(state: &Immutable<Self::State>, _dispatch: &Dispatcher<Self::Msg>) -> Self::View {
        ViewNode::Input {
            label: state.label.clone(),
            value: K::display(&state.value),
            errors: state.errors.clone(),
            disabled: state.disabled,
        }
    }
}

/// Attach errors reported by the server.
pub fn set_errors<V: Clone>(state: Immutable<FieldState<V>>, errors: Vec<String>) -> Immutable<FieldState<V>> {
    if errors.is_empty() && state.is_valid() {
        return state;
    }
    state.with(|s| s.errors = errors)
}

pub fn set_disabled<V: Clone>(state: Immutable<FieldState<V>>, disabled: bool) -> Immutable<FieldState<V>> {
    if state.disabled == disabled {
        return state;
    }
    state.with(|s| s.disabled = disabled)
}
