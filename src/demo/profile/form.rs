//! The editable part of the profile: three text fields.

use std::future::Future;

use serde::Serialize;

use crate::compose::update_child;
use crate::demo::api::{FieldErrors, User, UserUpdate};
use crate::demo::field::{self, FieldMsg, FieldState, TextField};
use crate::demo::view::ViewNode;
use crate::lens;
use crate::mvu::{Component, Message, Update};
use crate::runtime::Dispatcher;
use crate::state::Immutable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileFormState {
    pub name: Immutable<FieldState<String>>,
    pub email: Immutable<FieldState<String>>,
    pub job_title: Immutable<FieldState<String>>,
}

impl ProfileFormState {
    pub fn from_user(user: &User) -> Self {
        Self {
            name: Immutable::new(FieldState::new("Name", user.name.clone())),
            email: Immutable::new(FieldState::new("Email", user.email.clone())),
            job_title: Immutable::new(FieldState::new("Job title", user.job_title.clone())),
        }
    }

    pub fn values(&self) -> UserUpdate {
        UserUpdate {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            job_title: self.job_title.value.clone(),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.name.is_valid() && self.email.is_valid() && self.job_title.is_valid()
    }
}

/// Distribute server-side errors over the fields they name.
pub fn set_errors(state: Immutable<ProfileFormState>, mut errors: FieldErrors) -> Immutable<ProfileFormState> {
    let name = errors.remove("name").unwrap_or_default();
    let email = errors.remove("email").unwrap_or_default();
    let job_title = errors.remove("job_title").unwrap_or_default();
    state
        .update(&lens!(ProfileFormState, name), |f| field::set_errors(f, name))
        .update(&lens!(ProfileFormState, email), |f| field::set_errors(f, email))
        .update(&lens!(ProfileFormState, job_title), |f| field::set_errors(f, job_title))
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileFormMsg {
    Name(FieldMsg<String>),
    Email(FieldMsg<String>),
    JobTitle(FieldMsg<String>),
}

impl Message for ProfileFormMsg {}

pub struct ProfileForm;

impl Component for ProfileForm {
    type Params = User;
    type State = ProfileFormState;
    type Msg = ProfileFormMsg;
    type View = ViewNode;

    fn init(user: Self::Params) -> impl Future<Output = Self::State> + Send {
        async move { ProfileFormState::from_user(&user) }
    }

    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg> {
        match msg {
            ProfileFormMsg::Name(msg) => update_child(
                state,
                &lens!(ProfileFormState, name),
                TextField::update,
                msg,
                ProfileFormMsg::Name,
            ),
            ProfileFormMsg::Email(msg) => update_child(
                state,
                &lens!(ProfileFormState, email),
                TextField::update,
                msg,
                ProfileFormMsg::Email,
            ),
            ProfileFormMsg::JobTitle(msg) => update_child(
                state,
                &lens!(ProfileFormState, job_title),
                TextField::update,
                msg,
                ProfileFormMsg::JobTitle,
            ),
        }
    }

    fn view(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Self::View {
        ViewNode::section(
            "Edit profile",
            vec![
                TextField::view(&state.name, &dispatch.map(ProfileFormMsg::Name)),
                TextField::view(&state.email, &dispatch.map(ProfileFormMsg::Email)),
                TextField::view(&state.job_title, &dispatch.map(ProfileFormMsg::JobTitle)),
            ],
        )
    }
}
