use std::future::Future;

use crate::compose::update_child;
use crate::demo::api::ApiResult;
use crate::demo::view::ViewNode;
use crate::demo::Route;
use crate::lens;
use crate::loading::{start_loading, stop_loading};
use crate::mvu::{Command, Component, Transform, Update};
use crate::routing::GlobalMsg;
use crate::runtime::Dispatcher;
use crate::state::Immutable;
use crate::validated::{ValidatedPage, ValidatedState};

use super::form::{self, ProfileForm};
use super::msg::{ProfileMsg, ProfilePageMsg};
use super::state::{ProfileParams, ProfileState};
use super::view;

pub struct ProfilePage;

impl ValidatedPage for ProfilePage {
    type Params = ProfileParams;
    type State = ProfileState;
    type Reason = String;
    type Msg = ProfilePageMsg;
    type View = ViewNode;

    fn init(params: Self::Params) -> impl Future<Output = ValidatedState<ProfileState, String>> + Send {
        async move {
            match params.api.read_user(params.profile_id).await {
                ApiResult::Valid(user) => {
                    ValidatedState::valid(ProfileState::new(params.api, params.viewer_id, user))
                }
                ApiResult::Invalid(errors) => {
                    let reason = errors
                        .into_values()
                        .flatten()
                        .next()
                        .unwrap_or_else(|| "This profile is not available.".to_string());
                    ValidatedState::Invalid(reason)
                }
                ApiResult::Unhandled(reason) => ValidatedState::Invalid(reason),
            }
        }
    }

    fn update(state: Immutable<ProfileState>, msg: ProfilePageMsg) -> Update<ProfileState, ProfilePageMsg> {
        let msg = match msg {
            GlobalMsg::Local(msg) => msg,
            GlobalMsg::Route(request) => {
                tracing::debug!(?request, "No route sink; ignoring route request");
                return Update::new(state);
            }
        };

        match msg {
            ProfileMsg::Form(msg) => update_child(
                state,
                &lens!(ProfileState, form),
                ProfileForm::update,
                msg,
                |msg| GlobalMsg::Local(ProfileMsg::Form(msg)),
            ),
            ProfileMsg::StartEditing => start_editing(state),
            ProfileMsg::CancelEditing => Update::new(state.with(|s| {
                s.is_editing = false;
                let user = s.profile_user.clone();
                s.reset(user);
            })),
            ProfileMsg::SaveChanges => save_changes(state),
            ProfileMsg::Deactivate => deactivate(state),
        }
    }

    fn view(state: &Immutable<ProfileState>, dispatch: &Dispatcher<ProfilePageMsg>) -> ViewNode {
        view::render(state, dispatch)
    }

    fn view_invalid(reason: &String) -> ViewNode {
        view::render_invalid(reason)
    }

    fn contextual_actions(
        state: &Immutable<ProfileState>,
        _dispatch: &Dispatcher<ProfilePageMsg>,
    ) -> Option<ViewNode> {
        view::actions(state)
    }
}

// Reload the user before editing so the form starts from fresh data.
fn start_editing(state: Immutable<ProfileState>) -> Update<ProfileState, ProfilePageMsg> {
    let state = start_loading(lens!(ProfileState, start_editing_loading))(state);
    let reload = Command::new(|state: Immutable<ProfileState>, _| async move {
        let result = state.api.read_user(state.profile_user.id).await;
        Transform::new(move |current: Immutable<ProfileState>| {
            let current = stop_loading(lens!(ProfileState, start_editing_loading))(current);
            match result {
                ApiResult::Valid(user) => current.with(|s| {
                    s.is_editing = true;
                    s.reset(user);
                }),
                ApiResult::Invalid(_) | ApiResult::Unhandled(_) => current,
            }
        })
    });
    Update::new(state).with_command(reload)
}

fn save_changes(state: Immutable<ProfileState>) -> Update<ProfileState, ProfilePageMsg> {
    let state = start_loading(lens!(ProfileState, save_changes_loading))(state);
    let save = Command::new(|state: Immutable<ProfileState>, _| async move {
        let values = state.form.values();
        let result = state.api.update_user(state.profile_user.id, values).await;
        Transform::new(move |current: Immutable<ProfileState>| {
            let current = stop_loading(lens!(ProfileState, save_changes_loading))(current);
            match result {
                ApiResult::Valid(user) => current.with(|s| {
                    s.is_editing = false;
                    s.reset(user);
                }),
                ApiResult::Invalid(errors) => {
                    current.update(&lens!(ProfileState, form), |f| form::set_errors(f, errors))
                }
                ApiResult::Unhandled(reason) => {
                    tracing::warn!(%reason, "Saving profile failed");
                    current
                }
            }
        })
    });
    Update::new(state).with_command(save)
}

fn deactivate(state: Immutable<ProfileState>) -> Update<ProfileState, ProfilePageMsg> {
    let state = start_loading(lens!(ProfileState, deactivate_loading))(state);
    let delete = Command::new(
        |state: Immutable<ProfileState>, dispatch: Dispatcher<ProfilePageMsg>| async move {
            let result = state.api.delete_user(state.profile_user.id).await;
            let deactivated = match result {
                ApiResult::Valid(user) => {
                    dispatch.navigate(Route::SignOut);
                    Some(user)
                }
                ApiResult::Invalid(_) | ApiResult::Unhandled(_) => None,
            };
            Transform::new(move |current: Immutable<ProfileState>| {
                let current = stop_loading(lens!(ProfileState, deactivate_loading))(current);
                match deactivated {
                    Some(user) => current.with(|s| s.profile_user = user),
                    None => current,
                }
            })
        },
    );
    Update::new(state).with_command(delete)
}
