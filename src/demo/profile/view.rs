use crate::demo::view::ViewNode;
use crate::mvu::Component;
use crate::routing::GlobalMsg;
use crate::runtime::Dispatcher;
use crate::state::Immutable;

use super::form::ProfileForm;
use super::msg::{ProfileMsg, ProfilePageMsg};
use super::state::ProfileState;

pub(super) fn render(state: &Immutable<ProfileState>, dispatch: &Dispatcher<ProfilePageMsg>) -> ViewNode {
    let user = &state.profile_user;
    let status = if user.active { "Active" } else { "Deactivated" };
    let mut children = vec![
        ViewNode::text(format!("Name: {}", user.name)),
        ViewNode::text(format!("Email: {}", user.email)),
        ViewNode::text(format!("Job title: {}", user.job_title)),
        ViewNode::text(format!("Status: {}", status)),
    ];

    if state.is_editing {
        let form_dispatch = dispatch.map(|msg| GlobalMsg::Local(ProfileMsg::Form(msg)));
        children.push(ProfileForm::view(&state.form, &form_dispatch));
        children.push(ViewNode::Button {
            label: "Save changes".to_string(),
            busy: state.save_changes_loading.is_busy(),
            disabled: state.save_changes_loading.is_busy() || !state.form.is_valid(),
        });
        children.push(ViewNode::button("Cancel", false));
    }

    if state.is_owner() && user.active {
        children.push(ViewNode::button(
            "Deactivate account",
            state.deactivate_loading.is_busy(),
        ));
    }

    ViewNode::section("Profile", children)
}

pub(super) fn render_invalid(reason: &str) -> ViewNode {
    ViewNode::section("Profile", vec![ViewNode::Alert(reason.to_string())])
}

pub(super) fn actions(state: &Immutable<ProfileState>) -> Option<ViewNode> {
    if !state.is_owner() || state.is_editing {
        return None;
    }
    Some(ViewNode::button(
        "Edit profile",
        state.start_editing_loading.is_busy(),
    ))
}
