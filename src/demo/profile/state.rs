use serde::Serialize;

use crate::demo::api::{SimulatedApi, User};
use crate::loading::Loading;
use crate::state::Immutable;

use super::form::ProfileFormState;

pub struct ProfileParams {
    pub api: SimulatedApi,
    pub viewer_id: u64,
    pub profile_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileState {
    pub profile_user: User,
    pub viewer_id: u64,
    pub is_editing: bool,
    pub start_editing_loading: Loading,
    pub save_changes_loading: Loading,
    pub deactivate_loading: Loading,
    pub form: Immutable<ProfileFormState>,
    #[serde(skip)]
    pub api: SimulatedApi,
}

impl ProfileState {
    pub fn new(api: SimulatedApi, viewer_id: u64, profile_user: User) -> Self {
        Self {
            form: Immutable::new(ProfileFormState::from_user(&profile_user)),
            profile_user,
            viewer_id,
            is_editing: false,
            start_editing_loading: Loading::default(),
            save_changes_loading: Loading::default(),
            deactivate_loading: Loading::default(),
            api,
        }
    }

    pub fn is_owner(&self) -> bool {
        self.viewer_id == self.profile_user.id
    }

    /// Replace the profile user and rebuild the form from it.
    pub fn reset(&mut self, user: User) {
        self.form = Immutable::new(ProfileFormState::from_user(&user));
        self.profile_user = user;
    }
}
