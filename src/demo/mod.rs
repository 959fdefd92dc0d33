//! A demonstration app built on the runtime: a two-field form and a user
//! profile page, both talking to a simulated API.

pub mod api;
pub mod field;
pub mod pair_form;
pub mod profile;
pub mod view;

use serde::Serialize;

/// Routes the demo pages can ask for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Route {
    SignOut,
    UserProfile { user_id: u64 },
}
