//! A user profile page: view details, edit them, deactivate the account.
//!
//! The page is only valid once the profile user has been fetched. Each of
//! the three remote actions has its own loading counter.

mod form;
mod msg;
mod state;
mod update;
mod view;

pub use form::{ProfileForm, ProfileFormMsg, ProfileFormState};
pub use msg::{ProfileMsg, ProfilePageMsg};
pub use state::{ProfileParams, ProfileState};
pub use update::ProfilePage;
