//! A two-field form that saves both values in one request.
//!
//! Submitting twice in a row is allowed: each submit bumps the loading
//! counter and the counter only drops to zero when both responses are in.
//! The response applied last is the one shown, whatever order the server
//! answered in.

mod msg;
mod state;
mod update;
mod view;

pub use msg::PairFormMsg;
pub use state::{PairFormParams, PairFormState};
pub use update::PairForm;
