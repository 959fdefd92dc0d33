use crate::demo::Route;
use crate::mvu::Message;
use crate::routing::GlobalMsg;

use super::form::ProfileFormMsg;

#[derive(Debug, Clone, PartialEq)]
pub enum ProfileMsg {
    Form(ProfileFormMsg),
    StartEditing,
    CancelEditing,
    SaveChanges,
    Deactivate,
}

impl Message for ProfileMsg {}

/// What the page's runtime receives: local messages plus route requests.
pub type ProfilePageMsg = GlobalMsg<ProfileMsg, Route>;
