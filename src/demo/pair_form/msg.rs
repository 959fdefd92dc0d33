use crate::demo::field::FieldMsg;
use crate::mvu::Message;

#[derive(Debug, Clone, PartialEq)]
pub enum PairFormMsg {
    FieldA(FieldMsg<i64>),
    FieldB(FieldMsg<i64>),
    Submit,
}

impl Message for PairFormMsg {}
