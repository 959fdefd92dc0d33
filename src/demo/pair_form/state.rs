use serde::Serialize;

use crate::demo::api::{PairRecord, SimulatedApi};
use crate::demo::field::FieldState;
use crate::loading::Loading;
use crate::state::Immutable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairFormState {
    pub field_a: Immutable<FieldState<i64>>,
    pub field_b: Immutable<FieldState<i64>>,
    pub submit_loading: Loading,
    /// The save response applied most recently.
    pub last_saved: Option<PairRecord>,
    pub submit_error: Option<String>,
    #[serde(skip)]
    pub api: SimulatedApi,
}

pub struct PairFormParams {
    pub api: SimulatedApi,
    pub a: i64,
    pub b: i64,
}

impl PairFormState {
    pub fn new(params: PairFormParams) -> Self {
        Self {
            field_a: Immutable::new(FieldState::new("A", params.a)),
            field_b: Immutable::new(FieldState::new("B", params.b)),
            submit_loading: Loading::default(),
            last_saved: None,
            submit_error: None,
            api: params.api,
        }
    }

    pub fn values(&self) -> (i64, i64) {
        (self.field_a.value, self.field_b.value)
    }
}
