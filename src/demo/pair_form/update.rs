use std::future::Future;

use crate::compose::{update_child, Embed};
use crate::demo::api::{ApiResult, PairRecord};
use crate::demo::field::{set_disabled, set_errors, FieldMsg, FieldState, NumberField};
use crate::demo::view::ViewNode;
use crate::lens;
use crate::loading::{start_loading, stop_loading};
use crate::mvu::{Command, Component, Transform, Update};
use crate::runtime::Dispatcher;
use crate::state::Immutable;

use super::msg::PairFormMsg;
use super::state::{PairFormParams, PairFormState};
use super::view;

pub struct PairForm;

type FieldEmbed = Embed<PairFormState, PairFormMsg, FieldState<i64>, FieldMsg<i64>>;

pub(super) fn field_a() -> FieldEmbed {
    Embed::component::<NumberField>(
        lens!(PairFormState, field_a),
        |msg| match msg {
            PairFormMsg::FieldA(msg) => Ok(msg),
            other => Err(other),
        },
        PairFormMsg::FieldA,
    )
}

pub(super) fn field_b() -> FieldEmbed {
    Embed::component::<NumberField>(
        lens!(PairFormState, field_b),
        |msg| match msg {
            PairFormMsg::FieldB(msg) => Ok(msg),
            other => Err(other),
        },
        PairFormMsg::FieldB,
    )
}

impl Component for PairForm {
    type Params = PairFormParams;
    type State = PairFormState;
    type Msg = PairFormMsg;
    type View = ViewNode;

    fn init(params: Self::Params) -> impl Future<Output = Self::State> + Send {
        async move { PairFormState::new(params) }
    }

    fn update(state: Immutable<Self::State>, msg: Self::Msg) -> Update<Self::State, Self::Msg> {
        match msg {
            PairFormMsg::FieldA(msg) => update_child(
                state,
                &lens!(PairFormState, field_a),
                NumberField::update,
                msg,
                PairFormMsg::FieldA,
            ),
            PairFormMsg::FieldB(msg) => update_child(
                state,
                &lens!(PairFormState, field_b),
                NumberField::update,
                msg,
                PairFormMsg::FieldB,
            ),
            PairFormMsg::Submit => submit(state),
        }
    }

    fn view(state: &Immutable<Self::State>, dispatch: &Dispatcher<Self::Msg>) -> Self::View {
        view::render(state, dispatch)
    }
}

fn submit(state: Immutable<PairFormState>) -> Update<PairFormState, PairFormMsg> {
    let state = start_loading(lens!(PairFormState, submit_loading))(state);
    let state = disable_fields(state, true);
    let (a, b) = state.values();
    tracing::debug!(a, b, in_flight = state.submit_loading.count(), "Submitting pair");

    let save = Command::new(move |state: Immutable<PairFormState>, _| async move {
        let result = state.api.save_pair(a, b).await;
        Transform::new(move |current: Immutable<PairFormState>| apply_save(current, result))
    });
    Update::new(state).with_command(save)
}

fn apply_save(state: Immutable<PairFormState>, result: ApiResult<PairRecord>) -> Immutable<PairFormState> {
    let state = stop_loading(lens!(PairFormState, submit_loading))(state);
    let busy = state.submit_loading.is_busy();
    let state = disable_fields(state, busy);
    match result {
        ApiResult::Valid(record) => state.with(|s| {
            s.last_saved = Some(record);
            s.submit_error = None;
        }),
        ApiResult::Invalid(mut errors) => {
            let a = errors.remove("a").unwrap_or_default();
            let b = errors.remove("b").unwrap_or_default();
            state
                .update(&lens!(PairFormState, field_a), |field| set_errors(field, a))
                .update(&lens!(PairFormState, field_b), |field| set_errors(field, b))
        }
        ApiResult::Unhandled(reason) => {
            tracing::warn!(%reason, "Saving pair failed");
            state.with(|s| s.submit_error = Some(reason))
        }
    }
}

/// Fields are shown disabled while any save is in flight.
fn disable_fields(state: Immutable<PairFormState>, disabled: bool) -> Immutable<PairFormState> {
    state
        .update(&lens!(PairFormState, field_a), |field| set_disabled(field, disabled))
        .update(&lens!(PairFormState, field_b), |field| set_disabled(field, disabled))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::demo::api::SimulatedApi;

    fn form() -> Immutable<PairFormState> {
        Immutable::new(PairFormState::new(PairFormParams {
            api: SimulatedApi::new(Duration::ZERO),
            a: 1,
            b: 2,
        }))
    }

    #[test]
    fn submit_starts_loading_and_spawns_save() {
        let update = PairForm::update(form(), PairFormMsg::Submit);
        assert_eq!(update.state.submit_loading.count(), 1);
        assert_eq!(update.commands.len(), 1);
        assert!(update.state.field_a.disabled);
        assert!(update.state.field_b.disabled);

        let rendered = PairForm::view(&update.state, &Dispatcher::detached()).to_string();
        assert!(rendered.contains("(disabled)"));
    }

    #[test]
    fn fields_stay_disabled_until_last_save_returns() {
        let first = PairForm::update(form(), PairFormMsg::Submit).state;
        let both = PairForm::update(first, PairFormMsg::Submit).state;
        let record = |revision| PairRecord { a: 1, b: 2, revision };

        let one_left = apply_save(both, ApiResult::Valid(record(1)));
        assert!(one_left.submit_loading.is_busy());
        assert!(one_left.field_a.disabled && one_left.field_b.disabled);

        let idle = apply_save(one_left, ApiResult::Valid(record(2)));
        assert!(!idle.submit_loading.is_busy());
        assert!(!idle.field_a.disabled && !idle.field_b.disabled);
    }

    #[test]
    fn disabled_field_still_accepts_values() {
        let busy = PairForm::update(form(), PairFormMsg::Submit).state;
        let next = PairForm::update(busy, PairFormMsg::FieldB(FieldMsg::Set(7))).state;
        assert_eq!(next.field_b.value, 7);
        assert!(next.field_b.disabled);
    }

    #[test]
    fn rejected_save_marks_field() {
        let busy = PairForm::update(form(), PairFormMsg::Submit).state;
        let mut errors = crate::demo::api::FieldErrors::new();
        errors.insert("a".to_string(), vec!["Must be zero or greater.".to_string()]);

        let after = apply_save(busy.clone(), ApiResult::Invalid(errors));
        assert!(!after.submit_loading.is_busy());
        assert_eq!(after.field_a.errors, vec!["Must be zero or greater.".to_string()]);
        assert!(after.field_b.is_valid());
        assert!(!after.field_a.disabled && !after.field_b.disabled);
    }
}
