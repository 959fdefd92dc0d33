use crate::demo::field::NumberField;
use crate::demo::view::ViewNode;
use crate::mvu::Component;
use crate::runtime::Dispatcher;
use crate::state::Immutable;

use super::msg::PairFormMsg;
use super::state::PairFormState;
use super::update::{field_a, field_b};

pub(super) fn render(state: &Immutable<PairFormState>, dispatch: &Dispatcher<PairFormMsg>) -> ViewNode {
    let mut children = Vec::new();
    children.extend(field_a().view(state, dispatch, NumberField::view));
    children.extend(field_b().view(state, dispatch, NumberField::view));

    if let Some(reason) = &state.submit_error {
        children.push(ViewNode::Alert(reason.clone()));
    }
    if let Some(saved) = &state.last_saved {
        children.push(ViewNode::text(format!(
            "Saved a={} b={} (revision {})",
            saved.a, saved.b, saved.revision
        )));
    }
    children.push(ViewNode::button("Submit", state.submit_loading.is_busy()));

    ViewNode::section("Pair", children)
}
