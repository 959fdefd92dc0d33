//! Immutable container laws over a nested record.

use mvu_kit::lens;
use mvu_kit::state::{Immutable, Lens, PathError};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    label: String,
    qty: u32,
}

#[derive(Debug, Clone, PartialEq)]
struct Sheet {
    title: String,
    rows: Vec<Immutable<Row>>,
    footer: Immutable<Row>,
}

fn sheet() -> Immutable<Sheet> {
    Immutable::new(Sheet {
        title: "Budget".to_string(),
        rows: vec![
            Immutable::new(Row {
                label: "Rent".to_string(),
                qty: 1,
            }),
            Immutable::new(Row {
                label: "Food".to_string(),
                qty: 3,
            }),
        ],
        footer: Immutable::new(Row {
            label: "Total".to_string(),
            qty: 4,
        }),
    })
}

fn row_qty(index: usize) -> Lens<Sheet, u32> {
    lens!(Sheet, rows)
        .then(Lens::index(index))
        .then(Lens::inner())
        .then(lens!(Row, qty))
}

#[test]
fn get_after_set_returns_value() {
    for value in [0, 7, u32::MAX] {
        let state = sheet().set(&row_qty(1), value);
        assert_eq!(*state.get(&row_qty(1)), value);
    }
}

#[test]
fn set_with_current_value_is_equal() {
    let state = sheet();
    let current = *state.get(&row_qty(0));
    assert_eq!(state.set(&row_qty(0), current), state);
}

#[test]
fn unrelated_branches_keep_identity() {
    let before = sheet();
    let after = before.update(&row_qty(1), |qty| qty + 1);

    assert_eq!(after.rows[1].qty, 4);
    assert!(Immutable::ptr_eq(&before.rows[0], &after.rows[0]));
    assert!(Immutable::ptr_eq(&before.footer, &after.footer));
    assert_eq!(before.rows[1].qty, 3, "original snapshot is never mutated");
}

#[test]
fn missing_index_reports_full_path() {
    let err = sheet().try_set(&row_qty(5), 1).unwrap_err();
    let PathError::Missing { path } = &err;
    assert_eq!(path.to_string(), "rows[5].qty");
}

#[test]
#[should_panic(expected = "Path 'rows[9].qty' does not exist")]
fn update_on_missing_path_panics() {
    let _ = sheet().update(&row_qty(9), |qty| qty + 1);
}

#[test]
fn snapshots_serialize_as_their_value() {
    #[derive(serde::Serialize)]
    struct Wrapper {
        inner: Immutable<u32>,
    }
    let json = serde_json::to_string(&Wrapper {
        inner: Immutable::new(3),
    })
    .expect("serializable");
    assert_eq!(json, r#"{"inner":3}"#);
}
