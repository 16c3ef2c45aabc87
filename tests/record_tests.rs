//! Tests for `#[derive(Record)]` and the projection stages built on it.

use lazypipe::prelude::*;
use lazypipe::record::{Fields, Value};
use proptest::prelude::*;
use rstest::rstest;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, PartialEq, Deserialize, Record)]
struct Order {
    #[record(rename = "id")]
    #[serde(rename = "id")]
    order_id: u32,
    customer: String,
    lines: Vec<Line>,
    discount: Option<f64>,
    #[record(skip)]
    #[serde(skip)]
    cache: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Line {
    sku: String,
    quantity: u16,
}

#[derive(Debug, Record)]
struct Wrapper<T> {
    value: T,
    tag: &'static str,
}

fn order() -> Order {
    Order {
        order_id: 7,
        customer: "ada".to_owned(),
        lines: vec![Line {
            sku: "k-1".to_owned(),
            quantity: 2,
        }],
        discount: None,
        cache: vec![1, 2, 3],
    }
}

// =============================================================================
// Field lookup
// =============================================================================

#[rstest]
#[case("id", json!(7))]
#[case("customer", json!("ada"))]
#[case("lines", json!([{ "sku": "k-1", "quantity": 2 }]))]
#[case("discount", Value::Null)]
fn test_field_lookup(#[case] name: &str, #[case] expected: Value) {
    assert_eq!(order().field(name).unwrap(), expected);
}

#[rstest]
#[case("order_id")]
#[case("cache")]
#[case("")]
fn test_hidden_or_unknown_fields_are_missing(#[case] name: &str) {
    let error = order().field(name).unwrap_err();
    match error {
        PipelineError::MissingField { field, record } => {
            assert_eq!(field, name);
            assert!(record.ends_with("Order"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_generic_record() {
    let wrapper = Wrapper {
        value: (1, "one"),
        tag: "pair",
    };
    assert_eq!(wrapper.field("value").unwrap(), json!([1, "one"]));
    assert_eq!(wrapper.field("tag").unwrap(), json!("pair"));
}

#[test]
fn test_record_through_references() {
    let orders = vec![order(), order()];
    let ids = p!(seq(orders.iter()), project(["id"]), materialize()).unwrap();
    assert_eq!(ids, vec![vec![json!(7)], vec![json!(7)]]);
}

#[test]
fn test_fields_are_records() {
    let mut fields = Fields::new();
    fields.insert("x".to_owned(), json!(1.5));
    assert_eq!(fields.field("x").unwrap(), json!(1.5));
    assert!(fields.field("y").is_err());
}

// =============================================================================
// Reconstruction
// =============================================================================

#[test]
fn test_kproject_then_ksplat_rebuilds_record() {
    let rebuilt = p!(
        vec![order()],
        kproject(["id", "customer", "lines", "discount"]),
        ksplat::<Order>(),
        materialize(),
    )
    .unwrap();

    let mut expected = order();
    expected.cache = Vec::new();
    assert_eq!(rebuilt, vec![expected]);
}

#[test]
fn test_splat_into_rejects_wrong_arity() {
    let result = p!(vec![order()], project(["id", "customer"]), splat_into::<Order>(), materialize());
    assert!(matches!(result, Err(PipelineError::Decode { .. })));
}

#[test]
fn test_ksplat_rejects_mistyped_values() {
    let mut fields = Fields::new();
    fields.insert("id".to_owned(), json!("seven"));
    fields.insert("customer".to_owned(), json!("ada"));
    fields.insert("lines".to_owned(), json!([]));
    fields.insert("discount".to_owned(), Value::Null);

    let error = p!(vec![fields], ksplat::<Order>(), materialize()).unwrap_err();
    assert!(error.to_string().contains("Order"));
}

#[derive(Debug, Clone, PartialEq, Deserialize, Record)]
struct Point {
    x: i64,
    y: i64,
    #[serde(default)]
    label: String,
}

proptest! {
    #[test]
    fn prop_positional_projection_round_trips(x in any::<i64>(), y in any::<i64>()) {
        let point = Point { x, y, label: String::new() };
        let rebuilt = p!(
            vec![point.clone()],
            project(["x", "y"]),
            splat_into::<Point>(),
            materialize(),
        )
        .unwrap();
        prop_assert_eq!(rebuilt, vec![point]);
    }
}
