//! Unit tests for layered merging and the built-in override strategies.

use camino::Utf8PathBuf;
use rstest::rstest;
use serde_json::{Map, Value, json};

use super::{MergeStrategy, OverrideStrategy, merge, merge_layers};
use crate::Layer;

fn map(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[rstest]
#[case(MergeStrategy::MergeCollections)]
#[case(MergeStrategy::Replace)]
fn empty_list_yields_empty_mapping(#[case] strategy: MergeStrategy) {
    assert!(merge(Vec::new(), &strategy).is_empty());
}

#[rstest]
#[case(MergeStrategy::MergeCollections)]
#[case(MergeStrategy::Replace)]
fn single_layer_is_returned_unchanged(#[case] strategy: MergeStrategy) {
    let only = map(json!({ "a": { "b": [1, 2] }, "c": null, "d": "x" }));
    assert_eq!(merge(vec![only.clone()], &strategy), only);
}

#[test]
fn merge_collections_appends_higher_priority_arrays() {
    let merged = merge(
        vec![map(json!({ "values": ["b"] })), map(json!({ "values": ["a"] }))],
        &MergeStrategy::MergeCollections,
    );
    assert_eq!(json!(merged), json!({ "values": ["a", "b"] }));
}

#[test]
fn merge_collections_recurses_into_mappings() {
    let merged = merge(
        vec![
            map(json!({ "nested": { "option_a": "high", "list": [3] } })),
            map(json!({ "nested": { "option_a": "low", "option_b": 2, "list": [1, 2] } })),
        ],
        &MergeStrategy::MergeCollections,
    );
    assert_eq!(
        json!(merged),
        json!({ "nested": { "option_a": "high", "option_b": 2, "list": [1, 2, 3] } })
    );
}

#[test]
fn replace_lets_the_higher_layer_win_outright() {
    let merged = merge(
        vec![
            map(json!({ "nested": { "option_a": "high" }, "values": [3] })),
            map(json!({ "nested": { "option_a": "low", "option_b": 2 }, "values": [1, 2], "kept": true })),
        ],
        &MergeStrategy::Replace,
    );
    assert_eq!(
        json!(merged),
        json!({ "nested": { "option_a": "high" }, "values": [3], "kept": true })
    );
}

#[rstest]
#[case(json!(1), json!([1]), json!([1]))]
#[case(json!([1]), json!("x"), json!("x"))]
#[case(json!({ "a": 1 }), json!(2), json!(2))]
#[case(json!(2), json!({ "a": 1 }), json!({ "a": 1 }))]
#[case(json!(true), json!(null), json!(null))]
fn mismatched_kinds_resolve_to_the_incoming_value(
    #[case] lower: Value,
    #[case] upper: Value,
    #[case] expected: Value,
) {
    let merged = merge(
        vec![map(json!({ "k": upper })), map(json!({ "k": lower }))],
        &MergeStrategy::MergeCollections,
    );
    assert_eq!(merged.get("k"), Some(&expected));
}

#[test]
fn null_in_the_accumulator_counts_as_absent() {
    let merged = merge(
        vec![map(json!({ "k": [2] })), map(json!({ "k": null }))],
        &MergeStrategy::MergeCollections,
    );
    assert_eq!(json!(merged), json!({ "k": [2] }));
}

#[test]
fn three_layers_fold_lowest_first() {
    let merged = merge(
        vec![
            map(json!({ "v": [3], "s": "top" })),
            map(json!({ "v": [2] })),
            map(json!({ "v": [1], "s": "bottom", "only": 0 })),
        ],
        &MergeStrategy::MergeCollections,
    );
    assert_eq!(json!(merged), json!({ "v": [1, 2, 3], "s": "top", "only": 0 }));
}

struct KeepLowest;

impl OverrideStrategy for KeepLowest {
    fn override_value(&self, lower: Value, _upper: Value) -> Value {
        lower
    }
}

#[test]
fn custom_strategies_plug_in() {
    let merged = merge(
        vec![
            map(json!({ "a": 2, "n": { "b": 2, "c": 3 } })),
            map(json!({ "a": 1, "n": { "b": 1 } })),
        ],
        &KeepLowest,
    );
    assert_eq!(json!(merged), json!({ "a": 1, "n": { "b": 1, "c": 3 } }));
}

#[test]
fn layers_merge_like_plain_mappings() {
    let layers = vec![
        Layer::flags(map(json!({ "option_a": "X" }))),
        Layer::environment(map(json!({ "option_b": "1" }))),
        Layer::file(
            map(json!({ "option_a": "Y", "option_b": 2 })),
            Utf8PathBuf::from("cfg.json"),
        ),
    ];
    let merged = merge_layers(layers, &MergeStrategy::default());
    assert_eq!(json!(merged), json!({ "option_a": "X", "option_b": "1" }));
}
