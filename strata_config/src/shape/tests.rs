//! Unit tests for reference resolution, leaf discovery, and coercion.

use anyhow::{Result, anyhow, ensure};
use rstest::rstest;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{ArrayItems, LeafKind, Shape};
use crate::StrataError;

#[derive(Deserialize, JsonSchema)]
struct SimpleModel {
    option_a: String,
    option_b: i64,
}

#[derive(Deserialize, JsonSchema)]
struct NestedModel {
    nested: SimpleModel,
    option_c: i64,
}

#[derive(Deserialize, JsonSchema)]
struct TwinModel {
    left: SimpleModel,
    right: SimpleModel,
}

#[derive(Deserialize, JsonSchema)]
struct TreeNode {
    weight: u32,
    children: Vec<TreeNode>,
}

#[derive(Deserialize, JsonSchema)]
struct Collections {
    values: Vec<i64>,
    coordinates: (i64, f64),
    maybe: Option<SimpleModel>,
    enabled: Option<bool>,
}

fn paths(shape: &Shape) -> Result<Vec<String>> {
    Ok(shape
        .leaves()
        .map_err(|err| anyhow!(err.to_string()))?
        .iter()
        .map(|leaf| leaf.path.to_string())
        .collect())
}

#[test]
fn flat_model_emits_leaves_in_declaration_order() -> Result<()> {
    let shape = Shape::of::<SimpleModel>();
    ensure!(paths(&shape)? == ["option_a", "option_b"]);
    let kinds: Vec<LeafKind> = shape
        .leaves()
        .map_err(|err| anyhow!(err.to_string()))?
        .into_iter()
        .map(|leaf| leaf.kind)
        .collect();
    ensure!(kinds == [LeafKind::String, LeafKind::Integer]);
    Ok(())
}

#[test]
fn nested_references_are_substituted() -> Result<()> {
    let shape = Shape::of::<NestedModel>();
    ensure!(shape.definitions().contains_key("SimpleModel"));
    ensure!(paths(&shape)? == ["nested.option_a", "nested.option_b", "option_c"]);
    let resolved = shape.resolve().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(!resolved.to_string().contains("$ref"), "references remain: {resolved}");
    Ok(())
}

#[test]
fn shared_reference_resolves_identically_at_each_site() -> Result<()> {
    let shape = Shape::of::<TwinModel>();
    let leaves = shape.leaves().map_err(|err| anyhow!(err.to_string()))?;
    let (left, right): (Vec<_>, Vec<_>) = leaves
        .into_iter()
        .partition(|leaf| leaf.path.segments().first().map(String::as_str) == Some("left"));
    ensure!(left.len() == 2 && right.len() == 2);
    for (l, r) in left.iter().zip(&right) {
        ensure!(l.kind == r.kind && l.schema == r.schema);
        ensure!(l.path.segments().get(1) == r.path.segments().get(1));
    }
    Ok(())
}

#[test]
fn collection_leaves_expose_their_items() -> Result<()> {
    let shape = Shape::of::<Collections>();
    let leaves = shape.leaves().map_err(|err| anyhow!(err.to_string()))?;
    let find = |name: &str| {
        leaves
            .iter()
            .find(|leaf| leaf.path.to_string() == name)
            .ok_or_else(|| anyhow!("missing leaf {name}"))
    };

    let values = find("values")?;
    ensure!(values.kind == LeafKind::Array);
    ensure!(matches!(values.items(), ArrayItems::Uniform(item) if LeafKind::of(item) == LeafKind::Integer));

    let coordinates = find("coordinates")?;
    let ArrayItems::Tuple(positions) = coordinates.items() else {
        return Err(anyhow!("expected tuple items"));
    };
    let kinds: Vec<LeafKind> = positions.iter().map(LeafKind::of).collect();
    ensure!(kinds == [LeafKind::Integer, LeafKind::Number]);

    ensure!(find("maybe.option_a")?.kind == LeafKind::String);
    ensure!(find("enabled")?.kind == LeafKind::Boolean);
    Ok(())
}

#[test]
fn legacy_definitions_table_is_recognised() -> Result<()> {
    let shape = Shape::from_schema(json!({
        "type": "object",
        "properties": { "inner": { "$ref": "#/definitions/Inner" } },
        "definitions": {
            "Inner": {
                "type": "object",
                "properties": { "port": { "type": "integer" } }
            }
        }
    }));
    ensure!(paths(&shape)? == ["inner.port"]);
    Ok(())
}

#[test]
fn reference_siblings_survive_substitution() -> Result<()> {
    let shape = Shape::from_schema(json!({
        "type": "object",
        "properties": {
            "port": { "$ref": "#/$defs/Port", "description": "listener port" }
        },
        "$defs": { "Port": { "type": "integer" } }
    }));
    let leaves = shape.leaves().map_err(|err| anyhow!(err.to_string()))?;
    let port = leaves.first().ok_or_else(|| anyhow!("no leaves"))?;
    ensure!(port.schema == json!({ "type": "integer", "description": "listener port" }));
    Ok(())
}

#[test]
fn cyclic_reference_is_reported() {
    let shape = Shape::from_schema(json!({
        "type": "object",
        "properties": { "a": { "$ref": "#/$defs/A" } },
        "$defs": {
            "A": { "type": "object", "properties": { "b": { "$ref": "#/$defs/B" } } },
            "B": { "type": "object", "properties": { "a": { "$ref": "#/$defs/A" } } }
        }
    }));
    match shape.leaves() {
        Err(StrataError::CyclicReference { cycle }) => assert_eq!(cycle, "A -> B -> A"),
        other => panic!("expected cyclic reference, got {other:?}"),
    }
}

#[test]
fn self_referential_root_is_a_cycle() {
    match Shape::of::<TreeNode>().leaves() {
        Err(StrataError::CyclicReference { cycle }) => assert_eq!(cycle, "TreeNode -> TreeNode"),
        other => panic!("expected cyclic reference, got {other:?}"),
    }
}

#[test]
fn untitled_root_cycle_is_named_by_its_pointer() {
    let shape = Shape::from_schema(json!({
        "type": "object",
        "properties": { "next": { "$ref": "#" } }
    }));
    match shape.leaves() {
        Err(StrataError::CyclicReference { cycle }) => assert_eq!(cycle, "# -> #"),
        other => panic!("expected cyclic reference, got {other:?}"),
    }
}

#[test]
fn coercion_follows_root_self_references() {
    let shape = Shape::of::<TreeNode>();
    let mut value = json!({
        "weight": "1",
        "children": [{ "weight": "2", "children": [] }]
    });
    shape.coerce(&mut value);
    assert_eq!(
        value,
        json!({ "weight": 1, "children": [{ "weight": 2, "children": [] }] })
    );
}

#[rstest]
#[case("#/$defs/Missing")]
#[case("https://example.com/schema.json")]
fn dangling_reference_is_reported(#[case] reference: &str) {
    let shape = Shape::from_schema(json!({
        "type": "object",
        "properties": { "a": { "$ref": reference } }
    }));
    match shape.leaves() {
        Err(StrataError::UnresolvedReference { reference: seen }) => assert_eq!(seen, reference),
        other => panic!("expected unresolved reference, got {other:?}"),
    }
}

#[rstest]
#[case(json!({ "type": "integer" }))]
#[case(json!({ "type": "object" }))]
#[case(json!(true))]
fn non_object_roots_have_no_leaves(#[case] schema: Value) -> Result<()> {
    ensure!(paths(&Shape::from_schema(schema))?.is_empty());
    Ok(())
}

#[rstest]
#[case(json!({ "type": ["string", "null"] }), LeafKind::String)]
#[case(json!({ "enum": ["fast", "slow"] }), LeafKind::String)]
#[case(json!({ "oneOf": [{ "const": 1 }, { "const": 2 }] }), LeafKind::Integer)]
#[case(json!({ "anyOf": [{ "type": "string" }, { "type": "integer" }] }), LeafKind::Unknown)]
#[case(json!({ "type": "object", "additionalProperties": { "type": "string" } }), LeafKind::Object)]
fn leaf_kinds_are_classified(#[case] schema: Value, #[case] expected: LeafKind) {
    assert_eq!(LeafKind::of(&schema), expected);
}

#[test]
fn coercion_converts_valid_literals_only() {
    let shape = Shape::of::<NestedModel>();
    let mut value = json!({
        "nested": { "option_a": "123", "option_b": "456" },
        "option_c": "not a number"
    });
    shape.coerce(&mut value);
    assert_eq!(
        value,
        json!({
            "nested": { "option_a": "123", "option_b": 456 },
            "option_c": "not a number"
        })
    );
}

#[test]
fn coercion_reaches_array_items_and_optionals() {
    let shape = Shape::of::<Collections>();
    let mut value = json!({
        "values": ["1", "2"],
        "coordinates": ["3", "4.5"],
        "maybe": { "option_b": "7" },
        "enabled": "yes"
    });
    shape.coerce(&mut value);
    assert_eq!(
        value,
        json!({
            "values": [1, 2],
            "coordinates": [3, 4.5],
            "maybe": { "option_b": 7 },
            "enabled": true
        })
    );
}

#[test]
fn coercion_terminates_on_recursive_definitions() {
    let shape = Shape::from_schema(json!({
        "$ref": "#/$defs/Node",
        "$defs": {
            "Node": {
                "type": "object",
                "properties": {
                    "weight": { "type": "integer" },
                    "child": { "anyOf": [{ "$ref": "#/$defs/Node" }, { "type": "null" }] }
                }
            }
        }
    }));
    let mut value = json!({ "weight": "1", "child": { "weight": "2", "child": null } });
    shape.coerce(&mut value);
    assert_eq!(value, json!({ "weight": 1, "child": { "weight": 2, "child": null } }));
}
