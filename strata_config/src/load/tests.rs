//! Unit tests for layer composition and target construction.

use std::cell::Cell;

use anyhow::{Result, anyhow, ensure};
use rstest::{fixture, rstest};
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use super::{Loader, compose_layers, construct, load, load_with_strategy};
use crate::{
    MappingProvider, MergeStrategy, Model, Provenance, Provider, Shape, StrataError, StrataResult,
};

#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
struct Inner {
    option_a: String,
    option_b: i64,
}

#[derive(Debug, Deserialize, JsonSchema, PartialEq)]
struct Outer {
    nested: Inner,
    enabled: Option<bool>,
    values: Vec<u32>,
}

/// Counts how often it is asked for a layer.
#[derive(Default)]
struct Counting {
    calls: Cell<usize>,
    fail: bool,
}

impl Provider for Counting {
    fn provenance(&self) -> Provenance {
        Provenance::Defaults
    }

    fn provide(&self, _shape: &Shape) -> StrataResult<Map<String, Value>> {
        self.calls.set(self.calls.get() + 1);
        if self.fail {
            return Err(StrataError::UnknownInput {
                argument: "--boom".to_owned(),
            });
        }
        Ok(Map::new())
    }
}

fn mapping(value: Value) -> Result<MappingProvider> {
    MappingProvider::new(value).map_err(|err| anyhow!(err.to_string()))
}

#[fixture]
fn base() -> Value {
    json!({
        "nested": {"option_a": "a", "option_b": 1},
        "values": [1]
    })
}

#[rstest]
fn string_leaves_are_coerced_before_construction(base: Value) -> Result<()> {
    let env_like = mapping(json!({"nested": {"option_b": "42"}, "enabled": "true"}))?;
    let defaults = mapping(base)?;
    let cfg: Outer = load(&[&env_like, &defaults]).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(cfg.nested.option_b == 42);
    ensure!(cfg.enabled == Some(true));
    Ok(())
}

#[rstest]
fn construction_error_names_the_field(base: Value) -> Result<()> {
    let bad = mapping(json!({"nested": {"option_b": "many"}}))?;
    let defaults = mapping(base)?;
    match load::<Outer>(&[&bad, &defaults]) {
        Err(StrataError::Construction { path, .. }) => ensure!(path == "nested.option_b", "{path}"),
        other => return Err(anyhow!("expected construction error, got {other:?}")),
    }
    Ok(())
}

#[test]
fn missing_required_field_is_a_construction_error() -> Result<()> {
    let partial = mapping(json!({"values": []}))?;
    let result = load::<Outer>(&[&partial]);
    ensure!(matches!(result, Err(StrataError::Construction { .. })), "{result:?}");
    Ok(())
}

#[rstest]
#[case(MergeStrategy::MergeCollections, vec![1, 2])]
#[case(MergeStrategy::Replace, vec![2])]
fn strategy_controls_array_collisions(
    base: Value,
    #[case] strategy: MergeStrategy,
    #[case] expected: Vec<u32>,
) -> Result<()> {
    let high = mapping(json!({"values": [2]}))?;
    let low = mapping(base)?;
    let cfg: Outer =
        load_with_strategy(&[&high, &low], &strategy).map_err(|err| anyhow!(err.to_string()))?;
    ensure!(cfg.values == expected);
    Ok(())
}

#[test]
fn failing_provider_stops_the_load() {
    let first = Counting::default();
    let failing = Counting {
        fail: true,
        ..Counting::default()
    };
    let last = Counting::default();
    let result = compose_layers(&Outer::shape(), &[&first, &failing, &last]);
    assert!(matches!(result, Err(StrataError::UnknownInput { .. })));
    assert_eq!(first.calls.get(), 1);
    assert_eq!(last.calls.get(), 0);
}

#[rstest]
fn layers_keep_provider_order(base: Value) -> Result<()> {
    let high = mapping(json!({"values": [2]}))?;
    let low = mapping(base)?;
    let layers =
        compose_layers(&Outer::shape(), &[&high, &low]).map_err(|err| anyhow!(err.to_string()))?;
    let firsts: Vec<Value> = layers
        .iter()
        .map(|layer| json!(layer.value()).pointer("/values/0").cloned().unwrap_or_default())
        .collect();
    ensure!(firsts == [json!(2), json!(1)]);
    Ok(())
}

#[rstest]
fn loader_matches_free_functions(base: Value) -> Result<()> {
    let high = mapping(json!({"nested": {"option_a": "override"}}))?;
    let low = mapping(base)?;
    let loader = Loader::new().provider(&high).provider(&low);
    let merged = loader
        .merged(&Outer::shape())
        .map_err(|err| anyhow!(err.to_string()))?;
    ensure!(json!(merged) == json!({"nested": {"option_a": "override", "option_b": 1}, "values": [1]}));
    let cfg: Outer = loader.load().map_err(|err| anyhow!(err.to_string()))?;
    ensure!(cfg.nested.option_a == "override");
    Ok(())
}

#[test]
fn empty_provider_list_constructs_from_empty_mapping() {
    #[derive(Debug, Deserialize, JsonSchema)]
    struct AllOptional {
        name: Option<String>,
    }
    let cfg: StrataResult<AllOptional> = load(&[]);
    assert!(matches!(cfg, Ok(AllOptional { name: None })));
}

#[test]
fn construct_reports_root_mismatch() {
    let shape = Shape::of::<Inner>();
    let result = construct::<Inner>(&shape, Map::new());
    assert!(matches!(result, Err(StrataError::Construction { .. })));
}
