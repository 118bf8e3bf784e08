//! Leaf descriptors emitted by the path resolver.

use std::fmt;

use serde_json::Value;

/// Ordered, non-empty sequence of property names addressing one leaf.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LeafPath(Vec<String>);

impl LeafPath {
    /// Build a path from its segments, returning `None` when `segments` is
    /// empty.
    ///
    /// ```
    /// use strata_config::LeafPath;
    ///
    /// let path = LeafPath::new(["nested", "option_a"]).expect("non-empty");
    /// assert_eq!(path.to_string(), "nested.option_a");
    /// assert!(LeafPath::new(Vec::<String>::new()).is_none());
    /// ```
    #[must_use]
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self(segments))
        }
    }

    /// Returns the property names making up this path.
    #[must_use]
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for LeafPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

/// Primitive classification of a leaf schema.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum LeafKind {
    /// UTF-8 string.
    String,
    /// Whole number.
    Integer,
    /// Floating-point number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Homogeneous sequence or fixed-length tuple.
    Array,
    /// Mapping without declared properties, such as a `HashMap`.
    Object,
    /// The unit value.
    Null,
    /// Anything the resolver could not classify.
    Unknown,
}

impl LeafKind {
    fn from_type_name(name: &str) -> Self {
        match name {
            "string" => Self::String,
            "integer" => Self::Integer,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "array" => Self::Array,
            "object" => Self::Object,
            "null" => Self::Null,
            _ => Self::Unknown,
        }
    }

    fn of_value(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Boolean,
            Value::Number(n) if n.is_f64() => Self::Number,
            Value::Number(_) => Self::Integer,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Classify a (reference-free) schema node.
    ///
    /// `"type": ["integer", "null"]` classifies as [`LeafKind::Integer`];
    /// unions whose non-null branches agree classify as that shared kind;
    /// enumerations classify by the kind of their values.
    #[must_use]
    pub fn of(schema: &Value) -> Self {
        match schema.get("type") {
            Some(Value::String(name)) => Self::from_type_name(name),
            Some(Value::Array(names)) => names
                .iter()
                .filter_map(Value::as_str)
                .find(|name| *name != "null")
                .map_or(Self::Null, Self::from_type_name),
            _ => Self::of_untyped(schema),
        }
    }

    fn of_untyped(schema: &Value) -> Self {
        if let Some(constant) = schema.get("const") {
            return Self::of_value(constant);
        }
        if let Some(Value::Array(values)) = schema.get("enum") {
            return Self::shared(values.iter().map(Self::of_value));
        }
        for keyword in ["anyOf", "oneOf", "allOf"] {
            if let Some(Value::Array(branches)) = schema.get(keyword) {
                return Self::shared(branches.iter().map(Self::of));
            }
        }
        if schema.get("properties").is_some() {
            return Self::Object;
        }
        Self::Unknown
    }

    fn shared(kinds: impl Iterator<Item = Self>) -> Self {
        let mut found = None;
        for kind in kinds.filter(|kind| *kind != Self::Null) {
            match found {
                None => found = Some(kind),
                Some(seen) if seen == kind => {}
                Some(_) => return Self::Unknown,
            }
        }
        found.unwrap_or(Self::Null)
    }
}

/// Item layout of an array leaf.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ArrayItems<'a> {
    /// Every element follows the same schema.
    Uniform(&'a Value),
    /// Fixed-length tuple; one schema per position.
    Tuple(&'a [Value]),
    /// The schema does not describe its items.
    Unspecified,
}

/// One addressable leaf of a target shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    /// Location of the leaf within the shape.
    pub path: LeafPath,
    /// Primitive classification of the leaf.
    pub kind: LeafKind,
    /// Raw, reference-free schema of the leaf.
    pub schema: Value,
}

impl Leaf {
    /// Describe the elements of an array leaf.
    ///
    /// Both the 2020-12 `prefixItems` form and the draft-07 `items: [..]`
    /// form are recognised as tuples.
    #[must_use]
    pub fn items(&self) -> ArrayItems<'_> {
        array_items(&self.schema)
    }
}

pub(crate) fn array_items(schema: &Value) -> ArrayItems<'_> {
    if let Some(Value::Array(positions)) = schema.get("prefixItems") {
        return ArrayItems::Tuple(positions);
    }
    match schema.get("items") {
        Some(Value::Array(positions)) => ArrayItems::Tuple(positions),
        Some(item @ Value::Object(_)) => ArrayItems::Uniform(item),
        _ => ArrayItems::Unspecified,
    }
}
