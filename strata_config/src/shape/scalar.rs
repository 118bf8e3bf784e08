//! Typed parsing of raw scalar tokens.

use std::fmt;

use serde_json::{Number, Value};
use thiserror::Error;

use super::leaf::LeafKind;

/// Scalar kinds that can be parsed from a single raw token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    /// Taken verbatim.
    String,
    /// Signed 64-bit, falling back to unsigned 64-bit.
    Integer,
    /// Finite 64-bit float.
    Number,
    /// `true`/`false` and the usual spellings thereof.
    Boolean,
}

/// A raw token could not be parsed as the requested kind.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("'{raw}' is not a valid {kind}")]
pub struct ScalarParseError {
    kind: ScalarKind,
    raw: String,
}

impl ScalarKind {
    /// Map a leaf kind onto a scalar kind, if it is one.
    #[must_use]
    pub const fn from_leaf_kind(kind: LeafKind) -> Option<Self> {
        match kind {
            LeafKind::String => Some(Self::String),
            LeafKind::Integer => Some(Self::Integer),
            LeafKind::Number => Some(Self::Number),
            LeafKind::Boolean => Some(Self::Boolean),
            _ => None,
        }
    }

    /// Whether values of this kind may start with `-`.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Number)
    }

    /// Placeholder shown for this kind in usage output.
    #[must_use]
    pub const fn metavar(self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Integer => "INTEGER",
            Self::Number => "NUMBER",
            Self::Boolean => "BOOLEAN",
        }
    }

    /// Parse `raw` into a JSON value of this kind.
    ///
    /// ```
    /// use serde_json::json;
    /// use strata_config::ScalarKind;
    ///
    /// assert_eq!(ScalarKind::Integer.parse("-12"), Ok(json!(-12)));
    /// assert_eq!(ScalarKind::Number.parse("0.5"), Ok(json!(0.5)));
    /// assert!(ScalarKind::Integer.parse("twelve").is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`ScalarParseError`] when `raw` is not a valid literal of
    /// this kind.
    pub fn parse(self, raw: &str) -> Result<Value, ScalarParseError> {
        let parsed = match self {
            Self::String => Some(Value::String(raw.to_owned())),
            Self::Integer => parse_integer(raw),
            Self::Number => raw
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number),
            Self::Boolean => parse_boolean(raw).map(Value::Bool),
        };
        parsed.ok_or_else(|| ScalarParseError {
            kind: self,
            raw: raw.to_owned(),
        })
    }
}

fn parse_integer(raw: &str) -> Option<Value> {
    let trimmed = raw.trim();
    trimmed
        .parse::<i64>()
        .map(Value::from)
        .or_else(|_| trimmed.parse::<u64>().map(Value::from))
        .ok()
}

fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
        };
        f.write_str(name)
    }
}
