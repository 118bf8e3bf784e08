//! Per-leaf flag descriptions and their clap arguments.

use clap::builder::ValueParser;
use clap::{Arg, ArgAction, ArgMatches};
use serde_json::Value;
use tracing::trace;

use crate::shape::strip_nullable;
use crate::{ArrayItems, Leaf, LeafKind, ScalarKind, StrataError, StrataResult};

/// How many tokens a flag consumes and how they are parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(super) enum FlagArity {
    /// Zero-argument flag yielding `true` when present.
    Presence,
    /// Exactly one token.
    Single(ScalarKind),
    /// One token per occurrence, accumulated in order.
    Repeated(ScalarKind),
    /// Exactly one token per position, in one occurrence.
    Tuple(Vec<ScalarKind>),
}

/// Scalar kinds a flag may carry as a value.
fn value_kind(schema: &Value) -> Option<ScalarKind> {
    match LeafKind::of(strip_nullable(schema)) {
        kind @ (LeafKind::String | LeafKind::Integer | LeafKind::Number) => {
            ScalarKind::from_leaf_kind(kind)
        }
        _ => None,
    }
}

impl FlagArity {
    /// Arity for `leaf`, or `None` when the leaf has no flag surface.
    pub(super) fn for_leaf(leaf: &Leaf) -> Option<Self> {
        match leaf.kind {
            LeafKind::Boolean => Some(Self::Presence),
            LeafKind::String | LeafKind::Integer | LeafKind::Number => {
                ScalarKind::from_leaf_kind(leaf.kind).map(Self::Single)
            }
            LeafKind::Array => match leaf.items() {
                ArrayItems::Uniform(item) => value_kind(item).map(Self::Repeated),
                ArrayItems::Tuple(positions) if !positions.is_empty() => positions
                    .iter()
                    .map(value_kind)
                    .collect::<Option<Vec<_>>>()
                    .map(Self::Tuple),
                ArrayItems::Tuple(_) | ArrayItems::Unspecified => None,
            },
            _ => None,
        }
    }
}

/// One registered flag.
#[derive(Clone, Debug)]
pub(super) struct FlagDef {
    pub(super) name: String,
    pub(super) arity: FlagArity,
}

fn scalar_parser(kind: ScalarKind) -> ValueParser {
    ValueParser::new(move |raw: &str| kind.parse(raw))
}

impl FlagDef {
    pub(super) fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.name.clone())
            .long(self.name.clone())
            .required(false);
        match &self.arity {
            FlagArity::Presence => arg.action(ArgAction::SetTrue),
            FlagArity::Single(kind) => arg
                .action(ArgAction::Set)
                .num_args(1)
                .value_name(kind.metavar())
                .allow_negative_numbers(kind.is_numeric())
                .value_parser(scalar_parser(*kind)),
            FlagArity::Repeated(kind) => arg
                .action(ArgAction::Append)
                .num_args(1)
                .value_name(kind.metavar())
                .allow_negative_numbers(kind.is_numeric())
                .value_parser(scalar_parser(*kind)),
            FlagArity::Tuple(kinds) => arg
                .action(ArgAction::Set)
                .num_args(kinds.len())
                .value_names(kinds.iter().map(|kind| kind.metavar()))
                .value_parser(clap::value_parser!(String))
                .allow_negative_numbers(kinds.iter().any(|kind| kind.is_numeric())),
        }
    }

    /// Value supplied for this flag, or `None` when it was not given.
    pub(super) fn extract(&self, matches: &ArgMatches) -> StrataResult<Option<Value>> {
        let id = self.name.as_str();
        let value = match &self.arity {
            FlagArity::Presence => matches
                .try_get_one::<bool>(id)
                .map_err(|err| self.invalid(err))?
                .copied()
                .filter(|given| *given)
                .map(Value::Bool),
            FlagArity::Single(_) => matches
                .try_get_one::<Value>(id)
                .map_err(|err| self.invalid(err))?
                .cloned(),
            FlagArity::Repeated(_) => matches
                .try_get_many::<Value>(id)
                .map_err(|err| self.invalid(err))?
                .map(|values| Value::Array(values.cloned().collect())),
            FlagArity::Tuple(kinds) => {
                let Some(raw) = matches
                    .try_get_many::<String>(id)
                    .map_err(|err| self.invalid(err))?
                else {
                    return Ok(None);
                };
                let tokens: Vec<&String> = raw.collect();
                Some(self.parse_tuple(kinds, &tokens)?)
            }
        };
        if let Some(found) = &value {
            trace!(flag = id, value = %found, "flag supplied");
        }
        Ok(value)
    }

    fn parse_tuple(&self, kinds: &[ScalarKind], tokens: &[&String]) -> StrataResult<Value> {
        if tokens.len() != kinds.len() {
            return Err(self.invalid(format!(
                "expected {} values, got {}",
                kinds.len(),
                tokens.len()
            )));
        }
        tokens
            .iter()
            .zip(kinds)
            .map(|(token, kind)| kind.parse(token).map_err(|err| self.invalid(err)))
            .collect::<StrataResult<Vec<_>>>()
            .map(Value::Array)
    }

    fn invalid(&self, err: impl ToString) -> StrataError {
        StrataError::InvalidFlagValue {
            flag: self.name.clone(),
            message: err.to_string(),
        }
    }
}
