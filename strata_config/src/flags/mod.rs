//! Command-line flag provider.
//!
//! Every leaf of the target shape with a supported kind becomes one long
//! flag named by [`crate::path_to_flag_name`]:
//!
//! - booleans are presence flags yielding `true`; absence yields nothing;
//! - strings, integers and numbers take exactly one value;
//! - arrays of those scalars accept the flag repeatedly, one value each;
//! - fixed-length tuples of those scalars take all positions at once.
//!
//! Leaves of any other kind have no flag. Arguments that match no flag are
//! rejected with [`StrataError::UnknownInput`].
//!
//! ```
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use serde_json::json;
//! use strata_config::{FlagProvider, Provider, Shape};
//!
//! #[derive(Deserialize, JsonSchema)]
//! struct SimpleModel {
//!     option_a: String,
//!     option_b: i32,
//! }
//!
//! let flags = FlagProvider::new(["--option-a", "test", "--option-b", "123"]);
//! let partial = flags.provide(&Shape::of::<SimpleModel>())?;
//! assert_eq!(json!(partial), json!({"option_a": "test", "option_b": 123}));
//! # Ok::<_, strata_config::StrataError>(())
//! ```

mod definition;

use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgMatches, Command};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::{
    FlagTable, Model, Provenance, Provider, Shape, StrataError, StrataResult, insert_at_path,
};

use definition::{FlagArity, FlagDef};

const DEFAULT_COMMAND_NAME: &str = "config";
const HELP_FLAG: &str = "help";

/// Provider reading configuration from command-line flags.
#[derive(Clone, Debug, Default)]
pub struct FlagProvider {
    argv: Vec<OsString>,
}

impl FlagProvider {
    /// Parse `argv`, which must not include the binary name.
    #[must_use]
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse the arguments of the current process, minus the binary name.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::args_os().skip(1))
    }

    /// Build the `clap` command describing the flags of `T`, for usage and
    /// help rendering.
    ///
    /// # Errors
    ///
    /// Propagates shape resolution failures and
    /// [`StrataError::FlagCollision`].
    pub fn command_for<T: Model>() -> StrataResult<Command> {
        FlagSurface::build(&T::shape()).map(|surface| surface.command)
    }

    /// Build the `clap` command describing the flags of `shape`.
    ///
    /// # Errors
    ///
    /// Propagates shape resolution failures and
    /// [`StrataError::FlagCollision`].
    pub fn command(shape: &Shape) -> StrataResult<Command> {
        FlagSurface::build(shape).map(|surface| surface.command)
    }
}

impl Provider for FlagProvider {
    fn provenance(&self) -> Provenance {
        Provenance::Flags
    }

    fn provide(&self, shape: &Shape) -> StrataResult<Map<String, Value>> {
        let surface = FlagSurface::build(shape)?;
        let matches = surface
            .command
            .clone()
            .try_get_matches_from(&self.argv)
            .map_err(classify)?;
        let tree = surface.collect(&matches)?;
        debug!(keys = tree.len(), "collected flag values");
        Ok(tree)
    }
}

/// Flags derived from one shape, with the command that parses them.
struct FlagSurface {
    command: Command,
    defs: Vec<FlagDef>,
    table: FlagTable,
}

impl FlagSurface {
    fn build(shape: &Shape) -> StrataResult<Self> {
        let mut supported = Vec::new();
        for leaf in shape.leaves()? {
            if let Some(arity) = FlagArity::for_leaf(&leaf) {
                supported.push((leaf.path, arity));
                continue;
            }
            trace!(path = %leaf.path, kind = ?leaf.kind, "leaf has no flag surface");
        }

        let table = FlagTable::from_paths(supported.iter().map(|(path, _)| path))?;
        let defs: Vec<FlagDef> = supported
            .into_iter()
            .filter_map(|(path, arity)| {
                table
                    .name_for(&path)
                    .map(|name| FlagDef { name, arity })
            })
            .collect();

        let name = shape.title().unwrap_or(DEFAULT_COMMAND_NAME).to_owned();
        let mut command = Command::new(name)
            .no_binary_name(true)
            .args_override_self(true);
        if table.path_for(HELP_FLAG).is_some() {
            command = command.disable_help_flag(true);
        }
        command = command.args(defs.iter().map(FlagDef::to_arg));

        Ok(Self {
            command,
            defs,
            table,
        })
    }

    fn collect(&self, matches: &ArgMatches) -> StrataResult<Map<String, Value>> {
        let mut tree = Map::new();
        for def in &self.defs {
            let Some(value) = def.extract(matches)? else {
                continue;
            };
            if let Some(path) = self.table.path_for(&def.name) {
                insert_at_path(&mut tree, path, value);
            }
        }
        Ok(tree)
    }
}

/// Route clap failures: unknown arguments become [`StrataError::UnknownInput`],
/// everything else (including `--help`) stays a clap error.
fn classify(err: clap::Error) -> StrataError {
    if err.kind() != ErrorKind::UnknownArgument {
        return err.into();
    }
    let argument = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(argument)) => argument.clone(),
        _ => String::new(),
    };
    StrataError::UnknownInput { argument }
}
