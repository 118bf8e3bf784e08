//! Layered, strongly typed configuration loading.
//!
//! A target type describes its own shape through [`schemars::JsonSchema`] and
//! is built through [`serde::Deserialize`]. Configuration is gathered from an
//! ordered list of [`Provider`]s (command-line flags, environment variables,
//! files, in-memory defaults), each contributing a partial mapping. The
//! partial mappings are merged from lowest to highest priority and the result
//! is deserialised into the target.
//!
//! ```no_run
//! use schemars::JsonSchema;
//! use serde::Deserialize;
//! use strata_config::{EnvProvider, FileProvider, FlagProvider, load};
//!
//! #[derive(Debug, Deserialize, JsonSchema)]
//! struct AppConfig {
//!     host: String,
//!     port: u16,
//!     #[serde(default)]
//!     tags: Vec<String>,
//! }
//!
//! let flags = FlagProvider::from_env();
//! let env = EnvProvider::new().prefixed("APP_");
//! let file = FileProvider::toml("app.toml").must_exist(false);
//! let cfg: AppConfig = load(&[&flags, &env, &file])?;
//! # Ok::<_, strata_config::StrataError>(())
//! ```

mod env;
mod error;
mod file;
mod flags;
mod layer;
mod load;
mod merge;
mod provider;
mod result_ext;
mod shape;
mod tree;

pub use env::EnvProvider;
pub use error::{StrataError, StrataResult, is_display_request};
pub use file::{FileFormat, FileProvider};
pub use flags::FlagProvider;
pub use layer::{Layer, Provenance};
pub use load::{Loader, compose_layers, construct, load, load_with_strategy};
pub use merge::{MergeStrategy, OverrideStrategy, merge, merge_into, merge_layers};
pub use provider::{MappingProvider, Provider};
pub use result_ext::StrataResultExt;
pub use shape::{ArrayItems, Leaf, LeafKind, LeafPath, Model, ScalarKind, ScalarParseError, Shape};
pub use tree::{FlagTable, build_tree, insert_at_path, path_to_flag_name};
