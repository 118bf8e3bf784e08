//! Primary error enum for configuration loading flows.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Convenience alias for results produced by this crate.
pub type StrataResult<T> = Result<T, StrataError>;

/// Errors that can occur while resolving shapes, reading sources, or
/// constructing the target configuration.
///
/// Every variant is fatal to the `load` call that produced it.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StrataError {
    /// A `$ref` in the target's schema names no known definition.
    #[error("unresolved schema reference '{reference}'")]
    UnresolvedReference {
        /// The reference string as it appeared in the schema.
        reference: String,
    },

    /// Reference resolution revisited a definition already on the current
    /// resolution path.
    #[error("cyclic schema reference detected: {cycle}")]
    CyclicReference {
        /// Chain of definition names participating in the cycle.
        cycle: String,
    },

    /// Two leaf paths map onto the same external flag name.
    #[error("flag '--{flag}' is produced by both '{first}' and '{second}'")]
    FlagCollision {
        /// Flag name shared by both paths.
        flag: String,
        /// Dotted form of the first path.
        first: String,
        /// Dotted form of the second path.
        second: String,
    },

    /// An argument does not correspond to any leaf of the target shape.
    #[error("unexpected extra field: '{argument}'")]
    UnknownInput {
        /// The offending argument as supplied by the caller.
        argument: String,
    },

    /// Error parsing command-line arguments.
    #[error("Failed to parse command-line arguments: {0}")]
    CliParsing(#[from] Box<clap::Error>),

    /// A positional element of a fixed-length flag could not be parsed.
    #[error("invalid value for '--{flag}': {message}")]
    InvalidFlagValue {
        /// Flag whose value failed to parse.
        flag: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// An environment variable could not be read.
    #[error("environment variable '{variable}': {message}")]
    Environment {
        /// Name of the variable that failed.
        variable: String,
        /// Human-readable explanation of the failure.
        message: String,
    },

    /// Error originating from a configuration file.
    #[error("Configuration file error in '{path}': {source}")]
    File {
        /// Path that triggered the configuration failure.
        path: Utf8PathBuf,
        /// Underlying error reported by the file loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The merged mapping could not be turned into the target type.
    #[error("failed to construct configuration at '{path}': {source}")]
    Construction {
        /// Path of the offending field, `.` when the failure is at the root.
        path: String,
        /// Deserialisation failure reported by the target type.
        #[source]
        source: serde_json::Error,
    },
}

impl From<clap::Error> for StrataError {
    fn from(e: clap::Error) -> Self {
        Self::CliParsing(Box::new(e))
    }
}
