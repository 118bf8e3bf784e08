//! Layer metadata attached to each provider's partial mapping.

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

/// Kind of source a layer came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Provenance {
    /// Values supplied in memory by the caller.
    Defaults,
    /// Values loaded from a configuration file.
    File,
    /// Values collected from environment variables.
    Environment,
    /// Values supplied as command-line flags.
    Flags,
}

/// Partial result mapping produced by one provider.
#[derive(Clone, Debug, PartialEq)]
pub struct Layer {
    provenance: Provenance,
    value: Map<String, Value>,
    path: Option<Utf8PathBuf>,
}

impl Layer {
    /// Construct a layer with explicit provenance and optional source path.
    #[must_use]
    pub const fn new(
        provenance: Provenance,
        value: Map<String, Value>,
        path: Option<Utf8PathBuf>,
    ) -> Self {
        Self {
            provenance,
            value,
            path,
        }
    }

    /// Construct a layer originating from in-memory defaults.
    #[must_use]
    pub const fn defaults(value: Map<String, Value>) -> Self {
        Self::new(Provenance::Defaults, value, None)
    }

    /// Construct a layer originating from a configuration file.
    #[must_use]
    pub const fn file(value: Map<String, Value>, path: Utf8PathBuf) -> Self {
        Self::new(Provenance::File, value, Some(path))
    }

    /// Construct a layer originating from environment variables.
    #[must_use]
    pub const fn environment(value: Map<String, Value>) -> Self {
        Self::new(Provenance::Environment, value, None)
    }

    /// Construct a layer originating from command-line flags.
    #[must_use]
    pub const fn flags(value: Map<String, Value>) -> Self {
        Self::new(Provenance::Flags, value, None)
    }

    /// Returns the provenance of the layer.
    #[must_use]
    pub const fn provenance(&self) -> Provenance {
        self.provenance
    }

    /// Returns the associated path if this layer was sourced from a file.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8Path> {
        self.path.as_deref()
    }

    /// Borrow the partial mapping.
    #[must_use]
    pub const fn value(&self) -> &Map<String, Value> {
        &self.value
    }

    /// Consume the layer, returning its partial mapping.
    #[must_use]
    pub fn into_value(self) -> Map<String, Value> {
        self.value
    }
}
