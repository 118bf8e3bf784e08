//! File providers for JSON, TOML, YAML and JSON5 documents.
//!
//! A file provider parses one document wholesale and returns its top-level
//! mapping verbatim; the target shape is not consulted. The document is
//! assumed to be nested the way the target type is.

mod loader;
mod parser;
#[cfg(feature = "yaml")]
mod yaml;

use camino::{Utf8Path, Utf8PathBuf};
use serde_json::{Map, Value};

use crate::{Provenance, Provider, Shape, StrataResult};

/// Document syntax understood by a [`FileProvider`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum FileFormat {
    /// JSON, always available.
    Json,
    /// TOML, behind the `toml` feature (on by default).
    Toml,
    /// YAML 1.2 with strict booleans, behind the `yaml` feature.
    Yaml,
    /// JSON5, behind the `json5` feature.
    Json5,
}

impl FileFormat {
    /// Pick a format from the extension of `path`.
    ///
    /// `json`, `json5`, `yaml` and `yml` select their formats; anything else,
    /// including no extension, is treated as TOML.
    ///
    /// ```
    /// use camino::Utf8Path;
    /// use strata_config::FileFormat;
    ///
    /// assert_eq!(FileFormat::from_extension(Utf8Path::new("app.YML")), FileFormat::Yaml);
    /// assert_eq!(FileFormat::from_extension(Utf8Path::new(".apprc")), FileFormat::Toml);
    /// ```
    #[must_use]
    pub fn from_extension(path: &Utf8Path) -> Self {
        let ext = path.extension().map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            Some("json5") => Self::Json5,
            Some("yaml" | "yml") => Self::Yaml,
            _ => Self::Toml,
        }
    }
}

/// Provider reading one configuration file.
///
/// ```no_run
/// use strata_config::{FileProvider, Provider, Shape};
/// use serde_json::json;
///
/// let file = FileProvider::json("config.json").must_exist(false);
/// let partial = file.provide(&Shape::from_schema(json!({})))?;
/// # Ok::<_, strata_config::StrataError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileProvider {
    path: Utf8PathBuf,
    format: FileFormat,
    must_exist: bool,
}

impl FileProvider {
    /// Read `path` as `format`. The file must exist unless
    /// [`FileProvider::must_exist`] relaxes it.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>, format: FileFormat) -> Self {
        Self {
            path: path.into(),
            format,
            must_exist: true,
        }
    }

    /// Read `path` as JSON.
    #[must_use]
    pub fn json(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path, FileFormat::Json)
    }

    /// Read `path` as TOML.
    #[must_use]
    pub fn toml(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path, FileFormat::Toml)
    }

    /// Read `path` as YAML.
    #[must_use]
    pub fn yaml(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path, FileFormat::Yaml)
    }

    /// Read `path` as JSON5.
    #[must_use]
    pub fn json5(path: impl Into<Utf8PathBuf>) -> Self {
        Self::new(path, FileFormat::Json5)
    }

    /// Read `path` in the format implied by its extension.
    #[must_use]
    pub fn from_extension(path: impl Into<Utf8PathBuf>) -> Self {
        let owned = path.into();
        let format = FileFormat::from_extension(&owned);
        Self::new(owned, format)
    }

    /// Whether a missing file is an error (`true`, the default) or an empty
    /// contribution.
    #[must_use]
    pub const fn must_exist(mut self, required: bool) -> Self {
        self.must_exist = required;
        self
    }

    /// Path this provider reads.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Format this provider parses.
    #[must_use]
    pub const fn format(&self) -> FileFormat {
        self.format
    }
}

impl Provider for FileProvider {
    fn provenance(&self) -> Provenance {
        Provenance::File
    }

    fn source_path(&self) -> Option<&Utf8Path> {
        Some(&self.path)
    }

    fn provide(&self, _shape: &Shape) -> StrataResult<Map<String, Value>> {
        loader::load_mapping(&self.path, self.format, self.must_exist)
    }
}
