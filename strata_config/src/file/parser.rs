//! Format-specific parsing of configuration documents.

use camino::Utf8Path;
use serde_json::Value;

use super::FileFormat;
use crate::{StrataResult, StrataResultExt};

#[cfg(not(all(feature = "toml", feature = "yaml", feature = "json5")))]
use crate::result_ext::file_error;

/// Parse `data` as `format` into a generic document.
///
/// # Errors
///
/// Returns [`crate::StrataError::File`] when `data` is malformed or the
/// feature providing `format` is disabled.
pub(super) fn parse_document(path: &Utf8Path, format: FileFormat, data: &str) -> StrataResult<Value> {
    match format {
        FileFormat::Json => serde_json::from_str(data).for_file(path),
        FileFormat::Toml => parse_toml(path, data),
        FileFormat::Yaml => parse_yaml(path, data),
        FileFormat::Json5 => parse_json5(path, data),
    }
}

#[cfg(feature = "toml")]
fn parse_toml(path: &Utf8Path, data: &str) -> StrataResult<Value> {
    toml::from_str(data).for_file(path)
}

#[cfg(not(feature = "toml"))]
fn parse_toml(path: &Utf8Path, _data: &str) -> StrataResult<Value> {
    Err(disabled(path, "toml"))
}

#[cfg(feature = "yaml")]
fn parse_yaml(path: &Utf8Path, data: &str) -> StrataResult<Value> {
    super::yaml::from_str(data).for_file(path)
}

#[cfg(not(feature = "yaml"))]
fn parse_yaml(path: &Utf8Path, _data: &str) -> StrataResult<Value> {
    Err(disabled(path, "yaml"))
}

#[cfg(feature = "json5")]
fn parse_json5(path: &Utf8Path, data: &str) -> StrataResult<Value> {
    json5::from_str(data).for_file(path)
}

#[cfg(not(feature = "json5"))]
fn parse_json5(path: &Utf8Path, _data: &str) -> StrataResult<Value> {
    Err(disabled(path, "json5"))
}

#[cfg(not(all(feature = "toml", feature = "yaml", feature = "json5")))]
fn disabled(path: &Utf8Path, feature: &str) -> crate::StrataError {
    file_error(
        path,
        std::io::Error::other(format!(
            "{feature} feature disabled: enable the '{feature}' feature to support this file format"
        )),
    )
}
