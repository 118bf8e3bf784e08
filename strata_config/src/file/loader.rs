//! Reading configuration files from disk.

use std::io::ErrorKind;

use camino::Utf8Path;
use serde_json::{Map, Value};
use tracing::debug;

use super::FileFormat;
use super::parser::parse_document;
use crate::result_ext::invalid_data;
use crate::{StrataResult, StrataResultExt};

/// Read and parse `path`, returning its top-level mapping.
///
/// A missing file yields an empty mapping when `must_exist` is false. A
/// document that is empty (`null`) also yields an empty mapping.
///
/// # Errors
///
/// Returns [`crate::StrataError::File`] when the file cannot be read, fails
/// to parse, or does not hold a mapping at the top level.
pub(super) fn load_mapping(
    path: &Utf8Path,
    format: FileFormat,
    must_exist: bool,
) -> StrataResult<Map<String, Value>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == ErrorKind::NotFound && !must_exist => {
            debug!(%path, "optional configuration file not found; skipping");
            return Ok(Map::new());
        }
        Err(err) => return Err(err).for_file(path),
    };
    let document = parse_document(path, format, &data)?;
    let mapping = match document {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            return Err(invalid_data(
                path,
                format!("expected a mapping at the top level, found {}", describe(&other)),
            ));
        }
    };
    debug!(%path, ?format, keys = mapping.len(), "loaded configuration file");
    Ok(mapping)
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}
