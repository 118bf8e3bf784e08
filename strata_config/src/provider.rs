//! The contract every configuration source implements.

use camino::Utf8Path;
use serde_json::{Map, Value};

use crate::{Layer, Provenance, Shape, StrataResult};

/// A source of configuration data.
///
/// Providers are stateless across invocations: [`Provider::provide`] maps the
/// target's shape to a partial result mapping, which need not cover every
/// leaf. Priority among providers is decided by the caller's ordering.
pub trait Provider {
    /// Kind of source this provider reads.
    fn provenance(&self) -> Provenance;

    /// File the provider reads, if any.
    fn source_path(&self) -> Option<&Utf8Path> {
        None
    }

    /// Produce this provider's partial result mapping for `shape`.
    ///
    /// # Errors
    ///
    /// Returns a [`crate::StrataError`] when the source cannot be read or
    /// parsed, or when it holds input that matches no leaf of `shape`.
    fn provide(&self, shape: &Shape) -> StrataResult<Map<String, Value>>;

    /// Run the provider and tag its result with provenance.
    ///
    /// # Errors
    ///
    /// Propagates any failure from [`Provider::provide`].
    fn layer(&self, shape: &Shape) -> StrataResult<Layer> {
        let value = self.provide(shape)?;
        Ok(Layer::new(
            self.provenance(),
            value,
            self.source_path().map(Utf8Path::to_path_buf),
        ))
    }
}

impl<P: Provider + ?Sized> Provider for Box<P> {
    fn provenance(&self) -> Provenance {
        (**self).provenance()
    }

    fn source_path(&self) -> Option<&Utf8Path> {
        (**self).source_path()
    }

    fn provide(&self, shape: &Shape) -> StrataResult<Map<String, Value>> {
        (**self).provide(shape)
    }
}

/// Provider returning a fixed mapping, typically application defaults.
///
/// ```
/// use serde_json::json;
/// use strata_config::{MappingProvider, Provider, Shape};
///
/// let defaults = MappingProvider::new(json!({"port": 5671}))?;
/// let shape = Shape::from_schema(json!({"type": "object"}));
/// assert_eq!(json!(defaults.provide(&shape)?), json!({"port": 5671}));
/// # Ok::<_, strata_config::StrataError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MappingProvider {
    value: Map<String, Value>,
}

impl MappingProvider {
    /// Wrap a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Construction`] when `value` is not an
    /// object.
    pub fn new(value: Value) -> StrataResult<Self> {
        match value {
            Value::Object(map) => Ok(Self { value: map }),
            other => Err(crate::StrataError::Construction {
                path: ".".to_owned(),
                source: serde::de::Error::custom(format!(
                    "defaults must be a mapping, found {other}"
                )),
            }),
        }
    }

    /// Serialise `defaults` into a mapping provider.
    ///
    /// # Errors
    ///
    /// Returns [`crate::StrataError::Construction`] when `defaults` does not
    /// serialise to an object.
    pub fn from_serialize<T: serde::Serialize>(defaults: &T) -> StrataResult<Self> {
        let value = serde_json::to_value(defaults).map_err(|source| {
            crate::StrataError::Construction {
                path: ".".to_owned(),
                source,
            }
        })?;
        Self::new(value)
    }
}

impl From<Map<String, Value>> for MappingProvider {
    fn from(value: Map<String, Value>) -> Self {
        Self { value }
    }
}

impl Provider for MappingProvider {
    fn provenance(&self) -> Provenance {
        Provenance::Defaults
    }

    fn provide(&self, _shape: &Shape) -> StrataResult<Map<String, Value>> {
        Ok(self.value.clone())
    }
}
