//! Extensions for mapping foreign errors to `StrataResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| StrataError::File { .. })`
//! patterns in the file providers.
//!
//! # Examples
//!
//! ```
//! use camino::Utf8Path;
//! use strata_config::{StrataError, StrataResult, StrataResultExt};
//!
//! fn read(path: &Utf8Path) -> StrataResult<String> {
//!     std::fs::read_to_string(path).for_file(path)
//! }
//!
//! let err = read(Utf8Path::new("does/not/exist.json")).unwrap_err();
//! assert!(matches!(err, StrataError::File { .. }));
//! ```

use std::error::Error;

use camino::Utf8Path;

use crate::{StrataError, StrataResult};

/// Attach file context to any boxed-error-compatible failure.
pub trait StrataResultExt<T> {
    /// Convert `Result<T, E>` into `StrataResult<T>` as a
    /// [`StrataError::File`] for `path`.
    ///
    /// # Errors
    ///
    /// Propagates the original error wrapped with the file path.
    fn for_file(self, path: &Utf8Path) -> StrataResult<T>;
}

impl<T, E> StrataResultExt<T> for Result<T, E>
where
    E: Into<Box<dyn Error + Send + Sync>>,
{
    fn for_file(self, path: &Utf8Path) -> StrataResult<T> {
        self.map_err(|e| file_error(path, e))
    }
}

/// Construct a [`StrataError::File`] for a configuration path.
pub(crate) fn file_error(
    path: &Utf8Path,
    err: impl Into<Box<dyn Error + Send + Sync>>,
) -> StrataError {
    StrataError::File {
        path: path.to_path_buf(),
        source: err.into(),
    }
}

pub(crate) fn invalid_data(path: &Utf8Path, msg: impl Into<String>) -> StrataError {
    file_error(
        path,
        std::io::Error::new(std::io::ErrorKind::InvalidData, msg.into()),
    )
}
