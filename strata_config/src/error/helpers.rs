//! Helpers for classifying and routing external errors.

use clap::{Error as ClapError, error::ErrorKind};

use super::StrataError;

/// Returns `true` when a [`clap::Error`] corresponds to `--help` or
/// `--version`.
///
/// Clap surfaces these requests via specialised [`ErrorKind`] variants so
/// entry points can delegate to [`clap::Error::exit`] and preserve the
/// expected zero exit status.
#[must_use]
pub fn is_display_request(err: &ClapError) -> bool {
    matches!(
        err.kind(),
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
    )
}

impl StrataError {
    /// Returns the underlying clap error when this is a `--help` request.
    ///
    /// ```
    /// use strata_config::StrataError;
    /// let err = StrataError::UnknownInput { argument: "--nope".into() };
    /// assert!(err.display_request().is_none());
    /// ```
    #[must_use]
    pub fn display_request(&self) -> Option<&ClapError> {
        match self {
            Self::CliParsing(err) if is_display_request(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
