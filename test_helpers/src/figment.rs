//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail serialises access to the process environment, runs its closure in a
//! fresh temporary working directory, and restores every variable it set once
//! the closure returns.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], propagating the closure's
/// `anyhow` result.
///
/// ```
/// use strata_config_test_helpers::figment::with_jail;
///
/// with_jail(|j| {
///     j.set_env("STRATA_EXAMPLE", "1");
///     anyhow::ensure!(std::env::var("STRATA_EXAMPLE")? == "1");
///     Ok(())
/// })?;
/// # Ok::<_, anyhow::Error>(())
/// ```
///
/// # Errors
///
/// Returns an error if the jail cannot be set up or the closure fails.
pub fn with_jail<F>(f: F) -> Result<()>
where
    F: FnOnce(&mut figment::Jail) -> Result<()>,
{
    figment::Jail::try_with(|j| f(j).map_err(|err| figment::Error::from(err.to_string())))
        .map_err(|err| anyhow!(err.to_string()))
}

/// Converts a [`figment::Error`] raised by jail setup calls into an
/// `anyhow::Error`.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used directly with `map_err`, which hands over ownership"
)]
pub fn to_anyhow(err: figment::Error) -> anyhow::Error {
    anyhow!(err.to_string())
}
