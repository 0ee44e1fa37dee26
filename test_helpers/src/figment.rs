//! Helpers for running configuration tests inside a `figment::Jail`.
//!
//! A jail gives each test a scratch working directory and an isolated
//! environment, so `mamlgen.toml` discovery and `MAMLGEN_*` variables never
//! leak between tests.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`] and returns the closure's output.
///
/// The jail is torn down once the closure completes, whether or not it
/// succeeded.
///
/// # Errors
///
/// Returns an error if the jail cannot be created or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|jail| {
        output = Some(f(jail)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any displayable error into a [`figment::Error`] so it can cross
/// the jail boundary.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used with map_err, which hands over the error by value"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
