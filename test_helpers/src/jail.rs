//! Shared helpers for working with `figment::Jail` in tests.
//!
//! A jail changes the working directory to a fresh temporary directory and
//! restores both the directory and any environment variables it set once the
//! closure returns. Jails are serialised process-wide, so tests that touch
//! the working directory or the environment do not interleave.

use anyhow::{Result, anyhow};

/// Executes `f` inside a [`figment::Jail`], returning the closure's output.
///
/// # Errors
///
/// Returns an error if the jail initialisation fails or the closure returns a
/// [`figment::error::Error`].
pub fn with_jail<F, T>(f: F) -> Result<T>
where
    F: FnOnce(&mut figment::Jail) -> figment::error::Result<T>,
{
    let mut output = None;
    figment::Jail::try_with(|j| {
        output = Some(f(j)?);
        Ok(())
    })
    .map_err(|err| anyhow!(err.to_string()))?;
    output.ok_or_else(|| anyhow!("jail closure did not return a value"))
}

/// Converts any error implementing [`ToString`] into a [`figment::Error`].
///
/// Lets jailed closures apply `?` to crate results.
#[expect(
    clippy::needless_pass_by_value,
    reason = "used as a `map_err` adaptor, which hands over ownership"
)]
pub fn figment_error<E: ToString>(err: E) -> figment::Error {
    figment::Error::from(err.to_string())
}
