//! Extensions for mapping errors to `BootstrapResult` concisely.
//!
//! These helpers reduce repetitive `.map_err(|e| Arc::new(e.into()))`
//! patterns when converting external error types into the crate's
//! `BootstrapResult<T>` alias (`Result<T, Arc<BootstrapError>>`).
//!
//! # Examples
//!
//! ```
//! use discovery_bootstrap::{BootstrapResult, BootstrapResultExt};
//!
//! fn extract(figment: &figment::Figment) -> BootstrapResult<String> {
//!     figment.extract_inner::<String>("eureka.region").into_bootstrap()
//! }
//! # let figment = figment::Figment::from(figment::providers::Serialized::default(
//! #     "eureka.region",
//! #     "us-east-1",
//! # ));
//! # assert_eq!(extract(&figment).ok().as_deref(), Some("us-east-1"));
//! ```

use std::sync::Arc;

use crate::{BootstrapError, BootstrapResult};

/// Generic extension for mapping any `Result<T, E>` with
/// `E: Into<BootstrapError>` into a `BootstrapResult<T>`.
pub trait BootstrapResultExt<T, E> {
    /// Convert `Result<T, E>` into `BootstrapResult<T>` using `Into<BootstrapError>`.
    ///
    /// # Errors
    ///
    /// Propagates the original error after conversion into `Arc<BootstrapError>`.
    fn into_bootstrap(self) -> BootstrapResult<T>;
}

impl<T, E> BootstrapResultExt<T, E> for Result<T, E>
where
    E: Into<BootstrapError>,
{
    fn into_bootstrap(self) -> BootstrapResult<T> {
        self.map_err(|e| Arc::new(e.into()))
    }
}
