//! Constructors for `BootstrapError`.

use std::error::Error;
use std::sync::Arc;

use camino::Utf8Path;
use figment::Error as FigmentError;

use super::BootstrapError;
use crate::properties::PropertiesSyntaxError;

impl BootstrapError {
    /// Construct a [`BootstrapError::File`] for a resource path.
    ///
    /// # Examples
    ///
    /// ```
    /// use discovery_bootstrap::BootstrapError;
    ///
    /// let err = BootstrapError::file(
    ///     "conf/eureka-client.properties".as_ref(),
    ///     std::io::Error::other("permission denied"),
    /// );
    /// assert!(err.to_string().contains("eureka-client.properties"));
    /// ```
    #[must_use]
    pub fn file(path: &Utf8Path, err: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::File {
            path: path.to_path_buf(),
            source: err.into(),
        }
    }

    /// Construct a [`BootstrapError::Properties`] for a malformed resource.
    #[must_use]
    pub fn properties(path: &Utf8Path, source: PropertiesSyntaxError) -> Self {
        Self::Properties {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Construct an extraction error from a [`figment::Error`].
    #[must_use]
    pub fn extraction(source: FigmentError) -> Self {
        Self::Extraction(Box::new(source))
    }

    /// Construct an [`BootstrapError::InvalidValue`] wrapped in an [`Arc`].
    #[must_use]
    pub fn invalid_value_arc(
        key: impl Into<String>,
        value: impl Into<String>,
        message: impl ToString,
    ) -> Arc<Self> {
        Arc::new(Self::InvalidValue {
            key: key.into(),
            value: value.into(),
            message: message.to_string(),
        })
    }
}
