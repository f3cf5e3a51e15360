//! Primary error enum for bootstrap configuration flows.

use figment::Error as FigmentError;
use thiserror::Error;

use crate::properties::PropertiesSyntaxError;

/// Errors that can occur while resolving bootstrap configuration.
///
/// A missing property resource is never reported through this type; the
/// resolver downgrades it to a warning. Everything here is fatal for startup.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BootstrapError {
    /// A property resource exists but could not be read.
    #[error("Property resource error in '{path}': {source}")]
    File {
        /// Path that triggered the failure.
        path: camino::Utf8PathBuf,
        /// Underlying error reported by the resource loader.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A property resource was read but its content is malformed.
    #[error("Malformed property resource '{path}': {source}")]
    Properties {
        /// Path of the offending resource.
        path: camino::Utf8PathBuf,
        /// Syntax error with its line number.
        #[source]
        source: PropertiesSyntaxError,
    },

    /// Structured extraction from a merged configuration failed.
    #[error("Failed to extract configuration: {0}")]
    Extraction(#[from] Box<FigmentError>),

    /// A property value could not be converted to the requested type.
    #[error("Invalid value for '{key}' ({value:?}): {message}")]
    InvalidValue {
        /// Key whose value failed to convert.
        key: String,
        /// Raw value as read from the configuration.
        value: String,
        /// Human-readable explanation of the conversion failure.
        message: String,
    },
}
