//! Trait-based conversions between external error types and `BootstrapError`.

use figment::Error as FigmentError;

use super::BootstrapError;

impl From<FigmentError> for BootstrapError {
    fn from(e: FigmentError) -> Self {
        Self::Extraction(e.into())
    }
}

impl From<BootstrapError> for FigmentError {
    /// Allow using `?` in tests that return `figment::Error`.
    fn from(e: BootstrapError) -> Self {
        match e {
            // Preserve the original Figment error (keeps kind, metadata, and sources).
            BootstrapError::Extraction(fe) => *fe,
            other => Self::from(other.to_string()),
        }
    }
}
