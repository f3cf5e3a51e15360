//! Error types produced while bootstrapping discovery-client configuration.

mod constructors;
mod conversions;
mod types;

pub use types::BootstrapError;
