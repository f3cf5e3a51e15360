//! Reading `.properties` resources.
//!
//! The format is line oriented: `key=value`, `key: value` or `key value`,
//! with `#` and `!` comment lines, backslash line continuation and
//! backslash escapes (including `\uXXXX`). Later duplicates of a key replace
//! earlier ones.

use std::collections::BTreeMap;

use thiserror::Error;

mod parser;

pub use parser::parse;

/// Ordered key/value pairs read from a single resource.
pub type PropertyMap = BTreeMap<String, String>;

/// Malformed content found while parsing a `.properties` resource.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct PropertiesSyntaxError {
    line: usize,
    message: String,
}

impl PropertiesSyntaxError {
    /// Creates an error for the 1-based logical `line`.
    #[must_use]
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }

    /// Line on which the offending logical entry starts.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Description of the problem.
    #[must_use]
    pub const fn message(&self) -> &str {
        self.message.as_str()
    }
}
