//! Process configuration shared across bootstrap components.
//!
//! [`ConfigContext`] is the store the resolver reads its selector keys from
//! and writes the resolved deployment environment back into. Create one at
//! startup, thread it through whatever needs it, and stop mutating it once
//! the discovery client is running. Code that cannot be handed a context can
//! fall back to the process-wide instance in [`global`].

use std::collections::BTreeMap;

pub mod global;

/// Key selecting the deployment environment.
pub const ENVIRONMENT_SELECTOR_KEY: &str = "eureka.environment";

/// Key under which the resolved deployment environment is published.
pub const DEPLOYMENT_ENVIRONMENT_KEY: &str = "archaius.deployment.environment";

/// Key overriding the base name of the property resources.
pub const CLIENT_PROPS_KEY: &str = "eureka.client.props";

/// Environment used when no selector is set.
///
/// Kept for compatibility with existing deployments; production systems
/// should set [`ENVIRONMENT_SELECTOR_KEY`] explicitly.
pub const DEFAULT_ENVIRONMENT: &str = "test";

const ENV_SEEDED_KEYS: [&str; 2] = [ENVIRONMENT_SELECTOR_KEY, CLIENT_PROPS_KEY];

/// String-keyed configuration store passed through startup.
///
/// # Examples
///
/// ```
/// use discovery_bootstrap::{ConfigContext, ENVIRONMENT_SELECTOR_KEY};
///
/// let ctx = ConfigContext::new().with_property(ENVIRONMENT_SELECTOR_KEY, "prod");
/// assert_eq!(ctx.selected_environment(), Some("prod"));
/// assert_eq!(ctx.environment(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigContext {
    properties: BTreeMap<String, String>,
}

impl ConfigContext {
    /// Creates an empty context.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            properties: BTreeMap::new(),
        }
    }

    /// Creates a context seeded from process environment variables.
    ///
    /// Each consumed key is looked up under its upper-cased name with `.`
    /// replaced by `_`: `EUREKA_ENVIRONMENT` and `EUREKA_CLIENT_PROPS`.
    /// Unset and non UTF-8 variables are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut ctx = Self::new();
        for key in ENV_SEEDED_KEYS {
            if let Ok(value) = std::env::var(env_var_name(key)) {
                ctx.set_property(key, value);
            }
        }
        ctx
    }

    /// Returns the context with `key` set to `value`.
    #[must_use]
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_property(key, value);
        self
    }

    /// Sets `key` to `value`, returning the previous value.
    pub fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.properties.insert(key.into(), value.into())
    }

    /// Looks up `key`.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    /// Environment requested through [`ENVIRONMENT_SELECTOR_KEY`].
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn selected_environment(&self) -> Option<&str> {
        self.property(ENVIRONMENT_SELECTOR_KEY)
            .map(str::trim)
            .filter(|env| !env.is_empty())
    }

    /// Resource base name requested through [`CLIENT_PROPS_KEY`].
    ///
    /// Surrounding whitespace is dropped and blank values count as unset.
    #[must_use]
    pub fn client_props(&self) -> Option<&str> {
        self.property(CLIENT_PROPS_KEY)
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Deployment environment published by a previous resolution, if any.
    #[must_use]
    pub fn environment(&self) -> Option<&str> {
        self.property(DEPLOYMENT_ENVIRONMENT_KEY)
    }

    /// Iterates over all properties in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Maps a dotted property key to its environment variable name.
fn env_var_name(key: &str) -> String {
    key.replace('.', "_").to_ascii_uppercase()
}
