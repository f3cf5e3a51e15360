//! Environment-aware cascading property resolution.
//!
//! Resolution reads two resources from the search path and merges them:
//!
//! 1. `<name>.properties`, the base layer;
//! 2. `<name>-<environment>.properties`, the overlay, whose keys shadow the
//!    base.
//!
//! The environment comes from [`ENVIRONMENT_SELECTOR_KEY`] in the
//! [`ConfigContext`] (default [`DEFAULT_ENVIRONMENT`]) and is published back
//! under [`DEPLOYMENT_ENVIRONMENT_KEY`]. `<name>` is the configured name unless
//! [`CLIENT_PROPS_KEY`] overrides it. Missing resources are logged and
//! skipped.
//!
//! [`ENVIRONMENT_SELECTOR_KEY`]: crate::ENVIRONMENT_SELECTOR_KEY
//! [`DEFAULT_ENVIRONMENT`]: crate::DEFAULT_ENVIRONMENT
//! [`DEPLOYMENT_ENVIRONMENT_KEY`]: crate::DEPLOYMENT_ENVIRONMENT_KEY
//! [`CLIENT_PROPS_KEY`]: crate::CLIENT_PROPS_KEY

use tracing::{debug, warn};

use crate::context::{
    ConfigContext, DEFAULT_ENVIRONMENT, DEPLOYMENT_ENVIRONMENT_KEY, global,
};
use crate::resource::{PropertyResource, ResourceLocator};
use crate::BootstrapResult;

mod merged;

pub use merged::{Layer, MergedConfiguration, ResourceSource};

/// Resolves cascaded property resources against a search path.
#[derive(Debug, Clone, Default)]
pub struct PropertyResolver {
    locator: ResourceLocator,
}

impl PropertyResolver {
    /// Creates a resolver searching `locator`.
    #[must_use]
    pub const fn new(locator: ResourceLocator) -> Self {
        Self { locator }
    }

    /// Search path used by this resolver.
    #[must_use]
    pub const fn locator(&self) -> &ResourceLocator {
        &self.locator
    }

    /// Resolves `config_name` against `context`.
    ///
    /// Writes the resolved environment to `context` under
    /// [`DEPLOYMENT_ENVIRONMENT_KEY`] before any resource is read, so it is
    /// published even when loading later fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use discovery_bootstrap::{
    ///     ConfigContext, DEPLOYMENT_ENVIRONMENT_KEY, PropertyResolver, ResourceLocator,
    /// };
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let resolver = PropertyResolver::new(
    ///     ResourceLocator::builder().add_root("no-such-dir").build(),
    /// );
    /// let mut ctx = ConfigContext::new();
    /// let merged = resolver.resolve(&mut ctx, "eureka-client")?;
    /// assert!(merged.is_empty());
    /// assert_eq!(merged.get(DEPLOYMENT_ENVIRONMENT_KEY), Some("test"));
    /// assert_eq!(ctx.environment(), Some("test"));
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a [`BootstrapError`](crate::BootstrapError) if a resource
    /// exists but cannot be read or is malformed. Missing resources are not
    /// errors.
    pub fn resolve(
        &self,
        context: &mut ConfigContext,
        config_name: &str,
    ) -> BootstrapResult<MergedConfiguration> {
        let environment = match context.selected_environment() {
            Some(env) => env.to_owned(),
            None => {
                debug!(
                    environment = DEFAULT_ENVIRONMENT,
                    "no environment selected; using default"
                );
                DEFAULT_ENVIRONMENT.to_owned()
            }
        };
        context.set_property(DEPLOYMENT_ENVIRONMENT_KEY, environment.as_str());

        let resource_name = context.client_props().unwrap_or(config_name).to_owned();
        debug!(%environment, resource = %resource_name, "resolving property resources");

        let base = self.load_layer(&base_file_name(&resource_name))?;
        let overlay = self.load_layer(&overlay_file_name(&resource_name, &environment))?;
        Ok(MergedConfiguration::merge(environment, base, overlay))
    }

    /// Resolves `config_name` against the process-wide context.
    ///
    /// The global context stays locked for the duration of the resolution.
    ///
    /// # Errors
    ///
    /// As for [`resolve`](Self::resolve).
    pub fn resolve_global(&self, config_name: &str) -> BootstrapResult<MergedConfiguration> {
        global::with_context(|ctx| self.resolve(ctx, config_name))
    }

    fn load_layer(&self, file_name: &str) -> BootstrapResult<Option<PropertyResource>> {
        let found = self.locator.locate(file_name)?;
        if found.is_none() {
            warn!(
                resource = file_name,
                "Cannot find the properties specified: {file_name}. This may be okay if there are \
                 other environment specific properties or the configuration is installed with a \
                 different mechanism."
            );
        }
        Ok(found)
    }
}

/// Resolves `config_name` from the current directory against the
/// process-wide context.
///
/// # Errors
///
/// As for [`PropertyResolver::resolve`].
pub fn resolve(config_name: &str) -> BootstrapResult<MergedConfiguration> {
    PropertyResolver::default().resolve_global(config_name)
}

/// File name of the base resource for `name`.
#[must_use]
pub fn base_file_name(name: &str) -> String {
    format!("{name}.properties")
}

/// File name of the overlay resource for `name` in `environment`.
#[must_use]
pub fn overlay_file_name(name: &str, environment: &str) -> String {
    format!("{name}-{environment}.properties")
}
