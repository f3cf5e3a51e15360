//! Bootstrap configuration for service-discovery clients.
//!
//! Two independent pieces are provided:
//!
//! - [`PropertyResolver`] locates `<name>.properties` and
//!   `<name>-<environment>.properties` on a [`ResourceLocator`] search path
//!   and merges them into a [`MergedConfiguration`], the environment-specific
//!   overlay winning. The environment is read from and published to a
//!   [`ConfigContext`].
//! - [`OptionalArgs`] gathers the optional extension points an embedding
//!   application may supply to a discovery client: health checks, a
//!   pre-registration hook, request filters, a transport client or factories, TLS
//!   configuration, a hostname verifier and event listeners.
//!
//! ```rust,no_run
//! use discovery_bootstrap::{ConfigContext, PropertyResolver, ResourceLocator};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut ctx = ConfigContext::from_env();
//! let resolver = PropertyResolver::new(ResourceLocator::builder().add_root("conf").build());
//! let merged = resolver.resolve(&mut ctx, "eureka-client")?;
//! println!("region = {}", merged.get_or("eureka.region", "us-east-1"));
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

mod context;
mod error;
mod events;
mod health;
mod optional_args;
pub mod properties;
mod resolver;
mod resource;
mod result_ext;
mod transport;

pub use context::{
    CLIENT_PROPS_KEY, ConfigContext, DEFAULT_ENVIRONMENT, DEPLOYMENT_ENVIRONMENT_KEY,
    ENVIRONMENT_SELECTOR_KEY, global,
};
pub use error::BootstrapError;
pub use events::{DiscoveryEvent, EventBus, EventListener, ListenerSet};
pub use health::{
    HealthCheckCallback, HealthCheckCallbackBridge, HealthCheckHandler, InstanceStatus,
    PreRegistrationHandler,
};
pub use optional_args::{OptionalArgs, Provider};
pub use resolver::{
    Layer, MergedConfiguration, PropertyResolver, ResourceSource, base_file_name,
    overlay_file_name, resolve,
};
pub use resource::{PropertyResource, ResourceLocator, ResourceLocatorBuilder};
pub use result_ext::BootstrapResultExt;
pub use transport::{
    HostnameVerifier, OutboundRequest, RequestInterceptor, TlsContext, TransportClient,
    TransportClientFactories, TransportClientFactory, TransportSettings,
};

/// Result type used throughout the crate; errors are shared so they can be
/// cloned into logs and aggregated reports.
pub type BootstrapResult<T> = Result<T, Arc<BootstrapError>>;
