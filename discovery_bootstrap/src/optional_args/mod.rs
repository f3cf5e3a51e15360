//! Optional extension points supplied by the embedding application.
//!
//! [`OptionalArgs`] collects, for each extension point, either a value or
//! nothing. It is filled in once while the discovery client is being
//! constructed and only read afterwards. Setters take `&mut self`, so sharing
//! one instance between threads that still register listeners needs external
//! synchronisation (a `Mutex`, or finishing setup before sharing an `Arc`).

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::events::{EventBus, EventBusForwarder, EventListener, ListenerSet};
use crate::health::{
    HealthCheckCallback, HealthCheckCallbackBridge, HealthCheckHandler, PreRegistrationHandler,
};
use crate::transport::{
    HostnameVerifier, RequestInterceptor, TlsContext, TransportClient, TransportClientFactories,
    TransportClientFactory, TransportSettings,
};

mod provider;

pub use provider::Provider;

static NO_LISTENERS: ListenerSet = ListenerSet::new();

/// Independently optional extension points for a discovery client.
///
/// Every getter has a defined "absent" answer; nothing here fails or
/// validates.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use discovery_bootstrap::{DiscoveryEvent, EventListener, OptionalArgs};
///
/// struct Log;
/// impl EventListener for Log {
///     fn on_event(&self, _event: &DiscoveryEvent) {}
/// }
///
/// let mut args = OptionalArgs::new();
/// assert!(args.tls_context().is_none());
/// args.add_event_listeners([Arc::new(Log) as Arc<dyn EventListener>]);
/// args.add_event_listeners([Arc::new(Log) as Arc<dyn EventListener>]);
/// assert_eq!(args.event_listeners().len(), 2);
/// ```
#[derive(Clone, Default)]
pub struct OptionalArgs {
    health_check_callback_provider: Option<Provider<dyn HealthCheckCallback>>,
    health_check_handler_provider: Option<Provider<dyn HealthCheckHandler>>,
    pre_registration_handler: Option<Arc<dyn PreRegistrationHandler>>,
    additional_filters: Option<Vec<Arc<dyn RequestInterceptor>>>,
    transport_client: Option<Arc<dyn TransportClient>>,
    transport_client_factory: Option<Arc<dyn TransportClientFactory>>,
    transport_client_factories: Option<Arc<dyn TransportClientFactories>>,
    tls_context: Option<TlsContext>,
    hostname_verifier: Option<Arc<dyn HostnameVerifier>>,
    event_listeners: Option<ListenerSet>,
}

impl OptionalArgs {
    /// Creates a set with every extension point unset.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            health_check_callback_provider: None,
            health_check_handler_provider: None,
            pre_registration_handler: None,
            additional_filters: None,
            transport_client: None,
            transport_client_factory: None,
            transport_client_factories: None,
            tls_context: None,
            hostname_verifier: None,
            event_listeners: None,
        }
    }

    /// Sets the legacy health-check callback provider.
    pub fn set_health_check_callback_provider(
        &mut self,
        provider: Provider<dyn HealthCheckCallback>,
    ) -> &mut Self {
        self.health_check_callback_provider = Some(provider);
        self
    }

    /// Legacy health-check callback provider, if set.
    #[must_use]
    pub const fn health_check_callback_provider(&self) -> Option<&Provider<dyn HealthCheckCallback>> {
        self.health_check_callback_provider.as_ref()
    }

    /// Sets the health-check handler provider.
    pub fn set_health_check_handler_provider(
        &mut self,
        provider: Provider<dyn HealthCheckHandler>,
    ) -> &mut Self {
        self.health_check_handler_provider = Some(provider);
        self
    }

    /// Health-check handler provider, if set.
    #[must_use]
    pub const fn health_check_handler_provider(&self) -> Option<&Provider<dyn HealthCheckHandler>> {
        self.health_check_handler_provider.as_ref()
    }

    /// Handler to use for health checks.
    ///
    /// A configured handler provider wins; otherwise a configured callback
    /// provider is adapted through [`HealthCheckCallbackBridge`].
    #[must_use]
    pub fn effective_health_check_handler(&self) -> Option<Arc<dyn HealthCheckHandler>> {
        if let Some(provider) = &self.health_check_handler_provider {
            return Some(provider.get());
        }
        self.health_check_callback_provider.as_ref().map(|provider| {
            Arc::new(HealthCheckCallbackBridge::new(Some(provider.get())))
                as Arc<dyn HealthCheckHandler>
        })
    }

    /// Sets the hook run before registration.
    pub fn set_pre_registration_handler(
        &mut self,
        handler: Arc<dyn PreRegistrationHandler>,
    ) -> &mut Self {
        self.pre_registration_handler = Some(handler);
        self
    }

    /// Hook run before registration, if set.
    #[must_use]
    pub const fn pre_registration_handler(&self) -> Option<&Arc<dyn PreRegistrationHandler>> {
        self.pre_registration_handler.as_ref()
    }

    /// Replaces the additional request filters.
    pub fn set_additional_filters<I>(&mut self, filters: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn RequestInterceptor>>,
    {
        self.additional_filters = Some(filters.into_iter().collect());
        self
    }

    /// Additional request filters in order, if set.
    #[must_use]
    pub fn additional_filters(&self) -> Option<&[Arc<dyn RequestInterceptor>]> {
        self.additional_filters.as_deref()
    }

    /// Sets a ready-built transport client for the registry connection.
    pub fn set_transport_client(&mut self, client: Arc<dyn TransportClient>) -> &mut Self {
        self.transport_client = Some(client);
        self
    }

    /// Ready-built transport client, if set.
    #[must_use]
    pub const fn transport_client(&self) -> Option<&Arc<dyn TransportClient>> {
        self.transport_client.as_ref()
    }

    /// Sets the transport client factory.
    pub fn set_transport_client_factory(
        &mut self,
        factory: Arc<dyn TransportClientFactory>,
    ) -> &mut Self {
        self.transport_client_factory = Some(factory);
        self
    }

    /// Transport client factory, if set.
    #[must_use]
    pub const fn transport_client_factory(&self) -> Option<&Arc<dyn TransportClientFactory>> {
        self.transport_client_factory.as_ref()
    }

    /// Sets the transport client factory registry.
    pub fn set_transport_client_factories(
        &mut self,
        factories: Arc<dyn TransportClientFactories>,
    ) -> &mut Self {
        self.transport_client_factories = Some(factories);
        self
    }

    /// Transport client factory registry exactly as last set.
    #[must_use]
    pub const fn transport_client_factories(&self) -> Option<&Arc<dyn TransportClientFactories>> {
        self.transport_client_factories.as_ref()
    }

    /// Sets the TLS client configuration.
    pub fn set_tls_context(&mut self, tls_context: TlsContext) -> &mut Self {
        self.tls_context = Some(tls_context);
        self
    }

    /// TLS client configuration; `None` means the transport's platform
    /// defaults apply.
    #[must_use]
    pub const fn tls_context(&self) -> Option<&TlsContext> {
        self.tls_context.as_ref()
    }

    /// Sets the hostname verifier.
    pub fn set_hostname_verifier(&mut self, verifier: Arc<dyn HostnameVerifier>) -> &mut Self {
        self.hostname_verifier = Some(verifier);
        self
    }

    /// Hostname verifier; `None` means the transport's default checks apply.
    #[must_use]
    pub const fn hostname_verifier(&self) -> Option<&Arc<dyn HostnameVerifier>> {
        self.hostname_verifier.as_ref()
    }

    /// Adds `listeners` to the listener set.
    ///
    /// Repeated calls accumulate; a listener instance already registered is
    /// not added twice.
    pub fn add_event_listeners<I>(&mut self, listeners: I) -> &mut Self
    where
        I: IntoIterator<Item = Arc<dyn EventListener>>,
    {
        let set = self.event_listeners.get_or_insert_with(ListenerSet::new);
        let before = set.len();
        set.extend(listeners);
        trace!(added = set.len() - before, total = set.len(), "registered event listeners");
        self
    }

    /// Registers one listener forwarding every event to `bus`.
    ///
    /// Listeners already registered are kept.
    pub fn set_event_bus(&mut self, bus: Arc<dyn EventBus>) -> &mut Self {
        let set = self.event_listeners.get_or_insert_with(ListenerSet::new);
        set.insert(Arc::new(EventBusForwarder::new(bus)));
        trace!(total = set.len(), "registered event bus forwarder");
        self
    }

    /// Registered listeners; empty when none were registered.
    #[must_use]
    pub const fn event_listeners(&self) -> &ListenerSet {
        match &self.event_listeners {
            Some(set) => set,
            None => &NO_LISTENERS,
        }
    }

    /// Borrowed view of the transport-related wiring.
    #[must_use]
    pub fn transport_settings(&self) -> TransportSettings<'_> {
        TransportSettings {
            additional_filters: self.additional_filters().unwrap_or_default(),
            tls_context: self.tls_context.as_ref(),
            hostname_verifier: self.hostname_verifier.as_ref(),
        }
    }

    /// Transport client factory to use.
    ///
    /// An explicit factory wins; otherwise the registry, if set, builds one
    /// from [`transport_settings`](Self::transport_settings). `None` leaves
    /// the choice of default to the embedding application.
    #[must_use]
    pub fn resolve_transport_client_factory(&self) -> Option<Arc<dyn TransportClientFactory>> {
        self.transport_client_factory.clone().or_else(|| {
            self.transport_client_factories
                .as_ref()
                .map(|registry| registry.new_transport_client_factory(&self.transport_settings()))
        })
    }
}

impl fmt::Debug for OptionalArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionalArgs")
            .field(
                "health_check_callback_provider",
                &self.health_check_callback_provider.is_some(),
            )
            .field(
                "health_check_handler_provider",
                &self.health_check_handler_provider.is_some(),
            )
            .field("pre_registration_handler", &self.pre_registration_handler.is_some())
            .field(
                "additional_filters",
                &self.additional_filters.as_ref().map(Vec::len),
            )
            .field("transport_client", &self.transport_client.is_some())
            .field("transport_client_factory", &self.transport_client_factory.is_some())
            .field(
                "transport_client_factories",
                &self.transport_client_factories.is_some(),
            )
            .field("tls_context", &self.tls_context.is_some())
            .field("hostname_verifier", &self.hostname_verifier.is_some())
            .field("event_listeners", &self.event_listeners().len())
            .finish()
    }
}

#[cfg(test)]
mod tests;
