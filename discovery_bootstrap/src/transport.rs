//! Interfaces owned by the transport layer.
//!
//! This crate only carries these values from the embedding application to
//! the transport layer; it never calls them itself.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// TLS client configuration handed to the transport layer.
pub type TlsContext = Arc<rustls::ClientConfig>;

/// Request about to be sent to a discovery server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    /// HTTP method, e.g. `GET`.
    pub method: String,
    /// Absolute request URL.
    pub url: String,
    /// Request headers.
    pub headers: BTreeMap<String, String>,
}

impl OutboundRequest {
    /// Creates a request without headers.
    #[must_use]
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            headers: BTreeMap::new(),
        }
    }
}

/// Caller-supplied filter applied to every outbound request.
///
/// Filters run in the order they were supplied.
pub trait RequestInterceptor: Send + Sync {
    /// Inspects or modifies `request` before it is sent.
    fn intercept(&self, request: &mut OutboundRequest);
}

/// Decides whether a server's certificate identity matches the host dialled.
pub trait HostnameVerifier: Send + Sync {
    /// Whether `hostname` is acceptable for a peer presenting `peer_names`.
    fn verify(&self, hostname: &str, peer_names: &[&str]) -> bool;
}

/// Client bound to one discovery server endpoint.
pub trait TransportClient: Send + Sync {
    /// Endpoint this client talks to.
    fn service_url(&self) -> &str;

    /// Releases the client's resources.
    fn shutdown(&self) {}
}

/// Creates transport clients for discovery server endpoints.
pub trait TransportClientFactory: Send + Sync {
    /// Creates a client for `service_url`.
    fn new_client(&self, service_url: &str) -> Arc<dyn TransportClient>;

    /// Releases resources shared by the clients this factory created.
    fn shutdown(&self) {}
}

/// Registry building a [`TransportClientFactory`] from the optional wiring.
pub trait TransportClientFactories: Send + Sync {
    /// Builds a factory honouring `settings`.
    fn new_transport_client_factory(
        &self,
        settings: &TransportSettings<'_>,
    ) -> Arc<dyn TransportClientFactory>;
}

/// Borrowed view of the transport-related optional wiring.
#[derive(Clone, Copy)]
pub struct TransportSettings<'a> {
    /// Additional filters, in order. Empty when none were supplied.
    pub additional_filters: &'a [Arc<dyn RequestInterceptor>],
    /// TLS configuration; `None` means platform defaults.
    pub tls_context: Option<&'a TlsContext>,
    /// Hostname verifier; `None` means the transport's default checks.
    pub hostname_verifier: Option<&'a Arc<dyn HostnameVerifier>>,
}

impl fmt::Debug for TransportSettings<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportSettings")
            .field("additional_filters", &self.additional_filters.len())
            .field("tls_context", &self.tls_context.is_some())
            .field("hostname_verifier", &self.hostname_verifier.is_some())
            .finish()
    }
}
