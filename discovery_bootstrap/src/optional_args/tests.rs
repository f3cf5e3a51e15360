//! Tests for the optional extension-point set.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use rstest::{fixture, rstest};

use super::{OptionalArgs, Provider};
use crate::events::{DiscoveryEvent, EventBus, EventListener};
use crate::health::{HealthCheckCallback, HealthCheckHandler, InstanceStatus};
use crate::transport::{
    HostnameVerifier, OutboundRequest, RequestInterceptor, TlsContext, TransportClient,
    TransportClientFactories, TransportClientFactory, TransportSettings,
};

#[derive(Default)]
struct Recorder(Mutex<Vec<DiscoveryEvent>>);

impl EventListener for Recorder {
    fn on_event(&self, event: &DiscoveryEvent) {
        self.0.lock().push(event.clone());
    }
}

impl EventBus for Recorder {
    fn publish(&self, event: &DiscoveryEvent) {
        self.0.lock().push(event.clone());
    }
}

fn listener() -> Arc<dyn EventListener> {
    Arc::new(Recorder::default())
}

struct ExactHost;

impl HostnameVerifier for ExactHost {
    fn verify(&self, hostname: &str, peer_names: &[&str]) -> bool {
        peer_names.contains(&hostname)
    }
}

struct Header(&'static str);

impl RequestInterceptor for Header {
    fn intercept(&self, request: &mut OutboundRequest) {
        request.headers.insert(self.0.to_owned(), "1".to_owned());
    }
}

struct Client(String);

impl TransportClient for Client {
    fn service_url(&self) -> &str {
        &self.0
    }
}

struct Factory(&'static str);

impl TransportClientFactory for Factory {
    fn new_client(&self, service_url: &str) -> Arc<dyn TransportClient> {
        Arc::new(Client(format!("{}:{service_url}", self.0)))
    }
}

#[derive(Default)]
struct Registry {
    seen_filters: AtomicUsize,
    seen_tls: Mutex<Option<bool>>,
}

impl TransportClientFactories for Registry {
    fn new_transport_client_factory(
        &self,
        settings: &TransportSettings<'_>,
    ) -> Arc<dyn TransportClientFactory> {
        self.seen_filters
            .store(settings.additional_filters.len(), Ordering::SeqCst);
        *self.seen_tls.lock() = Some(settings.tls_context.is_some());
        Arc::new(Factory("registry"))
    }
}

#[fixture]
fn tls() -> TlsContext {
    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()
        .expect("default protocol versions")
        .with_root_certificates(rustls::RootCertStore::empty())
        .with_no_client_auth();
    Arc::new(config)
}

#[test]
fn every_extension_point_starts_absent() {
    let args = OptionalArgs::new();
    assert!(args.health_check_callback_provider().is_none());
    assert!(args.health_check_handler_provider().is_none());
    assert!(args.effective_health_check_handler().is_none());
    assert!(args.pre_registration_handler().is_none());
    assert!(args.additional_filters().is_none());
    assert!(args.transport_client().is_none());
    assert!(args.transport_client_factory().is_none());
    assert!(args.transport_client_factories().is_none());
    assert!(args.resolve_transport_client_factory().is_none());
    assert!(args.tls_context().is_none());
    assert!(args.hostname_verifier().is_none());
    assert!(args.event_listeners().is_empty());
}

#[test]
fn listener_registrations_accumulate() {
    let (a, b, c) = (listener(), listener(), listener());
    let mut args = OptionalArgs::new();
    args.add_event_listeners([Arc::clone(&a), Arc::clone(&b)]);
    args.add_event_listeners([Arc::clone(&c)]);
    let set = args.event_listeners();
    assert_eq!(set.len(), 3);
    assert!(set.contains(&a) && set.contains(&b) && set.contains(&c));
}

#[test]
fn re_registering_a_listener_is_a_no_op() {
    let a = listener();
    let mut args = OptionalArgs::new();
    args.add_event_listeners([Arc::clone(&a)]);
    args.add_event_listeners([Arc::clone(&a)]);
    assert_eq!(args.event_listeners().len(), 1);
}

#[test]
fn event_bus_adds_exactly_one_forwarder() {
    let bus = Arc::new(Recorder::default());
    let direct = Arc::new(Recorder::default());
    let mut args = OptionalArgs::new();
    args.add_event_listeners([Arc::clone(&direct) as Arc<dyn EventListener>, listener()]);
    args.set_event_bus(Arc::clone(&bus) as Arc<dyn EventBus>);
    assert_eq!(args.event_listeners().len(), 3);

    args.event_listeners().notify(&DiscoveryEvent::CacheRefreshed);
    assert_eq!(*bus.0.lock(), vec![DiscoveryEvent::CacheRefreshed]);
    assert_eq!(*direct.0.lock(), vec![DiscoveryEvent::CacheRefreshed]);
}

#[test]
fn event_bus_before_listeners_is_kept() {
    let mut args = OptionalArgs::new();
    args.set_event_bus(Arc::new(Recorder::default()));
    args.add_event_listeners([listener()]);
    assert_eq!(args.event_listeners().len(), 2);
}

#[rstest]
fn tls_context_is_present_after_set(tls: TlsContext) {
    let mut args = OptionalArgs::new();
    args.set_tls_context(Arc::clone(&tls));
    let stored = args.tls_context().expect("tls context set");
    assert!(Arc::ptr_eq(stored, &tls));
}

#[test]
fn hostname_verifier_is_present_after_set() {
    let verifier: Arc<dyn HostnameVerifier> = Arc::new(ExactHost);
    let mut args = OptionalArgs::new();
    args.set_hostname_verifier(Arc::clone(&verifier));
    let stored = args.hostname_verifier().expect("verifier set");
    assert!(Arc::ptr_eq(stored, &verifier));
    assert!(stored.verify("eureka.local", &["eureka.local"]));
    assert!(!stored.verify("eureka.local", &["other.local"]));
}

#[test]
fn single_valued_setters_overwrite() {
    let first: Arc<dyn HostnameVerifier> = Arc::new(ExactHost);
    let second: Arc<dyn HostnameVerifier> = Arc::new(ExactHost);
    let mut args = OptionalArgs::new();
    args.set_hostname_verifier(Arc::clone(&first))
        .set_hostname_verifier(Arc::clone(&second));
    assert!(args.hostname_verifier().is_some_and(|v| Arc::ptr_eq(v, &second)));
}

#[test]
fn transport_client_is_stored_and_overwritten() {
    let first: Arc<dyn TransportClient> = Arc::new(Client("http://a:8761/eureka".to_owned()));
    let second: Arc<dyn TransportClient> = Arc::new(Client("http://b:8761/eureka".to_owned()));
    let mut args = OptionalArgs::new();
    args.set_transport_client(Arc::clone(&first));
    assert!(args.transport_client().is_some_and(|c| Arc::ptr_eq(c, &first)));

    args.set_transport_client(Arc::clone(&second));
    let stored = args.transport_client();
    assert!(stored.is_some_and(|c| Arc::ptr_eq(c, &second)));
    assert_eq!(stored.map(|c| c.service_url()), Some("http://b:8761/eureka"));
    assert!(args.transport_client_factory().is_none());
}

#[test]
fn additional_filters_keep_order() {
    let mut args = OptionalArgs::new();
    args.set_additional_filters([
        Arc::new(Header("x-first")) as Arc<dyn RequestInterceptor>,
        Arc::new(Header("x-second")),
    ]);
    let mut request = OutboundRequest::new("GET", "http://eureka/apps/");
    for filter in args.additional_filters().unwrap_or_default() {
        filter.intercept(&mut request);
    }
    assert_eq!(
        request.headers.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["x-first", "x-second"]
    );
    assert_eq!(args.transport_settings().additional_filters.len(), 2);
}

struct Healthy(bool);

impl HealthCheckCallback for Healthy {
    fn is_healthy(&self) -> bool {
        self.0
    }
}

struct AlwaysOutOfService;

impl HealthCheckHandler for AlwaysOutOfService {
    fn status(&self, _current: InstanceStatus) -> InstanceStatus {
        InstanceStatus::OutOfService
    }
}

#[test]
fn callback_provider_is_bridged_when_no_handler() {
    let mut args = OptionalArgs::new();
    args.set_health_check_callback_provider(Provider::new(|| {
        Arc::new(Healthy(false)) as Arc<dyn HealthCheckCallback>
    }));
    let handler = args
        .effective_health_check_handler()
        .expect("bridged handler");
    assert_eq!(handler.status(InstanceStatus::Up), InstanceStatus::Down);
}

#[test]
fn handler_provider_wins_over_callback() {
    let mut args = OptionalArgs::new();
    args.set_health_check_callback_provider(Provider::singleton(
        Arc::new(Healthy(true)) as Arc<dyn HealthCheckCallback>
    ))
    .set_health_check_handler_provider(Provider::singleton(
        Arc::new(AlwaysOutOfService) as Arc<dyn HealthCheckHandler>
    ));
    let handler = args.effective_health_check_handler().expect("handler");
    assert_eq!(handler.status(InstanceStatus::Up), InstanceStatus::OutOfService);
    assert!(args.health_check_callback_provider().is_some());
}

#[rstest]
fn registry_is_reflected_and_consulted(tls: TlsContext) {
    let registry = Arc::new(Registry::default());
    let mut args = OptionalArgs::new();
    args.set_transport_client_factories(Arc::clone(&registry) as Arc<dyn TransportClientFactories>)
        .set_additional_filters([Arc::new(Header("x-a")) as Arc<dyn RequestInterceptor>])
        .set_tls_context(tls);
    assert!(args.transport_client_factory().is_none());
    assert!(args.transport_client_factories().is_some());

    let factory = args
        .resolve_transport_client_factory()
        .expect("registry builds a factory");
    assert_eq!(factory.new_client("http://a/").service_url(), "registry:http://a/");
    assert_eq!(registry.seen_filters.load(Ordering::SeqCst), 1);
    assert_eq!(*registry.seen_tls.lock(), Some(true));
}

#[test]
fn explicit_factory_wins_over_registry() {
    let registry = Arc::new(Registry::default());
    let mut args = OptionalArgs::new();
    args.set_transport_client_factories(Arc::clone(&registry) as Arc<dyn TransportClientFactories>)
        .set_transport_client_factory(Arc::new(Factory("explicit")));
    let factory = args.resolve_transport_client_factory().expect("factory");
    assert_eq!(factory.new_client("u").service_url(), "explicit:u");
    assert_eq!(*registry.seen_tls.lock(), None);
}

#[test]
fn debug_reports_presence_only() {
    let mut args = OptionalArgs::new();
    args.add_event_listeners([listener()]);
    let text = format!("{args:?}");
    assert!(text.contains("event_listeners: 1"), "{text}");
    assert!(text.contains("tls_context: false"), "{text}");
    assert!(text.contains("transport_client: false"), "{text}");
}
