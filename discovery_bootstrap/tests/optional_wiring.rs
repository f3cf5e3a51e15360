//! Tests exercising the optional extension points the way an embedding
//! bootstrap wires them.

use std::sync::Arc;

use discovery_bootstrap::{
    DiscoveryEvent, EventBus, EventListener, InstanceStatus, OptionalArgs,
    PreRegistrationHandler,
};
use parking_lot::Mutex;

#[derive(Default)]
struct Journal(Mutex<Vec<String>>);

impl Journal {
    fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

struct Named {
    name: &'static str,
    journal: Arc<Journal>,
}

impl EventListener for Named {
    fn on_event(&self, event: &DiscoveryEvent) {
        self.journal.0.lock().push(format!("{}:{event:?}", self.name));
    }
}

impl EventBus for Named {
    fn publish(&self, event: &DiscoveryEvent) {
        self.journal.0.lock().push(format!("bus-{}:{event:?}", self.name));
    }
}

impl PreRegistrationHandler for Named {
    fn before_registration(&self) {
        self.journal.0.lock().push(format!("{}:before-registration", self.name));
    }
}

fn named(name: &'static str, journal: &Arc<Journal>) -> Arc<Named> {
    Arc::new(Named {
        name,
        journal: Arc::clone(journal),
    })
}

#[test]
fn listeners_union_across_calls_and_bus_adds_one() {
    let journal = Arc::new(Journal::default());
    let mut args = OptionalArgs::new();
    args.add_event_listeners([
        named("a", &journal) as Arc<dyn EventListener>,
        named("b", &journal),
    ]);
    args.add_event_listeners([named("c", &journal) as Arc<dyn EventListener>]);
    assert_eq!(args.event_listeners().len(), 3);

    args.set_event_bus(named("legacy", &journal));
    assert_eq!(args.event_listeners().len(), 4);

    args.event_listeners().notify(&DiscoveryEvent::StatusChanged {
        previous: InstanceStatus::Starting,
        current: InstanceStatus::Up,
    });
    let entries = journal.entries();
    assert_eq!(entries.len(), 4);
    assert!(entries.first().is_some_and(|e| e.starts_with("a:")));
    assert!(entries.last().is_some_and(|e| e.starts_with("bus-legacy:")));
}

#[test]
fn pre_registration_hook_is_handed_back_unchanged() {
    let journal = Arc::new(Journal::default());
    let hook = named("hook", &journal);
    let mut args = OptionalArgs::new();
    assert!(args.pre_registration_handler().is_none());
    args.set_pre_registration_handler(hook);
    if let Some(handler) = args.pre_registration_handler() {
        handler.before_registration();
    }
    assert_eq!(journal.entries(), vec!["hook:before-registration".to_owned()]);
}

#[test]
fn clones_share_configured_values() {
    let journal = Arc::new(Journal::default());
    let mut args = OptionalArgs::new();
    args.add_event_listeners([named("a", &journal) as Arc<dyn EventListener>]);
    let shared = Arc::new(args.clone());
    let reader = std::thread::spawn({
        let shared = Arc::clone(&shared);
        move || shared.event_listeners().len()
    });
    assert_eq!(reader.join().ok(), Some(1));
    assert_eq!(args.event_listeners().len(), 1);
}
