//! Discovery events and the listener set that receives them.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::health::InstanceStatus;

/// Event emitted by the discovery client.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DiscoveryEvent {
    /// The local registry cache was refreshed from the server.
    CacheRefreshed,
    /// The local instance's status changed.
    StatusChanged {
        /// Status before the change.
        previous: InstanceStatus,
        /// Status after the change.
        current: InstanceStatus,
    },
}

/// Receives discovery events.
pub trait EventListener: Send + Sync {
    /// Handles `event`.
    fn on_event(&self, event: &DiscoveryEvent);
}

/// Legacy publish/subscribe bus that can receive discovery events.
pub trait EventBus: Send + Sync {
    /// Publishes `event` to the bus's subscribers.
    fn publish(&self, event: &DiscoveryEvent);
}

/// Listener forwarding every event to an [`EventBus`].
pub(crate) struct EventBusForwarder {
    bus: Arc<dyn EventBus>,
}

impl EventBusForwarder {
    pub(crate) const fn new(bus: Arc<dyn EventBus>) -> Self {
        Self { bus }
    }
}

impl EventListener for EventBusForwarder {
    fn on_event(&self, event: &DiscoveryEvent) {
        self.bus.publish(event);
    }
}

/// Ordered set of listeners with identity semantics.
///
/// Adding the same `Arc` twice keeps one entry; distinct instances of the
/// same type are distinct members.
#[derive(Clone, Default)]
pub struct ListenerSet {
    listeners: Vec<Arc<dyn EventListener>>,
}

impl ListenerSet {
    /// Creates an empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds `listener` unless this exact instance is already present.
    ///
    /// Returns whether the set grew.
    pub fn insert(&mut self, listener: Arc<dyn EventListener>) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    /// Whether this exact instance is a member.
    #[must_use]
    pub fn contains(&self, listener: &Arc<dyn EventListener>) -> bool {
        self.listeners.iter().any(|l| Arc::ptr_eq(l, listener))
    }

    /// Number of listeners.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Listeners in registration order.
    #[must_use]
    pub const fn as_slice(&self) -> &[Arc<dyn EventListener>] {
        self.listeners.as_slice()
    }

    /// Delivers `event` to every listener in registration order.
    pub fn notify(&self, event: &DiscoveryEvent) {
        trace!(listeners = self.listeners.len(), ?event, "dispatching discovery event");
        for listener in &self.listeners {
            listener.on_event(event);
        }
    }
}

impl Extend<Arc<dyn EventListener>> for ListenerSet {
    fn extend<I: IntoIterator<Item = Arc<dyn EventListener>>>(&mut self, iter: I) {
        for listener in iter {
            self.insert(listener);
        }
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish()
    }
}
