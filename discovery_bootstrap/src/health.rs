//! Health-check and registration hooks supplied by the embedding application.

use std::fmt;
use std::sync::Arc;

/// Registration status reported for the local instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InstanceStatus {
    /// Ready to receive traffic.
    Up,
    /// Unhealthy; should not receive traffic.
    Down,
    /// Still initialising.
    Starting,
    /// Deliberately taken out of rotation.
    OutOfService,
    /// Status not determined.
    #[default]
    Unknown,
}

impl fmt::Display for InstanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Starting => "STARTING",
            Self::OutOfService => "OUT_OF_SERVICE",
            Self::Unknown => "UNKNOWN",
        })
    }
}

/// Legacy health check: a yes/no answer.
///
/// Prefer [`HealthCheckHandler`]; a callback is only consulted through
/// [`HealthCheckCallbackBridge`] when no handler is configured.
pub trait HealthCheckCallback: Send + Sync {
    /// Whether the instance is healthy.
    fn is_healthy(&self) -> bool;
}

/// Health check deriving the status to report from the current one.
pub trait HealthCheckHandler: Send + Sync {
    /// Status to report, given the `current` status.
    fn status(&self, current: InstanceStatus) -> InstanceStatus;
}

/// Hook invoked once before the client registers itself.
pub trait PreRegistrationHandler: Send + Sync {
    /// Runs before registration.
    fn before_registration(&self);
}

/// Adapts a [`HealthCheckCallback`] to the [`HealthCheckHandler`] contract.
///
/// `Starting` and `OutOfService` are reported unchanged. Otherwise the
/// callback decides between `Up` and `Down`. Without a callback the current
/// status passes through.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use discovery_bootstrap::{
///     HealthCheckCallback, HealthCheckCallbackBridge, HealthCheckHandler, InstanceStatus,
/// };
///
/// struct Unhealthy;
/// impl HealthCheckCallback for Unhealthy {
///     fn is_healthy(&self) -> bool { false }
/// }
///
/// let bridge = HealthCheckCallbackBridge::new(Some(Arc::new(Unhealthy)));
/// assert_eq!(bridge.status(InstanceStatus::Up), InstanceStatus::Down);
/// assert_eq!(bridge.status(InstanceStatus::Starting), InstanceStatus::Starting);
/// ```
#[derive(Clone, Default)]
pub struct HealthCheckCallbackBridge {
    callback: Option<Arc<dyn HealthCheckCallback>>,
}

impl HealthCheckCallbackBridge {
    /// Wraps `callback`.
    #[must_use]
    pub const fn new(callback: Option<Arc<dyn HealthCheckCallback>>) -> Self {
        Self { callback }
    }
}

impl fmt::Debug for HealthCheckCallbackBridge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthCheckCallbackBridge")
            .field("has_callback", &self.callback.is_some())
            .finish()
    }
}

impl HealthCheckHandler for HealthCheckCallbackBridge {
    fn status(&self, current: InstanceStatus) -> InstanceStatus {
        match (&self.callback, current) {
            (None, _) | (_, InstanceStatus::Starting | InstanceStatus::OutOfService) => current,
            (Some(callback), _) if callback.is_healthy() => InstanceStatus::Up,
            (Some(_), _) => InstanceStatus::Down,
        }
    }
}
