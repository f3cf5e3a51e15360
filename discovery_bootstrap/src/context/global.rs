//! Process-wide [`ConfigContext`] for components that are not handed one.
//!
//! The global context starts empty. Populate it once during startup (with
//! [`install`] or [`with_context`]) and treat it as read-only afterwards;
//! the lock only guards against torn writes, not against late mutation
//! changing what other components already observed.

use std::sync::LazyLock;

use parking_lot::RwLock;

use super::ConfigContext;

static GLOBAL_CONTEXT: LazyLock<RwLock<ConfigContext>> =
    LazyLock::new(|| RwLock::new(ConfigContext::new()));

/// Replaces the global context, returning the previous one.
pub fn install(context: ConfigContext) -> ConfigContext {
    std::mem::replace(&mut *GLOBAL_CONTEXT.write(), context)
}

/// Runs `f` with exclusive access to the global context.
pub fn with_context<F, R>(f: F) -> R
where
    F: FnOnce(&mut ConfigContext) -> R,
{
    f(&mut GLOBAL_CONTEXT.write())
}

/// Returns a copy of the global context.
#[must_use]
pub fn snapshot() -> ConfigContext {
    GLOBAL_CONTEXT.read().clone()
}

/// Deployment environment published to the global context, if resolved.
#[must_use]
pub fn current_environment() -> Option<String> {
    GLOBAL_CONTEXT.read().environment().map(str::to_owned)
}
