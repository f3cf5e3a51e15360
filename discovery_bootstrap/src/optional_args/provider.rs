//! Lazily evaluated, shareable dependency providers.

use std::fmt;
use std::sync::Arc;

/// Factory producing a shared `T` each time it is asked.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use discovery_bootstrap::Provider;
///
/// let provider: Provider<str> = Provider::singleton(Arc::from("eureka"));
/// assert_eq!(&*provider.get(), "eureka");
/// ```
pub struct Provider<T: ?Sized> {
    factory: Arc<dyn Fn() -> Arc<T> + Send + Sync>,
}

impl<T: ?Sized> Provider<T> {
    /// Creates a provider that calls `factory` on every [`get`](Self::get).
    #[must_use]
    pub fn new<F>(factory: F) -> Self
    where
        F: Fn() -> Arc<T> + Send + Sync + 'static,
    {
        Self {
            factory: Arc::new(factory),
        }
    }

    /// Creates a provider that always hands out `value`.
    #[must_use]
    pub fn singleton(value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::new(move || Arc::clone(&value))
    }

    /// Obtains a value.
    #[must_use]
    pub fn get(&self) -> Arc<T> {
        (self.factory)()
    }
}

impl<T: ?Sized> Clone for Provider<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Arc::clone(&self.factory),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Provider<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Provider").finish_non_exhaustive()
    }
}
