//! Builder for the resource search path.

use camino::Utf8PathBuf;

use super::ResourceLocator;

/// Builder for [`ResourceLocator`].
#[derive(Debug, Clone, Default)]
pub struct ResourceLocatorBuilder {
    roots: Vec<Utf8PathBuf>,
    search_path_env_var: Option<String>,
}

impl ResourceLocatorBuilder {
    /// Creates a builder with no roots and no search-path variable.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            roots: Vec::new(),
            search_path_env_var: None,
        }
    }

    /// Appends a root directory to the search path.
    #[must_use]
    pub fn add_root(mut self, root: impl Into<Utf8PathBuf>) -> Self {
        self.roots.push(root.into());
        self
    }

    /// Replaces the explicit roots.
    #[must_use]
    pub fn roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        self.roots = roots.into_iter().map(Into::into).collect();
        self
    }

    /// Removes all explicit roots.
    #[must_use]
    pub fn clear_roots(mut self) -> Self {
        self.roots.clear();
        self
    }

    /// Names an environment variable holding additional roots.
    ///
    /// The value uses the platform path-list syntax (`:`-separated on Unix,
    /// `;` on Windows) and is read each time the roots are computed. Its
    /// entries are searched after the explicit roots.
    #[must_use]
    pub fn search_path_env_var(mut self, name: impl Into<String>) -> Self {
        self.search_path_env_var = Some(name.into());
        self
    }

    /// Finalises the locator.
    #[must_use]
    pub fn build(self) -> ResourceLocator {
        ResourceLocator {
            roots: self.roots,
            search_path_env_var: self.search_path_env_var,
        }
    }
}
