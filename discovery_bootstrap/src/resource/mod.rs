//! Locating property resources on a search path.
//!
//! A [`ResourceLocator`] holds an ordered list of root directories, playing
//! the role of a resource search path. Looking up `eureka-client.properties`
//! returns the copy found under the first root that holds it.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cap_std::{ambient_authority, fs_utf8::Dir};
use tracing::{debug, trace};

use crate::properties::{self, PropertyMap};
use crate::{BootstrapError, BootstrapResult};

mod builder;

pub use builder::ResourceLocatorBuilder;

/// Property resource read from the search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyResource {
    path: Utf8PathBuf,
    properties: PropertyMap,
}

impl PropertyResource {
    /// Location the resource was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Parsed key/value pairs.
    #[must_use]
    pub const fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    /// Consumes the resource, returning its pairs.
    #[must_use]
    pub fn into_properties(self) -> PropertyMap {
        self.properties
    }
}

/// Ordered resource search path.
///
/// # Examples
///
/// ```rust
/// use discovery_bootstrap::ResourceLocator;
///
/// let locator = ResourceLocator::builder()
///     .add_root("conf")
///     .add_root("/etc/discovery")
///     .build();
/// assert_eq!(
///     locator.candidates("eureka-client.properties"),
///     vec![
///         camino::Utf8PathBuf::from("conf/eureka-client.properties"),
///         camino::Utf8PathBuf::from("/etc/discovery/eureka-client.properties"),
///     ]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ResourceLocator {
    roots: Vec<Utf8PathBuf>,
    search_path_env_var: Option<String>,
}

impl Default for ResourceLocator {
    /// Searches only the current working directory.
    fn default() -> Self {
        ResourceLocatorBuilder::new().build()
    }
}

impl ResourceLocator {
    /// Creates a builder with no roots configured.
    #[must_use]
    pub fn builder() -> ResourceLocatorBuilder {
        ResourceLocatorBuilder::new()
    }

    /// Returns the roots searched, in order.
    ///
    /// Explicit roots come first, followed by the entries of the search-path
    /// environment variable (if configured and set). Non UTF-8 entries are
    /// skipped and duplicates removed. With nothing configured the current
    /// directory is searched.
    #[must_use]
    pub fn roots(&self) -> Vec<Utf8PathBuf> {
        let mut seen = HashSet::new();
        let mut roots = Vec::new();
        for root in &self.roots {
            push_unique(&mut roots, &mut seen, root.clone());
        }
        if let Some(value) = self
            .search_path_env_var
            .as_ref()
            .and_then(|name| std::env::var_os(name).filter(|v| !v.is_empty()))
        {
            let entries = std::env::split_paths(&value)
                .filter_map(|path| Utf8PathBuf::from_path_buf(path).ok());
            for root in entries {
                push_unique(&mut roots, &mut seen, root);
            }
        }
        if roots.is_empty() {
            roots.push(Utf8PathBuf::from("."));
        }
        roots
    }

    /// Returns every path at which `file_name` would be looked up, in order.
    #[must_use]
    pub fn candidates(&self, file_name: &str) -> Vec<Utf8PathBuf> {
        self.roots()
            .into_iter()
            .map(|root| root.join(file_name))
            .collect()
    }

    /// Finds and parses `file_name` under the first root that holds it.
    ///
    /// Returns `Ok(None)` when no root holds the file.
    ///
    /// # Errors
    ///
    /// Returns a [`BootstrapError`] if `file_name` is not a plain relative
    /// name, if an existing file cannot be read (including invalid UTF-8), or
    /// if its content is malformed.
    pub fn locate(&self, file_name: &str) -> BootstrapResult<Option<PropertyResource>> {
        let name = Utf8Path::new(file_name);
        validate_name(name)?;
        for root in self.roots() {
            let path = root.join(name);
            let Some(data) =
                read_from_root(&root, name).map_err(|e| Arc::new(BootstrapError::file(&path, e)))?
            else {
                trace!(path = %path, "property resource not present under root");
                continue;
            };
            let parsed = properties::parse(&data)
                .map_err(|e| Arc::new(BootstrapError::properties(&path, e)))?;
            debug!(path = %path, keys = parsed.len(), "loaded property resource");
            return Ok(Some(PropertyResource {
                path,
                properties: parsed,
            }));
        }
        Ok(None)
    }
}

fn push_unique(roots: &mut Vec<Utf8PathBuf>, seen: &mut HashSet<Utf8PathBuf>, root: Utf8PathBuf) {
    if root.as_str().is_empty() {
        return;
    }
    if seen.insert(root.clone()) {
        roots.push(root);
    }
}

fn validate_name(name: &Utf8Path) -> BootstrapResult<()> {
    let escapes = name
        .components()
        .any(|c| !matches!(c, Utf8Component::Normal(_) | Utf8Component::CurDir));
    if name.as_str().is_empty() || escapes {
        return Err(Arc::new(BootstrapError::file(
            name,
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "resource name must be relative to the search path",
            ),
        )));
    }
    Ok(())
}

/// Read `name` relative to `root` through a `cap-std` directory handle.
///
/// A missing root or a missing file yields `Ok(None)`.
fn read_from_root(root: &Utf8Path, name: &Utf8Path) -> io::Result<Option<String>> {
    let dir = match Dir::open_ambient_dir(root, ambient_authority()) {
        Ok(dir) => dir,
        Err(e) if is_absent(&e) => return Ok(None),
        Err(e) => return Err(e),
    };
    match dir.read_to_string(name) {
        Ok(data) => Ok(Some(data)),
        Err(e) if is_absent(&e) => Ok(None),
        Err(e) => Err(e),
    }
}

fn is_absent(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
