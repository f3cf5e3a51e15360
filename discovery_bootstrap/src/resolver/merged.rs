//! The immutable result of a cascaded resolution.

use std::fmt;
use std::str::FromStr;

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::Serialized;
use serde::de::DeserializeOwned;

use crate::context::DEPLOYMENT_ENVIRONMENT_KEY;
use crate::properties::PropertyMap;
use crate::resource::PropertyResource;
use crate::{BootstrapError, BootstrapResult, BootstrapResultExt};

/// Which cascade layer a resource was loaded for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// `<name>.properties`.
    Base,
    /// `<name>-<environment>.properties`.
    Overlay,
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Base => "base",
            Self::Overlay => "overlay",
        })
    }
}

/// A resource that contributed to a [`MergedConfiguration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceSource {
    layer: Layer,
    path: Utf8PathBuf,
}

impl ResourceSource {
    /// Layer the resource was loaded for.
    #[must_use]
    pub const fn layer(&self) -> Layer {
        self.layer
    }

    /// Location the resource was read from.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }
}

/// Base and overlay properties merged with overlay-wins semantics.
///
/// The resolved deployment environment is always answered by
/// [`get`](Self::get) under [`DEPLOYMENT_ENVIRONMENT_KEY`], taking precedence
/// over any file value for that key. Iteration only covers pairs read from
/// resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedConfiguration {
    entries: PropertyMap,
    environment: String,
    sources: Vec<ResourceSource>,
}

impl MergedConfiguration {
    pub(crate) fn merge(
        environment: String,
        base: Option<PropertyResource>,
        overlay: Option<PropertyResource>,
    ) -> Self {
        let mut entries = PropertyMap::new();
        let mut sources = Vec::new();
        for (layer, resource) in [(Layer::Base, base), (Layer::Overlay, overlay)] {
            let Some(resource) = resource else { continue };
            sources.push(ResourceSource {
                layer,
                path: resource.path().to_path_buf(),
            });
            entries.extend(resource.into_properties());
        }
        Self {
            entries,
            environment,
            sources,
        }
    }

    /// Resolved deployment environment.
    #[must_use]
    pub const fn environment(&self) -> &str {
        self.environment.as_str()
    }

    /// Resources that contributed, base first.
    #[must_use]
    pub const fn sources(&self) -> &[ResourceSource] {
        self.sources.as_slice()
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == DEPLOYMENT_ENVIRONMENT_KEY {
            return Some(&self.environment);
        }
        self.entries.get(key).map(String::as_str)
    }

    /// Looks up `key`, falling back to `default`.
    #[must_use]
    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// Looks up `key` and parses it with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::InvalidValue`] if the value does not parse.
    pub fn get_parsed<T>(&self, key: &str) -> BootstrapResult<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|e| BootstrapError::invalid_value_arc(key, raw, e))
            })
            .transpose()
    }

    /// Whether a resource defined `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates over resource-defined pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of resource-defined pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no resource defined any pair.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Builds a [`Figment`] view for structured extraction.
    ///
    /// Dotted keys become nested tables (`eureka.region` is `region` inside
    /// the `eureka` table). Every value stays the string read from the
    /// resource. When one key is a prefix of another (`a` and `a.b`) the
    /// longer key wins.
    #[must_use]
    pub fn figment(&self) -> Figment {
        let resolved = self
            .iter()
            .fold(Figment::new(), |figment, (key, value)| {
                figment.merge(Serialized::default(key, value.to_owned()))
            });
        resolved.merge(Serialized::default(
            DEPLOYMENT_ENVIRONMENT_KEY,
            self.environment.clone(),
        ))
    }

    /// Deserialises the whole configuration into `T`.
    ///
    /// String fields receive the value exactly as written, so `0123` stays
    /// `"0123"`. Numeric and boolean fields parse the string on demand
    /// (`30`, `true`, `yes`, `off`).
    ///
    /// # Examples
    ///
    /// ```
    /// # use discovery_bootstrap::{ConfigContext, PropertyResolver, ResourceLocator};
    /// #[derive(serde::Deserialize)]
    /// struct Eureka {
    ///     region: Option<String>,
    /// }
    ///
    /// #[derive(serde::Deserialize)]
    /// struct Settings {
    ///     eureka: Option<Eureka>,
    /// }
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let resolver = PropertyResolver::new(
    ///     ResourceLocator::builder().add_root("no-such-dir").build(),
    /// );
    /// let merged = resolver.resolve(&mut ConfigContext::new(), "eureka-client")?;
    /// let settings: Settings = merged.extract()?;
    /// assert!(settings.eureka.is_none());
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Extraction`] if deserialisation fails.
    pub fn extract<T: DeserializeOwned>(&self) -> BootstrapResult<T> {
        self.figment().extract_lossy().into_bootstrap()
    }

    /// Deserialises the table at dotted `path` into `T`, with the same value
    /// handling as [`extract`](Self::extract).
    ///
    /// # Errors
    ///
    /// Returns [`BootstrapError::Extraction`] if the path is missing or
    /// deserialisation fails.
    pub fn extract_inner<T: DeserializeOwned>(&self, path: &str) -> BootstrapResult<T> {
        self.figment().extract_inner_lossy(path).into_bootstrap()
    }
}
