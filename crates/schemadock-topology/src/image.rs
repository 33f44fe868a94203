use std::fmt;

use semver::Version;
use serde::{Serialize, Deserialize};

use schemadock_types::defaults::{DEFAULT_IMAGE_NAMESPACE, SCHEMA_REGISTRY_IMAGE};

/// A fully qualified container image reference.
///
/// Rendered as `[registry/]repository:tag`. The host hands this string to
/// its image pull step verbatim; whether the tag exists in the registry is
/// only discovered there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Custom registry host such as `localhost:5000`. Docker Hub when absent.
    registry: Option<String>,
    repository: String,
    tag: String,
}

impl ImageRef {
    /// Builds the schema registry image reference for a resolved version.
    ///
    /// A custom namespace re-roots the repository; a custom registry is
    /// prefixed verbatim.
    ///
    /// # Example
    ///
    /// ```
    /// use schemadock_topology::ImageRef;
    /// use semver::Version;
    ///
    /// let image = ImageRef::schema_registry(None, None, &Version::new(4, 0, 0));
    /// assert_eq!(image.to_string(), "confluent/schema-registry:4.0.0");
    /// ```
    pub fn schema_registry(
        registry: Option<&str>,
        namespace: Option<&str>,
        version: &Version,
    ) -> Self {
        let namespace = namespace.unwrap_or(DEFAULT_IMAGE_NAMESPACE);
        Self {
            registry: registry.map(|registry| registry.to_string()),
            repository: format!("{namespace}/{SCHEMA_REGISTRY_IMAGE}"),
            tag: version.to_string(),
        }
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(registry) = &self.registry {
            write!(f, "{registry}/")?;
        }
        write!(f, "{}:{}", self.repository, self.tag)
    }
}
