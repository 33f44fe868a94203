use std::collections::{BTreeMap, BTreeSet};

use derive_builder::Builder;
use semver::Version;
use serde::{Serialize, Deserialize};
use tracing::debug;

use schemadock_types::{GroupName, NodeId, NodeName};
use schemadock_types::defaults::{DEFAULT_CONFLUENT_VERSION, DEFAULT_GROUP_NAME, DEFAULT_NODE_NAME};
use schemadock_types::node::validate_node_name;

use crate::ConfigurationError;
use crate::image::ImageRef;

mod resolved;

pub use resolved::{ResolvedTopology, NodeAssignment, PortMapping};

/// A named set of cluster members sharing a role and container image.
///
/// Defined once at topology-load time and immutable thereafter; membership
/// overrides are applied through [`TopologyConfigBuilder::group_members`]
/// before the config is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeGroup {
    name: GroupName,
    members: Vec<NodeName>,
    ports: Vec<PortMapping>,
}

impl NodeGroup {
    pub fn new(
        name: impl Into<GroupName>,
        members: Vec<NodeName>,
        ports: Vec<PortMapping>,
    ) -> Self {
        Self {
            name: name.into(),
            members,
            ports,
        }
    }

    /// The registry group with its single starter node.
    pub fn registry() -> Self {
        Self {
            name: DEFAULT_GROUP_NAME.to_string(),
            members: vec![DEFAULT_NODE_NAME.to_string()],
            ports: vec![PortMapping::rest()],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[NodeName] {
        &self.members
    }

    fn set_members(&mut self, members: Vec<NodeName>) {
        self.members = members;
    }
}

fn default_groups() -> Vec<NodeGroup> {
    vec![NodeGroup::registry()]
}

fn default_version() -> Version {
    Version::parse(DEFAULT_CONFLUENT_VERSION).expect("default confluent version is valid semver")
}

/// Describes the registry test-cluster topology handed to the orchestration host.
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(private, name = "build_impl"), derive(Debug))]
pub struct TopologyConfig {
    /// Sets the Confluent platform version to run.
    ///
    /// The version doubles as the image tag, so every published platform
    /// version maps to a pullable image. Defaults to `4.0.0`. CLI flag
    /// values arrive as strings and go through
    /// [`TopologyConfigBuilder::parse_confluent_version`] instead.
    ///
    /// # Example
    ///
    /// ```
    /// # use schemadock_topology::{TopologyConfigBuilder, ConfigurationError};
    /// # fn example(builder: &mut TopologyConfigBuilder) -> Result<(), ConfigurationError> {
    /// use semver::Version;
    /// let config = builder
    ///     .confluent_version(Version::new(4, 1, 0))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(setter(into), default = "default_version()")]
    confluent_version: Version,

    /// Sets a custom docker registry to pull images from.
    ///
    /// Images are pulled from Docker Hub by default. This can point the
    /// host at a private or local registry instead.
    ///
    /// # Example
    ///
    /// ```
    /// # use schemadock_topology::{TopologyConfigBuilder, ConfigurationError};
    /// # fn example(builder: &mut TopologyConfigBuilder) -> Result<(), ConfigurationError> {
    /// let config = builder
    ///     .image_registry("localhost:5000")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[builder(setter(into, strip_option), default)]
    image_registry: Option<String>,

    /// Sets the image namespace, re-rooting the repository to
    /// `{namespace}/schema-registry`. Defaults to `confluent`.
    #[builder(setter(into, strip_option), default)]
    image_namespace: Option<String>,

    /// Node groups declared by this topology.
    #[builder(default = "default_groups()")]
    groups: Vec<NodeGroup>,
}

impl TopologyConfig {
    /// Creates a default [`TopologyConfigBuilder`] preloaded with the
    /// documented defaults.
    ///
    /// # Example
    ///
    /// ```
    /// # use schemadock_topology::TopologyConfig;
    /// let builder = TopologyConfig::builder();
    /// ```
    pub fn builder() -> TopologyConfigBuilder {
        TopologyConfigBuilder::default()
    }

    pub fn confluent_version(&self) -> &Version {
        &self.confluent_version
    }

    pub fn groups(&self) -> &[NodeGroup] {
        &self.groups
    }

    /// Resolves the declared groups into the final node to image/role mapping.
    ///
    /// Resolution is a pure, single pass over the declared groups: no
    /// external resource is touched and resolving the same config twice
    /// yields identical output. Node ids are assigned in declaration order
    /// across all groups.
    pub fn resolve(&self) -> Result<ResolvedTopology, ConfigurationError> {
        debug!(version = %self.confluent_version, "resolving topology");

        let image = ImageRef::schema_registry(
            self.image_registry.as_deref(),
            self.image_namespace.as_deref(),
            &self.confluent_version,
        );

        let mut assignments = BTreeMap::new();
        let mut seen: BTreeSet<&str> = BTreeSet::new();
        let mut next_id: NodeId = 0;

        for group in &self.groups {
            if group.members.is_empty() {
                return Err(ConfigurationError::EmptyNodeGroup(group.name.clone()));
            }

            for node in &group.members {
                validate_node_name(node)?;
                if !seen.insert(node.as_str()) {
                    return Err(ConfigurationError::DuplicateNode(node.clone()));
                }

                assignments.insert(
                    node.clone(),
                    NodeAssignment {
                        image: image.clone(),
                        group: group.name.clone(),
                        ports: group.ports.clone(),
                        node_id: next_id,
                    },
                );
                next_id += 1;
            }
        }

        debug!(nodes = assignments.len(), image = %image, "topology resolved");
        Ok(ResolvedTopology::new(assignments))
    }
}

impl TopologyConfigBuilder {
    /// Creates a [`TopologyConfig`] with the collected configuration options.
    ///
    /// # Example
    ///
    /// ```
    /// # use schemadock_topology::{TopologyConfig, ConfigurationError};
    /// # fn example() -> Result<(), ConfigurationError> {
    /// let config = TopologyConfig::builder().build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(&self) -> Result<TopologyConfig, ConfigurationError> {
        self.build_impl()
            .map_err(|err| ConfigurationError::MissingRequiredConfig(err.to_string()))
    }

    /// Parses a version flag value and sets the confluent version.
    pub fn parse_confluent_version(
        &mut self,
        version: &str,
    ) -> Result<&mut Self, ConfigurationError> {
        let parsed =
            Version::parse(version).map_err(|source| ConfigurationError::InvalidVersion {
                version: version.to_string(),
                source,
            })?;
        Ok(self.confluent_version(parsed))
    }

    /// Replaces the member list of a declared node group.
    ///
    /// The group must already be declared by the topology; overriding an
    /// unknown group name is rejected.
    pub fn group_members<I, S>(
        &mut self,
        group: &str,
        members: I,
    ) -> Result<&mut Self, ConfigurationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeName>,
    {
        let mut groups = self.groups.take().unwrap_or_else(default_groups);
        let entry = groups
            .iter_mut()
            .find(|candidate| candidate.name() == group)
            .ok_or_else(|| ConfigurationError::UnknownNodeGroup(group.to_string()))?;
        entry.set_members(members.into_iter().map(Into::into).collect());
        self.groups = Some(groups);
        Ok(self)
    }

    /// A builder helper for conditionally setting options
    ///
    /// This is useful for maintaining a fluid call chain even when
    /// we only want to set certain options conditionally and the
    /// conditions are more complicated than a simple boolean.
    pub fn with<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn(&mut Self) -> &mut Self,
    {
        f(self)
    }

    /// A builder helper for conditionally setting options
    pub fn with_if<F>(&mut self, cond: bool, f: F) -> &mut Self
    where
        F: Fn(&mut Self) -> &mut Self,
    {
        if cond { f(self) } else { self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_resolution() {
        let config = TopologyConfig::builder().build().expect("should build");
        let topology = config.resolve().expect("should resolve");

        assert_eq!(topology.len(), 1);
        let assignment = topology.get("registry-1").expect("default node");
        assert_eq!(
            assignment.image.to_string(),
            "confluent/schema-registry:4.0.0"
        );
        assert_eq!(assignment.group, "registry");
        assert_eq!(assignment.node_id, 0);
        assert_eq!(assignment.ports, vec![PortMapping::rest()]);
    }

    #[test]
    fn test_node_override_shares_image() {
        let mut builder = TopologyConfig::builder();
        builder
            .group_members("registry", vec!["registry-1", "registry-2"])
            .expect("declared group");
        let topology = builder
            .build()
            .expect("should build")
            .resolve()
            .expect("should resolve");

        assert_eq!(topology.len(), 2);
        let first = topology.get("registry-1").expect("first node");
        let second = topology.get("registry-2").expect("second node");
        assert_eq!(first.image, second.image);
        assert_eq!(first.node_id, 0);
        assert_eq!(second.node_id, 1);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mut builder = TopologyConfig::builder();
        builder
            .parse_confluent_version("4.1.0")
            .expect("valid version")
            .group_members("registry", vec!["registry-1", "registry-2"])
            .expect("declared group");
        let config = builder.build().expect("should build");

        let first = config.resolve().expect("should resolve");
        let second = config.resolve().expect("should resolve");
        assert_eq!(first, second);
    }

    #[test]
    fn test_version_override_sets_tag() {
        let mut builder = TopologyConfig::builder();
        builder.parse_confluent_version("4.1.2").expect("valid version");
        let topology = builder
            .build()
            .expect("should build")
            .resolve()
            .expect("should resolve");

        let assignment = topology.get("registry-1").expect("default node");
        assert_eq!(assignment.image.tag(), "4.1.2");
    }

    #[test]
    fn test_unknown_group_is_rejected() {
        let mut builder = TopologyConfig::builder();
        let err = builder
            .group_members("brokers", vec!["broker-1"])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::UnknownNodeGroup(group) if group == "brokers"
        ));
    }

    #[test]
    fn test_invalid_version_is_rejected() {
        let mut builder = TopologyConfig::builder();
        let err = builder.parse_confluent_version("latest").unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidVersion { .. }));
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let mut builder = TopologyConfig::builder();
        builder
            .group_members("registry", Vec::<String>::new())
            .expect("declared group");
        let err = builder.build().expect("should build").resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::EmptyNodeGroup(group) if group == "registry"
        ));
    }

    #[test]
    fn test_duplicate_node_is_rejected() {
        let mut builder = TopologyConfig::builder();
        builder
            .group_members("registry", vec!["registry-1", "registry-1"])
            .expect("declared group");
        let err = builder.build().expect("should build").resolve().unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::DuplicateNode(node) if node == "registry-1"
        ));
    }

    #[test]
    fn test_invalid_node_name_is_rejected() {
        let mut builder = TopologyConfig::builder();
        builder
            .group_members("registry", vec!["registry 1"])
            .expect("declared group");
        let err = builder.build().expect("should build").resolve().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidNodeName(_)));
    }

    #[test]
    fn test_with_if_combinator() {
        let config = TopologyConfig::builder()
            .with_if(true, |builder| builder.image_registry("localhost:5000"))
            .with_if(false, |builder| builder.image_namespace("never"))
            .build()
            .expect("should build");
        let topology = config.resolve().expect("should resolve");

        let assignment = topology.get("registry-1").expect("default node");
        assert_eq!(
            assignment.image.to_string(),
            "localhost:5000/confluent/schema-registry:4.0.0"
        );
    }
}
