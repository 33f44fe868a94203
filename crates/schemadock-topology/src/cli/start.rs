use clap::Parser;
use serde::Serialize;
use tracing::debug;

use schemadock_types::defaults::{
    DEFAULT_CONFLUENT_VERSION, DEFAULT_GROUP_NAME, DEFAULT_NODE_NAME,
};

use crate::{ConfigurationError, ProvisionPlan, ResolvedTopology, TopologyConfig};

use super::TopologyCliError;

/// Flags recognized by the host's generic start command for this topology.
#[derive(Debug, Parser)]
pub struct StartOpt {
    /// Confluent platform version to run; doubles as the image tag
    #[arg(long, default_value = DEFAULT_CONFLUENT_VERSION)]
    pub confluent_version: String,

    /// Hostnames of the nodes in the registry group
    #[arg(long, default_value = DEFAULT_NODE_NAME, value_delimiter = ',')]
    pub nodes: Vec<String>,

    /// use custom docker registry
    #[arg(long)]
    pub registry: Option<String>,

    /// use custom image namespace
    #[arg(long)]
    pub namespace: Option<String>,

    /// Pull images even when they are already present locally
    #[arg(long)]
    pub always_pull: bool,
}

/// The resolved start document handed to the orchestration host.
#[derive(Debug, Serialize)]
pub struct StartManifest {
    /// Forwarded to the host's image pull step verbatim.
    pub always_pull: bool,
    pub topology: ResolvedTopology,
    pub plan: ProvisionPlan,
}

impl StartOpt {
    /// Merges the flag values over the topology defaults.
    pub fn topology_config(&self) -> Result<TopologyConfig, ConfigurationError> {
        let mut builder = TopologyConfig::builder();

        builder.parse_confluent_version(&self.confluent_version)?;
        builder.group_members(DEFAULT_GROUP_NAME, self.nodes.clone())?;

        if let Some(registry) = &self.registry {
            builder.image_registry(registry.clone());
        }

        if let Some(namespace) = &self.namespace {
            builder.image_namespace(namespace.clone());
        }

        builder.build()
    }

    /// Resolves the topology and writes the start manifest to stdout.
    pub fn process(self) -> Result<(), TopologyCliError> {
        let config = self.topology_config()?;
        debug!("topology config: {:#?}", config);

        let topology = config.resolve()?;
        let plan = ProvisionPlan::render(&topology);
        let manifest = StartManifest {
            always_pull: self.always_pull,
            topology,
            plan,
        };

        println!("{}", serde_json::to_string_pretty(&manifest)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flags() {
        let opt = StartOpt::parse_from(vec![
            "test", // First arg is treated as binary name
        ]);

        assert_eq!(opt.confluent_version, "4.0.0");
        assert_eq!(opt.nodes, ["registry-1"]);
        assert!(opt.registry.is_none());
        assert!(opt.namespace.is_none());
        assert!(!opt.always_pull);
    }

    #[test]
    fn test_node_list_flag() {
        let opt = StartOpt::parse_from(vec!["test", "--nodes", "registry-1,registry-2"]);
        assert_eq!(opt.nodes, ["registry-1", "registry-2"]);
    }

    #[test]
    fn test_flags_merge_over_defaults() {
        let opt = StartOpt::parse_from(vec![
            "test",
            "--confluent-version",
            "4.1.0",
            "--registry",
            "localhost:5000",
        ]);
        let topology = opt
            .topology_config()
            .expect("should build")
            .resolve()
            .expect("should resolve");

        let assignment = topology.get("registry-1").expect("default node");
        assert_eq!(
            assignment.image.to_string(),
            "localhost:5000/confluent/schema-registry:4.1.0"
        );
    }

    #[test]
    fn test_default_flags_resolve_to_default_topology() {
        let opt = StartOpt::parse_from(vec!["test"]);
        let topology = opt
            .topology_config()
            .expect("should build")
            .resolve()
            .expect("should resolve");

        assert_eq!(topology.len(), 1);
        let assignment = topology.get("registry-1").expect("default node");
        assert_eq!(
            assignment.image.to_string(),
            "confluent/schema-registry:4.0.0"
        );
        assert_eq!(assignment.group, "registry");
    }

    #[test]
    fn test_malformed_version_is_fatal() {
        let opt = StartOpt::parse_from(vec!["test", "--confluent-version", "four"]);
        let err = opt.topology_config().unwrap_err();
        assert!(matches!(err, ConfigurationError::InvalidVersion { .. }));
    }
}
