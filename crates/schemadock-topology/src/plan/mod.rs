//! Provisioning data handed to the orchestration host.
//!
//! Rendering is pure: nothing here touches a filesystem or a process. The
//! plan describes, stage by stage, the files the host places on each node,
//! the detached start commands it runs, and the probes it polls before
//! moving on. Execution order and supervision belong entirely to the host.

mod kafka;
mod zookeeper;

pub use kafka::rewrite_broker_id;
pub use zookeeper::{ensemble_properties, myid};

use serde::{Serialize, Deserialize};
use tracing::debug;

use schemadock_types::{NodeId, NodeName};
use schemadock_types::defaults::{PROBE_INTERVAL_SECS, PROBE_TIMEOUT_SECS, ZK_DATA_DIR};

use crate::ResolvedTopology;

const ZK_MYID_PATH: &str = "/zookeeper/myid";
const ZK_PROPERTIES_PATH: &str = "/zookeeper.properties";
const KAFKA_PROPERTIES_PATH: &str = "/kafka.properties";
const KAFKA_SOURCE_PROPERTIES: &str = "/confluent/etc/kafka/server.properties";

const ZK_START_COMMAND: &str = "/start_zookeeper";
const KAFKA_START_COMMAND: &str = "/start_kafka";
const REGISTRY_START_COMMAND: &str = "/start_schema_registry";

const ZK_PROBE_COMMAND: &str = "/confluent/bin/zookeeper-shell localhost:2181 ls /";
const BROKER_PROBE_COMMAND: &str =
    r#"/confluent/bin/zookeeper-shell localhost:2181 <<< "ls /brokers/ids" | tail -n 1"#;

/// One action the host performs on a single node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeAction {
    /// Create a directory inside the container.
    MakeDir { path: String },
    /// Place a rendered file into the container.
    WriteFile { path: String, content: String },
    /// Copy a file within the container, rewriting the broker id on the
    /// way with [`rewrite_broker_id`].
    RewriteBrokerConfig {
        source: String,
        dest: String,
        broker_id: NodeId,
    },
    /// Run a command, optionally leaving it running in the background.
    Exec { command: String, detach: bool },
}

/// An action bound to the node it runs on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStep {
    pub node: NodeName,
    pub action: NodeAction,
}

/// Success criterion the host applies to a probe command's result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProbeSuccess {
    /// The command exits with status zero.
    ExitZero,
    /// The last output line parses as a JSON array of the expected length.
    JsonArrayLen { expected: usize },
}

/// A condition the host polls before moving to the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitProbe {
    pub node: NodeName,
    pub command: String,
    pub success: ProbeSuccess,
    pub interval_secs: u64,
    pub timeout_secs: u64,
}

impl WaitProbe {
    fn new(node: &str, command: &str, success: ProbeSuccess) -> Self {
        Self {
            node: node.to_string(),
            command: command.to_string(),
            success,
            interval_secs: PROBE_INTERVAL_SECS,
            timeout_secs: PROBE_TIMEOUT_SECS,
        }
    }
}

/// A provisioning stage; steps run in order, probes gate the next stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub name: String,
    pub steps: Vec<NodeStep>,
    pub probes: Vec<WaitProbe>,
}

/// Ordered provisioning stages for a resolved topology.
///
/// Mirrors the service bring-up order inside the image: the zookeeper
/// ensemble first, then the brokers, then the schema registry itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionPlan {
    stages: Vec<Stage>,
}

impl ProvisionPlan {
    /// Renders the three-stage startup plan for a resolved topology.
    pub fn render(topology: &ResolvedTopology) -> Self {
        let nodes = topology.nodes_in_order();
        let hosts: Vec<NodeName> = nodes.iter().map(|(name, _)| (*name).clone()).collect();
        debug!(nodes = nodes.len(), "rendering provision plan");

        let ensemble = ensemble_properties(&hosts);
        let mut zk_steps = Vec::new();
        let mut zk_probes = Vec::new();
        for (name, assignment) in &nodes {
            zk_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::MakeDir {
                    path: ZK_DATA_DIR.to_string(),
                },
            });
            zk_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::WriteFile {
                    path: ZK_MYID_PATH.to_string(),
                    content: myid(assignment.node_id),
                },
            });
            zk_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::WriteFile {
                    path: ZK_PROPERTIES_PATH.to_string(),
                    content: ensemble.clone(),
                },
            });
            zk_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::Exec {
                    command: ZK_START_COMMAND.to_string(),
                    detach: true,
                },
            });
            zk_probes.push(WaitProbe::new(name, ZK_PROBE_COMMAND, ProbeSuccess::ExitZero));
        }

        let mut kafka_steps = Vec::new();
        for (name, assignment) in &nodes {
            kafka_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::RewriteBrokerConfig {
                    source: KAFKA_SOURCE_PROPERTIES.to_string(),
                    dest: KAFKA_PROPERTIES_PATH.to_string(),
                    broker_id: assignment.node_id,
                },
            });
            kafka_steps.push(NodeStep {
                node: (*name).clone(),
                action: NodeAction::Exec {
                    command: KAFKA_START_COMMAND.to_string(),
                    detach: true,
                },
            });
        }
        // All brokers register in zookeeper; polling any single node sees them.
        let kafka_probes = hosts
            .first()
            .map(|first| {
                vec![WaitProbe::new(
                    first,
                    BROKER_PROBE_COMMAND,
                    ProbeSuccess::JsonArrayLen {
                        expected: hosts.len(),
                    },
                )]
            })
            .unwrap_or_default();

        let registry_steps = nodes
            .iter()
            .map(|(name, _)| NodeStep {
                node: (*name).clone(),
                action: NodeAction::Exec {
                    command: REGISTRY_START_COMMAND.to_string(),
                    detach: true,
                },
            })
            .collect();

        Self {
            stages: vec![
                Stage {
                    name: "zookeeper".to_string(),
                    steps: zk_steps,
                    probes: zk_probes,
                },
                Stage {
                    name: "kafka".to_string(),
                    steps: kafka_steps,
                    probes: kafka_probes,
                },
                Stage {
                    name: "schema-registry".to_string(),
                    steps: registry_steps,
                    probes: Vec::new(),
                },
            ],
        }
    }

    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }
}
