use std::collections::BTreeMap;

use serde::{Serialize, Deserialize};

use schemadock_types::{GroupName, NodeId, NodeName};
use schemadock_types::defaults::SR_REST_PORT;

use crate::image::ImageRef;

/// Host/container port pair published on every node of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    pub host: u16,
    pub container: u16,
}

impl PortMapping {
    /// The REST listener mapping of a registry node.
    pub fn rest() -> Self {
        Self {
            host: SR_REST_PORT,
            container: SR_REST_PORT,
        }
    }
}

/// Everything the host needs to materialize one container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAssignment {
    /// Image the host pulls and runs for this node.
    pub image: ImageRef,
    /// Node group the node belongs to.
    pub group: GroupName,
    /// Ports published on the node.
    pub ports: Vec<PortMapping>,
    /// Stable index of the node within the cluster; doubles as the
    /// zookeeper `myid` and the kafka broker id.
    pub node_id: NodeId,
}

/// The final, immutable node to image/role mapping consumed by the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedTopology {
    assignments: BTreeMap<NodeName, NodeAssignment>,
}

impl ResolvedTopology {
    pub(crate) fn new(assignments: BTreeMap<NodeName, NodeAssignment>) -> Self {
        Self { assignments }
    }

    pub fn get(&self, node: &str) -> Option<&NodeAssignment> {
        self.assignments.get(node)
    }

    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    /// Iterates assignments in node-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&NodeName, &NodeAssignment)> {
        self.assignments.iter()
    }

    /// Nodes in declaration order; drives per-node provisioning indices.
    pub fn nodes_in_order(&self) -> Vec<(&NodeName, &NodeAssignment)> {
        let mut nodes: Vec<_> = self.assignments.iter().collect();
        nodes.sort_by_key(|(_, assignment)| assignment.node_id);
        nodes
    }
}
