//! Zookeeper ensemble configuration rendering.

use schemadock_types::{NodeId, NodeName};
use schemadock_types::defaults::{
    ZK_CLIENT_PORT, ZK_DATA_DIR, ZK_ELECTION_PORT, ZK_INIT_LIMIT, ZK_PEER_PORT, ZK_SYNC_LIMIT,
    ZK_TICK_TIME_MS,
};

/// Renders the ensemble `zookeeper.properties` shared by every node.
///
/// Hosts must be passed in declaration order; the `server.N` index must
/// agree with each node's `myid`.
pub fn ensemble_properties(hosts: &[NodeName]) -> String {
    let mut lines = vec![
        format!("tickTime={ZK_TICK_TIME_MS}"),
        format!("dataDir={ZK_DATA_DIR}"),
        format!("clientPort={ZK_CLIENT_PORT}"),
        format!("initLimit={ZK_INIT_LIMIT}"),
        format!("syncLimit={ZK_SYNC_LIMIT}"),
    ];
    for (idx, host) in hosts.iter().enumerate() {
        lines.push(format!("server.{idx}={host}:{ZK_PEER_PORT}:{ZK_ELECTION_PORT}"));
    }
    lines.join("\n")
}

/// Content of a node's `myid` file.
pub fn myid(id: NodeId) -> String {
    id.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensemble_properties() {
        let hosts = vec!["registry-1".to_string(), "registry-2".to_string()];
        let rendered = ensemble_properties(&hosts);
        assert_eq!(
            rendered,
            "tickTime=2000\n\
             dataDir=/zookeeper\n\
             clientPort=2181\n\
             initLimit=5\n\
             syncLimit=2\n\
             server.0=registry-1:2888:3888\n\
             server.1=registry-2:2888:3888"
        );
    }

    #[test]
    fn test_myid() {
        assert_eq!(myid(0), "0");
        assert_eq!(myid(3), "3");
    }
}
