//! Broker configuration rewriting.

use schemadock_types::NodeId;

/// Gives a node its own broker id.
///
/// The stock broker config inside the image ships with `broker.id=0`; the
/// host fetches it, passes it through here, and places the result back on
/// the node.
pub fn rewrite_broker_id(config: &str, broker_id: NodeId) -> String {
    config.replace("broker.id=0", &format!("broker.id={broker_id}"))
}
