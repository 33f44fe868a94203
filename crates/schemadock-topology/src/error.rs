use schemadock_types::NodeNameError;

/// The types of errors that can occur while resolving a topology
#[derive(thiserror::Error, Debug)]
pub enum ConfigurationError {
    /// The version override cannot be used to form an image tag.
    #[error("Invalid confluent version {version:?}")]
    InvalidVersion {
        version: String,
        source: semver::Error,
    },
    /// A membership override referenced a node group the topology does not declare.
    #[error("Unknown node group {0:?}")]
    UnknownNodeGroup(String),
    /// A node group resolved to an empty member list.
    #[error("Node group {0:?} has no members")]
    EmptyNodeGroup(String),
    /// The same node name was declared more than once.
    #[error("Node {0:?} is declared more than once")]
    DuplicateNode(String),
    /// A node name cannot be used as a container hostname.
    #[error("Invalid node name")]
    InvalidNodeName(#[from] NodeNameError),
    /// Attempted to construct a Config object without all required fields
    #[error("Missing required config option {0}")]
    MissingRequiredConfig(String),
}
