//! Documented defaults for the schema registry topology.
//!
//! Single source of truth for the descriptor defaults and the CLI
//! `default_value`s bound to them.

/// Confluent platform version used when `--confluent-version` is not given.
pub const DEFAULT_CONFLUENT_VERSION: &str = "4.0.0";

/// The single starter member of the registry node group.
pub const DEFAULT_NODE_NAME: &str = "registry-1";

/// Name of the node group every registry node belongs to.
pub const DEFAULT_GROUP_NAME: &str = "registry";

/// Image namespace of the published schema registry images.
pub const DEFAULT_IMAGE_NAMESPACE: &str = "confluent";

/// Image name of the schema registry container.
pub const SCHEMA_REGISTRY_IMAGE: &str = "schema-registry";

/// REST listener published on every registry node.
pub const SR_REST_PORT: u16 = 8081;

// Zookeeper ensemble settings rendered into every node's properties file.

/// Zookeeper client port.
pub const ZK_CLIENT_PORT: u16 = 2181;

/// Zookeeper quorum peer port.
pub const ZK_PEER_PORT: u16 = 2888;

/// Zookeeper leader election port.
pub const ZK_ELECTION_PORT: u16 = 3888;

/// Zookeeper tick, in milliseconds.
pub const ZK_TICK_TIME_MS: u32 = 2000;

/// Ensemble init limit, in ticks.
pub const ZK_INIT_LIMIT: u32 = 5;

/// Ensemble sync limit, in ticks.
pub const ZK_SYNC_LIMIT: u32 = 2;

/// Zookeeper data directory inside the container.
pub const ZK_DATA_DIR: &str = "/zookeeper";

/// Seconds between startup probe attempts.
pub const PROBE_INTERVAL_SECS: u64 = 3;

/// Seconds before a startup probe gives up.
pub const PROBE_TIMEOUT_SECS: u64 = 60;
