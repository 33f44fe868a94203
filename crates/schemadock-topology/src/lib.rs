//! Declarative topology for Confluent Schema Registry test clusters.
//!
//! This crate owns no container lifecycle. It resolves the node and image
//! layout that an external orchestration host materializes into containers,
//! and renders the per-node provisioning data the host applies while
//! bringing the cluster up.
//!
//! # Example
//!
//! To resolve the default single-node topology:
//!
//! ```
//! use schemadock_topology::{TopologyConfig, ConfigurationError};
//! # fn example() -> Result<(), ConfigurationError> {
//! let config = TopologyConfig::builder().build()?;
//! let topology = config.resolve()?;
//! assert_eq!(topology.len(), 1);
//! # Ok(())
//! # }
//! ```

#![deny(rustdoc::broken_intra_doc_links)]

mod descriptor;
mod error;
mod image;
pub mod plan;

/// extensions
#[cfg(feature = "cli")]
pub mod cli;

pub use descriptor::{TopologyConfig, TopologyConfigBuilder, NodeGroup};
pub use descriptor::{ResolvedTopology, NodeAssignment, PortMapping};
pub use error::ConfigurationError;
pub use image::ImageRef;
pub use plan::ProvisionPlan;
