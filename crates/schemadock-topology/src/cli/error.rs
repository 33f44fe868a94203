use std::io::Error as IoError;

use crate::ConfigurationError;

/// The types of errors that can occur at the command surface
#[derive(thiserror::Error, Debug)]
pub enum TopologyCliError {
    /// An IO error occurred while writing the manifest.
    #[error(transparent)]
    IoError(#[from] IoError),
    /// Topology resolution failed; fatal, nothing was created.
    #[error("Topology configuration error")]
    Config(#[from] ConfigurationError),
    /// The resolved manifest could not be serialized.
    #[error("Failed to serialize start manifest")]
    Serde(#[from] serde_json::Error),
}
