use clap::Parser;
use anyhow::Result;

mod error;
mod start;

pub use error::TopologyCliError;
pub use start::{StartOpt, StartManifest};

/// Manage schema registry test-cluster topologies
#[derive(Debug, Parser)]
pub enum TopologyCmd {
    /// Resolve the topology and emit the start manifest for the host
    #[command(name = "start")]
    Start(StartOpt),
}

impl TopologyCmd {
    /// process topology commands
    pub fn process(self) -> Result<()> {
        match self {
            Self::Start(start) => {
                start.process()?;
            }
        }

        Ok(())
    }
}
