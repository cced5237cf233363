//! CLI commands for abiweld

use abiweld_core::{ProjectConfig, ProjectDir};
use clap::Subcommand;
use color_eyre::eyre::Result;

pub mod addresses;
pub mod export;
pub mod get;
pub mod init;
pub mod list;
pub mod merge;

/// All available CLI commands
#[derive(Subcommand)]
pub enum Command {
    /// Write a default abiweld.toml
    Init(init::InitCommand),

    /// Merge artifact ABIs into a single file
    Merge(merge::MergeCommand),

    /// Show what a merge would pick from each artifact
    List(list::ListCommand),

    /// List deployed contract addresses
    Addresses(addresses::AddressesCommand),

    /// Get the address of a deployed contract
    Get(get::GetCommand),

    /// Export deployment addresses and ABI as one JSON bundle
    Export(export::ExportCommand),
}

impl Command {
    /// Execute the command
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        match self {
            Command::Init(cmd) => cmd.run(project).await,
            Command::Merge(cmd) => cmd.run(project).await,
            Command::List(cmd) => cmd.run(project).await,
            Command::Addresses(cmd) => cmd.run(project).await,
            Command::Get(cmd) => cmd.run(project).await,
            Command::Export(cmd) => cmd.run(project).await,
        }
    }
}

/// Load abiweld.toml, or defaults when the project has none
pub(crate) fn load_config(project: &ProjectDir) -> Result<ProjectConfig> {
    Ok(ProjectConfig::load(project)?)
}
