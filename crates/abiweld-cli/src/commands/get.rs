//! Get the address of a deployed contract

use abiweld_core::bindings::load_deployments;
use abiweld_core::ProjectDir;
use clap::Args;
use color_eyre::eyre::{eyre, Result};

use super::load_config;

/// Get the address of a deployed contract
#[derive(Args)]
pub struct GetCommand {
    /// Contract name as recorded in the deployments file
    pub contract: String,

    /// Deployment target
    #[arg(long, short)]
    pub target: String,
}

impl GetCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        let config = load_config(project)?;
        let records = load_deployments(&config.deployments_path(project))?;

        let address = records.address_of(&self.target, &self.contract)?;

        match address {
            Some(address) => {
                // Just print the address for easy scripting: $(abiweld get DiamondProxy -t local)
                println!("{}", address);
                Ok(())
            }
            None => Err(eyre!(
                "No deployment found for contract '{}' on target '{}'",
                self.contract,
                self.target
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_unknown_contract() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("gemforge.deployments.json"),
            r#"{"local": {"chainId": 31337, "contracts": []}}"#,
        )
        .unwrap();
        let project = ProjectDir::at(tmp.path());

        let cmd = GetCommand {
            contract: "DiamondProxy".to_string(),
            target: "local".to_string(),
        };
        assert!(cmd.run(&project).await.is_err());
    }

    #[tokio::test]
    async fn test_get_missing_deployments_file() {
        let tmp = tempfile::tempdir().unwrap();
        let project = ProjectDir::at(tmp.path());

        let cmd = GetCommand {
            contract: "DiamondProxy".to_string(),
            target: "local".to_string(),
        };
        assert!(cmd.run(&project).await.is_err());
    }
}
