//! List deployed contract addresses

use abiweld_core::bindings::load_deployments;
use abiweld_core::ProjectDir;
use clap::Args;
use color_eyre::eyre::{eyre, Result};
use console::style;

use super::load_config;

/// List deployed contract addresses
#[derive(Args)]
pub struct AddressesCommand {
    /// Filter by deployment target
    #[arg(long, short)]
    pub target: Option<String>,
}

impl AddressesCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        let config = load_config(project)?;
        let records = load_deployments(&config.deployments_path(project))?;

        if let Some(target) = &self.target {
            if !records.contains_target(target) {
                return Err(eyre!(
                    "Target '{}' not found. Known targets: {}",
                    target,
                    records.targets().join(", ")
                ));
            }
        }

        println!(
            "{:<15} {:<10} {:<30} {:<42}",
            "Target", "Chain ID", "Contract", "Address"
        );
        println!("{}", "-".repeat(100));

        let mut total = 0;
        for target in records.targets() {
            if self.target.as_deref().is_some_and(|t| t != target) {
                continue;
            }
            let Some(record) = records.target(target)? else {
                continue;
            };
            let chain_id = record
                .chain_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "-".to_string());

            for contract in &record.contracts {
                println!(
                    "{:<15} {:<10} {:<30} {:<42}",
                    target,
                    chain_id,
                    contract.name,
                    contract.address()
                );
                total += 1;
            }
        }

        println!();
        if total == 0 {
            println!("{} No deployments recorded", style("*").yellow());
        } else {
            println!("Total: {} deployment(s)", total);
        }

        Ok(())
    }
}
