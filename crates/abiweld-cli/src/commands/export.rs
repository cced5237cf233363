//! Export deployment addresses and ABI as one JSON bundle

use std::path::PathBuf;

use abiweld_core::{Bindings, ProjectDir};
use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use super::load_config;

/// Export deployment addresses and ABI as one JSON bundle
#[derive(Args)]
pub struct ExportCommand {
    /// Write the bundle to a file instead of stdout
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Check that the exported ABI parses as a typed ABI
    #[arg(long)]
    pub validate: bool,
}

impl ExportCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        let config = load_config(project)?;
        let bindings = Bindings::load(project, &config)?;

        if self.validate {
            let abi = bindings.json_abi()?;
            let summary = abi.summary();
            eprintln!(
                "{} ABI: {} function(s), {} event(s), {} error(s)",
                style("✓").green(),
                summary.functions,
                summary.events,
                summary.errors
            );
            for (signature, selector) in abi.error_selectors() {
                eprintln!("  {} {}", style(selector).cyan(), signature);
            }
        }

        let bundle = bindings.to_bundle()?;

        match &self.out {
            Some(path) => {
                std::fs::write(path, bundle)?;
                println!(
                    "{} Exported {} target(s) and {} ABI fragment(s) to {}",
                    style("✓").green(),
                    bindings.deployed_addresses.targets().len(),
                    bindings.abi.len(),
                    style(path.display()).yellow()
                );
            }
            None => println!("{}", bundle),
        }

        Ok(())
    }
}
