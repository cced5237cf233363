//! Show what a merge would pick from each artifact

use std::path::Path;

use abiweld_core::{ArtifactOutcome, Merger, ProjectDir};
use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use super::load_config;

/// Show what a merge would pick from each artifact
#[derive(Args)]
pub struct ListCommand {
    /// Hide artifacts that contribute no fragments
    #[arg(long)]
    pub contributing: bool,
}

impl ListCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        let config = load_config(project)?;
        let artifacts_dir = config.artifacts_dir(project)?;
        let report = Merger::new(project, &config)?.plan()?;

        if report.artifacts.is_empty() {
            println!("No artifacts found in {}.", artifacts_dir.display());
            println!("Run {} first.", style("forge build").yellow());
            return Ok(());
        }

        println!("{:<60} {:<20} {:>10}", "Artifact", "Strategy", "Fragments");
        println!("{}", "-".repeat(92));

        for artifact in &report.artifacts {
            if self.contributing && !contributes(&artifact.outcome) {
                continue;
            }

            let name = relative(&artifact.path, &artifacts_dir);
            match &artifact.outcome {
                ArtifactOutcome::Merged {
                    strategy,
                    selected,
                    total,
                } => println!(
                    "{:<60} {:<20} {:>10}",
                    name,
                    strategy.to_string(),
                    format!("{}/{}", selected, total)
                ),
                ArtifactOutcome::NoAbi => {
                    println!("{:<60} {:<20} {:>10}", name, style("no abi").dim(), "-")
                }
                ArtifactOutcome::Skipped { reason } => println!(
                    "{:<60} {:<20} {}",
                    name,
                    style("skipped").yellow(),
                    reason
                ),
            }
        }

        println!();
        println!(
            "Total: {} fragment(s) from {} artifact(s), {} skipped",
            report.fragments.len(),
            report.merged_count(),
            report.skipped_count()
        );

        Ok(())
    }
}

fn contributes(outcome: &ArtifactOutcome) -> bool {
    matches!(outcome, ArtifactOutcome::Merged { selected, .. } if *selected > 0)
}

/// Display an artifact path relative to the artifacts directory
fn relative(path: &Path, root: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
