//! Merge artifact ABIs into a single file

use abiweld_core::{ErrorPolicy, Merger, ProjectDir};
use clap::Args;
use color_eyre::eyre::Result;
use console::style;

use super::load_config;

/// Merge artifact ABIs into a single file
#[derive(Args)]
pub struct MergeCommand {
    /// Abort on the first unreadable or malformed artifact
    #[arg(long)]
    pub fail_fast: bool,
}

impl MergeCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        let config = load_config(project)?;

        let mut merger = Merger::new(project, &config)?;
        if self.fail_fast {
            merger = merger.with_error_policy(ErrorPolicy::Fail);
        }

        println!(
            "{} Scanning {}...",
            style("->").blue(),
            style(config.artifacts_dir(project)?.display()).cyan()
        );

        let report = merger.run()?;

        for (path, reason) in report.skipped() {
            println!(
                "   {} Skipped {}: {}",
                style("!").yellow(),
                path.display(),
                reason
            );
        }

        println!(
            "{} Merged {} fragment(s) from {} artifact(s) into {}",
            style("*").green().bold(),
            report.fragments.len(),
            report.merged_count(),
            style(report.output.display()).yellow()
        );
        if report.skipped_count() > 0 {
            println!(
                "{} Skipped {} artifact(s)",
                style("*").yellow(),
                report.skipped_count()
            );
        }

        Ok(())
    }
}
