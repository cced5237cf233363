//! Initialize abiweld in a Foundry project

use abiweld_core::{ProjectConfig, ProjectDir};
use clap::Args;
use color_eyre::eyre::{eyre, Result};
use console::style;

/// Write a default abiweld.toml
#[derive(Args)]
pub struct InitCommand {
    /// Overwrite an existing abiweld.toml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub async fn run(self, project: &ProjectDir) -> Result<()> {
        // Check if we're in a Foundry project
        if !project.is_foundry_project() {
            return Err(eyre!(
                "Not a Foundry project. Please run this command in a directory with {}",
                ProjectDir::FOUNDRY_CONFIG_FILE
            ));
        }

        if project.has_config() && !self.force {
            return Err(eyre!(
                "{} already exists. Use {} to overwrite it.",
                ProjectDir::CONFIG_FILE,
                style("--force").yellow()
            ));
        }

        let config = ProjectConfig::default();
        std::fs::write(project.config_path(), config.to_toml()?)?;
        println!(
            "{} Created {}",
            style("✓").green(),
            ProjectDir::CONFIG_FILE
        );

        let output = config.output_path(project)?;
        println!();
        println!("Next steps:");
        println!(
            "  1. Adjust {} in {} if your proxy interface has another name",
            style("[[merge.rules]]").cyan(),
            ProjectDir::CONFIG_FILE
        );
        println!(
            "  2. Run {} after {} to write {}",
            style("abiweld merge").cyan(),
            style("forge build").cyan(),
            output.display()
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_requires_foundry_project() {
        let tmp = tempfile::tempdir().unwrap();
        let project = ProjectDir::at(tmp.path());

        let result = InitCommand { force: false }.run(&project).await;
        assert!(result.is_err());
        assert!(!project.has_config());
    }

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("foundry.toml"), "[profile.default]\n").unwrap();
        let project = ProjectDir::at(tmp.path());

        InitCommand { force: false }.run(&project).await.unwrap();

        let config = ProjectConfig::load(&project).unwrap();
        assert_eq!(config, ProjectConfig::default());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("foundry.toml"), "[profile.default]\n").unwrap();
        std::fs::write(tmp.path().join("abiweld.toml"), "[merge]\nrules = []\n").unwrap();
        let project = ProjectDir::at(tmp.path());

        assert!(InitCommand { force: false }.run(&project).await.is_err());

        InitCommand { force: true }.run(&project).await.unwrap();
        let config = ProjectConfig::load(&project).unwrap();
        assert_eq!(config.merge.rules.len(), 1);
    }
}
