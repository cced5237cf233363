mod commands;

use std::path::PathBuf;

use abiweld_core::ProjectDir;
use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use commands::Command;

#[derive(Parser)]
#[command(name = "abiweld")]
#[command(about = "Merge Foundry ABIs and export deployment bindings")]
#[command(version)]
struct Cli {
    /// Project root (directory containing foundry.toml)
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Log scan decisions for every artifact
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let project = ProjectDir::at(cli.root);
    cli.command.run(&project).await
}

/// Logs go to stderr so command output stays pipeable
fn init_tracing(verbose: bool) {
    let default = if verbose { "abiweld_core=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
