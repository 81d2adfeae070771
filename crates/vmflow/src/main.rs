mod commands;
mod utils;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "vmflow")]
#[command(about = "Provision Azure and GCP virtual machines from INI files", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create every VM described in the provider files (default)
    Provision {
        #[command(flatten)]
        run: RunArgs,
        /// Do not copy the provider files with a timestamp suffix
        #[arg(long)]
        no_archive: bool,
        /// Print the run report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate the provider files and print the commands that would run
    Plan {
        #[command(flatten)]
        run: RunArgs,
    },
    /// Show version information
    Version,
}

/// Options shared by provision and plan
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Settings file (toml, yaml or json)
    #[arg(long, env = "VMFLOW_SETTINGS")]
    pub settings: Option<PathBuf>,
    /// Azure provider file
    #[arg(long)]
    pub azure_config: Option<PathBuf>,
    /// GCP provider file
    #[arg(long)]
    pub gcp_config: Option<PathBuf>,
    /// Directory for VMcreation_*.txt records
    #[arg(long)]
    pub docs_dir: Option<PathBuf>,
    /// Run a single provider pass (azure, gcp)
    #[arg(long, value_name = "PROVIDER")]
    pub only: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // logs go to stderr, operator output to stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    match cli.command.unwrap_or(Commands::Provision {
        run: RunArgs::default(),
        no_archive: false,
        json: false,
    }) {
        Commands::Provision {
            run,
            no_archive,
            json,
        } => {
            commands::provision::handle(&run, no_archive, json).await?;
        }
        Commands::Plan { run } => {
            commands::plan::handle(&run).await?;
        }
        Commands::Version => {
            println!("vmflow {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
