use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

const DEFAULT_LOG_FILTER: &str = "motif=info";

#[derive(Parser)]
#[command(name = "motif")]
#[command(about = "MOTIF CLI - replay configurator edits against reference data", long_about = None)]
struct Cli {
    /// Log filter (e.g. `debug`, `motif_application=trace`); overrides RUST_LOG
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Explicit config.toml instead of the platform config directory
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay an action script and print the resulting session
    Replay {
        /// Initialization payload (JSON)
        #[arg(long)]
        reference: PathBuf,
        /// Action script (JSON array of `{"type", "payload"}`)
        #[arg(long)]
        actions: PathBuf,
        /// Save after replaying
        #[arg(long)]
        submit: bool,
        /// Write submitted payloads to this directory instead of memory
        #[arg(long, requires = "submit")]
        outbox: Option<PathBuf>,
        /// Item id recorded in outbox entries
        #[arg(long, default_value = "item")]
        item_id: String,
    },
    /// Replay an action script and print the save payload it would submit
    Payload {
        #[arg(long)]
        reference: PathBuf,
        #[arg(long)]
        actions: PathBuf,
    },
}

fn init_tracing(log_level: Option<&str>) {
    let filter = match log_level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match cli.command {
        Commands::Replay {
            reference,
            actions,
            submit,
            outbox,
            item_id,
        } => {
            let options = commands::replay::ReplayOptions {
                reference,
                actions,
                submit,
                outbox,
                item_id,
                config: cli.config,
            };
            commands::replay::run(options).await?
        }
        Commands::Payload { reference, actions } => commands::payload::run(&reference, &actions)?,
    }

    Ok(())
}
