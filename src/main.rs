mod commands;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use staycal_core::export::ExportFormat;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "staycal")]
#[command(about = "Export booking reservations as all-day occupancy calendars")]
struct Cli {
    /// Log level, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an .ics or JSON calendar from a reservations file
    Export {
        /// JSON file with reservations
        #[arg(short, long)]
        input: PathBuf,

        /// Output format: ics or json
        #[arg(short, long, default_value = "ics")]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Config file (defaults to ~/.config/staycal/config.toml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Calendar display name, overrides the config
        #[arg(long)]
        name: Option<String>,
    },
    /// List the all-day events of an .ics file
    Inspect { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Export {
            input,
            format,
            output,
            config,
            name,
        } => commands::export::run(input, format, output, config, name).await,
        Commands::Inspect { file } => commands::inspect::run(&file),
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}
