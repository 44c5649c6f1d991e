use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use epg_merger::{config::Config, pipeline::EpgMergePipeline};

#[derive(Parser)]
#[command(name = "epg-merger")]
#[command(version)]
#[command(about = "Merge several XMLTV guides into one filtered, offset-normalized file")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file path (created with defaults if missing)
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Override the output file path
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Skip publishing even if enabled in the configuration
    #[arg(long)]
    no_publish: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'v', long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_filter = format!("epg_merger={}", cli.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting EPG merger v{}", env!("CARGO_PKG_VERSION"));

    let mut config = Config::load_from_file(&cli.config)?;
    info!("Configuration loaded from: {}", cli.config);

    if let Some(output) = cli.output {
        config.output_path = output;
    }
    if cli.no_publish {
        config.publish.enabled = false;
    }

    config.validate()?;

    let pipeline = EpgMergePipeline::from_config(config)?;
    match pipeline.run().await {
        Ok(report) => {
            report.log_summary();
            Ok(())
        }
        Err(e) => {
            error!("EPG merge failed: {}", e);
            Err(e.into())
        }
    }
}
