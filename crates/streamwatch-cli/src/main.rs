mod monitor;
mod postprocess;
mod recorder;
mod replot;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;

use crate::monitor::MonitorContext;

#[derive(Debug, Parser)]
#[command(name = "streamwatch-cli")]
#[command(about = "Live-broadcast viewership monitor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Watch the configured channel and log viewership until interrupted
    Run,
    /// Re-render the viewership chart from an existing series log
    Replot {
        /// Broadcast id the log belongs to
        #[arg(long)]
        broadcast_id: String,

        /// Series log file (defaults to the configured log directory)
        #[arg(long)]
        log: Option<PathBuf>,

        /// Broadcast start as Unix seconds (defaults to the first sample)
        #[arg(long)]
        start_epoch: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = streamwatch_core::load_app_config()?;
    init_tracing(&config.log_level);

    match cli.command {
        Commands::Run => {
            let youtube = streamwatch_youtube::YouTubeClient::new(
                &config.youtube_api_key,
                config.request_timeout_secs,
            )?;
            let ctx = MonitorContext { config, youtube };

            let cancel = CancellationToken::new();
            let signal_cancel = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    tracing::info!("interrupt received; shutting down");
                    signal_cancel.cancel();
                }
            });

            monitor::run(&ctx, cancel).await?;
        }
        Commands::Replot {
            broadcast_id,
            log,
            start_epoch,
        } => {
            replot::replot(&config, &broadcast_id, log, start_epoch).await?;
        }
    }

    Ok(())
}

fn init_tracing(default_level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
