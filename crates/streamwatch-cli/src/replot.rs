//! Offline chart re-rendering from an existing series log.
//!
//! The series files are the durable half of the store; this command reads
//! one back and re-renders its chart without touching the monitor, e.g.
//! after a styling change.

use std::path::PathBuf;

use anyhow::Context;
use chrono::DateTime;
use streamwatch_core::{peak_of, AppConfig};
use streamwatch_plot::{optimize_artifact, render};
use streamwatch_store::{read_series, series_path};

pub async fn replot(
    config: &AppConfig,
    broadcast_id: &str,
    log: Option<PathBuf>,
    start_epoch: Option<i64>,
) -> anyhow::Result<()> {
    let file = log.unwrap_or_else(|| series_path(&config.log_dir, broadcast_id));
    let series = read_series(&file)?;
    anyhow::ensure!(
        !series.is_empty(),
        "series log {} has no samples",
        file.display()
    );

    // Without the remote record, the first sample bounds the start.
    let start = start_epoch.unwrap_or(series[0].epoch_secs);
    let peak = peak_of(&series, start)
        .context("peak analysis failed on a non-empty series")?;

    let date = DateTime::from_timestamp(start, 0)
        .with_context(|| format!("invalid start epoch {start}"))?
        .date_naive();
    let stem = format!("{date}-{broadcast_id}");

    let artifacts = render(&series, start, peak, &config.out_dir, &stem)?;
    optimize_artifact(&config.svg_optimizer, &artifacts.svg).await;
    optimize_artifact(&config.png_optimizer, &artifacts.png).await;

    tracing::info!(
        broadcast_id,
        peak_viewers = peak.viewers,
        peak_offset_secs = peak.offset_secs,
        svg = %artifacts.svg.display(),
        png = %artifacts.png.display(),
        "chart re-rendered"
    );
    Ok(())
}
