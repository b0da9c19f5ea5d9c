//! End-of-stream pipeline: duration gate, peak + plot, index entry, event
//! correlation, metadata document, site rebuild trigger.
//!
//! Every step is independently fallible and individually logged; a failed
//! step never rolls back earlier ones and never aborts the orchestrator.

use std::path::Path;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use streamwatch_core::{peak_of, PeakStat, Sample};
use streamwatch_plot::{optimize_artifact, render};
use streamwatch_schedule::{events_overlapping, ScheduleClient};
use streamwatch_store::{
    append_index, read_series, write_metadata, MetadataEvent, MetadataRecord,
};
use streamwatch_youtube::LiveStreamingDetails;

use crate::monitor::MonitorContext;

/// Processes one ended broadcast from its series log to published
/// artifacts. Returns nothing: failures are logged per step.
pub async fn process(ctx: &MonitorContext, broadcast_id: &str, series_file: &Path) {
    let series = match read_series(series_file) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(broadcast_id, step = "read-series", error = %e, "post-processing aborted");
            return;
        }
    };
    if series.is_empty() {
        tracing::warn!(broadcast_id, "no samples recorded; nothing to publish");
        return;
    }

    // Step 1: authoritative start/end from the remote record. Local sample
    // timestamps only bound the broadcast; they are the fallback, not the
    // source of truth.
    let details = match ctx.youtube.live_details(broadcast_id).await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(
                broadcast_id,
                step = "live-details",
                context = "videos.list",
                error = %e,
                "falling back to sample timestamps"
            );
            None
        }
    };
    let (start, end) = broadcast_window(details.as_ref(), &series);

    // Step 2: duration gate.
    let duration_mins = (end - start).num_minutes();
    if duration_mins < ctx.config.min_duration_mins {
        tracing::info!(
            broadcast_id,
            duration_mins,
            min_duration_mins = ctx.config.min_duration_mins,
            "broadcast too short to publish; skipping"
        );
        return;
    }

    // Step 3: peak statistic and chart. The series is non-empty, so the
    // analyzer always yields a peak here.
    let start_epoch = start.timestamp();
    let stem = format!("{}-{}", start.date_naive(), broadcast_id);
    let peak = peak_of(&series, start_epoch).unwrap_or(PeakStat {
        viewers: 0,
        offset_secs: 0,
    });
    match render(&series, start_epoch, peak, &ctx.config.out_dir, &stem) {
        Ok(artifacts) => {
            tracing::info!(
                broadcast_id,
                peak_viewers = peak.viewers,
                peak_offset_secs = peak.offset_secs,
                svg = %artifacts.svg.display(),
                png = %artifacts.png.display(),
                "plot rendered"
            );
            optimize_artifact(&ctx.config.svg_optimizer, &artifacts.svg).await;
            optimize_artifact(&ctx.config.png_optimizer, &artifacts.png).await;
        }
        Err(e) => {
            tracing::error!(broadcast_id, step = "plot", error = %e, "plot rendering failed");
        }
    }

    // Step 4: global index entry. Written once this point is reached,
    // regardless of how the remaining steps fare, so a broadcast is never
    // reprocessed.
    let index_file = ctx.config.out_dir.join("index.txt");
    if let Err(e) = append_index(&index_file, start.date_naive(), broadcast_id) {
        tracing::error!(broadcast_id, step = "index", error = %e, "index append failed");
    }

    // Step 5: external events overlapping [start - 30min, end]. The
    // pre-roll tolerates broadcasts that start late against their
    // scheduled slot.
    let events = correlate_events(ctx, start, end).await;

    // Step 6: metadata document.
    let record = MetadataRecord {
        broadcast_id: broadcast_id.to_owned(),
        start,
        end,
        events,
        plot: format!("{stem}.png"),
        peak_viewers: peak.viewers,
        peak_offset_secs: peak.offset_secs,
    };
    match write_metadata(&ctx.config.out_dir, &record) {
        Ok(path) => tracing::info!(broadcast_id, path = %path.display(), "metadata written"),
        Err(e) => {
            tracing::error!(broadcast_id, step = "metadata", error = %e, "metadata write failed");
        }
    }

    // Step 7: fire-and-forget site rebuild. The exit status is not
    // inspected.
    if let Some(cmd) = &ctx.config.site_rebuild_cmd {
        match tokio::process::Command::new(cmd).spawn() {
            Ok(mut child) => {
                tracing::info!(broadcast_id, cmd = %cmd, "site rebuild triggered");
                tokio::spawn(async move {
                    let _ = child.wait().await;
                });
            }
            Err(e) => {
                tracing::error!(broadcast_id, step = "site-rebuild", cmd = %cmd, error = %e, "trigger failed");
            }
        }
    }
}

/// Authoritative window when the remote record has it, sample bounds
/// otherwise.
fn broadcast_window(
    details: Option<&LiveStreamingDetails>,
    series: &[Sample],
) -> (DateTime<Utc>, DateTime<Utc>) {
    let first = series.first().map_or(0, |s| s.epoch_secs);
    let last = series.last().map_or(0, |s| s.epoch_secs);

    let start = details
        .and_then(|d| d.actual_start_time)
        .unwrap_or_else(|| DateTime::from_timestamp(first, 0).unwrap_or_else(Utc::now));
    let end = details
        .and_then(|d| d.actual_end_time)
        .unwrap_or_else(|| DateTime::from_timestamp(last, 0).unwrap_or_else(Utc::now));
    (start, end)
}

/// Fetches the schedule feed and filters it to the broadcast window with
/// 30 minutes of pre-roll. Any failure yields an empty list.
async fn correlate_events(
    ctx: &MonitorContext,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<MetadataEvent> {
    let Some(feed_url) = &ctx.config.schedule_feed_url else {
        tracing::warn!("no schedule feed configured; skipping event correlation");
        return Vec::new();
    };

    let client = match ScheduleClient::new(feed_url, ctx.config.request_timeout_secs) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(step = "events", error = %e, "schedule client construction failed");
            return Vec::new();
        }
    };
    let feed = match client.fetch().await {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(step = "events", context = "schedule-feed", error = %e, "fetch failed");
            return Vec::new();
        }
    };

    let from = start - ChronoDuration::minutes(30);
    events_overlapping(&feed, from, end)
        .into_iter()
        .map(|e| MetadataEvent {
            start: e.start,
            title: e.title,
            subtitle: e.subtitle,
            thumbnail: e.thumbnail,
        })
        .collect()
}
