//! The monitoring state machine.
//!
//! Two states, held only in memory: SEARCHING (no broadcast known; poll
//! discovery on a fixed backoff) and MONITORING (sample viewership once per
//! wall-clock minute until the platform reports the broadcast ended, then
//! post-process and return to SEARCHING). There is no terminal state; the
//! loop runs until cancelled.

use std::time::Duration;

use chrono::Utc;
use streamwatch_core::{AppConfig, Sample};
use streamwatch_store::{series_path, SeriesWriter};
use streamwatch_youtube::{PollOutcome, YouTubeClient};
use tokio_util::sync::CancellationToken;

use crate::postprocess;
use crate::recorder::ChatRecorder;

/// Everything the monitor needs, constructed once per process and passed
/// by reference. There is no module-level state.
pub struct MonitorContext {
    pub config: AppConfig,
    pub youtube: YouTubeClient,
}

/// Runs the state machine until `cancel` fires.
///
/// # Errors
///
/// Remote and storage failures are handled internally per the skip-tick
/// rules; an error return is reserved for conditions that make monitoring
/// impossible from the start (none currently).
pub async fn run(ctx: &MonitorContext, cancel: CancellationToken) -> anyhow::Result<()> {
    loop {
        if cancel.is_cancelled() {
            return Ok(());
        }
        match discover(ctx).await {
            Some(broadcast_id) => {
                monitor_broadcast(ctx, &cancel, &broadcast_id).await;
            }
            None => {
                let backoff = Duration::from_secs(ctx.config.search_backoff_secs);
                if wait_cancellable(&cancel, backoff).await {
                    return Ok(());
                }
            }
        }
    }
}

/// Resolves the currently-live broadcast id for the configured channel.
///
/// Any remote failure maps to `None`: no live stream is the steady state,
/// and discovery must never halt the orchestrator.
pub async fn discover(ctx: &MonitorContext) -> Option<String> {
    match ctx.youtube.search_live(&ctx.config.channel_id).await {
        Ok(Some(id)) => {
            tracing::info!(broadcast_id = %id, "live broadcast found");
            Some(id)
        }
        Ok(None) => {
            tracing::debug!(channel_id = %ctx.config.channel_id, "no live broadcast");
            None
        }
        Err(e) => {
            tracing::debug!(
                context = "search.list",
                error = %e,
                "discovery failed; treating as not found"
            );
            None
        }
    }
}

/// One MONITORING episode: from entering the state to returning to
/// SEARCHING (end of stream) or being cancelled.
///
/// The chat recorder is an owned resource of this scope: started on entry,
/// stopped exactly once on every exit path, before post-processing runs.
pub async fn monitor_broadcast(ctx: &MonitorContext, cancel: &CancellationToken, broadcast_id: &str) {
    let start_epoch = resolve_start_epoch(ctx, broadcast_id).await;

    let series_file = series_path(&ctx.config.log_dir, broadcast_id);
    let mut writer = match SeriesWriter::open(&series_file) {
        Ok(w) => w,
        Err(e) => {
            tracing::error!(
                broadcast_id,
                error = %e,
                "cannot open series log; returning to search"
            );
            wait_cancellable(cancel, Duration::from_secs(ctx.config.search_backoff_secs)).await;
            return;
        }
    };

    let mut recorder = match ChatRecorder::spawn(&ctx.config.recorder_cmd, broadcast_id) {
        Ok(r) => Some(r),
        Err(e) => {
            // Lost chat is acceptable; lost viewership samples are not.
            tracing::error!(broadcast_id, error = %e, "chat recorder failed to start");
            None
        }
    };

    tracing::info!(broadcast_id, start_epoch, "monitoring broadcast");

    let mut ended = false;
    loop {
        let wait = Duration::from_secs(secs_until_next_tick(
            Utc::now().timestamp(),
            ctx.config.poll_interval_secs,
        ));
        if wait_cancellable(cancel, wait).await {
            break;
        }

        match ctx.youtube.live_details(broadcast_id).await {
            Ok(details) => match PollOutcome::from_details(details.as_ref()) {
                PollOutcome::Live { viewers } => {
                    let sample = Sample {
                        epoch_secs: Utc::now().timestamp(),
                        viewers,
                    };
                    if let Err(e) = writer.append(sample) {
                        tracing::error!(broadcast_id, error = %e, "failed to append sample");
                    }
                    tracing::info!(
                        broadcast_id,
                        viewers,
                        offset_secs = sample.epoch_secs - start_epoch,
                        "sample"
                    );
                }
                PollOutcome::Ended => {
                    tracing::info!(broadcast_id, "broadcast ended");
                    ended = true;
                    break;
                }
                PollOutcome::Anomaly => {
                    tracing::warn!(
                        broadcast_id,
                        context = "videos.list",
                        "no viewer count while live; skipping tick"
                    );
                }
                PollOutcome::NotLive => {
                    tracing::warn!(
                        broadcast_id,
                        context = "videos.list",
                        "no live record for broadcast; skipping tick"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    broadcast_id,
                    context = "videos.list",
                    error = %e,
                    "poll failed; skipping tick"
                );
            }
        }
    }

    // Stop the recorder before anything else so its release does not
    // depend on post-processing succeeding.
    if let Some(rec) = recorder.as_mut() {
        rec.stop(Duration::from_secs(ctx.config.recorder_grace_secs))
            .await;
    }

    if ended {
        postprocess::process(ctx, broadcast_id, &series_file).await;
    }
}

/// Best-effort start-time resolution. Falls back to the current wall clock
/// so offset logging can proceed even when the remote record lacks it.
async fn resolve_start_epoch(ctx: &MonitorContext, broadcast_id: &str) -> i64 {
    match ctx.youtube.live_details(broadcast_id).await {
        Ok(Some(details)) => details
            .actual_start_time
            .map_or_else(|| Utc::now().timestamp(), |t| t.timestamp()),
        Ok(None) => Utc::now().timestamp(),
        Err(e) => {
            tracing::warn!(
                broadcast_id,
                context = "videos.list",
                error = %e,
                "could not resolve start time; using wall clock"
            );
            Utc::now().timestamp()
        }
    }
}

/// Seconds until the next wall-clock multiple of `interval_secs` (one
/// minute in production). Always in `1..=interval`, so consecutive ticks
/// land on successive boundaries regardless of poll latency.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]
pub fn secs_until_next_tick(now_epoch_secs: i64, interval_secs: u64) -> u64 {
    let interval = (interval_secs as i64).max(1);
    (interval - now_epoch_secs.rem_euclid(interval)) as u64
}

/// Sleeps for `duration` unless cancelled first; returns `true` when
/// cancelled.
async fn wait_cancellable(cancel: &CancellationToken, duration: Duration) -> bool {
    tokio::select! {
        () = cancel.cancelled() => true,
        () = tokio::time::sleep(duration) => false,
    }
}
