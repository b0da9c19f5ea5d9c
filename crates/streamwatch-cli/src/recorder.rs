//! Supervision of the chat-recorder sidecar process.
//!
//! The recorder is an independent OS process scoped to one broadcast id.
//! It buffers chat messages and flushes them to disk when interrupted, so
//! shutdown is two-phase: SIGINT first, a bounded grace period for a
//! voluntary exit, then a hard kill.

use std::process::Stdio;
use std::time::Duration;

use nix::sys::signal::{self, Signal};
use nix::unistd::Pid;
use tokio::process::{Child, Command};

/// Handle to a running chat-recorder process.
pub struct ChatRecorder {
    child: Child,
    broadcast_id: String,
    stopped: bool,
}

impl ChatRecorder {
    /// Launches `command` with the broadcast id appended as its final
    /// argument. `command` is split on whitespace, so it may carry leading
    /// arguments of its own (e.g. `python3 chat_dl.py`).
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the executable cannot be started.
    pub fn spawn(command: &str, broadcast_id: &str) -> std::io::Result<Self> {
        let mut parts = command.split_whitespace();
        let program = parts.next().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty recorder command")
        })?;

        let child = Command::new(program)
            .args(parts)
            .arg(broadcast_id)
            .stdin(Stdio::null())
            // Backstop: if the monitor dies without a clean stop, the
            // recorder must not outlive it.
            .kill_on_drop(true)
            .spawn()?;

        tracing::info!(
            broadcast_id,
            pid = child.id(),
            command = %command,
            "chat recorder started"
        );

        Ok(Self {
            child,
            broadcast_id: broadcast_id.to_owned(),
            stopped: false,
        })
    }

    /// Requests shutdown: SIGINT, then up to `grace` for a voluntary exit,
    /// then SIGKILL. Idempotent; never blocks past the grace period plus
    /// the kill itself.
    pub async fn stop(&mut self, grace: Duration) {
        if self.stopped {
            return;
        }
        self.stopped = true;

        if let Some(pid) = self.child.id() {
            #[allow(clippy::cast_possible_wrap)]
            let pid = Pid::from_raw(pid as i32);
            if let Err(e) = signal::kill(pid, Signal::SIGINT) {
                tracing::warn!(
                    broadcast_id = %self.broadcast_id,
                    error = %e,
                    "failed to interrupt chat recorder"
                );
            }
        }

        match tokio::time::timeout(grace, self.child.wait()).await {
            Ok(Ok(status)) => {
                tracing::info!(
                    broadcast_id = %self.broadcast_id,
                    %status,
                    "chat recorder exited"
                );
            }
            Ok(Err(e)) => {
                tracing::warn!(
                    broadcast_id = %self.broadcast_id,
                    error = %e,
                    "failed waiting for chat recorder"
                );
            }
            Err(_) => {
                tracing::warn!(
                    broadcast_id = %self.broadcast_id,
                    grace_secs = grace.as_secs(),
                    "chat recorder ignored interrupt; killing"
                );
                if let Err(e) = self.child.kill().await {
                    tracing::warn!(
                        broadcast_id = %self.broadcast_id,
                        error = %e,
                        "failed to kill chat recorder"
                    );
                }
            }
        }
    }
}
