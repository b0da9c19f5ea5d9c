//! Final-size optimization of rendered artifacts via external tools.
//!
//! The optimizer is advisory: a missing tool or a non-zero exit leaves the
//! unoptimized artifact in place, which is still valid output.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

/// Runs `tool <artifact>` and logs the outcome. Never fails the caller.
pub async fn optimize_artifact(tool: &str, artifact: &Path) {
    if tool.is_empty() {
        return;
    }
    let result = Command::new(tool)
        .arg(artifact)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await;

    match result {
        Ok(status) if status.success() => {
            tracing::debug!(tool, artifact = %artifact.display(), "optimized artifact");
        }
        Ok(status) => {
            tracing::warn!(
                tool,
                artifact = %artifact.display(),
                %status,
                "image optimizer exited non-zero; keeping unoptimized artifact"
            );
        }
        Err(e) => {
            tracing::warn!(
                tool,
                artifact = %artifact.display(),
                error = %e,
                "image optimizer unavailable; keeping unoptimized artifact"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.png");
        std::fs::write(&file, b"png-bytes").unwrap();
        optimize_artifact("definitely-not-installed-anywhere", &file).await;
        // The artifact must survive untouched.
        assert_eq!(std::fs::read(&file).unwrap(), b"png-bytes");
    }

    #[tokio::test]
    async fn failing_tool_is_non_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a.svg");
        std::fs::write(&file, b"<svg/>").unwrap();
        optimize_artifact("false", &file).await;
        assert_eq!(std::fs::read(&file).unwrap(), b"<svg/>");
    }
}
