//! Snapshot loading with bounded retries.
//!
//! The snapshot writer is an external process that may be mid-write when the
//! hook fires. Correctness under that race comes from polling for
//! complete-looking content, never from locking: each attempt that sees a
//! missing, empty, or unparseable file waits one interval and tries again,
//! up to the policy bound. Acquisition problems degrade to an empty
//! snapshot so the pipeline always produces a decision.

use std::path::Path;
use std::time::Duration;

use tracing::{debug, warn};

use crate::error::LoadError;
use crate::snapshot::Snapshot;

/// Bounded retry policy for loading a snapshot racing its writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of read attempts.
    pub max_attempts: u32,

    /// Fixed wait between attempts.
    pub interval: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            interval: Duration::from_secs(1),
        }
    }
}

/// One read-and-parse attempt.
fn read_snapshot(path: &Path) -> Result<Snapshot, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotReady);
    }
    // Zero length means the writer has created but not yet filled the file.
    if std::fs::metadata(path)?.len() == 0 {
        return Err(LoadError::NotReady);
    }
    let content = std::fs::read_to_string(path)?;
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(LoadError::NotReady);
    }
    Ok(serde_json::from_str(trimmed)?)
}

/// Load the snapshot at `path`, tolerating a concurrent writer.
///
/// Returns as soon as a well-formed parse succeeds. A file that never
/// becomes ready exhausts the policy and yields an empty snapshot; content
/// that still fails to parse on the final attempt is reported once via the
/// error channel and likewise yields an empty snapshot. An unresolved path
/// (`None`) short-circuits to empty.
pub async fn load_snapshot(path: Option<&Path>, policy: &RetryPolicy) -> Snapshot {
    let Some(path) = path else {
        return Snapshot::new();
    };

    for attempt in 1..=policy.max_attempts {
        match read_snapshot(path) {
            Ok(snapshot) => {
                debug!(attempt, entries = snapshot.len(), "snapshot loaded");
                return snapshot;
            }
            Err(LoadError::NotReady) => {
                debug!(attempt, "snapshot not ready, waiting");
                tokio::time::sleep(policy.interval).await;
            }
            Err(err) => {
                if attempt < policy.max_attempts {
                    debug!(attempt, error = %err, "snapshot unreadable, retrying");
                    tokio::time::sleep(policy.interval).await;
                } else {
                    warn!(
                        event = "snapshot.load_failed",
                        path = %path.display(),
                        attempts = policy.max_attempts,
                        error = %err,
                    );
                }
            }
        }
    }

    Snapshot::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_well_formed_file_loads_first_attempt() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("snap.json");
        fs::write(&path, r#"[{"file": "a.c", "diagnostics": []}]"#).expect("write");

        let started = Instant::now();
        let snapshot = load_snapshot(Some(&path), &RetryPolicy::default()).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unresolved_path_short_circuits() {
        let started = Instant::now();
        let snapshot = load_snapshot(None, &RetryPolicy::default()).await;
        assert!(snapshot.is_empty());
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_ready_file_exhausts_attempts() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("snap.json");
        fs::write(&path, "").expect("write");

        let policy = RetryPolicy::default();
        let started = Instant::now();
        let snapshot = load_snapshot(Some(&path), &policy).await;

        assert!(snapshot.is_empty());
        // Every not-ready attempt waits one interval, the final one included.
        assert_eq!(
            started.elapsed(),
            policy.interval * policy.max_attempts,
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_file_exhausts_attempts() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("absent.json");

        let snapshot = load_snapshot(Some(&path), &RetryPolicy::default()).await;
        assert!(snapshot.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_content_degrades_to_empty() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("snap.json");
        fs::write(&path, "not json at all {{{").expect("write");

        let policy = RetryPolicy::default();
        let started = Instant::now();
        let snapshot = load_snapshot(Some(&path), &policy).await;

        assert!(snapshot.is_empty());
        // Parse failures only wait between attempts, not after the final one.
        assert_eq!(
            started.elapsed(),
            policy.interval * (policy.max_attempts - 1),
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_whitespace_only_content_is_not_ready() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("snap.json");
        fs::write(&path, "  \n\t ").expect("write");

        let snapshot = load_snapshot(Some(&path), &RetryPolicy::default()).await;
        assert!(snapshot.is_empty());
    }
}
