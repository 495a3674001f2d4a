//! Fire-once expiry task per session
//!
//! Each workspace spawns one background task at construction that waits for
//! the expiry window and then runs the same cleanup routine a caller would.
//! The task holds only the session's directory paths, not the workspace
//! itself, so a dropped workspace still gets its files purged on schedule.
//! Cancellation is real: the task selects on a [`CancellationToken`] and
//! exits without cleaning up when cancelled first.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use super::cleanup::{SessionDirs, cleanup_session_dirs};

/// Handle to a session's scheduled cleanup
#[derive(Debug)]
pub(crate) struct ExpiryTimer {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl ExpiryTimer {
    /// Spawn the expiry task
    ///
    /// Must be called from within a Tokio runtime.
    pub(crate) fn spawn(session_id: String, dirs: SessionDirs, expiry: Duration) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let handle = tokio::spawn(async move {
            tokio::select! {
                () = task_token.cancelled() => {
                    tracing::info!(session_id, "Auto-cleanup cancelled");
                }
                () = tokio::time::sleep(expiry) => {
                    tracing::info!(session_id, expiry_secs = expiry.as_secs_f64(), "Session expired, running cleanup");
                    let report = cleanup_session_dirs(&session_id, &dirs).await;
                    if !report.all_clear() {
                        tracing::warn!(session_id, "Expiry cleanup left directories behind");
                    }
                }
            }
        });

        Self { token, handle }
    }

    /// Cancel the scheduled cleanup
    ///
    /// Safe to call more than once and after the task has already fired.
    pub(crate) fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether cancellation was requested
    pub(crate) fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Whether the task has finished (fired or cancelled)
    #[allow(dead_code)]
    pub(crate) fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn make_dirs(root: &Path) -> SessionDirs {
        let dirs = SessionDirs {
            upload: root.join("uploads").join("s1"),
            output: root.join("output").join("s1"),
            temp: root.join("temp_uploads").join("s1"),
        };
        std::fs::create_dir_all(&dirs.upload).unwrap();
        std::fs::create_dir_all(&dirs.output).unwrap();
        std::fs::create_dir_all(&dirs.temp).unwrap();
        dirs
    }

    #[tokio::test]
    async fn test_timer_fires_and_cleans_up() {
        let root = tempfile::tempdir().unwrap();
        let dirs = make_dirs(root.path());

        let timer = ExpiryTimer::spawn("s1".to_string(), dirs.clone(), Duration::from_millis(50));
        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(timer.is_finished());
        assert!(!dirs.upload.exists());
        assert!(!dirs.output.exists());
        assert!(!dirs.temp.exists());
    }

    #[tokio::test]
    async fn test_cancel_prevents_cleanup() {
        let root = tempfile::tempdir().unwrap();
        let dirs = make_dirs(root.path());

        let timer = ExpiryTimer::spawn("s1".to_string(), dirs.clone(), Duration::from_millis(50));
        timer.cancel();
        assert!(timer.is_cancelled());

        tokio::time::sleep(Duration::from_millis(300)).await;

        assert!(timer.is_finished());
        assert!(dirs.upload.exists());
        assert!(dirs.output.exists());
        assert!(dirs.temp.exists());
    }

    #[tokio::test]
    async fn test_cancel_after_fire_is_harmless() {
        let root = tempfile::tempdir().unwrap();
        let dirs = make_dirs(root.path());

        let timer = ExpiryTimer::spawn("s1".to_string(), dirs, Duration::from_millis(10));
        tokio::time::sleep(Duration::from_millis(200)).await;
        timer.cancel();
        timer.cancel();
    }
}
