//! Best-effort session cleanup
//!
//! Cleanup never raises: each directory is removed independently, failures
//! are logged and folded into a structured [`CleanupReport`] the caller (and
//! tests) can inspect instead of parsing logs. Running cleanup twice is safe;
//! the second pass reports every directory as already gone.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Role of a session directory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DirRole {
    /// Originally-uploaded inputs
    Upload,
    /// Produced outputs
    Output,
    /// Transient working files
    Temp,
}

/// Outcome of removing one directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupOutcome {
    /// The directory existed and was removed
    Removed,
    /// The directory was already gone
    AlreadyGone,
    /// Removal failed; the error is carried as text
    Failed(String),
}

/// Per-directory cleanup result
#[derive(Debug, Clone, Serialize)]
pub struct DirCleanup {
    pub role: DirRole,
    pub path: PathBuf,
    pub outcome: CleanupOutcome,
}

/// Structured result of one cleanup pass over a session's directories
#[derive(Debug, Clone, Serialize)]
pub struct CleanupReport {
    pub session_id: String,
    pub dirs: Vec<DirCleanup>,
}

impl CleanupReport {
    /// True when no directory removal failed
    pub fn all_clear(&self) -> bool {
        !self
            .dirs
            .iter()
            .any(|d| matches!(d.outcome, CleanupOutcome::Failed(_)))
    }

    /// True when every directory was already gone (e.g. a repeated cleanup)
    pub fn is_noop(&self) -> bool {
        self.dirs
            .iter()
            .all(|d| d.outcome == CleanupOutcome::AlreadyGone)
    }
}

/// The three per-session directories, in upload/output/temp order
#[derive(Debug, Clone)]
pub(crate) struct SessionDirs {
    pub upload: PathBuf,
    pub output: PathBuf,
    pub temp: PathBuf,
}

impl SessionDirs {
    fn roles(&self) -> [(DirRole, &Path); 3] {
        [
            (DirRole::Upload, self.upload.as_path()),
            (DirRole::Output, self.output.as_path()),
            (DirRole::Temp, self.temp.as_path()),
        ]
    }
}

/// Remove all three session directories and tidy up empty parents
///
/// Each removal is independent; a failure on one directory does not stop the
/// others. Never returns an error.
pub(crate) async fn cleanup_session_dirs(session_id: &str, dirs: &SessionDirs) -> CleanupReport {
    let mut report = CleanupReport {
        session_id: session_id.to_string(),
        dirs: Vec::with_capacity(3),
    };

    for (role, path) in dirs.roles() {
        let outcome = remove_dir_best_effort(path).await;
        report.dirs.push(DirCleanup {
            role,
            path: path.to_path_buf(),
            outcome,
        });
    }

    // Tidy up the shared parents (uploads/, output/, temp_uploads/) once the
    // last session under them is gone. Non-empty parents are left alone.
    for (_, path) in dirs.roles() {
        if let Some(parent) = path.parent() {
            remove_parent_if_empty(parent).await;
        }
    }

    if report.is_noop() {
        tracing::debug!(session_id, "Cleanup found nothing to remove");
    } else {
        tracing::info!(session_id, all_clear = report.all_clear(), "Session cleaned up");
    }

    report
}

/// Remove one directory tree, swallowing every failure
async fn remove_dir_best_effort(path: &Path) -> CleanupOutcome {
    match tokio::fs::remove_dir_all(path).await {
        Ok(()) => CleanupOutcome::Removed,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => CleanupOutcome::AlreadyGone,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove session directory");
            CleanupOutcome::Failed(e.to_string())
        }
    }
}

/// Remove a parent directory only if it is empty
///
/// `remove_dir` refuses non-empty directories, which is exactly the guard we
/// need; any failure is swallowed.
async fn remove_parent_if_empty(path: &Path) {
    if tokio::fs::remove_dir(path).await.is_ok() {
        tracing::debug!(path = %path.display(), "Removed empty parent directory");
    }
}
