//! Session workspace state and lifecycle
//!
//! Each workspace owns three on-disk directories for one batch of document
//! operations: uploaded inputs, produced outputs, and transient working
//! files, all namespaced under the session id. Directories are created
//! eagerly at construction and purged by [`SessionWorkspace::cleanup`] or by
//! the automatic expiry task.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::RwLock;

use crate::types::operation;
use crate::types::{Result, WorkspaceConfig, WorkspaceError};

use super::cleanup::{CleanupReport, SessionDirs, cleanup_session_dirs};
use super::expiry::ExpiryTimer;
use super::relocate::{RegisteredInput, Relocation, relocate_file};

/// Mutable per-session state behind one lock
#[derive(Debug, Default)]
struct WorkspaceState {
    /// Registered input paths, in registration order (merge order for
    /// multi-file operations)
    input_files: Vec<PathBuf>,
    /// Last computed output path; single slot, last write wins
    output_file: Option<PathBuf>,
}

/// An isolated, self-cleaning filesystem workspace for one session
pub struct SessionWorkspace {
    /// Unique session identifier
    session_id: String,
    /// Canonical per-session directories
    dirs: SessionDirs,
    /// Time-to-live configured at construction
    expiry: Duration,
    /// Registered inputs and computed output
    state: RwLock<WorkspaceState>,
    /// Scheduled automatic cleanup, when enabled
    timer: Option<ExpiryTimer>,
}

impl SessionWorkspace {
    /// Create a workspace for the given or a freshly minted session id
    ///
    /// Creates `{base}/uploads/{id}`, `{base}/output/{id}` and
    /// `{base}/temp_uploads/{id}` (and any missing parents) on disk before
    /// returning. Directory-creation failure is fatal and propagates. When
    /// `config.auto_cleanup` is set, an expiry task is spawned; this requires
    /// a running Tokio runtime.
    pub fn create(session_id: Option<String>, config: &WorkspaceConfig) -> Result<Self> {
        let session_id = match session_id {
            Some(id) => validate_session_id(id)?,
            None => uuid::Uuid::new_v4().to_string(),
        };

        let dirs = SessionDirs {
            upload: init_dir(config.uploads_root().join(&session_id))?,
            output: init_dir(config.output_root().join(&session_id))?,
            temp: init_dir(config.temp_root().join(&session_id))?,
        };

        tracing::info!(
            session_id,
            upload_dir = %dirs.upload.display(),
            expiry_secs = config.expiry.as_secs_f64(),
            auto_cleanup = config.auto_cleanup,
            "Session workspace created"
        );

        let timer = config
            .auto_cleanup
            .then(|| ExpiryTimer::spawn(session_id.clone(), dirs.clone(), config.expiry));

        Ok(Self {
            session_id,
            dirs,
            expiry: config.expiry,
            state: RwLock::new(WorkspaceState::default()),
            timer,
        })
    }

    /// Session identifier
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Directory holding registered inputs
    pub fn upload_dir(&self) -> &Path {
        &self.dirs.upload
    }

    /// Directory downstream processors write results into
    pub fn output_dir(&self) -> &Path {
        &self.dirs.output
    }

    /// Directory for transient working files
    pub fn temp_dir(&self) -> &Path {
        &self.dirs.temp
    }

    /// Configured time-to-live
    pub fn expiry(&self) -> Duration {
        self.expiry
    }

    /// Register a single input file
    ///
    /// The path must exist on disk. A path already inside this session's
    /// upload directory is accepted as-is; anything else is moved (or copied
    /// when the move fails) into the upload directory, keeping only the base
    /// file name. On success the final path is guaranteed to live under
    /// [`Self::upload_dir`] and is appended to the input list.
    pub async fn register_input(&self, path: impl AsRef<Path>) -> Result<RegisteredInput> {
        let path = path.as_ref();

        let resolved = tokio::fs::canonicalize(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WorkspaceError::input_not_found(path)
            } else {
                WorkspaceError::Io(e)
            }
        })?;

        let registered = if resolved.starts_with(&self.dirs.upload) {
            RegisteredInput {
                path: resolved,
                relocation: Relocation::AlreadyLocal,
            }
        } else {
            let (dest, relocation) = relocate_file(&resolved, &self.dirs.upload).await?;
            RegisteredInput {
                path: dest,
                relocation,
            }
        };

        tracing::debug!(
            session_id = self.session_id,
            path = %registered.path.display(),
            relocation = registered.relocation.as_str(),
            "Input registered"
        );

        self.state
            .write()
            .await
            .input_files
            .push(registered.path.clone());

        Ok(registered)
    }

    /// Register several input files, preserving the given order
    ///
    /// Delegates to [`Self::register_input`] per path. On a mid-list error
    /// the paths registered so far stay registered.
    pub async fn register_inputs<I, P>(&self, paths: I) -> Result<Vec<RegisteredInput>>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut registered = Vec::new();
        for path in paths {
            registered.push(self.register_input(path).await?);
        }
        Ok(registered)
    }

    /// Snapshot of registered input paths, in registration order
    pub async fn input_files(&self) -> Vec<PathBuf> {
        self.state.read().await.input_files.clone()
    }

    /// Compute and store the output path for an operation
    ///
    /// The name is `{base}_{operation}{ext}` under the output directory,
    /// where `base` is the first registered input stripped of its extension
    /// (or the literal `output` when nothing is registered) and `ext` comes
    /// from the static operation table. Repeating an operation yields the
    /// same path; the stored slot is overwritten on every call.
    pub async fn compute_output_path(&self, operation: &str) -> PathBuf {
        let mut state = self.state.write().await;

        let base = state
            .input_files
            .first()
            .and_then(|p| p.file_stem())
            .map_or_else(|| "output".to_string(), |s| s.to_string_lossy().into_owned());

        let path = self
            .dirs
            .output
            .join(operation::output_file_name(&base, operation));

        if !operation::is_known_operation(operation) {
            tracing::debug!(
                session_id = self.session_id,
                operation,
                "Unknown operation tag, using generic output extension"
            );
        }

        state.output_file = Some(path.clone());
        path
    }

    /// Last value computed by [`Self::compute_output_path`], if any
    pub async fn output_file(&self) -> Option<PathBuf> {
        self.state.read().await.output_file.clone()
    }

    /// Remove everything this session owns from disk
    ///
    /// Best-effort and idempotent: failures are logged and reported, never
    /// raised, and a second call is a no-op. Also cancels the pending expiry
    /// task, which has nothing left to do.
    pub async fn cleanup(&self) -> CleanupReport {
        if let Some(timer) = &self.timer {
            timer.cancel();
        }
        cleanup_session_dirs(&self.session_id, &self.dirs).await
    }

    /// Cancel the scheduled automatic cleanup
    ///
    /// Effective: the expiry task exits without touching the filesystem.
    /// Files then live until an explicit [`Self::cleanup`] call.
    pub fn cancel_auto_cleanup(&self) {
        match &self.timer {
            Some(timer) => {
                timer.cancel();
                tracing::info!(session_id = self.session_id, "Auto-cleanup disabled by caller");
            }
            None => {
                tracing::debug!(
                    session_id = self.session_id,
                    "Auto-cleanup was not enabled for this session"
                );
            }
        }
    }

    /// Whether the expiry task has been cancelled
    pub fn auto_cleanup_cancelled(&self) -> bool {
        self.timer.as_ref().is_some_and(|t| t.is_cancelled())
    }
}

impl std::fmt::Debug for SessionWorkspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionWorkspace")
            .field("session_id", &self.session_id)
            .field("upload_dir", &self.dirs.upload)
            .field("output_dir", &self.dirs.output)
            .field("temp_dir", &self.dirs.temp)
            .field("expiry", &self.expiry)
            .field("auto_cleanup", &self.timer.is_some())
            .finish()
    }
}

/// Create one session directory and resolve it to a canonical path
///
/// Canonical paths keep the upload-locality check stable when the base
/// directory is reached through a symlink.
fn init_dir(path: PathBuf) -> Result<PathBuf> {
    std::fs::create_dir_all(&path).map_err(|e| WorkspaceError::init(&path, e))?;
    std::fs::canonicalize(&path).map_err(|e| WorkspaceError::init(&path, e))
}

/// Reject session ids that would escape the base directory layout
fn validate_session_id(id: String) -> Result<String> {
    if id.is_empty()
        || id == "."
        || id == ".."
        || id.contains('/')
        || id.contains('\\')
        || id.contains('\0')
    {
        return Err(WorkspaceError::invalid_session_id(id));
    }
    Ok(id)
}
