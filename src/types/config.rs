//! Workspace configuration

use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default time-to-live for a session's files
pub const DEFAULT_EXPIRY: Duration = Duration::from_secs(300);

/// Configuration for session workspaces
///
/// The base directory is injected rather than read from process state so that
/// embedding applications and tests can sandbox where session files live.
#[derive(Debug, Clone)]
pub struct WorkspaceConfig {
    /// Base directory under which `uploads/`, `output/` and `temp_uploads/`
    /// are created
    pub base_dir: PathBuf,

    /// Time-to-live after which a session's files are purged
    pub expiry: Duration,

    /// Whether to spawn the automatic expiry task per session
    pub auto_cleanup: bool,
}

impl WorkspaceConfig {
    /// Create a configuration rooted at the given base directory
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
            expiry: DEFAULT_EXPIRY,
            auto_cleanup: true,
        }
    }

    /// Set the session expiry window
    pub fn with_expiry(mut self, expiry: Duration) -> Self {
        self.expiry = expiry;
        self
    }

    /// Enable or disable the automatic expiry task
    pub fn with_auto_cleanup(mut self, auto_cleanup: bool) -> Self {
        self.auto_cleanup = auto_cleanup;
        self
    }

    /// Top-level uploads directory shared by all sessions
    pub fn uploads_root(&self) -> PathBuf {
        self.base_dir.join("uploads")
    }

    /// Top-level output directory shared by all sessions
    pub fn output_root(&self) -> PathBuf {
        self.base_dir.join("output")
    }

    /// Top-level temp directory shared by all sessions
    pub fn temp_root(&self) -> PathBuf {
        self.base_dir.join("temp_uploads")
    }
}

impl Default for WorkspaceConfig {
    /// Root the workspace at the process working directory, matching the
    /// layout the HTTP layer historically produced
    fn default() -> Self {
        let base_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        Self::new(base_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roots() {
        let config = WorkspaceConfig::new("/srv/docs");
        assert_eq!(config.uploads_root(), PathBuf::from("/srv/docs/uploads"));
        assert_eq!(config.output_root(), PathBuf::from("/srv/docs/output"));
        assert_eq!(config.temp_root(), PathBuf::from("/srv/docs/temp_uploads"));
    }

    #[test]
    fn test_config_defaults() {
        let config = WorkspaceConfig::new("/srv/docs");
        assert_eq!(config.expiry, DEFAULT_EXPIRY);
        assert!(config.auto_cleanup);
    }

    #[test]
    fn test_config_builders() {
        let config = WorkspaceConfig::new("/srv/docs")
            .with_expiry(Duration::from_secs(60))
            .with_auto_cleanup(false);
        assert_eq!(config.expiry, Duration::from_secs(60));
        assert!(!config.auto_cleanup);
    }
}
