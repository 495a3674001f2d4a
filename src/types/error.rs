//! Error types for the workspace crate

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main error type for workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    // === Construction errors ===
    /// A session directory could not be created or resolved
    #[error("Failed to initialize workspace directory {dir}: {source}")]
    Init {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The supplied session id is not usable as a directory name
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),

    // === Registration errors ===
    /// An input path does not exist on disk
    #[error("Input file not found: {0}")]
    InputNotFound(PathBuf),

    /// Both the move and the copy fallback failed
    #[error("Failed to relocate {from} into {to}: {source}")]
    Relocate {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Registry errors ===
    /// Session not found in the registry
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session already exists in the registry
    #[error("Session already exists: {0}")]
    SessionAlreadyExists(String),

    // === External errors ===
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for workspace operations
pub type Result<T> = std::result::Result<T, WorkspaceError>;

impl WorkspaceError {
    /// Check if this error is a client error (caused by invalid input)
    ///
    /// Client errors are recoverable: the caller can correct the input and
    /// retry. Everything else indicates an environment or filesystem problem.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            WorkspaceError::InputNotFound(_)
                | WorkspaceError::InvalidSessionId(_)
                | WorkspaceError::SessionNotFound(_)
                | WorkspaceError::SessionAlreadyExists(_)
        )
    }

    /// Check if this error is fatal for the session
    ///
    /// A session whose directories cannot be established cannot be used.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WorkspaceError::Init { .. })
    }

    // === Constructor helpers ===

    /// Create an initialization error for a directory
    pub fn init(dir: impl Into<PathBuf>, source: std::io::Error) -> Self {
        WorkspaceError::Init {
            dir: dir.into(),
            source,
        }
    }

    /// Create an invalid session id error
    pub fn invalid_session_id(id: impl Into<String>) -> Self {
        WorkspaceError::InvalidSessionId(id.into())
    }

    /// Create an input not found error
    pub fn input_not_found(path: impl AsRef<Path>) -> Self {
        WorkspaceError::InputNotFound(path.as_ref().to_path_buf())
    }

    /// Create a relocation error
    pub fn relocate(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        WorkspaceError::Relocate {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Create a session not found error
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        WorkspaceError::SessionNotFound(session_id.into())
    }

    /// Create a session already exists error
    pub fn session_already_exists(session_id: impl Into<String>) -> Self {
        WorkspaceError::SessionAlreadyExists(session_id.into())
    }
}
