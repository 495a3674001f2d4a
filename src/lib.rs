//! Session-scoped document workspaces
//!
//! An isolated, self-cleaning filesystem workspace per user session for
//! document-processing pipelines (merge, split, convert, ...). Each session
//! owns three directories under a configured base — uploaded inputs,
//! produced outputs, transient working files — and purges all of them after
//! a configurable expiry window, or earlier on an explicit cleanup call.
//!
//! ## Features
//!
//! - Eager per-session directory creation under an injected base directory
//! - Move-or-copy registration that pulls every input under the session's
//!   own upload directory
//! - Deterministic output naming per operation tag
//! - Idempotent, never-raising cleanup with structured reports
//! - Cancellable fire-once expiry task per session
//! - Concurrent registry for looking sessions up across requests
//!
//! ## Quick Start
//!
//! ```no_run
//! use doc_workspace::{WorkspaceConfig, WorkspaceManager};
//!
//! #[tokio::main]
//! async fn main() -> doc_workspace::Result<()> {
//!     let manager = WorkspaceManager::new(WorkspaceConfig::new("/srv/docs"));
//!
//!     let ws = manager.create(None)?;
//!     ws.register_input("/tmp/upload-314/report.pdf").await?;
//!     let output = ws.compute_output_path("compress_pdf").await;
//!
//!     // ... run the document processor, stream `output` back ...
//!     let _ = output;
//!
//!     manager.remove(ws.session_id()).await;
//!     Ok(())
//! }
//! ```

pub mod logging;
pub mod types;
pub mod workspace;

pub use types::{DEFAULT_EXPIRY, Result, WorkspaceConfig, WorkspaceError, operation};
pub use workspace::{
    CleanupOutcome, CleanupReport, DirCleanup, DirRole, RegisteredInput, Relocation,
    SessionWorkspace, WorkspaceManager,
};
