//! Session-scoped filesystem workspaces
//!
//! This module handles:
//! - Workspace lifecycle (create, register inputs, compute outputs, cleanup)
//! - Move-or-copy relocation of inputs into the session's upload directory
//! - Best-effort, idempotent cleanup with structured reports
//! - Fire-once automatic expiry with real cancellation
//! - A concurrent registry of live workspaces

mod cleanup;
mod expiry;
mod manager;
mod relocate;
mod session;

pub use cleanup::{CleanupOutcome, CleanupReport, DirCleanup, DirRole};
pub use manager::WorkspaceManager;
pub use relocate::{RegisteredInput, Relocation};
pub use session::SessionWorkspace;
