//! Public types shared across the crate

mod config;
mod error;
pub mod operation;

pub use config::{DEFAULT_EXPIRY, WorkspaceConfig};
pub use error::{Result, WorkspaceError};
