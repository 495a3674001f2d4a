//! Move-or-copy file transfer into a session directory
//!
//! Registration pulls every external input under the session's own upload
//! directory so that a single cleanup pass removes everything the session
//! owns. The transfer is a rename when possible; when the rename fails (the
//! typical case is a cross-device source), it degrades to a copy that
//! retains the original file and carries its modified time over.

use std::path::{Path, PathBuf};

use crate::types::{Result, WorkspaceError};

/// How a registered input ended up inside the upload directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relocation {
    /// The path was already inside the session's upload directory
    AlreadyLocal,
    /// The file was renamed into the upload directory; the original is gone
    Moved,
    /// The rename failed and the file was copied; the original is retained
    CopiedFallback,
}

impl Relocation {
    /// Status string for logs and API responses
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AlreadyLocal => "already_local",
            Self::Moved => "moved",
            Self::CopiedFallback => "copied_fallback",
        }
    }
}

/// A successfully registered input file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredInput {
    /// Final absolute path inside the session's upload directory
    pub path: PathBuf,
    /// How the file got there
    pub relocation: Relocation,
}

/// Relocate `src` into `dest_dir`, keeping only the base file name
///
/// Returns the destination path and whether the transfer was a move or a
/// copy fallback. `src` must exist; `dest_dir` must already exist.
pub(crate) async fn relocate_file(src: &Path, dest_dir: &Path) -> Result<(PathBuf, Relocation)> {
    let name = src
        .file_name()
        .ok_or_else(|| WorkspaceError::input_not_found(src))?;
    let dest = dest_dir.join(name);

    match tokio::fs::rename(src, &dest).await {
        Ok(()) => {
            tracing::debug!(from = %src.display(), to = %dest.display(), "Moved input file");
            Ok((dest, Relocation::Moved))
        }
        Err(rename_err) => copy_fallback(src, dest, &rename_err).await,
    }
}

/// Copy `src` to `dest` after a failed rename
///
/// The original file is left in place; callers that wanted move semantics
/// must not rely on the source disappearing. The source's modified time is
/// carried onto the copy (`tokio::fs::copy` only preserves permission bits);
/// a failure doing so degrades to a warning, not an error.
async fn copy_fallback(
    src: &Path,
    dest: PathBuf,
    rename_err: &std::io::Error,
) -> Result<(PathBuf, Relocation)> {
    tracing::warn!(
        from = %src.display(),
        to = %dest.display(),
        error = %rename_err,
        "Move failed, falling back to copy"
    );

    tokio::fs::copy(src, &dest)
        .await
        .map_err(|copy_err| WorkspaceError::relocate(src, &dest, copy_err))?;

    if let Err(e) = copy_modified_time(src, &dest) {
        tracing::warn!(
            from = %src.display(),
            to = %dest.display(),
            error = %e,
            "Could not carry modified time onto copied file"
        );
    }

    Ok((dest, Relocation::CopiedFallback))
}

/// Set `dest`'s modified time to `src`'s
fn copy_modified_time(src: &Path, dest: &Path) -> std::io::Result<()> {
    let mtime = std::fs::metadata(src)?.modified()?;
    let file = std::fs::OpenOptions::new().write(true).open(dest)?;
    file.set_modified(mtime)
}
