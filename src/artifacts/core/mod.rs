//! Shared error taxonomy and file utilities
//!
//! Every user-visible failure is a `RepoError` variant so that callers and
//! tests can rely on a stable discriminant; internal plumbing attaches
//! context through `anyhow` on the way out.

use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;
use std::path::{Path, PathBuf};

/// All user-visible repository errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    /// `init` over an existing `.minigit/` directory.
    RepoAlreadyExists,
    /// Any other command outside a repository.
    NotARepository,
    /// `add` of a path that does not exist in the workspace.
    PathNotFound(PathBuf),
    /// A path the index/commit formats cannot represent (`:` or newline).
    UnsupportedPath(String),
    /// A commit message with an embedded newline.
    UnsupportedMessage,
    /// commit/branch/merge while HEAD points at a bare commit id.
    DetachedHead,
    /// branch/checkout/merge before the first commit.
    EmptyRepository,
    /// `branch` with a name that is already taken.
    BranchExists(String),
    /// `merge` of a branch that does not exist.
    BranchMissing(String),
    /// A branch name that would escape the refs directory.
    InvalidBranchName(String),
    /// `checkout` target that is neither a branch nor a stored object.
    UnknownRevision(String),
    /// A referenced object is absent from the database.
    ObjectMissing(ObjectId),
    /// `merge` between histories with no shared root.
    NoCommonAncestor,
    /// `merge` with at least one conflicting path; nothing was written.
    MergeConflict(usize),
}

impl fmt::Display for RepoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepoError::RepoAlreadyExists => write!(f, ".minigit already exists"),
            RepoError::NotARepository => {
                write!(f, "not a minigit repository (missing .minigit/)")
            }
            RepoError::PathNotFound(path) => {
                write!(f, "file does not exist: {}", path.display())
            }
            RepoError::UnsupportedPath(path) => {
                write!(f, "unsupported path (contains ':' or newline): {path}")
            }
            RepoError::UnsupportedMessage => {
                write!(f, "commit messages must be a single line")
            }
            RepoError::DetachedHead => {
                write!(f, "HEAD is detached; this operation needs a current branch")
            }
            RepoError::EmptyRepository => write!(f, "no commits yet"),
            RepoError::BranchExists(name) => write!(f, "branch {name} already exists"),
            RepoError::BranchMissing(name) => write!(f, "branch {name} does not exist"),
            RepoError::InvalidBranchName(name) => write!(f, "invalid branch name: {name}"),
            RepoError::UnknownRevision(target) => write!(f, "unknown revision: {target}"),
            RepoError::ObjectMissing(id) => write!(f, "object not found: {id}"),
            RepoError::NoCommonAncestor => {
                write!(f, "no common ancestor between the merged branches")
            }
            RepoError::MergeConflict(count) => {
                write!(f, "automatic merge failed: {count} conflicting path(s)")
            }
        }
    }
}

impl std::error::Error for RepoError {}

/// Reject paths the line-oriented index and commit formats cannot carry.
pub fn validate_work_path(path: &str) -> anyhow::Result<()> {
    if path.is_empty() || path.contains(':') || path.contains('\n') || path.contains('\r') {
        return Err(RepoError::UnsupportedPath(path.to_string()).into());
    }

    Ok(())
}

/// Write a file through a sibling temp file and rename, so readers never
/// observe a half-written value.
pub fn write_atomically(path: &Path, contents: &[u8]) -> anyhow::Result<()> {
    use anyhow::Context;

    let parent = path
        .parent()
        .with_context(|| format!("invalid target path {}", path.display()))?;
    let temp_path = parent.join(format!("tmp-{}", rand::random::<u32>()));

    std::fs::write(&temp_path, contents)
        .with_context(|| format!("failed to write temp file {}", temp_path.display()))?;
    std::fs::rename(&temp_path, path)
        .with_context(|| format!("failed to move temp file into {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_relative_paths() {
        assert!(validate_work_path("a.txt").is_ok());
        assert!(validate_work_path("src/deep/dir/file.rs").is_ok());
        assert!(validate_work_path("with spaces.txt").is_ok());
    }

    #[test]
    fn rejects_paths_the_formats_cannot_carry() {
        assert!(validate_work_path("").is_err());
        assert!(validate_work_path("a:b.txt").is_err());
        assert!(validate_work_path("a\nb.txt").is_err());
        assert!(validate_work_path("a\rb.txt").is_err());
    }
}
