//! References
//!
//! References are human-readable names pointing to commits:
//!
//! - HEAD: the current position, either attached to a branch or detached
//!   at a bare commit id
//! - Branches: `refs/heads/<name>` files holding a branch tip commit id
//!
//! ## File Format
//!
//! - HEAD attached: the literal string `ref: refs/heads/<name>`
//! - HEAD detached: a bare commit id
//! - Branch file: one commit id, or the all-zero sentinel meaning "no
//!   commits on this branch yet"
//!
//! Writers emit no trailing newline; readers trim whatever they find.
//! Updates go through a temp file and rename so a crash mid-write leaves
//! the previous value intact.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::{RepoError, write_atomically};
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use derive_new::new;
use std::path::{Path, PathBuf};

/// Name of the HEAD reference file
pub const HEAD_FILE: &str = "HEAD";

/// Prefix marking HEAD as attached to a branch
const SYMREF_PREFIX: &str = "ref: refs/heads/";

/// Where HEAD currently points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Head {
    /// HEAD follows a branch; commits advance that branch
    Attached(BranchName),
    /// HEAD names a commit directly; history-writing commands refuse this
    Detached(ObjectId),
}

/// Reference manager for HEAD and the branch heads
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository state directory (typically `.minigit`)
    path: Box<Path>,
}

impl Refs {
    /// Read HEAD and classify it as attached or detached
    pub fn read_head(&self) -> anyhow::Result<Head> {
        let head_path = self.head_path();
        let content = std::fs::read_to_string(&head_path)
            .with_context(|| format!("unable to read HEAD at {}", head_path.display()))?;
        let content = content.trim();

        if let Some(branch) = content.strip_prefix(SYMREF_PREFIX) {
            Ok(Head::Attached(BranchName::try_parse(branch.to_string())?))
        } else {
            Ok(Head::Detached(
                ObjectId::try_parse(content.to_string())
                    .context("HEAD holds neither a branch reference nor a commit id")?,
            ))
        }
    }

    pub fn set_head_attached(&self, branch: &BranchName) -> anyhow::Result<()> {
        let content = format!("{SYMREF_PREFIX}{branch}");
        write_atomically(&self.head_path(), content.as_bytes()).context("unable to update HEAD")
    }

    pub fn set_head_detached(&self, commit_id: &ObjectId) -> anyhow::Result<()> {
        write_atomically(&self.head_path(), commit_id.as_ref().as_bytes())
            .context("unable to update HEAD")
    }

    /// Read a branch tip; the sentinel id means "no commits yet"
    pub fn read_branch(&self, name: &BranchName) -> anyhow::Result<ObjectId> {
        let branch_path = self.branch_path(name);

        if !branch_path.exists() {
            return Err(RepoError::BranchMissing(name.to_string()).into());
        }

        let content = std::fs::read_to_string(&branch_path)
            .with_context(|| format!("unable to read branch file {}", branch_path.display()))?;

        ObjectId::try_parse(content.trim().to_string())
            .with_context(|| format!("corrupt branch file for {name}"))
    }

    pub fn write_branch(&self, name: &BranchName, commit_id: &ObjectId) -> anyhow::Result<()> {
        let branch_path = self.branch_path(name);

        // hierarchical names like feature/login need their parent directory
        let parent = branch_path
            .parent()
            .with_context(|| format!("invalid branch path for {name}"))?;
        std::fs::create_dir_all(parent)
            .with_context(|| format!("unable to create branch directory for {name}"))?;

        write_atomically(&branch_path, commit_id.as_ref().as_bytes())
            .with_context(|| format!("unable to update branch {name}"))
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Follow HEAD to a commit id; yields the sentinel before the first commit
    pub fn resolve_head(&self) -> anyhow::Result<ObjectId> {
        match self.read_head()? {
            Head::Attached(branch) => self.read_branch(&branch),
            Head::Detached(commit_id) => Ok(commit_id),
        }
    }

    pub fn head_path(&self) -> PathBuf {
        self.path.join(HEAD_FILE)
    }

    pub fn heads_path(&self) -> PathBuf {
        self.path.join("refs").join("heads")
    }

    fn branch_path(&self, name: &BranchName) -> PathBuf {
        self.heads_path().join(name.as_ref())
    }
}
