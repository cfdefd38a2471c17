//! Repository abstraction and coordination
//!
//! This module provides the main `Repository` type that coordinates all
//! repository operations. It acts as a facade over the lower-level areas
//! (database, index, workspace, refs) and hosts the porcelain commands.
//!
//! ## Architecture
//!
//! The repository maintains references to:
//! - Database: Content-addressed object storage (blobs and commits)
//! - Index: Staging area for the next commit's file set
//! - Workspace: Working directory operations
//! - Refs: HEAD and branch management
//!
//! All state lives under the `.minigit/` directory at the repository root;
//! the `Repository` value itself carries no cross-command state beyond its
//! paths and output writer.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::refs::Refs;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::RepoError;
use std::cell::{RefCell, RefMut};
use std::path::{Path, PathBuf};

/// Repository state directory name
pub const MINIGIT_DIR: &str = ".minigit";

/// Object database directory name
const DATABASE_DIR: &str = "objects";

/// Index file name
const INDEX_FILE: &str = "index";

/// Minigit repository
///
/// Coordinates all repository operations and provides access to the
/// database, index, workspace and refs areas. This is the entry point for
/// every porcelain command.
pub struct Repository {
    /// Repository root path
    path: Box<Path>,
    /// Output writer (stdout in production, a buffer in tests)
    writer: RefCell<Box<dyn std::io::Write>>,
    /// Staging area
    index: RefCell<Index>,
    /// Object database
    database: Database,
    /// Working directory
    workspace: Workspace,
    /// Reference manager
    refs: Refs,
}

impl Repository {
    pub fn new(path: PathBuf, writer: Box<dyn std::io::Write>) -> anyhow::Result<Self> {
        let path = path.canonicalize()?;

        let index = Index::new(path.join(MINIGIT_DIR).join(INDEX_FILE).into_boxed_path());
        let database = Database::new(path.join(MINIGIT_DIR).join(DATABASE_DIR).into_boxed_path());
        let workspace = Workspace::new(path.clone().into_boxed_path());
        let refs = Refs::new(path.join(MINIGIT_DIR).into_boxed_path());

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            index: RefCell::new(index),
            database,
            workspace,
            refs,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn minigit_path(&self) -> PathBuf {
        self.path.join(MINIGIT_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn index(&'_ self) -> RefMut<'_, Index> {
        self.index.borrow_mut()
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn refs(&self) -> &Refs {
        &self.refs
    }

    /// Every command except `init` requires an existing `.minigit/` layout.
    pub fn require_initialized(&self) -> anyhow::Result<()> {
        if self.minigit_path().is_dir() {
            Ok(())
        } else {
            Err(RepoError::NotARepository.into())
        }
    }
}
