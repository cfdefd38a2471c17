//! Working-tree materialization
//!
//! A migration replaces the working directory's contents with a snapshot's
//! file set and rewrites the index to mirror it exactly. It is destructive
//! by contract: uncommitted local edits are discarded without prompting.
//!
//! Callers resolve the full target file set (a commit's files, or a merged
//! file set) before constructing a migration, so a migration either applies
//! completely or fails before the first destructive step.

use crate::areas::database::Database;
use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;

/// One working-tree replacement, driven by a target file set
#[derive(new)]
pub struct Migration<'repo> {
    database: &'repo Database,
    workspace: &'repo Workspace,
    file_set: &'repo BTreeMap<String, ObjectId>,
}

impl Migration<'_> {
    /// Materialize the file set into the working directory and the index.
    ///
    /// Blob contents are loaded up front so that a dangling blob id aborts
    /// the migration before anything is removed from the working tree.
    pub fn apply(&self, index: &mut Index) -> anyhow::Result<()> {
        let mut contents: Vec<(&String, Bytes)> = Vec::with_capacity(self.file_set.len());
        for (path, blob_id) in self.file_set {
            contents.push((path, self.database.get(blob_id)?));
        }

        self.workspace.clean()?;

        for (path, data) in contents {
            self.workspace.write_file(path, &data)?;
        }

        index.replace(self.file_set.clone());

        Ok(())
    }
}
