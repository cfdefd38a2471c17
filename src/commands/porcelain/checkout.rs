use crate::areas::repository::Repository;
use crate::artifacts::branch::revision::Revision;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::RepoError;
use std::io::Write;

impl Repository {
    /// Materialize a branch tip or raw commit into the working directory.
    ///
    /// HEAD ends up attached when the target is a branch and detached when
    /// it is a bare commit id. Uncommitted local edits are discarded.
    pub fn checkout(&mut self, target: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        let (revision, commit_id) =
            Revision::resolve(target, self.refs(), self.database())?;

        if commit_id.is_null() {
            return Err(RepoError::EmptyRepository.into());
        }

        // HEAD moves first, then the snapshot is materialized
        match &revision {
            Revision::Branch(name) => self.refs().set_head_attached(name)?,
            Revision::Commit(id) => self.refs().set_head_detached(id)?,
        }

        let commit = self.database().parse_commit(&commit_id)?;

        let mut index = self.index();
        index.rehydrate()?;

        Migration::new(self.database(), self.workspace(), commit.files())
            .apply(&mut index)?;
        index.write_updates()?;

        writeln!(self.writer(), "Checked out to {target}")?;

        Ok(())
    }
}
