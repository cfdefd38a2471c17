use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::core::RepoError;
use crate::artifacts::objects::commit::Commit;
use std::io::Write;

impl Repository {
    /// Snapshot the index as a new commit on the current branch.
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        // the canonical serialization is line-oriented; an embedded newline
        // would change the meaning of the stored record
        if message.contains('\n') || message.contains('\r') {
            return Err(RepoError::UnsupportedMessage.into());
        }

        let Head::Attached(current_branch) = self.refs().read_head()? else {
            return Err(RepoError::DetachedHead.into());
        };
        let branch_tip = self.refs().read_branch(&current_branch)?;

        let mut index = self.index();
        index.rehydrate()?;
        let file_set = index.file_set().clone();

        let parents = if branch_tip.is_null() {
            vec![]
        } else {
            let parent_commit = self.database().parse_commit(&branch_tip)?;
            if parent_commit.files() == &file_set {
                writeln!(self.writer(), "No changes to commit.")?;
                return Ok(());
            }
            vec![branch_tip]
        };

        let commit = Commit::new(parents, message.to_string(), file_set);
        let commit_id = self.database().put(commit.serialize())?;
        self.refs().write_branch(&current_branch, &commit_id)?;

        writeln!(self.writer(), "Committed as {commit_id}")?;

        Ok(())
    }
}
