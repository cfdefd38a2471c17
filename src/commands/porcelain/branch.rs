use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use std::io::Write;

impl Repository {
    /// Create a branch pointing at the current commit.
    pub fn branch(&mut self, name: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        let name = BranchName::try_parse(name.to_string())?;

        let Head::Attached(current_branch) = self.refs().read_head()? else {
            return Err(RepoError::DetachedHead.into());
        };
        let branch_tip = self.refs().read_branch(&current_branch)?;

        if branch_tip.is_null() {
            return Err(RepoError::EmptyRepository.into());
        }
        if self.refs().branch_exists(&name) {
            return Err(RepoError::BranchExists(name.to_string()).into());
        }

        self.refs().write_branch(&name, &branch_tip)?;

        writeln!(self.writer(), "Created branch {name}")?;

        Ok(())
    }
}
