use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::fs;
use std::io::Write;

/// The branch HEAD points at in a fresh repository
const DEFAULT_BRANCH: &str = "master";

impl Repository {
    pub fn init(&mut self) -> anyhow::Result<()> {
        if self.minigit_path().exists() {
            return Err(RepoError::RepoAlreadyExists.into());
        }

        fs::create_dir_all(self.database().objects_path())
            .context("failed to create .minigit/objects directory")?;
        fs::create_dir_all(self.refs().heads_path())
            .context("failed to create .minigit/refs/heads directory")?;

        let master = BranchName::try_parse(DEFAULT_BRANCH.to_string())?;
        self.refs().set_head_attached(&master)?;
        self.refs().write_branch(&master, &ObjectId::null())?;

        fs::write(self.index().path(), b"").context("failed to create .minigit/index file")?;

        writeln!(
            self.writer(),
            "Initialized empty minigit repository in .minigit/"
        )?;

        Ok(())
    }
}
