use crate::areas::repository::Repository;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Print the first-parent chain from HEAD, newest first.
    pub fn log(&self) -> anyhow::Result<()> {
        self.require_initialized()?;

        let mut commit_id = self.refs().resolve_head()?;

        if commit_id.is_null() {
            writeln!(self.writer(), "No commits yet.")?;
            return Ok(());
        }

        loop {
            let commit = self.database().parse_commit(&commit_id)?;

            writeln!(
                self.writer(),
                "{}",
                format!("commit {commit_id}").yellow()
            )?;
            writeln!(self.writer(), "Date: {}", commit.timestamp())?;
            writeln!(self.writer(), "{}", commit.message())?;
            writeln!(self.writer())?;

            match commit.first_parent() {
                Some(parent) => commit_id = parent.clone(),
                None => break,
            }
        }

        Ok(())
    }
}
