use crate::areas::refs::Head;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::checkout::migration::Migration;
use crate::artifacts::core::RepoError;
use crate::artifacts::graph::queries::GraphQueries;
use crate::artifacts::merge::resolution::resolve_file_sets;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use std::io::Write;

impl Repository {
    /// Merge `other` into the current branch.
    ///
    /// Identical or already-contained tips are a no-op, a descendant tip
    /// fast-forwards, and divergent tips go through a three-way merge over
    /// their common ancestor. A conflicting three-way merge aborts before
    /// touching the working tree, index or refs.
    pub fn merge(&mut self, other: &str) -> anyhow::Result<()> {
        self.require_initialized()?;

        let other_branch = BranchName::try_parse(other.to_string())?;
        if !self.refs().branch_exists(&other_branch) {
            return Err(RepoError::BranchMissing(other_branch.to_string()).into());
        }

        let Head::Attached(current_branch) = self.refs().read_head()? else {
            return Err(RepoError::DetachedHead.into());
        };

        let current_oid = self.refs().read_branch(&current_branch)?;
        let other_oid = self.refs().read_branch(&other_branch)?;
        if current_oid.is_null() || other_oid.is_null() {
            return Err(RepoError::EmptyRepository.into());
        }

        if current_oid == other_oid {
            writeln!(self.writer(), "Already up-to-date.")?;
            return Ok(());
        }

        let queries = GraphQueries::new(|oid: &ObjectId| -> anyhow::Result<Vec<ObjectId>> {
            Ok(self.database().parse_commit(oid)?.parents().to_vec())
        });

        if queries.is_ancestor(&current_oid, &other_oid)? {
            return self.fast_forward(&current_branch, &other_oid);
        }
        if queries.is_ancestor(&other_oid, &current_oid)? {
            writeln!(self.writer(), "Already up-to-date.")?;
            return Ok(());
        }

        let base_oid = queries
            .find_common_ancestor(&current_oid, &other_oid)?
            .ok_or(RepoError::NoCommonAncestor)?;

        let base = self.database().parse_commit(&base_oid)?;
        let current = self.database().parse_commit(&current_oid)?;
        let target = self.database().parse_commit(&other_oid)?;

        let merged = resolve_file_sets(base.files(), current.files(), target.files());

        if !merged.is_clean() {
            for path in &merged.conflicts {
                writeln!(self.writer(), "CONFLICT: both modified {path}")?;
            }
            writeln!(self.writer(), "Merge aborted.")?;
            return Err(RepoError::MergeConflict(merged.conflicts.len()).into());
        }

        {
            let mut index = self.index();
            index.rehydrate()?;
            Migration::new(self.database(), self.workspace(), &merged.files)
                .apply(&mut index)?;
            index.write_updates()?;
        }

        let merge_commit = Commit::new(
            vec![current_oid, other_oid],
            format!("Merge branch {other_branch}"),
            merged.files,
        );
        let merge_oid = self.database().put(merge_commit.serialize())?;
        self.refs().write_branch(&current_branch, &merge_oid)?;

        writeln!(self.writer(), "Merged {other_branch} into {current_branch}")?;

        Ok(())
    }

    /// Advance the current branch onto a descendant tip without a new commit.
    fn fast_forward(
        &self,
        current_branch: &BranchName,
        other_oid: &ObjectId,
    ) -> anyhow::Result<()> {
        self.refs().write_branch(current_branch, other_oid)?;

        let commit = self.database().parse_commit(other_oid)?;
        let mut index = self.index();
        index.rehydrate()?;
        Migration::new(self.database(), self.workspace(), commit.files())
            .apply(&mut index)?;
        index.write_updates()?;

        writeln!(self.writer(), "Fast-forward merge.")?;

        Ok(())
    }
}
