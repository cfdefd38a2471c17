//! Revision resolution
//!
//! A checkout target is either a branch name or a raw commit id. Branch
//! names win when both readings are possible, matching how the reference
//! lookup shadows object ids in git-like tools.

use crate::areas::database::Database;
use crate::areas::refs::Refs;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::RepoError;
use crate::artifacts::objects::object_id::ObjectId;

/// A resolved checkout target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A branch; checking it out leaves HEAD attached
    Branch(BranchName),
    /// A raw commit id; checking it out detaches HEAD
    Commit(ObjectId),
}

impl Revision {
    /// Resolve a user-supplied target to a revision and its commit id.
    pub fn resolve(
        target: &str,
        refs: &Refs,
        database: &Database,
    ) -> anyhow::Result<(Self, ObjectId)> {
        if let Ok(name) = BranchName::try_parse(target.to_string())
            && refs.branch_exists(&name)
        {
            let commit_id = refs.read_branch(&name)?;
            return Ok((Revision::Branch(name), commit_id));
        }

        if let Ok(commit_id) = ObjectId::try_parse(target.to_string())
            && database.exists(&commit_id)
        {
            return Ok((Revision::Commit(commit_id.clone()), commit_id));
        }

        Err(RepoError::UnknownRevision(target.to_string()).into())
    }
}
