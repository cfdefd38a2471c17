//! Branch names
//!
//! Branch names are opaque strings with one hard requirement: they must stay
//! inside `.minigit/refs/heads/` when joined onto it. Hierarchical names
//! (`feature/login`) are allowed; anything that could traverse out of the
//! refs directory is rejected.

use crate::artifacts::core::RepoError;

/// Validated branch name
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct BranchName(String);

impl BranchName {
    pub fn try_parse(name: String) -> anyhow::Result<Self> {
        if Self::is_valid(&name) {
            Ok(Self(name))
        } else {
            Err(RepoError::InvalidBranchName(name).into())
        }
    }

    fn is_valid(name: &str) -> bool {
        if name.is_empty() || name.starts_with('/') || name.ends_with('/') {
            return false;
        }
        if name.contains('\\') || name.chars().any(|c| c.is_control()) {
            return false;
        }

        // every path segment must be a plain name, never "." or ".."
        name.split('/').all(|segment| {
            !segment.is_empty() && segment != "." && segment != ".."
        })
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
