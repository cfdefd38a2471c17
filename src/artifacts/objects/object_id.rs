//! Object identifier
//!
//! Object ids are 16-character hexadecimal strings naming blobs and commits
//! in the object database. The all-zero id is reserved: it is never produced
//! by the fingerprint function and marks a branch with no commits yet.

use crate::artifacts::objects::{NULL_OBJECT_ID, OBJECT_ID_LENGTH};

/// Content-addressed object identifier
///
/// A 16-character hexadecimal string identifying an object in the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object id from a string
    ///
    /// # Returns
    ///
    /// Validated ObjectId or error if invalid length/characters
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("invalid object id length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("invalid object id characters: {}", id));
        }
        Ok(Self(id))
    }

    /// The reserved "no commit yet" sentinel
    pub fn null() -> Self {
        Self(NULL_OBJECT_ID.to_string())
    }

    pub fn is_null(&self) -> bool {
        self.0 == NULL_OBJECT_ID
    }

    pub(super) fn from_accumulator(hash: u64) -> Self {
        Self(format!("{hash:016x}"))
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
