//! Commit record
//!
//! Commits are immutable snapshots of the repository. They record:
//! - Zero or more parent commit ids (index 0 is the first parent)
//! - A timestamp in local time, second resolution
//! - A single-line message
//! - The file set: a path to blob-id mapping
//!
//! ## Format
//!
//! On disk, in this exact order:
//! ```text
//! parent <commit-id>
//! timestamp <ISO-8601>
//! message <single-line-text>
//! <path>:<blob-id>
//! ```
//!
//! The commit id is the fingerprint of this serialization, which makes
//! commit identity a pure function of parents, time, message and file set.
//! The writer always emits the canonical order; the loader dispatches each
//! line on its prefix and therefore tolerates any order.

use crate::artifacts::objects::digest::fingerprint;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use bytes::Bytes;
use chrono::Timelike;
use std::collections::BTreeMap;

/// Timestamp layout: ISO-8601 local time at second resolution
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Commit object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Parent commit ids (empty for the root commit, two for merge commits)
    parents: Vec<ObjectId>,
    /// Creation time, local clock
    timestamp: chrono::NaiveDateTime,
    /// Commit message (single line)
    message: String,
    /// Path to blob-id mapping; BTreeMap keeps the canonical path order
    files: BTreeMap<String, ObjectId>,
}

impl Commit {
    /// Create a commit stamped with the current local time
    pub fn new(
        parents: Vec<ObjectId>,
        message: String,
        files: BTreeMap<String, ObjectId>,
    ) -> Self {
        Self::new_with_timestamp(parents, chrono::Local::now().naive_local(), message, files)
    }

    /// Create a commit with an explicit timestamp
    ///
    /// The commit id depends on the timestamp, so deterministic callers
    /// (tests, replays) pin the clock through this constructor.
    pub fn new_with_timestamp(
        parents: Vec<ObjectId>,
        timestamp: chrono::NaiveDateTime,
        message: String,
        files: BTreeMap<String, ObjectId>,
    ) -> Self {
        // second resolution; sub-second precision would not survive a reload
        let timestamp = timestamp.with_nanosecond(0).unwrap_or(timestamp);

        Commit {
            parents,
            timestamp,
            message,
            files,
        }
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    pub fn first_parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn files(&self) -> &BTreeMap<String, ObjectId> {
        &self.files
    }

    /// The commit's identity: the fingerprint of its canonical serialization
    pub fn object_id(&self) -> ObjectId {
        fingerprint(&self.serialize())
    }

    /// Emit the canonical serialization
    pub fn serialize(&self) -> Bytes {
        let mut lines = Vec::new();

        for parent in &self.parents {
            lines.push(format!("parent {parent}"));
        }
        lines.push(format!("timestamp {}", self.timestamp()));
        lines.push(format!("message {}", self.message));
        for (path, blob_id) in &self.files {
            lines.push(format!("{path}:{blob_id}"));
        }

        let mut content = lines.join("\n");
        content.push('\n');

        Bytes::from(content)
    }

    /// Parse a stored commit, dispatching each line on its prefix
    pub fn deserialize(data: &[u8]) -> anyhow::Result<Self> {
        let content = std::str::from_utf8(data).context("commit object is not valid UTF-8")?;

        let mut parents = Vec::new();
        let mut timestamp = None;
        let mut message = String::new();
        let mut files = BTreeMap::new();

        for line in content.lines() {
            if let Some(parent) = line.strip_prefix("parent ") {
                parents.push(ObjectId::try_parse(parent.to_string())?);
            } else if let Some(raw) = line.strip_prefix("timestamp ") {
                timestamp = Some(
                    chrono::NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
                        .with_context(|| format!("invalid commit timestamp: {raw}"))?,
                );
            } else if let Some(text) = line.strip_prefix("message ") {
                message = text.to_string();
            } else if let Some((path, blob_id)) = line.split_once(':') {
                files.insert(path.to_string(), ObjectId::try_parse(blob_id.to_string())?);
            }
        }

        let timestamp = timestamp.context("commit object is missing its timestamp line")?;

        Ok(Commit {
            parents,
            timestamp,
            message,
            files,
        })
    }
}
