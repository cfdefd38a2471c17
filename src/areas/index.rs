//! Staging area
//!
//! The index tracks the file set intended for the next commit: an ordered
//! mapping from working path to blob id, persisted as `.minigit/index` with
//! one `<path>:<blob-id>` line per entry, sorted lexicographically by path.
//! That ordering is what makes commits derived from the index serialize
//! deterministically.
//!
//! Each command rehydrates the index from disk, mutates its local value and
//! writes the result back; no staging state lives in memory between
//! commands.

use crate::artifacts::core::write_atomically;
use crate::artifacts::objects::object_id::ObjectId;
use anyhow::Context;
use std::collections::BTreeMap;
use std::path::Path;

/// Staging area for the next commit
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.minigit/index`)
    path: Box<Path>,
    /// Staged files mapped by path; BTreeMap keeps the on-disk order
    entries: BTreeMap<String, ObjectId>,
    /// Flag indicating if the entries changed since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            entries: BTreeMap::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reload the entries from disk, replacing any in-memory state
    ///
    /// A missing or empty index file yields an empty map.
    pub fn rehydrate(&mut self) -> anyhow::Result<()> {
        self.entries.clear();
        self.changed = false;

        if !self.path.exists() {
            return Ok(());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("unable to read index file {}", self.path.display()))?;

        for line in content.lines() {
            let Some((path, blob_id)) = line.split_once(':') else {
                continue;
            };

            let blob_id = ObjectId::try_parse(blob_id.to_string())
                .with_context(|| format!("corrupt index entry for {path}"))?;
            self.entries.insert(path.to_string(), blob_id);
        }

        Ok(())
    }

    /// Persist the entries if they changed since the last rehydrate
    pub fn write_updates(&mut self) -> anyhow::Result<()> {
        if !self.changed {
            return Ok(());
        }

        let mut content = String::new();
        for (path, blob_id) in &self.entries {
            content.push_str(path);
            content.push(':');
            content.push_str(blob_id.as_ref());
            content.push('\n');
        }

        write_atomically(&self.path, content.as_bytes())
            .with_context(|| format!("unable to write index file {}", self.path.display()))?;
        self.changed = false;

        Ok(())
    }

    pub fn put(&mut self, path: String, blob_id: ObjectId) {
        self.entries.insert(path, blob_id);
        self.changed = true;
    }

    pub fn remove(&mut self, path: &str) {
        if self.entries.remove(path).is_some() {
            self.changed = true;
        }
    }

    /// Replace the whole file set, e.g. when materializing a commit
    pub fn replace(&mut self, entries: BTreeMap<String, ObjectId>) {
        self.entries = entries;
        self.changed = true;
    }

    pub fn file_set(&self) -> &BTreeMap<String, ObjectId> {
        &self.entries
    }
}
