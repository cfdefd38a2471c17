//! Three-way file-set resolution
//!
//! A merge compares each path across three snapshots: the common ancestor
//! (base), the current branch tip and the target branch tip. Files are
//! identified by path and compared by blob id; because blob ids are content
//! fingerprints, id equality means byte identity. There is no line-level
//! merging: concurrent modifications of the same path always conflict, even
//! when the edits would have been compatible.

use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{BTreeMap, BTreeSet};

/// Outcome for a single path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The path survives with this blob id
    Keep(ObjectId),
    /// The path is dropped from the merged file set
    Delete,
    /// Both sides changed the path in incompatible ways
    Conflict,
}

/// Result of resolving two file sets against their common ancestor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedFileSet {
    /// The merged path to blob-id mapping
    pub files: BTreeMap<String, ObjectId>,
    /// Conflicting paths, in lexicographic order
    pub conflicts: Vec<String>,
}

impl MergedFileSet {
    pub fn is_clean(&self) -> bool {
        self.conflicts.is_empty()
    }
}

/// Decide the fate of one path from its blob ids in base, current and target.
///
/// `None` means the path is absent from that snapshot.
pub fn resolve_entry(
    base: Option<&ObjectId>,
    current: Option<&ObjectId>,
    target: Option<&ObjectId>,
) -> Resolution {
    match (base, current, target) {
        (Some(b), Some(c), Some(t)) => {
            if c == b && t == b {
                // untouched on both sides
                Resolution::Keep(b.clone())
            } else if c == b {
                // only the target side changed it
                Resolution::Keep(t.clone())
            } else if t == b {
                // only the current side changed it
                Resolution::Keep(c.clone())
            } else if c == t {
                // both sides converged on the same content
                Resolution::Keep(c.clone())
            } else {
                Resolution::Conflict
            }
        }
        (Some(b), Some(c), None) => {
            if c == b {
                // deleted in target, untouched here
                Resolution::Delete
            } else {
                // modified here but deleted there
                Resolution::Conflict
            }
        }
        (Some(b), None, Some(t)) => {
            if t == b {
                // deleted here, untouched in target
                Resolution::Delete
            } else {
                Resolution::Conflict
            }
        }
        (Some(_), None, None) => Resolution::Delete,
        (None, Some(c), Some(t)) => {
            if c == t {
                // added identically on both sides
                Resolution::Keep(c.clone())
            } else {
                Resolution::Conflict
            }
        }
        (None, Some(c), None) => Resolution::Keep(c.clone()),
        (None, None, Some(t)) => Resolution::Keep(t.clone()),
        // unreachable for paths drawn from the union of the three sets
        (None, None, None) => Resolution::Delete,
    }
}

/// Resolve every path in the union of the three file sets.
pub fn resolve_file_sets(
    base: &BTreeMap<String, ObjectId>,
    current: &BTreeMap<String, ObjectId>,
    target: &BTreeMap<String, ObjectId>,
) -> MergedFileSet {
    let all_paths: BTreeSet<&String> = base
        .keys()
        .chain(current.keys())
        .chain(target.keys())
        .collect();

    let mut files = BTreeMap::new();
    let mut conflicts = Vec::new();

    for path in all_paths {
        match resolve_entry(base.get(path), current.get(path), target.get(path)) {
            Resolution::Keep(blob_id) => {
                files.insert(path.clone(), blob_id);
            }
            Resolution::Delete => {}
            Resolution::Conflict => conflicts.push(path.clone()),
        }
    }

    MergedFileSet { files, conflicts }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::digest::fingerprint;
    use rstest::rstest;

    fn l() -> ObjectId {
        fingerprint(b"base content")
    }

    fn c() -> ObjectId {
        fingerprint(b"current content")
    }

    fn t() -> ObjectId {
        fingerprint(b"target content")
    }

    #[rstest]
    #[case::untouched(Some(l()), Some(l()), Some(l()), Resolution::Keep(l()))]
    #[case::target_modified(Some(l()), Some(l()), Some(t()), Resolution::Keep(t()))]
    #[case::current_modified(Some(l()), Some(c()), Some(l()), Resolution::Keep(c()))]
    #[case::both_converged(Some(l()), Some(c()), Some(c()), Resolution::Keep(c()))]
    #[case::both_diverged(Some(l()), Some(c()), Some(t()), Resolution::Conflict)]
    #[case::deleted_in_target(Some(l()), Some(l()), None, Resolution::Delete)]
    #[case::modified_here_deleted_there(Some(l()), Some(c()), None, Resolution::Conflict)]
    #[case::deleted_here(Some(l()), None, Some(l()), Resolution::Delete)]
    #[case::deleted_here_modified_there(Some(l()), None, Some(t()), Resolution::Conflict)]
    #[case::deleted_on_both_sides(Some(l()), None, None, Resolution::Delete)]
    #[case::added_identically(None, Some(c()), Some(c()), Resolution::Keep(c()))]
    #[case::added_differently(None, Some(c()), Some(t()), Resolution::Conflict)]
    #[case::added_here_only(None, Some(c()), None, Resolution::Keep(c()))]
    #[case::added_there_only(None, None, Some(t()), Resolution::Keep(t()))]
    fn resolves_each_table_row(
        #[case] base: Option<ObjectId>,
        #[case] current: Option<ObjectId>,
        #[case] target: Option<ObjectId>,
        #[case] expected: Resolution,
    ) {
        assert_eq!(
            resolve_entry(base.as_ref(), current.as_ref(), target.as_ref()),
            expected
        );
    }

    #[test]
    fn clean_merge_unions_the_divergent_additions() {
        let base = BTreeMap::from([("a.txt".to_string(), l())]);
        let current = BTreeMap::from([
            ("a.txt".to_string(), l()),
            ("b.txt".to_string(), c()),
        ]);
        let target = BTreeMap::from([
            ("a.txt".to_string(), l()),
            ("c.txt".to_string(), t()),
        ]);

        let merged = resolve_file_sets(&base, &current, &target);

        assert!(merged.is_clean());
        assert_eq!(
            merged.files,
            BTreeMap::from([
                ("a.txt".to_string(), l()),
                ("b.txt".to_string(), c()),
                ("c.txt".to_string(), t()),
            ])
        );
    }

    #[test]
    fn merged_outcome_is_symmetric_when_clean() {
        let base = BTreeMap::from([("a.txt".to_string(), l())]);
        let ours = BTreeMap::from([("a.txt".to_string(), c())]);
        let theirs = BTreeMap::from([
            ("a.txt".to_string(), l()),
            ("new.txt".to_string(), t()),
        ]);

        let forward = resolve_file_sets(&base, &ours, &theirs);
        let backward = resolve_file_sets(&base, &theirs, &ours);

        assert!(forward.is_clean() && backward.is_clean());
        assert_eq!(forward.files, backward.files);
    }

    #[test]
    fn conflicts_are_collected_in_path_order() {
        let base = BTreeMap::from([
            ("x.txt".to_string(), l()),
            ("a.txt".to_string(), l()),
        ]);
        let current = BTreeMap::from([
            ("x.txt".to_string(), c()),
            ("a.txt".to_string(), c()),
        ]);
        let target = BTreeMap::from([
            ("x.txt".to_string(), t()),
            ("a.txt".to_string(), t()),
        ]);

        let merged = resolve_file_sets(&base, &current, &target);

        assert_eq!(merged.conflicts, vec!["a.txt".to_string(), "x.txt".to_string()]);
        assert!(merged.files.is_empty());
    }
}
