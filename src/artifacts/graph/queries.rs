//! Ancestry queries over the commit graph
//!
//! The commit graph is never held in memory as linked nodes; commits are
//! referenced by id and loaded on demand through a caller-supplied parent
//! loader, so the same queries run against the on-disk database in
//! production and an in-memory store in tests.
//!
//! ## Algorithms
//!
//! - `is_ancestor`: breadth-first walk from the descendant through parent
//!   edges with a visited set.
//! - `find_common_ancestor`: two breadth-first frontiers advancing in
//!   alternation, one step at a time; the first commit discovered inside
//!   the opposite frontier's visited set wins. For the histories this tool
//!   produces (single-parent commits plus two-parent merges whose
//!   superseded tips fast-forward) that first meeting point is a lowest
//!   common ancestor. On adversarial multi-merge graphs built by other
//!   means it is merely *a* common ancestor.

use crate::artifacts::objects::object_id::ObjectId;
use bitflags::bitflags;
use std::collections::{HashMap, VecDeque};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct VisitSide: u8 {
        const LEFT = 0b01;
        const RIGHT = 0b10;
    }
}

/// Graph queries over a caller-supplied parent loader
///
/// The loader maps a commit id to that commit's parent ids and fails when
/// the id does not resolve to a stored commit, so a dangling parent pointer
/// aborts the walk instead of silently truncating it.
pub struct GraphQueries<LoadParentsFn>
where
    LoadParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    load_parents: LoadParentsFn,
}

impl<LoadParentsFn> GraphQueries<LoadParentsFn>
where
    LoadParentsFn: Fn(&ObjectId) -> anyhow::Result<Vec<ObjectId>>,
{
    pub fn new(load_parents: LoadParentsFn) -> Self {
        Self { load_parents }
    }

    /// True iff `ancestor` is reachable from `descendant` through parent
    /// edges. Reflexive: every commit is its own ancestor.
    pub fn is_ancestor(
        &self,
        ancestor: &ObjectId,
        descendant: &ObjectId,
    ) -> anyhow::Result<bool> {
        let mut visited = std::collections::HashSet::new();
        let mut queue = VecDeque::from([descendant.clone()]);

        while let Some(commit_id) = queue.pop_front() {
            if &commit_id == ancestor {
                return Ok(true);
            }
            if !visited.insert(commit_id.clone()) {
                continue;
            }

            for parent in (self.load_parents)(&commit_id)? {
                queue.push_back(parent);
            }
        }

        Ok(false)
    }

    /// Find a common ancestor of two commits, or None for disjoint histories
    pub fn find_common_ancestor(
        &self,
        left: &ObjectId,
        right: &ObjectId,
    ) -> anyhow::Result<Option<ObjectId>> {
        let mut visits: HashMap<ObjectId, VisitSide> = HashMap::new();
        let mut left_queue = VecDeque::from([left.clone()]);
        let mut right_queue = VecDeque::from([right.clone()]);

        while !left_queue.is_empty() || !right_queue.is_empty() {
            if let Some(found) =
                self.step(&mut left_queue, &mut visits, VisitSide::LEFT, VisitSide::RIGHT)?
            {
                return Ok(Some(found));
            }
            if let Some(found) =
                self.step(&mut right_queue, &mut visits, VisitSide::RIGHT, VisitSide::LEFT)?
            {
                return Ok(Some(found));
            }
        }

        Ok(None)
    }

    /// Advance one frontier by a single commit.
    ///
    /// Returns the commit when it was already visited from the other side.
    fn step(
        &self,
        queue: &mut VecDeque<ObjectId>,
        visits: &mut HashMap<ObjectId, VisitSide>,
        own_side: VisitSide,
        other_side: VisitSide,
    ) -> anyhow::Result<Option<ObjectId>> {
        let Some(commit_id) = queue.pop_front() else {
            return Ok(None);
        };

        let seen = visits
            .get(&commit_id)
            .copied()
            .unwrap_or(VisitSide::empty());

        if seen.contains(other_side) {
            return Ok(Some(commit_id));
        }

        if !seen.contains(own_side) {
            visits.insert(commit_id.clone(), seen | own_side);

            for parent in (self.load_parents)(&commit_id)? {
                queue.push_back(parent);
            }
        }

        Ok(None)
    }
}
