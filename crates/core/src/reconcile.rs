//! Assignment-set reconciliation.
//!
//! When a project's assigned team member set changes, the inverse
//! references have to follow: members dropped from the set lose the
//! project, members added to it gain it. The diff is computed here so
//! the repository transaction and the tests share one definition.

use std::collections::HashSet;

use crate::types::DbId;

/// Result of diffing an old assignment set against a new target set.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentDiff {
    /// Ids present in `new` but not in `old`.
    pub added: Vec<DbId>,
    /// Ids present in `old` but not in `new`.
    pub removed: Vec<DbId>,
}

impl AssignmentDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute `removed = old - new` and `added = new - old` by id equality.
///
/// Duplicate ids on either side are collapsed; output order follows first
/// appearance in the input slices.
pub fn diff_assignments(old: &[DbId], new: &[DbId]) -> AssignmentDiff {
    let old_set: HashSet<DbId> = old.iter().copied().collect();
    let new_set: HashSet<DbId> = new.iter().copied().collect();

    let mut seen = HashSet::new();
    let added = new
        .iter()
        .copied()
        .filter(|id| !old_set.contains(id) && seen.insert(*id))
        .collect();

    seen.clear();
    let removed = old
        .iter()
        .copied()
        .filter(|id| !new_set.contains(id) && seen.insert(*id))
        .collect();

    AssignmentDiff { added, removed }
}
