// src/watch/diff.rs

use std::path::PathBuf;

use crate::watch::fingerprint::Snapshot;

/// The classified output of comparing two snapshots.
///
/// The three sets are disjoint: a path appears in at most one of them per
/// cycle. `changed` is only ever populated when `removed` is empty (see
/// [`diff`]). Paths are in sorted (enumeration) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    pub added: Vec<PathBuf>,
    pub removed: Vec<PathBuf>,
    pub changed: Vec<PathBuf>,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Compare two snapshots and classify every path.
///
/// - `added`: in `curr` but not `prev`.
/// - `removed`: in `prev` but not `curr`.
/// - `changed`: in both with differing fingerprints, compared per path. A
///   path-keyed comparison is immune to distinct files sharing a fingerprint
///   value, which a value-set diff would misattribute.
///
/// Deletion policy: when any path was removed this cycle, `changed` is
/// dropped entirely. Deleted files cannot be hot-reloaded, so the cycle
/// degrades to reporting additions and removals only; the scan loop logs the
/// manual-restart warning. Additions are always reported.
pub fn diff(prev: &Snapshot, curr: &Snapshot) -> ChangeSet {
    let mut changes = ChangeSet::default();

    for (path, fingerprint) in curr.iter() {
        match prev.get(path) {
            None => changes.added.push(path.clone()),
            Some(old) if old != fingerprint => changes.changed.push(path.clone()),
            Some(_) => {}
        }
    }

    for path in prev.keys() {
        if !curr.contains_key(path) {
            changes.removed.push(path.clone());
        }
    }

    if !changes.removed.is_empty() {
        changes.changed.clear();
    }

    changes
}
