// src/watch/enumerate.rs

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::watch::spec::WatchSpec;

/// Enumerate every file the spec currently watches.
///
/// Two sources contribute:
/// - each `[watch].dir` entry, walked recursively, keeping files whose path
///   ends with one of the configured extension suffixes;
/// - the project root itself (non-recursive), keeping files whose path ends
///   with one of the `[watch].file` suffixes.
///
/// Directories or entries that vanish or are unreadable mid-walk are skipped
/// silently; enumeration is a pure function of whatever the filesystem looks
/// like at call time. The result is sorted and free of duplicates.
pub fn enumerate(spec: &WatchSpec) -> Vec<PathBuf> {
    let mut found = BTreeSet::new();

    for dir in spec.dir_roots() {
        collect_recursive(&dir, spec, &mut found);
    }

    if !spec.file_suffixes().is_empty() {
        collect_root_files(spec, &mut found);
    }

    trace!(count = found.len(), "enumerated watched files");
    found.into_iter().collect()
}

fn collect_recursive(dir: &Path, spec: &WatchSpec, out: &mut BTreeSet<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        // Missing or unreadable dirs are not an error; they may appear later.
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            collect_recursive(&path, spec, out);
        } else if ends_with_any(&path, spec.ext_suffixes()) && !spec.is_excluded(&path) {
            out.insert(path);
        }
    }
}

fn collect_root_files(spec: &WatchSpec, out: &mut BTreeSet<PathBuf>) {
    let Ok(entries) = fs::read_dir(spec.root()) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_file() && ends_with_any(&path, spec.file_suffixes()) && !spec.is_excluded(&path)
        {
            out.insert(path);
        }
    }
}

/// Suffix test against the full path string, matching how extensions and
/// root-file names are configured (e.g. `".rs"`, `".env"`).
///
/// An empty suffix list matches nothing.
pub(crate) fn ends_with_any(path: &Path, suffixes: &[String]) -> bool {
    let s = path.to_string_lossy();
    suffixes.iter().any(|suf| s.ends_with(suf.as_str()))
}
