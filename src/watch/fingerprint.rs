// src/watch/fingerprint.rs

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

use blake3::Hasher;
use tracing::{debug, trace};

use crate::watch::enumerate::{self, ends_with_any};
use crate::watch::spec::{FingerprintMode, WatchSpec};

/// The complete observed state of the watched set at one scan instant:
/// absolute path -> fingerprint (digest hex or formatted mtime).
///
/// A `BTreeMap` keeps iteration in stable enumeration order, which is the
/// order changes are emitted in.
pub type Snapshot = BTreeMap<PathBuf, String>;

/// Fingerprinting strategy, selected once when the scanner is built.
#[derive(Debug, Clone, Copy)]
pub enum Fingerprinter {
    /// Enumerate in-process and digest every watched file's content.
    ContentHash,
    /// One bulk `find -mmin` query per tick; enumeration and fingerprinting
    /// are fused into that single external call.
    Timestamp,
}

impl Fingerprinter {
    pub fn for_mode(mode: FingerprintMode) -> Self {
        match mode {
            FingerprintMode::ContentHash => Fingerprinter::ContentHash,
            FingerprintMode::Timestamp => Fingerprinter::Timestamp,
        }
    }

    /// Build the snapshot for the current tick.
    ///
    /// `prev` is the baseline from the previous tick. Content-hash mode
    /// ignores it and observes the filesystem from scratch. Timestamp mode
    /// only learns about files modified within the scan window, so it folds
    /// the fresh observations into `prev`: paths accumulate and never vanish,
    /// which is exactly why deletions are undetectable in that mode.
    pub fn snapshot(&self, spec: &WatchSpec, prev: &Snapshot) -> Snapshot {
        match self {
            Fingerprinter::ContentHash => content_hash_snapshot(spec),
            Fingerprinter::Timestamp => {
                merge_observations(prev, recent_modifications(spec))
            }
        }
    }
}

fn content_hash_snapshot(spec: &WatchSpec) -> Snapshot {
    enumerate::enumerate(spec)
        .into_iter()
        .map(|path| {
            let digest = hash_file(&path);
            (path, digest)
        })
        .collect()
}

/// Digest a single file's content.
///
/// A file that cannot be opened or read fingerprints as empty content rather
/// than failing the scan; a permissions flip therefore still registers as a
/// change, and a file deleted between enumeration and read is harmless.
pub fn hash_file(path: &Path) -> String {
    let mut hasher = Hasher::new();

    if let Ok(mut file) = File::open(path) {
        trace!("hashing file {:?}", path);
        let mut buf = [0u8; 8192];
        loop {
            match file.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    hasher.update(&buf[..n]);
                }
                Err(_) => break,
            }
        }
    }

    hasher.finalize().to_hex().to_string()
}

/// Fold fresh `(path, mtime)` observations into the previous baseline.
pub fn merge_observations(
    prev: &Snapshot,
    observations: Vec<(PathBuf, String)>,
) -> Snapshot {
    let mut snap = prev.clone();
    for (path, mtime) in observations {
        snap.insert(path, mtime);
    }
    snap
}

/// Query the system `find` utility for watched files modified within the
/// scan window.
///
/// Issues a single invocation covering every watched directory plus any
/// matching root-level files. If `find` is missing, fails, or prints
/// something unparsable, this yields zero observations for the tick; the
/// loop keeps running.
fn recent_modifications(spec: &WatchSpec) -> Vec<(PathBuf, String)> {
    let roots = query_roots(spec);
    if roots.is_empty() {
        return Vec::new();
    }

    let minutes = window_minutes(spec.scan_interval_ms());

    let output = Command::new("find")
        .args(&roots)
        .arg("-mmin")
        .arg(format!("-{minutes}"))
        .arg("-type")
        .arg("f")
        .arg("-printf")
        .arg("%p %T+\n")
        .output();

    match output {
        Ok(out) => parse_find_output(&String::from_utf8_lossy(&out.stdout), spec),
        Err(err) => {
            debug!(error = %err, "find unavailable; no modifications observed this tick");
            Vec::new()
        }
    }
}

/// Roots handed to `find`: existing watched directories, plus root-level
/// files matching the configured filename suffixes.
fn query_roots(spec: &WatchSpec) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = spec
        .dir_roots()
        .into_iter()
        .filter(|d| d.is_dir())
        .collect();

    if !spec.file_suffixes().is_empty() {
        if let Ok(entries) = fs::read_dir(spec.root()) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() && ends_with_any(&path, spec.file_suffixes()) {
                    roots.push(path);
                }
            }
        }
    }

    roots
}

/// Parse `find -printf "%p %T+\n"` output into `(path, mtime)` pairs,
/// applying the extension/file-suffix filter and the exclude globs.
///
/// The mtime column never contains spaces, so splitting on the last space
/// keeps paths with spaces intact. Lines without both columns are dropped.
pub fn parse_find_output(stdout: &str, spec: &WatchSpec) -> Vec<(PathBuf, String)> {
    let mut observations = Vec::new();

    for line in stdout.lines() {
        let Some((path_str, mtime)) = line.rsplit_once(' ') else {
            continue;
        };
        if path_str.is_empty() || mtime.is_empty() {
            continue;
        }

        let path = PathBuf::from(path_str);
        let watched = ends_with_any(&path, spec.ext_suffixes())
            || ends_with_any(&path, spec.file_suffixes());
        if watched && !spec.is_excluded(&path) {
            observations.push((path, mtime.to_string()));
        }
    }

    observations
}

/// The `-mmin` window, in minutes: `ceil((interval_ms + 1000) / 1000)`
/// seconds, formatted with two decimals so sub-minute windows survive.
fn window_minutes(interval_ms: u64) -> String {
    let seconds = (interval_ms + 1000).div_ceil(1000);
    format!("{:.2}", seconds as f64 / 60.0)
}
