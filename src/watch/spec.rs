// src/watch/spec.rs

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::config::model::ConfigFile;

/// Scan interval applied when the config omits one or sets it to a
/// non-positive value.
pub const DEFAULT_SCAN_INTERVAL_MS: u64 = 2000;

/// How files are fingerprinted between scans.
///
/// - `ContentHash`: read every watched file and digest its bytes. A file only
///   counts as changed when its content actually differs, so touch-without-edit
///   and save-then-revert are both ignored.
/// - `Timestamp`: ask the system `find` utility for files modified within the
///   last scan window and use the formatted mtime as the fingerprint. One
///   external call per tick instead of reading every watched byte, but
///   deletions are invisible in this mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FingerprintMode {
    ContentHash,
    Timestamp,
}

impl Default for FingerprintMode {
    fn default() -> Self {
        FingerprintMode::ContentHash
    }
}

impl FromStr for FingerprintMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hash" => Ok(FingerprintMode::ContentHash),
            "mtime" => Ok(FingerprintMode::Timestamp),
            other => Err(format!(
                "invalid fingerprint mode: {other} (expected \"hash\" or \"mtime\")"
            )),
        }
    }
}

/// Immutable description of what to watch, built once from the config.
///
/// Directory and file entries stay relative here; they are resolved against
/// `root` at scan time. The exclude globs are compiled up front and matched
/// against root-relative paths with forward slashes.
#[derive(Debug, Clone)]
pub struct WatchSpec {
    root: PathBuf,
    dirs: Vec<String>,
    files: Vec<String>,
    exts: Vec<String>,
    exclude: GlobSet,
    scan_interval_ms: u64,
    mode: FingerprintMode,
}

impl WatchSpec {
    /// Build a `WatchSpec` from a validated config and a project root.
    ///
    /// The root is canonicalized best-effort so that emitted paths are
    /// absolute. The scan interval default is applied here: anything unset,
    /// zero or negative resolves to [`DEFAULT_SCAN_INTERVAL_MS`].
    pub fn from_config(cfg: &ConfigFile, root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        let root = root.canonicalize().unwrap_or_else(|_| root.clone());

        let mode = FingerprintMode::from_str(&cfg.watch.mode)
            .map_err(|e| anyhow::anyhow!(e))
            .context("invalid [watch].mode")?;

        let scan_interval_ms = match cfg.watch.scan_interval_ms {
            Some(ms) if ms > 0 => ms as u64,
            _ => DEFAULT_SCAN_INTERVAL_MS,
        };

        Ok(Self {
            root,
            dirs: cfg.watch.dir.clone(),
            files: cfg.watch.file.clone(),
            exts: cfg.watch.ext.clone(),
            exclude: build_globset(&cfg.watch.exclude)?,
            scan_interval_ms,
            mode,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Watched directories resolved against the project root.
    pub fn dir_roots(&self) -> Vec<PathBuf> {
        self.dirs.iter().map(|d| self.root.join(d)).collect()
    }

    /// Root-level filename suffixes (e.g. `".env"`).
    pub fn file_suffixes(&self) -> &[String] {
        &self.files
    }

    /// Extension suffixes a directory file must end with to be watched.
    pub fn ext_suffixes(&self) -> &[String] {
        &self.exts
    }

    pub fn scan_interval_ms(&self) -> u64 {
        self.scan_interval_ms
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn mode(&self) -> FingerprintMode {
        self.mode
    }

    /// Whether a path is excluded by the configured glob patterns.
    ///
    /// Matching happens on the path relative to the project root, with
    /// forward slashes; paths outside the root are never excluded.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.exclude.is_empty() {
            return false;
        }
        match relative_str(&self.root, path) {
            Some(rel) => self.exclude.is_match(rel),
            None => false,
        }
    }
}

/// Convert a path into a string relative to `root`, with forward slashes.
///
/// Returns `None` if the path is not under `root` and cannot be relativized.
pub(crate) fn relative_str(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let s = rel.to_string_lossy().replace('\\', "/");
    Some(s)
}

/// Build a GlobSet from simple string patterns.
fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat)
            .with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
