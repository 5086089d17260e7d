// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// This is a direct mapping of the expected config shape:
///
/// ```toml
/// [watch]
/// dir = ["app", "config"]
/// file = [".env"]
/// ext = [".rs", ".toml"]
/// exclude = ["**/target/**"]
/// scan_interval_ms = 2000
/// mode = "hash"
///
/// [reload]
/// cmd = "touch .restart"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// What to watch, from `[watch]`.
    #[serde(default)]
    pub watch: WatchSection,

    /// How to react, from `[reload]`.
    #[serde(default)]
    pub reload: ReloadSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Directories to scan recursively, relative to the project root.
    #[serde(default)]
    pub dir: Vec<String>,

    /// Filename suffixes watched at the project root itself (non-recursive),
    /// e.g. `".env"`.
    #[serde(default)]
    pub file: Vec<String>,

    /// Extension suffixes a file must end with to be watched, e.g. `".rs"`.
    #[serde(default)]
    pub ext: Vec<String>,

    /// Glob patterns (relative to the project root) that are never watched.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Milliseconds between scans. Unset, zero or negative values resolve to
    /// the 2000ms default before the loop starts.
    #[serde(default)]
    pub scan_interval_ms: Option<i64>,

    /// `"hash"` or `"mtime"`.
    ///
    /// - `"hash"` (default): fingerprint every watched file by content digest
    ///   each tick. Accurate, linear in total watched bytes.
    /// - `"mtime"`: ask the system `find` utility for recently modified files
    ///   and use the formatted modification time as the fingerprint. Cheap,
    ///   but deletions are never detected in this mode.
    #[serde(default = "default_mode")]
    pub mode: String,
}

fn default_mode() -> String {
    "hash".to_string()
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            dir: Vec::new(),
            file: Vec::new(),
            ext: Vec::new(),
            exclude: Vec::new(),
            scan_interval_ms: None,
            mode: default_mode(),
        }
    }
}

/// `[reload]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ReloadSection {
    /// Shell command to run whenever changed paths arrive.
    ///
    /// If `None`, changes are only logged; the consumer of the change channel
    /// is expected to live elsewhere.
    #[serde(default)]
    pub cmd: Option<String>,
}
