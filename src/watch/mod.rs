// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Enumerating the currently watched file set (`enumerate`).
//! - Fingerprinting it, by content digest or modification time
//!   (`fingerprint`).
//! - Diffing successive snapshots into added/removed/changed paths (`diff`).
//! - Driving the whole cycle on a fixed interval (`scanner`).
//!
//! It does **not** know what a reload is; it only pushes changed paths into
//! a channel for someone else to act on.

pub mod diff;
pub mod enumerate;
pub mod fingerprint;
pub mod scanner;
pub mod spec;

pub use diff::{diff, ChangeSet};
pub use enumerate::enumerate;
pub use fingerprint::{hash_file, merge_observations, parse_find_output, Fingerprinter, Snapshot};
pub use scanner::{spawn_scanner, Scanner, ScannerHandle};
pub use spec::{FingerprintMode, WatchSpec, DEFAULT_SCAN_INTERVAL_MS};
