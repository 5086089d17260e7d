// src/config/validate.rs

use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use globset::Glob;

use crate::config::model::ConfigFile;
use crate::watch::FingerprintMode;

/// Run basic semantic validation against a loaded configuration.
///
/// This checks:
/// - at least one watched directory or root-level file suffix
/// - `mode` is valid ("hash" or "mtime")
/// - extension suffixes are non-empty strings
/// - exclude patterns compile as globs
///
/// It does **not**:
/// - verify that watched directories exist (they may appear later; missing
///   ones are simply skipped during scanning)
/// - validate the `[reload].cmd` string (it is handed to the shell as-is)
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    ensure_has_watch_targets(cfg)?;
    validate_mode(cfg)?;
    validate_suffixes(cfg)?;
    validate_exclude_globs(cfg)?;
    Ok(())
}

fn ensure_has_watch_targets(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.dir.is_empty() && cfg.watch.file.is_empty() {
        return Err(anyhow!(
            "config must name at least one [watch].dir or [watch].file entry"
        ));
    }
    Ok(())
}

fn validate_mode(cfg: &ConfigFile) -> Result<()> {
    FingerprintMode::from_str(&cfg.watch.mode)
        .map_err(|e| anyhow!(e))
        .context("invalid [watch].mode")?;
    Ok(())
}

fn validate_suffixes(cfg: &ConfigFile) -> Result<()> {
    for ext in cfg.watch.ext.iter() {
        if ext.is_empty() {
            return Err(anyhow!(
                "[watch].ext entries must be non-empty suffixes (e.g. \".rs\")"
            ));
        }
    }
    for file in cfg.watch.file.iter() {
        if file.is_empty() {
            return Err(anyhow!(
                "[watch].file entries must be non-empty filename suffixes"
            ));
        }
    }
    Ok(())
}

fn validate_exclude_globs(cfg: &ConfigFile) -> Result<()> {
    for pat in cfg.watch.exclude.iter() {
        Glob::new(pat)
            .with_context(|| format!("invalid [watch].exclude glob pattern: {pat}"))?;
    }
    Ok(())
}
