// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;
pub mod reload;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::watch::{spawn_scanner, Fingerprinter, Snapshot, WatchSpec};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - the scan loop (polling change detection)
/// - the reload consumer
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    let root = config_root_dir(&config_path);
    let spec = WatchSpec::from_config(&cfg, root)?;

    if args.once {
        print_watched_set(&spec);
        return Ok(());
    }

    let (changes_tx, changes_rx) = mpsc::unbounded_channel::<PathBuf>();

    let reloader = reload::spawn_reloader(cfg.reload.cmd.clone(), changes_rx);
    let scanner = spawn_scanner(spec, changes_tx);

    tokio::signal::ctrl_c().await?;
    info!("shutting down");

    // Stopping the scanner drops the change sender; the reload loop then
    // drains whatever is left and exits on channel close.
    scanner.shutdown().await;
    let _ = reloader.await;

    Ok(())
}

/// Figure out a sensible project root for watching.
/// Currently: directory containing the config file, or `.`.
fn config_root_dir(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `--once` output: one scan, every watched file with its fingerprint.
fn print_watched_set(spec: &WatchSpec) {
    let fingerprinter = Fingerprinter::for_mode(spec.mode());
    let snapshot = fingerprinter.snapshot(spec, &Snapshot::new());

    println!("scanwatch: {} watched file(s)", snapshot.len());
    for (path, fingerprint) in snapshot.iter() {
        println!("  {}  {}", fingerprint, path.display());
    }
}

/// Simple dry-run output: print the effective watch settings.
fn print_dry_run(cfg: &ConfigFile) {
    println!("scanwatch dry-run");
    println!("  watch.dir = {:?}", cfg.watch.dir);
    println!("  watch.file = {:?}", cfg.watch.file);
    println!("  watch.ext = {:?}", cfg.watch.ext);
    if !cfg.watch.exclude.is_empty() {
        println!("  watch.exclude = {:?}", cfg.watch.exclude);
    }
    println!(
        "  watch.scan_interval_ms = {}",
        cfg.watch
            .scan_interval_ms
            .filter(|ms| *ms > 0)
            .unwrap_or(watch::DEFAULT_SCAN_INTERVAL_MS as i64)
    );
    println!("  watch.mode = {}", cfg.watch.mode);
    match cfg.reload.cmd {
        Some(ref cmd) => println!("  reload.cmd = {cmd}"),
        None => println!("  reload.cmd = (none, log only)"),
    }
}
