// src/reload.rs

//! Reload side of the change channel.
//!
//! The scanner pushes changed paths into an unbounded channel; this module
//! owns the consuming end. When a `[reload].cmd` is configured it is run via
//! the platform shell once per batch of changes; otherwise changes are only
//! logged. Reload failures are logged and never take the watcher down.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Spawn the background reload loop.
///
/// Consumes changed paths until the channel closes. Paths that are already
/// queued when one arrives are drained into the same batch, so a tick that
/// changed ten files triggers one reload, not ten.
pub fn spawn_reloader(
    cmd: Option<String>,
    mut changes_rx: mpsc::UnboundedReceiver<PathBuf>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("reload loop started");

        while let Some(path) = changes_rx.recv().await {
            let mut batch = vec![path];
            while let Ok(more) = changes_rx.try_recv() {
                batch.push(more);
            }

            for path in batch.iter() {
                info!(path = %path.display(), "change detected");
            }

            if let Some(ref cmd) = cmd {
                if let Err(err) = run_reload(cmd).await {
                    error!(error = %err, "reload command failed");
                }
            }
        }

        debug!("reload loop finished (channel closed)");
    })
}

/// Run the configured reload command through the platform shell and wait for
/// it to exit.
async fn run_reload(cmd: &str) -> Result<()> {
    info!(cmd = %cmd, "running reload command");

    // Build a shell command appropriate for the platform.
    let mut command = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(cmd);
        c
    };

    let status = command
        .kill_on_drop(true)
        .status()
        .await
        .with_context(|| format!("spawning reload command '{cmd}'"))?;

    let code = status.code().unwrap_or(-1);
    if status.success() {
        info!(exit_code = code, "reload command exited");
    } else {
        warn!(exit_code = code, "reload command exited with failure");
    }

    Ok(())
}
