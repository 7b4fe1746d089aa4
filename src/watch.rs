use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossbeam_channel::Receiver;
use log::{debug, error, info};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_full::{DebounceEventResult, Debouncer, RecommendedCache, new_debouncer};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Error running watch command: {0}")]
    Watch(#[from] notify::Error),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Whether any of `paths` refers to the manifest file
fn touches_manifest(paths: &[PathBuf], manifest: &Path) -> bool {
    paths
        .iter()
        .any(|path| path.file_name().is_some() && path.file_name() == manifest.file_name())
}

type WatchHandle = (
    Receiver<()>,
    Debouncer<RecommendedWatcher, RecommendedCache>,
);

/// Watch a manifest for changes, returning a receiver that fires once per debounced
/// batch of changes and the debouncer (must be kept alive).
///
/// The parent directory is watched rather than the file itself, so editors that
/// replace the file on save keep triggering updates.
///
/// # Errors
///
/// Returns `WatchError::Io` if the manifest path cannot be resolved,
/// or `WatchError::Watch` if the file watcher fails to start.
pub fn watch_manifest(manifest: &Path) -> Result<WatchHandle, WatchError> {
    let manifest = manifest.canonicalize()?;
    let dir = manifest
        .parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| io::Error::other("manifest has no parent directory"))?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let target = manifest.clone();
    let mut debouncer = new_debouncer(
        Duration::from_millis(300),
        None,
        move |res: DebounceEventResult| match res {
            Ok(events) => {
                let changed = events
                    .iter()
                    .filter(|event| {
                        event.event.kind.is_create()
                            || event.event.kind.is_modify()
                            || event.event.kind.is_remove()
                    })
                    .any(|event| touches_manifest(&event.paths, &target));
                if changed {
                    debug!("Manifest changed: {}", target.display());
                    if let Err(e) = tx.send(()) {
                        error!("Failed to send watch event: {e}");
                    }
                }
            }
            Err(e) => error!("Watch error: {e:?}"),
        },
    )?;

    info!("Watching {}", manifest.display());
    debouncer.watch(&dir, RecursiveMode::NonRecursive)?;
    Ok((rx, debouncer))
}
