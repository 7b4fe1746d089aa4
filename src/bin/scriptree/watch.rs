use std::path::Path;

use clap::Args;
use log::{error, info};

#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Redraw the tree whenever package.json changes
    #[arg(short, long)]
    watch: bool,
}

impl WatchArgs {
    pub fn enabled(&self) -> bool {
        self.watch
    }
}

/// Call `redraw` after every change to the manifest, until the watcher stops.
///
/// Errors from `redraw` are logged and watching continues.
///
/// # Errors
///
/// Returns an error if the file watcher cannot be started.
pub fn run<F>(manifest: &Path, clear: bool, mut redraw: F) -> Result<(), Box<dyn std::error::Error>>
where
    F: FnMut() -> Result<(), Box<dyn std::error::Error>>,
{
    let (changes, _debouncer) = scriptree::watch::watch_manifest(manifest)?;
    info!("Waiting for changes to {}", manifest.display());

    while changes.recv().is_ok() {
        if clear {
            print!("\x1b[2J\x1b[H");
        }
        if let Err(e) = redraw() {
            error!("Failed to refresh tree: {e}");
        }
    }
    Ok(())
}
