//! Change watcher that keeps a `PathCache` fresh.
//!
//! Filesystem events under the cache root are debounced and reported to
//! a `SaveHook` (the path cache itself, or a whole `Project`), the same
//! entry point an editor save hook uses.

use crate::cache::PathCache;
use crate::error::{ResfinderError, Result};
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

pub const DEBOUNCE_INTERVAL: Duration = Duration::from_millis(500);

struct FsWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::UnboundedReceiver<notify::Result<Event>>,
}

impl FsWatcher {
    fn new(root: &Path) -> notify::Result<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        Ok(Self {
            _watcher: watcher,
            rx,
        })
    }

    async fn next_event_async(&mut self) -> Option<Event> {
        loop {
            match self.rx.recv().await? {
                Ok(event) => return Some(event),
                Err(e) => tracing::warn!("Watch error: {}", e),
            }
        }
    }
}

/// Whether a changed path lies somewhere below a `sentinel` folder
/// (or is such a folder).
pub fn is_relevant_path(path: &Path, sentinel: &str) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Normal(s) if s.to_str() == Some(sentinel)))
}

/// Relevant paths from a batch of events, deduplicated and sorted.
pub fn collect_paths<F>(events: &[Event], is_relevant: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let paths: BTreeSet<PathBuf> = events
        .iter()
        .flat_map(|e| e.paths.iter())
        .filter(|p| is_relevant(p.as_path()))
        .cloned()
        .collect();
    paths.into_iter().collect()
}

/// What a save notification changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Cached resource paths dropped
    pub dropped: usize,
    /// Whether script lookups were rebuilt
    pub scripts_reloaded: bool,
}

impl SaveOutcome {
    /// True when earlier classification results may no longer hold.
    pub fn is_stale(&self) -> bool {
        self.dropped > 0 || self.scripts_reloaded
    }
}

/// Receiver of saved/changed file notifications.
pub trait SaveHook: Send + Sync {
    /// Folder to watch recursively
    fn watch_root(&self) -> &Path;

    /// Whether a changed path is worth reporting
    fn is_relevant(&self, path: &Path) -> bool;

    fn on_files_saved(&self, paths: &[PathBuf]) -> SaveOutcome;
}

impl SaveHook for PathCache {
    fn watch_root(&self) -> &Path {
        self.root()
    }

    fn is_relevant(&self, path: &Path) -> bool {
        is_relevant_path(path, self.sentinel())
    }

    fn on_files_saved(&self, paths: &[PathBuf]) -> SaveOutcome {
        SaveOutcome {
            dropped: self.invalidate(paths),
            scripts_reloaded: false,
        }
    }
}

/// Watches the hook's root and reports relevant changes to it.
///
/// `on_change` is called after each debounced batch with the outcome and
/// the changed paths. Must be called from within a tokio runtime; the task
/// ends when `cancel_token` is cancelled.
pub fn spawn_watcher<H, F>(
    hook: Arc<H>,
    cancel_token: CancellationToken,
    mut on_change: F,
) -> Result<JoinHandle<()>>
where
    H: SaveHook + ?Sized + 'static,
    F: FnMut(SaveOutcome, &[PathBuf]) + Send + 'static,
{
    let root = hook.watch_root().to_path_buf();
    let mut watcher = FsWatcher::new(&root).map_err(|e| ResfinderError::Internal(e.to_string()))?;

    let handle = tokio::spawn(async move {
        tracing::info!("Started watching {}", root.display());
        let mut pending_events: Vec<Event> = Vec::new();

        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    break;
                }
                event = watcher.next_event_async() => {
                    match event {
                        Some(e) => pending_events.push(e),
                        None => break,
                    }
                }
                _ = tokio::time::sleep(DEBOUNCE_INTERVAL), if !pending_events.is_empty() => {
                    let paths = collect_paths(&pending_events, |p| hook.is_relevant(p));
                    pending_events.clear();

                    if !paths.is_empty() {
                        let outcome = hook.on_files_saved(&paths);
                        tracing::info!(
                            "Detected changes in {} paths, dropped {} cached resource paths",
                            paths.len(),
                            outcome.dropped
                        );
                        on_change(outcome, &paths);
                    }
                }
            }
        }
        tracing::info!("File watcher task ended for {}", root.display());
    });

    Ok(handle)
}
