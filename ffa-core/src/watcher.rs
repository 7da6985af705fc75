//! Watches the data directories and feeds modified files to the router.
//!
//! One subscription per directory, non-recursive. Events are handled one at a
//! time in delivery order on a single tokio task; the loop ends when the
//! notification channel closes or the cancellation token fires.

use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::router::ChangeRouter;

/// Default extension of data files.
pub const DEFAULT_EXTENSION: &str = "csv";

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Failed to create file watcher: {0}")]
    Backend(#[source] notify::Error),

    #[error("Failed to watch directory '{}': {source}", path.display())]
    Subscribe {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    #[error("Watcher task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Lifecycle of the watcher loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatcherState {
    Idle,
    Watching,
    Dispatching,
    Stopped,
}

/// Subscribes to a set of directories and routes modified data files.
pub struct DirectoryWatcher {
    dirs: Vec<PathBuf>,
    extension: String,
    router: Arc<ChangeRouter>,
}

impl DirectoryWatcher {
    pub fn new(dirs: Vec<PathBuf>, extension: &str, router: Arc<ChangeRouter>) -> Self {
        Self {
            dirs,
            extension: extension.trim_start_matches('.').to_string(),
            router,
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Subscribes to every directory and starts the event loop on a tokio task.
    ///
    /// Fails if any directory cannot be watched (for example, it does not exist).
    pub fn spawn(self, cancel: CancellationToken) -> Result<WatchHandle, WatchError> {
        let (events_tx, events_rx) = mpsc::unbounded_channel::<notify::Result<Event>>();
        let (state_tx, state_rx) = watch::channel(WatcherState::Idle);

        let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
            if events_tx.send(result).is_err() {
                debug!("File event dropped, watcher loop has stopped");
            }
        })
        .map_err(WatchError::Backend)?;

        for dir in &self.dirs {
            watcher
                .watch(dir, RecursiveMode::NonRecursive)
                .map_err(|source| WatchError::Subscribe {
                    path: dir.clone(),
                    source,
                })?;
            info!(dir = %dir.display(), "Watching directory");
        }

        let task = tokio::spawn(run_loop(
            events_rx,
            self.router,
            self.extension,
            cancel.clone(),
            state_tx,
        ));

        Ok(WatchHandle {
            watcher,
            task,
            cancel,
            state: state_rx,
        })
    }
}

/// Running watcher. Dropping it ends the subscription, which stops the loop.
pub struct WatchHandle {
    watcher: RecommendedWatcher,
    task: JoinHandle<()>,
    cancel: CancellationToken,
    state: watch::Receiver<WatcherState>,
}

impl WatchHandle {
    pub fn state(&self) -> WatcherState {
        *self.state.borrow()
    }

    pub fn subscribe_state(&self) -> watch::Receiver<WatcherState> {
        self.state.clone()
    }

    /// Asks the loop to stop after the event it is currently handling.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Ends the subscription and waits for the loop to finish.
    pub async fn join(self) -> Result<(), WatchError> {
        let WatchHandle { watcher, task, .. } = self;
        drop(watcher);
        task.await?;
        Ok(())
    }
}

/// Only in-place content writes count; creation, removal, renames and
/// metadata changes are ignored.
pub fn is_content_modification(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Modify(ModifyKind::Data(_)) | EventKind::Modify(ModifyKind::Any)
    )
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(extension)
}

async fn run_loop(
    mut events: mpsc::UnboundedReceiver<notify::Result<Event>>,
    router: Arc<ChangeRouter>,
    extension: String,
    cancel: CancellationToken,
    state: watch::Sender<WatcherState>,
) {
    state.send_replace(WatcherState::Watching);

    loop {
        let message = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("Watcher cancelled");
                break;
            }
            message = events.recv() => message,
        };

        match message {
            None => {
                debug!("File event channel closed");
                break;
            }
            Some(Err(e)) => warn!("File watcher error: {}", e),
            Some(Ok(event)) => {
                if !is_content_modification(&event.kind) {
                    debug!(kind = ?event.kind, paths = ?event.paths, "Skipping file event");
                    continue;
                }

                for path in event.paths.iter().filter(|p| has_extension(p, &extension)) {
                    info!(path = %path.display(), "Modified file");
                    state.send_replace(WatcherState::Dispatching);
                    router.handle_change(path);
                    state.send_replace(WatcherState::Watching);
                }
            }
        }
    }

    state.send_replace(WatcherState::Stopped);
    info!("File watcher stopped");
}
