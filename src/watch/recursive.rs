// src/watch/recursive.rs

//! A recursive directory watch built from non-recursive registrations.
//!
//! The watcher registers every visible directory under a root with the
//! notification source. Its dispatch loop then:
//! - forwards created and modified files onto the `files` channel,
//! - registers newly created directories (and anything already inside them)
//!   and announces each on the `folders` channel.
//!
//! The loop is the only writer of the set of watched directories and the only producer on
//! both channels. Both channels are bounded: a consumer that stops draining
//! them stalls the loop, including the registration of new directories.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{Result, WatchdogError};
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::event::{ChangeEvent, Interest};
use crate::watch::source::{NotificationSource, NotifySource, SourceStreams};
use crate::watch::subfolders::{is_hidden, subfolders};

/// Capacity of the `files` channel.
pub const FILES_CAPACITY: usize = 10;

/// Event classes every watched directory is registered for.
pub const FOLDER_INTEREST: Interest = Interest::CREATE.union(Interest::MODIFY);

/// Directories currently registered with the notification source.
///
/// Membership only grows.
#[derive(Debug, Default)]
pub(crate) struct WatchSet {
    folders: BTreeMap<PathBuf, Interest>,
}

impl WatchSet {
    pub fn contains(&self, path: &Path) -> bool {
        self.folders.contains_key(path)
    }

    pub fn insert(&mut self, path: PathBuf, interest: Interest) {
        self.folders.insert(path, interest);
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }
}

/// Watches a directory tree, following new subdirectories as they appear.
pub struct RecursiveWatcher {
    root: PathBuf,
    /// Present until `run` moves it into the dispatch task.
    dispatcher: Option<Dispatcher>,
    files: mpsc::Receiver<PathBuf>,
    folders: mpsc::Receiver<PathBuf>,
    stop: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Dispatcher>>,
}

impl std::fmt::Debug for RecursiveWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecursiveWatcher")
            .field("root", &self.root)
            .field("running", &self.is_running())
            .finish_non_exhaustive()
    }
}

impl RecursiveWatcher {
    /// Watch `root` on the real filesystem through the platform's `notify`
    /// backend.
    ///
    /// A relative `root` is made absolute first, since `notify` reports
    /// absolute paths and `folders` should use the same form.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = absolute_root(root.into())?;
        let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
        let folders = enumerate(fs.as_ref(), &root)?;
        let (source, streams) = NotifySource::new()?;
        Self::assemble(root, folders, fs, Box::new(source), streams)
    }

    /// Like [`RecursiveWatcher::new`], with the filesystem and notification
    /// source supplied by the caller.
    pub fn with_parts(
        root: impl Into<PathBuf>,
        fs: Arc<dyn FileSystem>,
        source: Box<dyn NotificationSource>,
        streams: SourceStreams,
    ) -> Result<Self> {
        let root = root.into();
        let folders = enumerate(fs.as_ref(), &root)?;
        Self::assemble(root, folders, fs, source, streams)
    }

    fn assemble(
        root: PathBuf,
        folders: Vec<PathBuf>,
        fs: Arc<dyn FileSystem>,
        source: Box<dyn NotificationSource>,
        streams: SourceStreams,
    ) -> Result<Self> {
        let (files_tx, files_rx) = mpsc::channel(FILES_CAPACITY);
        // Sized so that announcing the initial folders never blocks.
        let (folders_tx, folders_rx) = mpsc::channel(folders.len());

        let mut dispatcher = Dispatcher {
            fs,
            source,
            streams,
            watch_set: WatchSet::default(),
            files_tx,
            folders_tx,
        };

        let mut first_error = None;
        for folder in folders {
            if let Err(err) = dispatcher.register(&folder) {
                warn!(path = ?folder, error = %err, "failed to watch folder");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
            if dispatcher.folders_tx.try_send(folder).is_err() {
                debug!("folders channel unexpectedly full during setup");
            }
        }

        // Partial coverage is tolerated, no coverage at all is not.
        if dispatcher.watch_set.is_empty() {
            if let Some(err) = first_error {
                return Err(err);
            }
        }

        info!(
            root = %root.display(),
            folders = dispatcher.watch_set.len(),
            "recursive watcher ready"
        );

        Ok(Self {
            root,
            dispatcher: Some(dispatcher),
            files: files_rx,
            folders: folders_rx,
            stop: None,
            task: None,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn is_running(&self) -> bool {
        self.task.is_some()
    }

    /// Paths of created or modified files.
    pub fn files(&mut self) -> &mut mpsc::Receiver<PathBuf> {
        &mut self.files
    }

    /// Paths of directories the watcher attempted to register, starting with
    /// the initial tree.
    pub fn folders(&mut self) -> &mut mpsc::Receiver<PathBuf> {
        &mut self.folders
    }

    /// Start the dispatch loop in the background.
    ///
    /// Must be called from within a Tokio runtime. The loop runs until the
    /// watcher is dropped, [`shutdown`](Self::shutdown) is called, or the
    /// notification source goes away.
    pub fn run(&mut self) {
        let Some(dispatcher) = self.dispatcher.take() else {
            warn!(root = %self.root.display(), "recursive watcher already running");
            return;
        };
        let (stop_tx, stop_rx) = oneshot::channel();
        self.stop = Some(stop_tx);
        self.task = Some(tokio::spawn(dispatcher.run(stop_rx)));
    }

    /// Stop the dispatch loop (if running) and release every registration.
    pub async fn shutdown(mut self) -> Result<()> {
        let dispatcher = match self.task.take() {
            Some(task) => {
                if let Some(stop) = self.stop.take() {
                    let _ = stop.send(());
                }
                match task.await {
                    Ok(dispatcher) => Some(dispatcher),
                    Err(err) => {
                        warn!(error = %err, "recursive watcher task did not finish cleanly");
                        None
                    }
                }
            }
            None => self.dispatcher.take(),
        };

        if let Some(mut dispatcher) = dispatcher {
            dispatcher.source.close()?;
        }
        Ok(())
    }
}

fn absolute_root(root: PathBuf) -> Result<PathBuf> {
    std::path::absolute(&root).map_err(|source| WatchdogError::Traversal { path: root, source })
}

/// Enumerate the initial tree; nothing to watch is an error.
fn enumerate(fs: &dyn FileSystem, root: &Path) -> Result<Vec<PathBuf>> {
    let folders = subfolders(fs, root)?;
    if folders.is_empty() {
        return Err(WatchdogError::NoFolders(root.to_path_buf()));
    }
    Ok(folders)
}

/// State owned by the dispatch loop.
struct Dispatcher {
    fs: Arc<dyn FileSystem>,
    source: Box<dyn NotificationSource>,
    streams: SourceStreams,
    watch_set: WatchSet,
    files_tx: mpsc::Sender<PathBuf>,
    folders_tx: mpsc::Sender<PathBuf>,
}

impl Dispatcher {
    async fn run(mut self, mut stop: oneshot::Receiver<()>) -> Self {
        debug!("recursive watcher loop started");

        loop {
            tokio::select! {
                // Fires on an explicit stop and when the watcher is dropped.
                _ = &mut stop => {
                    debug!("recursive watcher stop requested");
                    break;
                }
                event = self.streams.events.recv() => match event {
                    Some(event) => self.dispatch(event).await,
                    None => {
                        debug!("notification event stream closed");
                        break;
                    }
                },
                Some(err) = self.streams.errors.recv() => {
                    warn!(error = %err, "notification source error");
                }
            }
        }

        debug!("recursive watcher loop finished");
        self
    }

    async fn dispatch(&mut self, event: ChangeEvent) {
        debug!(?event, "received change event");

        if event.is_create() {
            match self.fs.stat(&event.path) {
                // Gone again, or never readable; nothing to report.
                Err(err) => {
                    debug!(path = ?event.path, error = %err, "ignoring unreadable created path");
                }
                Ok(kind) if kind.is_dir() => self.add_tree(&event.path).await,
                Ok(_) => self.publish_file(event.path.clone()).await,
            }
        }

        if event.is_modify() {
            self.publish_file(event.path).await;
        }
    }

    /// Register a freshly created directory together with any visible
    /// directories already inside it.
    ///
    /// `path` itself was found to be a directory by `stat`, so it is added
    /// even when it is a symlink to one. Its children are walked without
    /// following symlinks. Hidden directories are skipped entirely.
    async fn add_tree(&mut self, path: &Path) {
        if is_hidden(path) {
            debug!(?path, "ignoring hidden directory");
            return;
        }
        self.add_folder(path.to_path_buf()).await;

        let children = match self.fs.read_dir(path) {
            Ok(children) => children,
            Err(err) => {
                debug!(?path, error = %err, "could not scan new directory");
                return;
            }
        };
        for child in children {
            match subfolders(self.fs.as_ref(), &child) {
                Ok(folders) => {
                    for folder in folders {
                        self.add_folder(folder).await;
                    }
                }
                Err(err) => debug!(path = ?child, error = %err, "could not scan new directory"),
            }
        }
    }

    /// Register `path` and announce it, even if registration failed.
    async fn add_folder(&mut self, path: PathBuf) {
        if self.watch_set.contains(&path) {
            debug!(?path, "folder already watched");
        } else if let Err(err) = self.register(&path) {
            warn!(?path, error = %err, "failed to watch folder");
        }

        if self.folders_tx.send(path).await.is_err() {
            debug!("folders receiver dropped");
        }
    }

    fn register(&mut self, path: &Path) -> Result<()> {
        self.source.watch(path, FOLDER_INTEREST)?;
        self.watch_set.insert(path.to_path_buf(), FOLDER_INTEREST);
        debug!(?path, "watching folder");
        Ok(())
    }

    async fn publish_file(&mut self, path: PathBuf) {
        if self.files_tx.send(path).await.is_err() {
            debug!("files receiver dropped");
        }
    }
}
