// src/watch/source.rs

//! The low-level notification source: per-directory registrations in, a flat
//! stream of change events (and a separate stream of delivery errors) out.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::debug;

use crate::errors::Result;
use crate::watch::event::{change_events, ChangeEvent, Interest};

/// Receiving side of a notification source.
#[derive(Debug)]
pub struct SourceStreams {
    pub events: mpsc::UnboundedReceiver<ChangeEvent>,
    pub errors: mpsc::UnboundedReceiver<notify::Error>,
}

impl SourceStreams {
    /// Create a connected sink/streams pair.
    pub fn channel() -> (SourceSink, SourceStreams) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (error_tx, error_rx) = mpsc::unbounded_channel();
        (
            SourceSink {
                events: event_tx,
                errors: error_tx,
            },
            SourceStreams {
                events: event_rx,
                errors: error_rx,
            },
        )
    }
}

/// Sending side of a notification source.
#[derive(Debug, Clone)]
pub struct SourceSink {
    events: mpsc::UnboundedSender<ChangeEvent>,
    errors: mpsc::UnboundedSender<notify::Error>,
}

impl SourceSink {
    /// Returns false once the receiving side is gone.
    pub fn send_event(&self, event: ChangeEvent) -> bool {
        self.events.send(event).is_ok()
    }

    pub fn send_error(&self, error: notify::Error) -> bool {
        self.errors.send(error).is_ok()
    }
}

/// Something that can be asked to watch individual directories.
///
/// Events for registered directories arrive on the [`SourceStreams`] handed
/// out when the source was created.
pub trait NotificationSource: Send {
    /// Register `path` (non-recursively) for the given event classes.
    /// Registering an already watched path replaces its interest mask.
    fn watch(&mut self, path: &Path, interest: Interest) -> Result<()>;

    /// Release every registration. Further `watch` calls fail.
    fn close(&mut self) -> Result<()>;
}

type Registrations = Arc<Mutex<HashMap<PathBuf, Interest>>>;

/// [`NotificationSource`] backed by the platform's `notify` watcher.
///
/// `notify` has no per-watch interest masks, so the event callback drops
/// events whose kind the owning registration did not ask for.
pub struct NotifySource {
    inner: Option<RecommendedWatcher>,
    registrations: Registrations,
}

impl std::fmt::Debug for NotifySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotifySource")
            .field("closed", &self.inner.is_none())
            .finish_non_exhaustive()
    }
}

impl NotifySource {
    pub fn new() -> Result<(Self, SourceStreams)> {
        let (sink, streams) = SourceStreams::channel();
        let registrations: Registrations = Arc::new(Mutex::new(HashMap::new()));

        // Closure called synchronously by notify whenever an event arrives.
        let filter = Arc::clone(&registrations);
        let watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    for change in change_events(event) {
                        if wants(&lock(&filter), &change) && !sink.send_event(change) {
                            return;
                        }
                    }
                }
                Err(err) => {
                    sink.send_error(err);
                }
            },
            Config::default(),
        )?;

        Ok((
            Self {
                inner: Some(watcher),
                registrations,
            },
            streams,
        ))
    }
}

impl NotificationSource for NotifySource {
    fn watch(&mut self, path: &Path, interest: Interest) -> Result<()> {
        let watcher = self
            .inner
            .as_mut()
            .ok_or_else(|| notify::Error::generic("notification source is closed"))?;
        watcher.watch(path, RecursiveMode::NonRecursive)?;
        lock(&self.registrations).insert(path.to_path_buf(), interest);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let Some(mut watcher) = self.inner.take() else {
            return Ok(());
        };
        let paths: Vec<PathBuf> = lock(&self.registrations).drain().map(|(p, _)| p).collect();
        for path in paths {
            if let Err(err) = watcher.unwatch(&path) {
                // The directory may already be gone; the kernel dropped the
                // watch with it.
                debug!(?path, error = %err, "unwatch failed during close");
            }
        }
        Ok(())
    }
}

fn lock(registrations: &Registrations) -> MutexGuard<'_, HashMap<PathBuf, Interest>> {
    registrations
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// An event is wanted if the directory it happened in (or the registered
/// directory itself) asked for its kind.
fn wants(registrations: &HashMap<PathBuf, Interest>, change: &ChangeEvent) -> bool {
    let interest = change
        .path
        .parent()
        .and_then(|parent| registrations.get(parent))
        .or_else(|| registrations.get(&change.path));

    match interest {
        Some(mask) => mask.contains(change.kind.into()),
        None => true,
    }
}
