use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use watchdog::errors::Result;
use watchdog::watch::{
    ChangeEvent, ChangeKind, Interest, NotificationSource, SourceSink, SourceStreams,
};

#[derive(Debug, Default)]
struct FakeState {
    registrations: Vec<(PathBuf, Interest)>,
    refused: HashSet<PathBuf>,
    closed: bool,
}

/// A notification source driven by hand from a test.
///
/// Registrations are recorded rather than acted on; events only appear when
/// the test pushes them through the [`FakeSourceHandle`].
#[derive(Debug)]
pub struct FakeSource {
    state: Arc<Mutex<FakeState>>,
}

/// Test-side handle to a [`FakeSource`].
#[derive(Debug, Clone)]
pub struct FakeSourceHandle {
    sink: SourceSink,
    state: Arc<Mutex<FakeState>>,
}

impl FakeSource {
    pub fn new() -> (FakeSource, SourceStreams, FakeSourceHandle) {
        let (sink, streams) = SourceStreams::channel();
        let state = Arc::new(Mutex::new(FakeState::default()));
        (
            FakeSource {
                state: Arc::clone(&state),
            },
            streams,
            FakeSourceHandle { sink, state },
        )
    }
}

impl NotificationSource for FakeSource {
    fn watch(&mut self, path: &Path, interest: Interest) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.closed {
            return Err(notify::Error::generic("fake source is closed").into());
        }
        if state.refused.contains(path) {
            return Err(notify::Error::generic("fake source refused the watch")
                .add_path(path.to_path_buf())
                .into());
        }
        state.registrations.push((path.to_path_buf(), interest));
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.state.lock().unwrap().closed = true;
        Ok(())
    }
}

impl FakeSourceHandle {
    pub fn emit(&self, kind: ChangeKind, path: impl Into<PathBuf>) -> bool {
        self.sink.send_event(ChangeEvent::new(kind, path))
    }

    pub fn create(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(ChangeKind::Create, path)
    }

    pub fn modify(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(ChangeKind::Modify, path)
    }

    pub fn attrib(&self, path: impl Into<PathBuf>) -> bool {
        self.emit(ChangeKind::AttributeChange, path)
    }

    pub fn error(&self, message: &str) -> bool {
        self.sink.send_error(notify::Error::generic(message))
    }

    /// Make future `watch` calls for `path` fail.
    pub fn refuse(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().refused.insert(path.into());
    }

    pub fn registrations(&self) -> Vec<(PathBuf, Interest)> {
        self.state.lock().unwrap().registrations.clone()
    }

    pub fn watched(&self) -> Vec<PathBuf> {
        self.registrations().into_iter().map(|(p, _)| p).collect()
    }

    pub fn is_closed(&self) -> bool {
        self.state.lock().unwrap().closed
    }
}
