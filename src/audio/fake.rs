//! Scripted in-memory audio backend used by playback tests.
//!
//! No device, no decoding: tests mark paths as unopenable, flip streams to
//! finished, and observe play/pause/drop transitions through shared state.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::output::{AudioError, AudioOutput, AudioStream};

/// Length reported for every fake stream.
pub(crate) const FAKE_LENGTH: Duration = Duration::from_secs(300);

/// Build a fake output plus the control handle tests keep for scripting.
pub(crate) fn fake_output() -> (Box<dyn AudioOutput>, Arc<FakeControl>) {
    let control = Arc::new(FakeControl::default());
    (
        Box::new(FakeOutput {
            control: control.clone(),
        }),
        control,
    )
}

#[derive(Default)]
pub(crate) struct FakeControl {
    failing: Mutex<HashSet<PathBuf>>,
    opened: Mutex<Vec<Arc<FakeState>>>,
}

impl FakeControl {
    /// Make every future open of `path` fail.
    pub(crate) fn fail_on(&self, path: impl Into<PathBuf>) {
        self.failing.lock().unwrap().insert(path.into());
    }

    /// Every stream opened so far, oldest first.
    pub(crate) fn opened(&self) -> Vec<Arc<FakeState>> {
        self.opened.lock().unwrap().clone()
    }

    /// The most recently opened stream.
    pub(crate) fn last(&self) -> Arc<FakeState> {
        self.opened
            .lock()
            .unwrap()
            .last()
            .expect("no stream opened yet")
            .clone()
    }
}

/// Observable state of one fake stream, shared with the test.
pub(crate) struct FakeState {
    pub(crate) path: PathBuf,
    pub(crate) playing: AtomicBool,
    pub(crate) finished: AtomicBool,
    pub(crate) dropped: AtomicBool,
    pub(crate) position: Mutex<Duration>,
}

struct FakeOutput {
    control: Arc<FakeControl>,
}

impl AudioOutput for FakeOutput {
    fn open(&self, path: &Path) -> Result<Box<dyn AudioStream>, AudioError> {
        if self.control.failing.lock().unwrap().contains(path) {
            return Err(AudioError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                "scripted open failure",
            )));
        }

        let state = Arc::new(FakeState {
            path: path.to_path_buf(),
            playing: AtomicBool::new(false),
            finished: AtomicBool::new(false),
            dropped: AtomicBool::new(false),
            position: Mutex::new(Duration::ZERO),
        });
        self.control.opened.lock().unwrap().push(state.clone());

        Ok(Box::new(FakeStream { state }))
    }
}

struct FakeStream {
    state: Arc<FakeState>,
}

impl AudioStream for FakeStream {
    fn play(&mut self) {
        self.state.playing.store(true, Ordering::SeqCst);
    }

    fn pause(&mut self) {
        self.state.playing.store(false, Ordering::SeqCst);
    }

    fn position(&self) -> Duration {
        *self.state.position.lock().unwrap()
    }

    fn length(&self) -> Option<Duration> {
        Some(FAKE_LENGTH)
    }

    fn finished(&self) -> bool {
        self.state.finished.load(Ordering::SeqCst)
    }

    fn seek(&mut self, pos: Duration) -> Result<(), AudioError> {
        if pos > FAKE_LENGTH {
            return Err(AudioError::Seek(pos));
        }
        *self.state.position.lock().unwrap() = pos;
        Ok(())
    }
}

impl Drop for FakeStream {
    fn drop(&mut self) {
        self.state.dropped.store(true, Ordering::SeqCst);
    }
}
