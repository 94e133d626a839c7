use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::audio::{AudioError, AudioOutput, AudioStream};
use crate::error::Error;
use crate::library::{Track, TrackMeta, read_meta};
use crate::playlist::Playlist;

/// A track is considered finished this close to its known end, mirroring
/// the whole-second granularity of positions on the control surface.
const END_OF_TRACK_MARGIN: Duration = Duration::from_secs(1);

/// Playback state of the active session. `Stopped` whenever no track is
/// active; it is both the initial and the terminal state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlayState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlayState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Handle shared between the control surface and the scheduler thread.
pub type SharedPlayer = Arc<Mutex<Player>>;

/// Projection of the active track, taken under the lock; serialization
/// happens after the lock is released.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub file: String,
    pub meta: Option<TrackMeta>,
    pub position: Duration,
    pub length: Option<Duration>,
}

/// Projection of one playlist entry (no artwork, no position).
#[derive(Debug, Clone)]
pub struct PlaylistEntry {
    pub file: String,
    pub meta: Option<TrackMeta>,
}

#[derive(Debug, Copy, Clone)]
enum Direction {
    Forward,
    Backward,
}

/// The playback state machine: playlist, active stream, and the stream
/// left over from the previous track while it drains out.
pub struct Player {
    output: Box<dyn AudioOutput>,
    playlist: Playlist,
    current: Option<Box<dyn AudioStream>>,
    draining: Option<Box<dyn AudioStream>>,
    state: PlayState,
    root: PathBuf,
}

impl Player {
    pub fn new(output: Box<dyn AudioOutput>, root: PathBuf) -> Self {
        Self {
            output,
            playlist: Playlist::new(),
            current: None,
            draining: None,
            state: PlayState::Stopped,
            root,
        }
    }

    pub fn state(&self) -> PlayState {
        self.state
    }

    pub fn current_index(&self) -> Option<usize> {
        self.playlist.current()
    }

    pub fn track_count(&self) -> usize {
        self.playlist.len()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn set_root(&mut self, root: PathBuf) {
        info!(root = %root.display(), "root directory replaced");
        self.root = root;
    }

    /// Resolve `rel` against the root, parse its tags and append it.
    ///
    /// An empty or unopenable path is rejected; a readable file whose tags
    /// cannot be parsed is kept with no metadata.
    pub fn add(&mut self, rel: &str) -> Result<usize, Error> {
        let real = self.root.join(rel);
        if rel.is_empty() {
            return Err(Error::InvalidFile(real));
        }
        File::open(&real).map_err(|_| Error::InvalidFile(real.clone()))?;

        let meta = read_meta(&real);
        debug!(path = %real.display(), has_meta = meta.is_some(), "track added");
        Ok(self.playlist.push(Track { path: real, meta }))
    }

    /// Remove the entry at `index`; removing the current track stops
    /// playback first and leaves nothing selected.
    pub fn remove(&mut self, index: usize) -> Result<(), Error> {
        if index >= self.playlist.len() {
            return Err(Error::IndexOutOfRange(index));
        }
        if self.playlist.current() == Some(index) {
            self.stop();
        }
        self.playlist.remove(index);
        Ok(())
    }

    /// Stop playback and drop every entry.
    pub fn flush(&mut self) {
        self.stop();
        self.playlist.clear();
    }

    /// Start playing `index`; `None` resumes the last selection, or track 0
    /// if nothing was ever selected. Any previous session (active and
    /// draining) is torn down first.
    pub fn play(&mut self, index: Option<usize>) -> Result<(), Error> {
        let index = index.or_else(|| self.playlist.current()).unwrap_or(0);
        if index >= self.playlist.len() {
            return Err(Error::IndexOutOfRange(index));
        }

        self.stop();

        match self.start(index) {
            Ok(()) => Ok(()),
            Err(e) => {
                self.playlist.set_current(None);
                self.state = PlayState::Stopped;
                Err(Error::PlaybackOpenFailed(e))
            }
        }
    }

    /// Toggle Playing/Paused on the active stream; no-op when nothing is
    /// active.
    pub fn pause(&mut self) {
        let Some(stream) = self.current.as_mut() else {
            return;
        };
        match self.state {
            PlayState::Playing => {
                stream.pause();
                self.state = PlayState::Paused;
            }
            PlayState::Paused => {
                stream.play();
                self.state = PlayState::Playing;
            }
            PlayState::Stopped => {}
        }
    }

    /// Release the active and draining streams, clear the selection.
    /// Idempotent.
    pub fn stop(&mut self) {
        self.current = None;
        self.draining = None;
        self.playlist.set_current(None);
        self.state = PlayState::Stopped;
    }

    /// Seek the active stream to `secs` from the start.
    pub fn seek(&mut self, secs: u64) -> Result<(), Error> {
        let Some(stream) = self.current.as_mut() else {
            return Err(Error::SeekFailed(secs));
        };
        let pos = Duration::from_secs(secs);
        if stream.length().is_some_and(|len| pos > len) {
            return Err(Error::SeekFailed(secs));
        }
        stream.seek(pos).map_err(|_| Error::SeekFailed(secs))
    }

    /// Skip forward, tearing the demoted stream down right away.
    /// No-op when nothing is selected.
    pub fn next(&mut self) {
        if self.playlist.current().is_none() {
            return;
        }
        self.shift(Direction::Forward);
        // User-initiated skip: the previous stream goes away immediately.
        self.draining = None;
    }

    /// Skip backward, tearing the demoted stream down right away.
    /// No-op when nothing is selected; does not wrap below track 0.
    pub fn prev(&mut self) {
        if self.playlist.current().is_none() {
            return;
        }
        self.shift(Direction::Backward);
        self.draining = None;
    }

    /// Scheduler-initiated advance: same skip-forward as `next`, but the
    /// demoted stream is kept draining until the following transition so
    /// audio already queued on the sink can finish emitting.
    pub(crate) fn advance(&mut self) {
        if self.playlist.current().is_none() {
            return;
        }
        self.shift(Direction::Forward);
    }

    /// One scheduler tick: advance when the active track has played out.
    pub(crate) fn poll_advance(&mut self) {
        if self.playlist.current().is_none() {
            return;
        }
        let Some(stream) = self.current.as_ref() else {
            return;
        };

        let at_end = stream.finished()
            || stream
                .length()
                .is_some_and(|len| stream.position() + END_OF_TRACK_MARGIN >= len);
        if at_end {
            debug!(index = ?self.playlist.current(), "active track finished, advancing");
            self.advance();
        }
    }

    /// Demote the active stream and walk the playlist in `dir` until a
    /// track opens or the end is reached (then: stopped, nothing selected).
    fn shift(&mut self, dir: Direction) {
        // At most one generation of "previous" state is ever kept: the old
        // draining stream is released before the new one is installed.
        self.draining = None;
        self.draining = self.current.take();

        let Some(mut index) = self.playlist.current() else {
            return;
        };
        loop {
            index = match dir {
                Direction::Forward if index + 1 < self.playlist.len() => index + 1,
                Direction::Backward if index > 0 => index - 1,
                _ => {
                    self.playlist.set_current(None);
                    self.state = PlayState::Stopped;
                    return;
                }
            };

            match self.start(index) {
                Ok(()) => return,
                Err(e) => {
                    warn!(index, error = %e, "skipping unplayable track");
                }
            }
        }
    }

    /// Open the track at `index` and start output immediately.
    fn start(&mut self, index: usize) -> Result<(), AudioError> {
        let path = self
            .playlist
            .get(index)
            .map(|t| t.path.clone())
            .unwrap_or_default();
        let mut stream = self.output.open(&path)?;
        stream.play();

        self.current = Some(stream);
        self.playlist.set_current(Some(index));
        self.state = PlayState::Playing;
        Ok(())
    }

    /// Snapshot of the active track for the status document; `None` when
    /// nothing is selected.
    pub fn status(&self) -> Option<StatusSnapshot> {
        let track = self.playlist.current_track()?;
        Some(StatusSnapshot {
            file: track.file_name(),
            meta: track.meta.clone(),
            position: self
                .current
                .as_ref()
                .map(|s| s.position())
                .unwrap_or_default(),
            length: self.current.as_ref().and_then(|s| s.length()),
        })
    }

    /// Snapshot of the whole playlist for the playlist document.
    pub fn entries(&self) -> Vec<PlaylistEntry> {
        self.playlist
            .iter()
            .map(|t| PlaylistEntry {
                file: t.file_name(),
                meta: t.meta.as_ref().map(TrackMeta::without_picture),
            })
            .collect()
    }
}
