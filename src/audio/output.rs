use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AudioError {
    /// No usable output device, or the device thread died.
    #[error("audio output unavailable: {0}")]
    Device(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The file opened but no decoder accepted it.
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    /// The decoder rejected the requested position.
    #[error("seek to {0:?} rejected")]
    Seek(Duration),
}

/// An output sink that can open local files as playback streams.
///
/// Opening is synchronous and may do real I/O; the caller is expected to
/// hold whatever lock serializes playback mutations while it does.
pub trait AudioOutput: Send {
    /// Open `path`, returning a stream parked at the start in paused state.
    fn open(&self, path: &Path) -> Result<Box<dyn AudioStream>, AudioError>;
}

/// One playing (or paused, or drained-out) track on the output sink.
///
/// Dropping the stream removes it from the sink immediately; keeping it
/// alive lets already-queued audio finish emitting.
pub trait AudioStream: Send {
    fn play(&mut self);
    fn pause(&mut self);

    /// Current position within the track.
    fn position(&self) -> Duration;

    /// Total length, when the backend could determine it.
    fn length(&self) -> Option<Duration>;

    /// True once the decoder has emitted everything it has.
    fn finished(&self) -> bool;

    fn seek(&mut self, pos: Duration) -> Result<(), AudioError>;
}
