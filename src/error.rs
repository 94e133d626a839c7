//! Error taxonomy for playlist, playback and browsing operations.

use std::path::PathBuf;

use thiserror::Error;

use crate::audio::AudioError;

#[derive(Debug, Error)]
pub enum Error {
    /// The path was empty or the file could not be opened at all.
    #[error("unsupported file: {}", .0.display())]
    InvalidFile(PathBuf),

    /// A playlist index outside `[0, len)`.
    #[error("playlist index {0} is out of range")]
    IndexOutOfRange(usize),

    /// The browse path does not resolve to a readable directory.
    #[error("not a directory: {}", .0.display())]
    DirectoryNotFound(PathBuf),

    /// No active track, or the decoder rejected the position.
    #[error("seek to {0}s rejected")]
    SeekFailed(u64),

    /// The selected track could not be opened for playback.
    #[error("cannot start playback: {0}")]
    PlaybackOpenFailed(#[source] AudioError),

    /// The scheduler thread could not be created; fatal for the module.
    #[error("failed to start scheduler thread: {0}")]
    ThreadSpawn(#[source] std::io::Error),

    /// The audio backend itself could not be brought up.
    #[error("audio backend unavailable: {0}")]
    Audio(#[from] AudioError),
}

pub type Result<T> = std::result::Result<T, Error>;
