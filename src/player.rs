//! Playback controller and its background scheduler.
//!
//! `Player` is the single point of mutation for the playlist and the
//! active/draining playback sessions; everything runs under one lock held
//! by callers of the shared handle. The scheduler thread polls it to keep
//! the playlist self-driving.

mod controller;
pub(crate) mod scheduler;

pub use controller::{PlayState, Player, PlaylistEntry, SharedPlayer, StatusSnapshot};
