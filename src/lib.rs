//! Playback engine of a networked media server.
//!
//! This crate owns an ordered playlist of local audio files, drives a
//! background scheduler that auto-advances playback as tracks finish, and
//! exposes playback control (play/pause/stop/seek/next/prev, playlist edits,
//! directory browsing) as a table of request handlers for a hosting daemon
//! to mount on its transport.
//!
//! The hosting process provides the HTTP server, service discovery and
//! module loading; this crate is one pluggable unit behind the [`Module`]
//! boundary. The audio backend is equally opaque: the player talks to the
//! [`AudioOutput`]/[`AudioStream`] seam, with [`RodioOutput`] as the
//! production implementation.

mod api;
mod audio;
mod config;
mod error;
mod library;
mod module;
mod player;
mod playlist;

pub use api::{Method, Request, Response, Route, Router};
pub use audio::{AudioError, AudioOutput, AudioStream, RodioOutput};
pub use config::Settings;
pub use error::{Error, Result};
pub use library::{BrowseEntry, Listing, Picture, Track, TrackMeta};
pub use module::{FilesModule, Module};
pub use player::{PlayState, Player, PlaylistEntry, SharedPlayer, StatusSnapshot};
