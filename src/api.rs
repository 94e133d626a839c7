//! Remote control surface: the request→response contract, the route
//! registry the hosting transport mounts, and the JSON documents it serves.
//!
//! Everything here is a thin translation layer over [`Player`]: handlers
//! take the lock for the duration of a read or a transition, never across
//! serialization of large payloads.
//!
//! [`Player`]: crate::player::Player

mod docs;
mod handlers;
mod types;

pub use handlers::routes;
pub use types::{Method, Request, Response, Route, Router};
