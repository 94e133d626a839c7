//! Configuration schema and loaders.
//!
//! The settings document is deliberately tiny: the filesystem root that all
//! relative playlist and browse paths resolve against. It can be loaded
//! standalone from disk/environment, or exchanged as JSON with the hosting
//! process through the module boundary.

mod load;
mod schema;

pub use schema::*;
