//! Opaque seam to the audio backend.
//!
//! The player never names a backend type: it opens tracks through
//! [`AudioOutput`] and drives them through [`AudioStream`]. The production
//! implementation ([`RodioOutput`] in `sink`) decodes with `rodio` and
//! mixes every stream into one shared output device; tests substitute a
//! scripted fake.

mod output;
mod sink;

pub use output::{AudioError, AudioOutput, AudioStream};
pub use sink::RodioOutput;

#[cfg(test)]
pub(crate) mod fake;
