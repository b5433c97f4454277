//! Parallel chunked speech transcription.
//!
//! Long audio is split into overlapping windows, fanned out to a bounded
//! pool of stateful recognizers, and merged back into one time-ordered
//! word-alignment transcript.

pub mod audio;
pub mod output;
pub mod recognition;
pub mod shared;
pub mod transcription;
