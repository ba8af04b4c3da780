//! Verset - caption timing engine and scripture quote aligner
//!
//! Turns word-timestamped speech recognition output into a clean, short-line
//! SRT caption track, then finds the Bible verses quoted in the sermon text
//! inside that track so an overlay renderer can display them.

pub mod captions;
pub mod cli;
pub mod config;
pub mod error;
pub mod pauses;
pub mod quality;
pub mod scripture;
pub mod subtitle;
pub mod text;
pub mod transcript;
pub mod workflow;
