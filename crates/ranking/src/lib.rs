//! Ranking and presentation helpers for the riven tracker.
//!
//! This crate handles:
//! - Status filtering and stable sorting of rows
//! - Endo highlight classification for the render layer

pub mod highlight;
pub mod ranker;

pub use highlight::Highlight;
pub use ranker::Ranker;
