//! Data ingestion and normalization for the riven tracker.
//!
//! This crate handles:
//! - Splitting marketplace payloads into raw auctions
//! - Extracting embedded state from the listing page
//! - Projecting raw auctions into rows

pub mod page_state;
pub mod payload;
pub mod projector;

pub use page_state::extract_page_state;
pub use payload::{split_auctions, split_auctions_str};
pub use projector::{AuctionProjector, Projection, ProjectionStats, Rejection};
