//! Marketplace access and refresh cycle for the riven tracker.
//!
//! This crate provides:
//! - A blocking HTTP client for the search API and the listing page
//! - A time-to-live response cache keyed by request
//! - The refresh cycle: fetch, project, rank

pub mod cache;
pub mod client;
pub mod refresh;

pub use cache::ResponseCache;
pub use client::{AuctionSource, MarketClient};
pub use refresh::{Snapshot, Tracker};
