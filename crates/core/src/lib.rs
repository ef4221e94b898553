//! Core types and configuration for the riven tracker.
//!
//! This crate provides shared types used across all other crates:
//! - Auction rows, seller status and sort keys
//! - The Endo yield formula and what-if estimate
//! - Configuration structures
//! - Common error types

pub mod config;
pub mod endo;
pub mod error;
pub mod types;

pub use config::Config;
pub use endo::{efficiency, endo_value, endo_yield, EndoEstimate};
pub use error::{Error, Result};
pub use types::*;
