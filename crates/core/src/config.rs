//! Configuration structures for the riven tracker.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::{SortKey, StatusFilter};

/// Main configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Which raw auctions become rows.
    pub projector: ProjectorConfig,
    /// Filtering and ordering of rows.
    pub ranking: RankingConfig,
    /// Presentation thresholds.
    pub display: DisplayConfig,
    /// Marketplace endpoints and caching.
    pub market: MarketConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(&path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(s).map_err(|e| Error::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<()> {
        if self.display.highlight_threshold_1 > self.display.highlight_threshold_2 {
            return Err(Error::config(
                "display.highlight_threshold_1 must not exceed highlight_threshold_2",
            ));
        }
        if self.market.cache_ttl_secs == 0 {
            return Err(Error::config("market.cache_ttl_secs must be positive"));
        }
        if self.projector.require_item_type && self.projector.item_type.trim().is_empty() {
            return Err(Error::config("projector.item_type is empty"));
        }
        Ok(())
    }
}

/// Rejection policy of the projector.
///
/// Each historical dashboard applied a different combination of these
/// checks, so every check is a separate switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectorConfig {
    /// Reject items whose `item_type` differs from `item_type`.
    pub require_item_type: bool,
    /// Accepted item type (compared case-insensitively).
    pub item_type: String,
    /// Keep only maxed (rank 8) mods.
    pub require_max_rank: bool,
}

impl Default for ProjectorConfig {
    fn default() -> Self {
        Self {
            require_item_type: false,
            item_type: "riven".to_string(),
            require_max_rank: false,
        }
    }
}

/// Ranking configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Seller statuses to keep (`None` keeps all).
    pub status_filter: Option<StatusFilter>,
    /// Sort order.
    pub sort_key: SortKey,
}

/// Presentation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Endo at which a row is highlighted as notable.
    pub highlight_threshold_1: i64,
    /// Endo at which a row is highlighted as exceptional.
    pub highlight_threshold_2: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            highlight_threshold_1: 20_000,
            highlight_threshold_2: 30_000,
        }
    }
}

/// Where auctions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// JSON search endpoint, filtered to rivens server-side.
    #[default]
    Api,
    /// Listing page with embedded state; mixes item categories.
    Scrape,
}

/// Marketplace configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Public site, also the base of listing links.
    pub site_url: String,
    /// JSON API base.
    pub api_url: String,
    /// Which endpoint to read.
    pub source: SourceKind,
    /// Seconds a fetched response stays fresh.
    pub cache_ttl_secs: u64,
    /// Maximum cached responses.
    pub cache_max_entries: usize,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// User-Agent header.
    pub user_agent: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            site_url: "https://warframe.market".to_string(),
            api_url: "https://api.warframe.market/v1".to_string(),
            source: SourceKind::Api,
            cache_ttl_secs: 300,
            cache_max_entries: 16,
            timeout_secs: 15,
            user_agent: concat!("riven-tracker/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
