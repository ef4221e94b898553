//! Refresh cycle.
//!
//! One refresh reads auctions through the cache (fetching on a miss),
//! projects every auction and ranks the rows. A failed fetch yields an
//! empty snapshot carrying the error; a payload of the wrong shape is
//! returned as `Error::InvalidInput`.

use chrono::{DateTime, Utc};
use riven_core::{Config, Result, Row};
use riven_ingestion::{AuctionProjector, ProjectionStats};
use riven_ranking::Ranker;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::cache::ResponseCache;
use crate::client::AuctionSource;

/// Result of one refresh.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    /// Ranked rows.
    pub rows: Vec<Row>,
    /// Projection counts.
    pub stats: ProjectionStats,
    /// When the underlying data was fetched.
    pub fetched_at: Option<DateTime<Utc>>,
    /// Whether the data came from the cache.
    pub from_cache: bool,
    /// Fetch failure, when no data could be obtained.
    pub fetch_error: Option<String>,
}

impl Snapshot {
    fn failed(error: String) -> Self {
        Self {
            fetch_error: Some(error),
            ..Self::default()
        }
    }

    /// True when there is nothing to show.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Drives refreshes against a source.
pub struct Tracker<S> {
    source: S,
    cache: ResponseCache,
    projector: AuctionProjector,
    ranker: Ranker,
}

impl<S: AuctionSource> Tracker<S> {
    /// Create a tracker from configuration.
    pub fn new(source: S, config: &Config) -> Self {
        Self {
            source,
            cache: ResponseCache::new(
                Duration::from_secs(config.market.cache_ttl_secs),
                config.market.cache_max_entries,
            ),
            projector: AuctionProjector::new(
                config.projector.clone(),
                config.market.site_url.clone(),
            ),
            ranker: Ranker::from_config(&config.ranking),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn ranker(&self) -> &Ranker {
        &self.ranker
    }

    /// Replace the ranking; cached data is reused on the next refresh.
    pub fn set_ranker(&mut self, ranker: Ranker) {
        self.ranker = ranker;
    }

    /// Replace the projector; cached data is reused on the next refresh.
    pub fn set_projector(&mut self, projector: AuctionProjector) {
        self.projector = projector;
    }

    /// Drop cached data for this source so the next refresh fetches.
    pub fn invalidate(&mut self) -> bool {
        let key = self.source.cache_key();
        let dropped = self.cache.invalidate(&key);
        if dropped {
            debug!(key = %key, "cache invalidated");
        }
        dropped
    }

    /// Invalidate, then refresh.
    pub fn force_refresh(&mut self) -> Result<Snapshot> {
        self.invalidate();
        self.refresh()
    }

    /// Run one refresh cycle.
    pub fn refresh(&mut self) -> Result<Snapshot> {
        let key = self.source.cache_key();

        let (auctions, fetched_at, from_cache) = match self.cache.get(&key) {
            Some(hit) => {
                debug!(key = %key, count = hit.auctions.len(), "cache hit");
                (hit.auctions, hit.fetched_at, true)
            }
            None => match self.source.fetch_auctions() {
                Ok(auctions) => {
                    let fetched_at = Utc::now();
                    info!(key = %key, count = auctions.len(), "auctions fetched");
                    (self.cache.insert(key, auctions, fetched_at), fetched_at, false)
                }
                Err(e) if e.is_invalid_input() => return Err(e),
                Err(e) => {
                    warn!(key = %key, error = %e, "fetch failed");
                    return Ok(Snapshot::failed(e.to_string()));
                }
            },
        };

        let (rows, stats) = self.projector.project_all(auctions.iter());
        let rows = self.ranker.apply(rows);
        debug!(
            accepted = stats.accepted,
            rejected = stats.rejected(),
            shown = rows.len(),
            "refresh complete"
        );

        Ok(Snapshot {
            rows,
            stats,
            fetched_at: Some(fetched_at),
            from_cache,
            fetch_error: None,
        })
    }
}
