//! Time-to-live cache of fetched auctions, keyed by request.
//!
//! Entries expire after the TTL; the oldest entry is evicted when full.
//! Invalidation is explicit, for user-triggered refreshes.

use chrono::{DateTime, Utc};
use riven_core::RawAuction;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// One cached fetch.
#[derive(Debug, Clone)]
pub struct CachedAuctions {
    /// Auctions as fetched.
    pub auctions: Arc<Vec<RawAuction>>,
    /// Wall-clock time of the fetch.
    pub fetched_at: DateTime<Utc>,
    stored_at: Instant,
}

/// Response cache with expiry and bounded size.
#[derive(Debug)]
pub struct ResponseCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<String, CachedAuctions>,
}

impl ResponseCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries: max_entries.max(1),
            entries: HashMap::new(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Fresh entry for `key`, if any.
    pub fn get(&mut self, key: &str) -> Option<CachedAuctions> {
        self.get_at(key, Instant::now())
    }

    /// Fresh entry for `key` as of `now`.
    pub fn get_at(&mut self, key: &str, now: Instant) -> Option<CachedAuctions> {
        self.evict_expired(now);
        self.entries.get(key).cloned()
    }

    /// Store auctions for `key`, returning the shared handle.
    pub fn insert(
        &mut self,
        key: String,
        auctions: Vec<RawAuction>,
        fetched_at: DateTime<Utc>,
    ) -> Arc<Vec<RawAuction>> {
        self.insert_at(key, auctions, fetched_at, Instant::now())
    }

    /// Store auctions for `key` as of `now`.
    pub fn insert_at(
        &mut self,
        key: String,
        auctions: Vec<RawAuction>,
        fetched_at: DateTime<Utc>,
        now: Instant,
    ) -> Arc<Vec<RawAuction>> {
        self.evict_expired(now);
        if !self.entries.contains_key(&key) && self.entries.len() >= self.max_entries {
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, v)| v.stored_at)
                .map(|(k, _)| k.clone())
            {
                self.entries.remove(&victim);
            }
        }
        let auctions = Arc::new(auctions);
        self.entries.insert(
            key,
            CachedAuctions {
                auctions: Arc::clone(&auctions),
                fetched_at,
                stored_at: now,
            },
        );
        auctions
    }

    /// Drop the entry for `key`. Returns whether one was present.
    pub fn invalidate(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_expired(&mut self, now: Instant) {
        let ttl = self.ttl;
        self.entries
            .retain(|_, v| now.saturating_duration_since(v.stored_at) <= ttl);
    }
}
