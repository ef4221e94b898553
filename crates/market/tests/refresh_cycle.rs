//! Refresh cycle against a scripted source.

use approx::assert_relative_eq;
use riven_core::config::SourceKind;
use riven_core::{Config, Error, RawAuction, Result, SellerStatus, SortKey, StatusFilter};
use riven_ingestion::split_auctions;
use riven_market::{AuctionSource, Tracker};
use riven_ranking::Ranker;
use serde_json::{json, Value};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

enum Reply {
    Payload(Value),
    Down,
}

struct ScriptedSource {
    replies: RefCell<VecDeque<Reply>>,
    calls: Cell<usize>,
}

impl ScriptedSource {
    fn new(replies: Vec<Reply>) -> Self {
        Self {
            replies: RefCell::new(replies.into()),
            calls: Cell::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl AuctionSource for ScriptedSource {
    fn cache_key(&self) -> String {
        "scripted".to_string()
    }

    fn fetch_auctions(&self) -> Result<Vec<RawAuction>> {
        self.calls.set(self.calls.get() + 1);
        match self.replies.borrow_mut().pop_front() {
            Some(Reply::Payload(value)) => split_auctions(value),
            Some(Reply::Down) | None => Err(Error::fetch("connection refused")),
        }
    }
}

fn market_payload() -> Value {
    json!({
        "payload": {
            "auctions": [
                {
                    "id": "cheap",
                    "buyout_price": 100,
                    "owner": {"status": "ingame"},
                    "item": {
                        "name": "soma",
                        "item_type": "riven",
                        "mastery_level": 16,
                        "mod_rank": 8,
                        "re_rolls": 30
                    }
                },
                {
                    "id": "pricey",
                    "buyout_price": 5000,
                    "owner": {"status": "online"},
                    "item": {
                        "name": "rubico",
                        "item_type": "riven",
                        "mastery_level": 16,
                        "mod_rank": 8,
                        "re_rolls": 30
                    }
                },
                {"id": "broken", "buyout_price": 1},
                {
                    "id": "away",
                    "buyout_price": 50,
                    "owner": {"status": "offline"},
                    "item": {
                        "name": "kuva",
                        "item_type": "riven",
                        "mastery_level": 10,
                        "mod_rank": 0,
                        "re_rolls": 0
                    }
                },
                {
                    "id": "lich",
                    "buyout_price": 10,
                    "owner": {"status": "ingame"},
                    "item": {"name": "kuva-bramma", "item_type": "lich", "mod_rank": 0}
                }
            ]
        }
    })
}

fn ids(rows: &[riven_core::Row]) -> Vec<&str> {
    rows.iter().map(|r| r.auction_id()).collect()
}

#[test]
fn test_refresh_projects_and_ranks() {
    let source = ScriptedSource::new(vec![Reply::Payload(market_payload())]);
    let mut tracker = Tracker::new(source, &Config::default());

    let snapshot = tracker.refresh().unwrap();
    assert!(!snapshot.from_cache);
    assert!(snapshot.fetch_error.is_none());
    assert!(snapshot.fetched_at.is_some());
    assert_eq!(snapshot.stats.total, 5);
    assert_eq!(snapshot.stats.missing_item, 1);
    assert_eq!(ids(&snapshot.rows), ["cheap", "away", "pricey", "lich"]);

    let top = &snapshot.rows[0];
    assert_eq!(top.endo(), 12560);
    assert_relative_eq!(top.efficiency(), 125.6);
    assert_eq!(top.link(), "https://warframe.market/auction/cheap");
}

#[test]
fn test_refresh_uses_cache_until_invalidated() {
    let source = ScriptedSource::new(vec![
        Reply::Payload(market_payload()),
        Reply::Payload(json!([])),
    ]);
    let mut tracker = Tracker::new(source, &Config::default());

    let first = tracker.refresh().unwrap();
    let second = tracker.refresh().unwrap();
    assert!(second.from_cache);
    assert_eq!(second.fetched_at, first.fetched_at);
    assert_eq!(second.rows.len(), first.rows.len());
    assert_eq!(tracker.source().calls(), 1);

    let third = tracker.force_refresh().unwrap();
    assert!(!third.from_cache);
    assert!(third.is_empty());
    assert_eq!(tracker.source().calls(), 2);
}

#[test]
fn test_reranking_reuses_cached_data() {
    let source = ScriptedSource::new(vec![Reply::Payload(market_payload())]);
    let mut tracker = Tracker::new(source, &Config::default());
    tracker.refresh().unwrap();

    tracker.set_ranker(Ranker::new(
        Some(StatusFilter::from([SellerStatus::Ingame])),
        SortKey::PriceAsc,
    ));
    let snapshot = tracker.refresh().unwrap();
    assert!(snapshot.from_cache);
    assert_eq!(ids(&snapshot.rows), ["lich", "cheap"]);
    assert_eq!(tracker.source().calls(), 1);
}

#[test]
fn test_configured_rejection_policy() {
    let mut config = Config::default();
    config.projector.require_item_type = true;
    config.projector.require_max_rank = true;
    config.market.source = SourceKind::Scrape;

    let source = ScriptedSource::new(vec![Reply::Payload(market_payload())]);
    let mut tracker = Tracker::new(source, &config);
    let snapshot = tracker.refresh().unwrap();

    assert_eq!(ids(&snapshot.rows), ["cheap", "pricey"]);
    assert_eq!(snapshot.stats.wrong_item_type, 1);
    assert_eq!(snapshot.stats.below_max_rank, 1);
    assert_eq!(snapshot.stats.missing_item, 1);
}

#[test]
fn test_fetch_failure_degrades_to_empty() {
    let source = ScriptedSource::new(vec![Reply::Down, Reply::Payload(json!([]))]);
    let mut tracker = Tracker::new(source, &Config::default());

    let snapshot = tracker.refresh().unwrap();
    assert!(snapshot.is_empty());
    assert!(snapshot.fetched_at.is_none());
    assert!(snapshot.fetch_error.unwrap().contains("connection refused"));

    // failures are not cached
    let retry = tracker.refresh().unwrap();
    assert!(retry.fetch_error.is_none());
    assert_eq!(tracker.source().calls(), 2);
}

#[test]
fn test_malformed_payload_is_an_error() {
    let source = ScriptedSource::new(vec![Reply::Payload(json!({"payload": "maintenance"}))]);
    let mut tracker = Tracker::new(source, &Config::default());

    let err = tracker.refresh().unwrap_err();
    assert!(err.is_invalid_input());
}

#[test]
fn test_empty_market() {
    let source = ScriptedSource::new(vec![Reply::Payload(json!({"payload": {"auctions": []}}))]);
    let mut tracker = Tracker::new(source, &Config::default());

    let snapshot = tracker.refresh().unwrap();
    assert!(snapshot.is_empty());
    assert!(snapshot.fetch_error.is_none());
    assert_eq!(snapshot.stats.total, 0);
}
