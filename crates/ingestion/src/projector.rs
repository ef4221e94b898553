//! Projection of raw auctions into display rows.
//!
//! Reads the documented fields with defaults, applies the configured
//! rejection checks and derives Endo, efficiency and the listing link.
//! Projection is a pure function of the raw auction and the configuration.

use riven_core::config::ProjectorConfig;
use riven_core::endo::{BASE_MASTERY_RANK, MAX_MOD_RANK};
use riven_core::{RawAuction, Row, RowInput, SellerStatus};
use serde::Serialize;
use serde_json::Value;

/// Item name used when the auction does not carry one.
pub const UNKNOWN_ITEM: &str = "Unknown";

/// Why a raw auction produced no row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Rejection {
    /// `item` is absent, not a mapping, or empty.
    MissingItem,
    /// `item.item_type` is absent or differs from the required type.
    WrongItemType,
    /// Mod is below rank 8 while only maxed mods are kept.
    BelowMaxRank,
}

/// Outcome of projecting one raw auction.
#[derive(Debug, Clone, PartialEq)]
pub enum Projection {
    Row(Row),
    Rejected(Rejection),
}

impl Projection {
    /// The row, if the auction was accepted.
    pub fn into_row(self) -> Option<Row> {
        match self {
            Projection::Row(row) => Some(row),
            Projection::Rejected(_) => None,
        }
    }
}

/// Counts gathered over one projection pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectionStats {
    /// Raw auctions seen.
    pub total: usize,
    /// Rows produced.
    pub accepted: usize,
    /// Rejected for a missing item.
    pub missing_item: usize,
    /// Rejected by the item type check.
    pub wrong_item_type: usize,
    /// Rejected by the max rank check.
    pub below_max_rank: usize,
}

impl ProjectionStats {
    /// Total rejected auctions.
    pub fn rejected(&self) -> usize {
        self.missing_item + self.wrong_item_type + self.below_max_rank
    }

    fn record(&mut self, projection: &Projection) {
        self.total += 1;
        match projection {
            Projection::Row(_) => self.accepted += 1,
            Projection::Rejected(Rejection::MissingItem) => self.missing_item += 1,
            Projection::Rejected(Rejection::WrongItemType) => self.wrong_item_type += 1,
            Projection::Rejected(Rejection::BelowMaxRank) => self.below_max_rank += 1,
        }
    }
}

/// Turns raw auctions into rows.
#[derive(Debug, Clone)]
pub struct AuctionProjector {
    config: ProjectorConfig,
    link_base: String,
}

impl AuctionProjector {
    /// Create a projector. `link_base` is the marketplace site URL.
    pub fn new(config: ProjectorConfig, link_base: impl Into<String>) -> Self {
        Self {
            config,
            link_base: link_base.into(),
        }
    }

    pub fn config(&self) -> &ProjectorConfig {
        &self.config
    }

    /// Project a single raw auction.
    pub fn project(&self, raw: &RawAuction) -> Projection {
        let item = match raw.get("item") {
            Some(Value::Object(item)) if !item.is_empty() => item,
            _ => return Projection::Rejected(Rejection::MissingItem),
        };

        if self.config.require_item_type {
            let matches = str_field(item, "item_type")
                .is_some_and(|t| t.eq_ignore_ascii_case(&self.config.item_type));
            if !matches {
                return Projection::Rejected(Rejection::WrongItemType);
            }
        }

        let mod_rank = int_field(item, "mod_rank").unwrap_or(0);
        if self.config.require_max_rank && mod_rank != MAX_MOD_RANK {
            return Projection::Rejected(Rejection::BelowMaxRank);
        }

        let status = match raw.get("owner") {
            Some(Value::Object(owner)) => str_field(owner, "status").map(SellerStatus::from_raw),
            _ => None,
        };

        let input = RowInput {
            item: str_field(item, "name").unwrap_or(UNKNOWN_ITEM).to_string(),
            mastery_rank: int_field(item, "mastery_level").unwrap_or(BASE_MASTERY_RANK),
            mod_rank,
            rerolls: int_field(item, "re_rolls").unwrap_or(0),
            price: int_field(raw, "buyout_price").unwrap_or(0),
            status: status.unwrap_or(SellerStatus::Offline),
            auction_id: str_field(raw, "id").unwrap_or_default().to_string(),
        };
        Projection::Row(Row::new(input, &self.link_base))
    }

    /// Project a batch, keeping input order and counting rejections.
    pub fn project_all<'a, I>(&self, raws: I) -> (Vec<Row>, ProjectionStats)
    where
        I: IntoIterator<Item = &'a RawAuction>,
    {
        let mut stats = ProjectionStats::default();
        let rows = raws
            .into_iter()
            .filter_map(|raw| {
                let projection = self.project(raw);
                stats.record(&projection);
                projection.into_row()
            })
            .collect();
        (rows, stats)
    }
}

fn str_field<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}

/// Integer field; integral floats are accepted, anything else is absent.
fn int_field(map: &serde_json::Map<String, Value>, key: &str) -> Option<i64> {
    let value = map.get(key)?;
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}
