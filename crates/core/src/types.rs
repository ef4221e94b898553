//! Core data types for the riven tracker.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::endo::{efficiency, endo_yield};
use crate::error::Error;

/// One raw auction record as delivered by the marketplace.
///
/// Untrusted and possibly partial; the projector reads it with defaults.
pub type RawAuction = serde_json::Map<String, serde_json::Value>;

/// Set of seller statuses a view keeps. `None` at use sites means "keep all".
pub type StatusFilter = BTreeSet<SellerStatus>;

/// Path segment between the marketplace host and the auction id.
pub const AUCTION_PATH: &str = "/auction/";

/// Seller presence reported with each auction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerStatus {
    /// Seller is in the game and can trade immediately.
    Ingame,
    /// Seller is on the website.
    Online,
    /// Seller is away.
    Offline,
}

impl SellerStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            SellerStatus::Ingame => "ingame",
            SellerStatus::Online => "online",
            SellerStatus::Offline => "offline",
        }
    }

    /// Parse a raw status, treating anything unrecognised as offline.
    pub fn from_raw(raw: &str) -> Self {
        raw.parse().unwrap_or(SellerStatus::Offline)
    }
}

impl FromStr for SellerStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ingame" => Ok(SellerStatus::Ingame),
            "online" => Ok(SellerStatus::Online),
            "offline" => Ok(SellerStatus::Offline),
            other => Err(Error::invalid_input(format!("unknown seller status: {other}"))),
        }
    }
}

impl fmt::Display for SellerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering applied to the displayed rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortKey {
    /// Highest Endo per platinum first.
    #[default]
    #[serde(rename = "efficiency")]
    EfficiencyDesc,
    /// Cheapest buyout first.
    #[serde(rename = "price")]
    PriceAsc,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "efficiency" | "efficiency-desc" => Ok(SortKey::EfficiencyDesc),
            "price" | "price-asc" => Ok(SortKey::PriceAsc),
            other => Err(Error::invalid_input(format!("unknown sort key: {other}"))),
        }
    }
}

/// Build the listing URL for an auction id.
pub fn auction_link(link_base: &str, auction_id: &str) -> String {
    format!("{}{}{}", link_base.trim_end_matches('/'), AUCTION_PATH, auction_id)
}

/// Recover the auction id from a listing URL built by [`auction_link`]
/// with the same `link_base`.
pub fn auction_id_from_link<'a>(link_base: &str, link: &'a str) -> Option<&'a str> {
    link.strip_prefix(auction_link(link_base, "").as_str())
}

/// Attributes read from one raw auction, before derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct RowInput {
    pub item: String,
    pub mastery_rank: i64,
    pub mod_rank: i64,
    pub rerolls: i64,
    pub price: i64,
    pub status: SellerStatus,
    pub auction_id: String,
}

/// A displayable auction row.
///
/// Endo, efficiency and the link are derived at construction and the
/// value cannot be changed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Row {
    item: String,
    mastery_rank: i64,
    mod_rank: i64,
    rerolls: i64,
    price: i64,
    endo: i64,
    efficiency: f64,
    status: SellerStatus,
    link: String,
    #[serde(skip)]
    auction_id: String,
}

impl Row {
    /// Derive a row from its raw attributes.
    pub fn new(input: RowInput, link_base: &str) -> Self {
        let endo = endo_yield(input.mastery_rank, input.mod_rank, input.rerolls);
        Self {
            efficiency: efficiency(endo, input.price),
            link: auction_link(link_base, &input.auction_id),
            auction_id: input.auction_id,
            item: input.item,
            mastery_rank: input.mastery_rank,
            mod_rank: input.mod_rank,
            rerolls: input.rerolls,
            price: input.price,
            endo,
            status: input.status,
        }
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn mastery_rank(&self) -> i64 {
        self.mastery_rank
    }

    pub fn mod_rank(&self) -> i64 {
        self.mod_rank
    }

    pub fn rerolls(&self) -> i64 {
        self.rerolls
    }

    /// Buyout price in platinum.
    pub fn price(&self) -> i64 {
        self.price
    }

    /// Truncated Endo yield.
    pub fn endo(&self) -> i64 {
        self.endo
    }

    /// Endo per platinum, 0 when there is no buyout price.
    ///
    /// Computed from the truncated [`Row::endo`], so `efficiency == endo / price`
    /// holds exactly for every priced row.
    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    pub fn status(&self) -> SellerStatus {
        self.status
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    /// Auction id the link was built from.
    pub fn auction_id(&self) -> &str {
        &self.auction_id
    }
}
