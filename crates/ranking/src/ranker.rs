//! Status filtering and ordering of rows.
//!
//! Sorting is stable for both keys: rows with equal keys keep their input
//! order. Filtering does not depend on the sort key.

use ordered_float::OrderedFloat;
use riven_core::config::RankingConfig;
use riven_core::{Row, SortKey, StatusFilter};

/// Filters and orders rows for display.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    status_filter: Option<StatusFilter>,
    sort_key: SortKey,
}

impl Ranker {
    /// Create a ranker. `None` keeps every status.
    pub fn new(status_filter: Option<StatusFilter>, sort_key: SortKey) -> Self {
        Self {
            status_filter,
            sort_key,
        }
    }

    /// Create a ranker from configuration.
    pub fn from_config(config: &RankingConfig) -> Self {
        Self::new(config.status_filter.clone(), config.sort_key)
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn status_filter(&self) -> Option<&StatusFilter> {
        self.status_filter.as_ref()
    }

    /// Filter and sort rows.
    pub fn apply(&self, rows: Vec<Row>) -> Vec<Row> {
        apply(rows, self.status_filter.as_ref(), self.sort_key)
    }
}

/// Keep rows whose status is in `status_filter` (all when `None`), then
/// stable-sort by `sort_key`. Returns the full sequence.
pub fn apply(
    mut rows: Vec<Row>,
    status_filter: Option<&StatusFilter>,
    sort_key: SortKey,
) -> Vec<Row> {
    if let Some(filter) = status_filter {
        rows.retain(|row| filter.contains(&row.status()));
    }
    match sort_key {
        SortKey::EfficiencyDesc => {
            rows.sort_by(|a, b| OrderedFloat(b.efficiency()).cmp(&OrderedFloat(a.efficiency())))
        }
        SortKey::PriceAsc => rows.sort_by_key(Row::price),
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use riven_core::config::ProjectorConfig;
    use riven_core::{RowInput, SellerStatus};
    use riven_ingestion::AuctionProjector;
    use serde_json::json;

    const SITE: &str = "https://warframe.market";

    fn row(id: &str, rerolls: i64, price: i64, status: SellerStatus) -> Row {
        Row::new(
            RowInput {
                item: format!("riven-{id}"),
                mastery_rank: 8,
                mod_rank: 0,
                rerolls,
                price,
                status,
                auction_id: id.to_string(),
            },
            SITE,
        )
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().map(Row::auction_id).collect()
    }

    #[test]
    fn test_efficiency_descending() {
        let rows = vec![
            row("low", 0, 100, SellerStatus::Ingame),
            row("high", 10, 100, SellerStatus::Ingame),
            row("mid", 5, 100, SellerStatus::Ingame),
        ];
        let ranked = apply(rows, None, SortKey::EfficiencyDesc);
        assert_eq!(ids(&ranked), ["high", "mid", "low"]);
    }

    #[test]
    fn test_efficiency_ties_keep_input_order() {
        // a, b and c all score 2022 / 100
        let rows = vec![
            row("a", 10, 100, SellerStatus::Ingame),
            row("zero", 10, 0, SellerStatus::Online),
            row("b", 10, 100, SellerStatus::Offline),
            row("c", 10, 100, SellerStatus::Online),
            row("zero2", 3, 0, SellerStatus::Online),
        ];
        let ranked = apply(rows, None, SortKey::EfficiencyDesc);
        assert_eq!(ids(&ranked), ["a", "b", "c", "zero", "zero2"]);
    }

    #[test]
    fn test_price_ascending_is_stable() {
        let rows = vec![
            row("p300", 1, 300, SellerStatus::Ingame),
            row("p100a", 2, 100, SellerStatus::Ingame),
            row("p0", 0, 0, SellerStatus::Ingame),
            row("p100b", 9, 100, SellerStatus::Offline),
        ];
        let ranked = apply(rows, None, SortKey::PriceAsc);
        assert_eq!(ids(&ranked), ["p0", "p100a", "p100b", "p300"]);
    }

    #[test]
    fn test_offline_filter_preserves_order() {
        let rows = vec![
            row("o1", 1, 10, SellerStatus::Offline),
            row("i1", 50, 10, SellerStatus::Ingame),
            row("o2", 1, 10, SellerStatus::Offline),
            row("n1", 2, 10, SellerStatus::Online),
            row("o3", 1, 10, SellerStatus::Offline),
        ];
        let filter = StatusFilter::from([SellerStatus::Offline]);
        let ranked = apply(rows, Some(&filter), SortKey::EfficiencyDesc);
        assert_eq!(ids(&ranked), ["o1", "o2", "o3"]);
        assert!(ranked.iter().all(|r| r.status() == SellerStatus::Offline));
    }

    #[test]
    fn test_empty_filter_set_keeps_nothing() {
        let rows = vec![row("a", 1, 10, SellerStatus::Ingame)];
        assert!(apply(rows, Some(&StatusFilter::new()), SortKey::PriceAsc).is_empty());
    }

    #[test]
    fn test_empty_input() {
        assert!(apply(Vec::new(), None, SortKey::EfficiencyDesc).is_empty());
        assert!(Ranker::default().apply(Vec::new()).is_empty());
    }

    #[test]
    fn test_from_config() {
        let config = RankingConfig {
            status_filter: Some(StatusFilter::from([SellerStatus::Ingame, SellerStatus::Online])),
            sort_key: SortKey::PriceAsc,
        };
        let ranker = Ranker::from_config(&config);
        let rows = vec![
            row("off", 1, 1, SellerStatus::Offline),
            row("on", 1, 20, SellerStatus::Online),
            row("game", 1, 10, SellerStatus::Ingame),
        ];
        assert_eq!(ids(&ranker.apply(rows)), ["game", "on"]);
        assert_eq!(ranker.sort_key(), SortKey::PriceAsc);
    }

    #[test]
    fn test_pipeline_output_count() {
        let raws: Vec<_> = [
            json!({"id": "a", "owner": {"status": "ingame"}, "item": {"mod_rank": 8}}),
            json!({"id": "broken"}),
            json!({"id": "b", "owner": {"status": "offline"}, "item": {"mod_rank": 8}}),
            json!({"id": "c", "item": {"mod_rank": 2}}),
            json!({"id": "d", "owner": {"status": "online"}, "item": {"mod_rank": 8}}),
        ]
        .into_iter()
        .filter_map(|v| v.as_object().cloned())
        .collect();

        let projector = AuctionProjector::new(ProjectorConfig::default(), SITE);
        let (rows, stats) = projector.project_all(&raws);
        let filter = StatusFilter::from([SellerStatus::Ingame, SellerStatus::Online]);
        let ranked = apply(rows, Some(&filter), SortKey::EfficiencyDesc);

        // 5 input - 1 malformed - 2 offline
        assert_eq!(stats.missing_item, 1);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ids(&ranked), ["a", "d"]);
    }
}
