//! PyO3 bindings for the riven tracker core.
//!
//! Exposes to a Python dashboard shell:
//! - The Endo formula and what-if estimate
//! - Auction projection from a JSON payload
//! - Row ranking and highlight classification

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use riven_core::{
    config::{DisplayConfig, ProjectorConfig},
    EndoEstimate, Error as RustError, Row as RustRow, SellerStatus, SortKey, StatusFilter,
};
use riven_ingestion::{split_auctions_str, AuctionProjector as RustAuctionProjector};
use riven_ranking::{ranker, Highlight};

/// `(total, accepted, missing_item, wrong_item_type, below_max_rank)`
type StatsTuple = (usize, usize, usize, usize, usize);

fn to_py_err(err: RustError) -> PyErr {
    if err.is_invalid_input() {
        PyValueError::new_err(err.to_string())
    } else {
        PyRuntimeError::new_err(err.to_string())
    }
}

// ============================================================================
// Python-exposed Types
// ============================================================================

/// A displayable auction row.
#[pyclass(name = "Row", frozen)]
#[derive(Clone)]
pub struct Row {
    inner: RustRow,
}

#[pymethods]
impl Row {
    #[getter]
    fn item(&self) -> &str {
        self.inner.item()
    }

    #[getter]
    fn mastery_rank(&self) -> i64 {
        self.inner.mastery_rank()
    }

    #[getter]
    fn mod_rank(&self) -> i64 {
        self.inner.mod_rank()
    }

    #[getter]
    fn rerolls(&self) -> i64 {
        self.inner.rerolls()
    }

    #[getter]
    fn price(&self) -> i64 {
        self.inner.price()
    }

    #[getter]
    fn endo(&self) -> i64 {
        self.inner.endo()
    }

    #[getter]
    fn efficiency(&self) -> f64 {
        self.inner.efficiency()
    }

    #[getter]
    fn status(&self) -> &'static str {
        self.inner.status().as_str()
    }

    #[getter]
    fn link(&self) -> &str {
        self.inner.link()
    }

    #[getter]
    fn auction_id(&self) -> &str {
        self.inner.auction_id()
    }

    fn __repr__(&self) -> String {
        format!(
            "Row(item={:?}, endo={}, price={}, efficiency={:.3}, status={})",
            self.inner.item(),
            self.inner.endo(),
            self.inner.price(),
            self.inner.efficiency(),
            self.inner.status()
        )
    }
}

impl From<RustRow> for Row {
    fn from(inner: RustRow) -> Self {
        Row { inner }
    }
}

// ============================================================================
// Python-exposed Engine Classes
// ============================================================================

/// Projects raw auctions into rows.
#[pyclass]
pub struct AuctionProjector {
    inner: RustAuctionProjector,
}

#[pymethods]
impl AuctionProjector {
    #[new]
    #[pyo3(signature = (
        require_item_type=false,
        require_max_rank=false,
        item_type="riven",
        site_url="https://warframe.market",
    ))]
    fn new(
        require_item_type: bool,
        require_max_rank: bool,
        item_type: &str,
        site_url: &str,
    ) -> Self {
        let config = ProjectorConfig {
            require_item_type,
            item_type: item_type.to_string(),
            require_max_rank,
        };
        AuctionProjector {
            inner: RustAuctionProjector::new(config, site_url),
        }
    }

    /// Project a JSON payload. Returns the rows and
    /// `(total, accepted, missing_item, wrong_item_type, below_max_rank)`.
    fn project_json(&self, payload: &str) -> PyResult<(Vec<Row>, StatsTuple)> {
        let auctions = split_auctions_str(payload).map_err(to_py_err)?;
        let (rows, s) = self.inner.project_all(&auctions);
        Ok((
            rows.into_iter().map(Row::from).collect(),
            (s.total, s.accepted, s.missing_item, s.wrong_item_type, s.below_max_rank),
        ))
    }
}

// ============================================================================
// Python-exposed Functions
// ============================================================================

/// Truncated Endo yield.
#[pyfunction]
fn endo_yield(mastery_rank: i64, mod_rank: i64, rerolls: i64) -> i64 {
    riven_core::endo_yield(mastery_rank, mod_rank, rerolls)
}

/// What-if Endo yield with calculator input validation.
#[pyfunction]
#[pyo3(signature = (mastery_rank=8, mod_rank=8, rerolls=30))]
fn estimate(mastery_rank: i64, mod_rank: i64, rerolls: i64) -> PyResult<i64> {
    EndoEstimate::new(mastery_rank, mod_rank, rerolls)
        .map(|e| e.endo())
        .map_err(to_py_err)
}

/// Filter rows by status and sort them ("efficiency" or "price").
#[pyfunction]
#[pyo3(signature = (rows, statuses=None, sort_key="efficiency"))]
fn rank_rows(rows: Vec<Row>, statuses: Option<Vec<String>>, sort_key: &str) -> PyResult<Vec<Row>> {
    let sort_key: SortKey = sort_key.parse().map_err(to_py_err)?;
    let filter = statuses
        .map(|names| {
            names
                .iter()
                .map(|name| name.parse::<SellerStatus>())
                .collect::<Result<StatusFilter, _>>()
        })
        .transpose()
        .map_err(to_py_err)?;

    let rows = rows.into_iter().map(|r| r.inner).collect();
    Ok(ranker::apply(rows, filter.as_ref(), sort_key)
        .into_iter()
        .map(Row::from)
        .collect())
}

/// Highlight level of an Endo value: "none", "notable" or "exceptional".
#[pyfunction]
#[pyo3(signature = (endo, threshold_1=None, threshold_2=None))]
fn highlight(endo: i64, threshold_1: Option<i64>, threshold_2: Option<i64>) -> &'static str {
    let defaults = DisplayConfig::default();
    let level = Highlight::for_value(
        endo,
        threshold_1.unwrap_or(defaults.highlight_threshold_1),
        threshold_2.unwrap_or(defaults.highlight_threshold_2),
    );
    match level {
        Highlight::None => "none",
        Highlight::Notable => "notable",
        Highlight::Exceptional => "exceptional",
    }
}

// ============================================================================
// Module Definition
// ============================================================================

/// Riven tracker core - Endo yield ranking for Python dashboards.
#[pymodule]
fn riven_tracker_core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    // Types
    m.add_class::<Row>()?;

    // Engine classes
    m.add_class::<AuctionProjector>()?;

    // Functions
    m.add_function(wrap_pyfunction!(endo_yield, m)?)?;
    m.add_function(wrap_pyfunction!(estimate, m)?)?;
    m.add_function(wrap_pyfunction!(rank_rows, m)?)?;
    m.add_function(wrap_pyfunction!(highlight, m)?)?;

    Ok(())
}
