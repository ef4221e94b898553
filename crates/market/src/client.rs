//! Marketplace HTTP client.
//!
//! Two endpoints deliver riven auctions:
//! - the search API, already restricted to rivens server-side
//! - the listing page, whose embedded state mixes item categories

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use riven_core::config::{MarketConfig, SourceKind};
use riven_core::{Error, RawAuction, Result};
use riven_ingestion::{extract_page_state, split_auctions};
use std::time::Duration;
use tracing::debug;

/// Something that can deliver raw auctions.
pub trait AuctionSource {
    /// Key identifying the request, used for caching.
    fn cache_key(&self) -> String;

    /// Fetch and split the current auctions.
    ///
    /// A payload of the wrong shape is `Error::InvalidInput`; transport and
    /// page structure problems are other variants.
    fn fetch_auctions(&self) -> Result<Vec<RawAuction>>;
}

/// Blocking client for the marketplace.
pub struct MarketClient {
    http: Client,
    config: MarketConfig,
}

impl MarketClient {
    /// Create a client from configuration.
    pub fn new(config: MarketConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::fetch(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    /// URL of the riven search endpoint.
    pub fn search_url(&self) -> String {
        format!(
            "{}/auctions/search?type=riven&buyout_policy=direct&sort_by=price_asc",
            self.config.api_url.trim_end_matches('/')
        )
    }

    /// URL of the riven listing page.
    pub fn page_url(&self) -> String {
        format!("{}/auctions/riven_mods", self.config.site_url.trim_end_matches('/'))
    }

    /// URL read for the configured source.
    pub fn source_url(&self) -> String {
        match self.config.source {
            SourceKind::Api => self.search_url(),
            SourceKind::Scrape => self.page_url(),
        }
    }

    /// Query the search API.
    pub fn fetch_search(&self) -> Result<Vec<RawAuction>> {
        let body = self.get_text(&self.search_url(), "application/json")?;
        let payload = serde_json::from_str(&body)
            .map_err(|e| Error::fetch(format!("search response is not JSON: {e}")))?;
        split_auctions(payload)
    }

    /// Scrape the listing page and read its embedded state.
    pub fn fetch_page(&self) -> Result<Vec<RawAuction>> {
        let html = self.get_text(&self.page_url(), "text/html")?;
        split_auctions(extract_page_state(&html)?)
    }

    fn get_text(&self, url: &str, accept: &str) -> Result<String> {
        debug!(url, "requesting");
        let response = self
            .http
            .get(url)
            .header(ACCEPT, accept)
            .send()
            .map_err(|e| Error::fetch(format!("GET {url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch(format!("GET {url}: HTTP {status}")));
        }
        let body = response
            .text()
            .map_err(|e| Error::fetch(format!("GET {url}: reading body: {e}")))?;
        debug!(url, bytes = body.len(), "response received");
        Ok(body)
    }
}

impl AuctionSource for MarketClient {
    fn cache_key(&self) -> String {
        self.source_url()
    }

    fn fetch_auctions(&self) -> Result<Vec<RawAuction>> {
        match self.config.source {
            SourceKind::Api => self.fetch_search(),
            SourceKind::Scrape => self.fetch_page(),
        }
    }
}
