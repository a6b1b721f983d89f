//! CoinGecko-backed price source.
//!
//! Talks to the public `/simple/price` and `/search` endpoints. Spot
//! prices are quoted in USD only.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use super::PriceSource;

/// Default base URL for the CoinGecko public API.
pub const COINGECKO_API_BASE: &str = "https://api.coingecko.com/api/v3";

/// Failure while talking to the price provider.
///
/// `Transport` covers connect/send failures and non-success statuses;
/// `Unexpected` covers response bodies that do not match the documented
/// shape. A lookup miss is not an error — see [`PriceSource`].
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch crypto price: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[from] serde_json::Error),
}

/// One entry in a `/simple/price` response.
///
/// `usd` can be missing when the provider knows the id but quotes no
/// USD price for it.
#[derive(Debug, Deserialize)]
pub struct PriceEntry {
    pub usd: Option<f64>,
}

/// A single candidate returned by `/search`.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinHit {
    pub id: String,
    pub name: Option<String>,
    pub symbol: Option<String>,
}

/// Top-level `/search` response. `coins` can be absent in degenerate
/// responses; treat that the same as an empty candidate list.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub coins: Vec<CoinHit>,
}

/// HTTP client for the CoinGecko API.
#[derive(Debug, Clone)]
pub struct CoinGeckoClient {
    client: Client,
    base: Url,
}

impl Default for CoinGeckoClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoClient {
    pub fn new() -> Self {
        Self::with_base_url(Url::parse(COINGECKO_API_BASE).expect("valid url"))
    }

    /// Build a client against a different CoinGecko-compatible base URL
    /// (e.g. a local stand-in during development).
    pub fn with_base_url(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .expect("base url must be absolute")
            .pop_if_empty()
            .extend(segments);
        url
    }

    /// Fetch `/simple/price` for a single id, keyed by id in the response.
    async fn fetch_simple_price(&self, id: &str) -> Result<HashMap<String, PriceEntry>, FetchError> {
        let mut url = self.endpoint(&["simple", "price"]);
        url.query_pairs_mut()
            .append_pair("ids", id)
            .append_pair("vs_currencies", "usd");

        debug!(%url, "coingecko: price query");

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;

        // Parse like: { "bitcoin": {"usd": 12345.6}, ... }
        Ok(serde_json::from_slice(&body)?)
    }

    /// Fetch `/search` for a free-form query term.
    async fn fetch_search(&self, query: &str) -> Result<SearchResponse, FetchError> {
        let mut url = self.endpoint(&["search"]);
        url.query_pairs_mut().append_pair("query", query);

        debug!(%url, "coingecko: search query");

        let resp = self
            .client
            .get(url)
            .header("accept", "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = resp.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn simple_price_usd(&self, id: &str) -> Result<Option<f64>, FetchError> {
        let parsed = self.fetch_simple_price(id).await?;
        Ok(parsed.get(id).and_then(|entry| entry.usd))
    }

    async fn search_coins(&self, query: &str) -> Result<Vec<CoinHit>, FetchError> {
        let resp = self.fetch_search(query).await?;
        if let Some(first) = resp.coins.first() {
            debug!(
                id = %first.id,
                name = first.name.as_deref().unwrap_or(""),
                symbol = first.symbol.as_deref().unwrap_or(""),
                hits = resp.coins.len(),
                "coingecko: search resolved"
            );
        }
        Ok(resp.coins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_price_entry_with_usd() {
        let parsed: HashMap<String, PriceEntry> =
            serde_json::from_str(r#"{"bitcoin": {"usd": 65000}}"#).unwrap();
        assert_eq!(parsed.get("bitcoin").and_then(|e| e.usd), Some(65000.0));
    }

    #[test]
    fn parse_price_entry_without_usd() {
        // Provider knows the id but has no USD quote
        let parsed: HashMap<String, PriceEntry> =
            serde_json::from_str(r#"{"bitcoin": {"eur": 60000.5}}"#).unwrap();
        assert!(parsed.get("bitcoin").unwrap().usd.is_none());
    }

    #[test]
    fn parse_price_response_missing_id() {
        let parsed: HashMap<String, PriceEntry> = serde_json::from_str("{}").unwrap();
        assert!(parsed.get("bitcoin").is_none());
    }

    #[test]
    fn parse_search_response_ignores_extra_fields() {
        let raw = r#"{
            "coins": [
                {"id": "dogecoin", "name": "Dogecoin", "symbol": "DOGE", "market_cap_rank": 8, "thumb": "..."},
                {"id": "dogelon-mars", "name": "Dogelon Mars", "symbol": "ELON"}
            ],
            "exchanges": []
        }"#;
        let resp: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(resp.coins.len(), 2);
        assert_eq!(resp.coins[0].id, "dogecoin");
        assert_eq!(resp.coins[0].name.as_deref(), Some("Dogecoin"));
    }

    #[test]
    fn parse_search_response_absent_coins_is_empty() {
        let resp: SearchResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.coins.is_empty());
    }

    #[test]
    fn endpoint_extends_base_path() {
        let client =
            CoinGeckoClient::with_base_url(Url::parse("http://localhost:9999/api/v3").unwrap());
        assert_eq!(
            client.endpoint(&["simple", "price"]).as_str(),
            "http://localhost:9999/api/v3/simple/price"
        );

        // Trailing slash on the base must not produce an empty segment
        let client =
            CoinGeckoClient::with_base_url(Url::parse("http://localhost:9999/api/v3/").unwrap());
        assert_eq!(
            client.endpoint(&["search"]).as_str(),
            "http://localhost:9999/api/v3/search"
        );
    }
}
