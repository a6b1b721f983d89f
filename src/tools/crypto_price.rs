//! Crypto price lookup tool.

use std::time::Instant;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;

use super::{Tool, ToolOutput};
use crate::lookup::{lookup_price, CoinGeckoClient, LookupOutcome, PriceSource};

/// Crypto price lookup tool.
///
/// Wraps the lookup chain for hosts that consume [`Tool`]
/// implementations. The query string is the token name.
#[derive(Debug, Clone)]
pub struct CryptoPriceTool<S = CoinGeckoClient> {
    source: S,
}

impl Default for CryptoPriceTool {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoPriceTool {
    pub fn new() -> Self {
        Self {
            source: CoinGeckoClient::new(),
        }
    }
}

impl<S: PriceSource> CryptoPriceTool<S> {
    /// Build the tool over a custom price source.
    pub fn with_source(source: S) -> Self {
        Self { source }
    }

    /// Build the context JSON envelope around a lookup outcome.
    fn build_context(&self, outcome: &LookupOutcome) -> Result<String> {
        let context = PriceLookupContext {
            source: "coingecko",
            as_of: Utc::now().to_rfc3339(),
            currency: "USD",
            result: outcome,
        };

        serde_json::to_string(&context).context("Failed to serialize price context")
    }
}

#[async_trait]
impl<S: PriceSource> Tool for CryptoPriceTool<S> {
    fn name(&self) -> &str {
        "CryptoPrice"
    }

    async fn invoke(&self, query: &str) -> Result<ToolOutput> {
        let start = Instant::now();

        let outcome = lookup_price(&self.source, query).await;
        let data = self.build_context(&outcome)?;
        let fetch_time_ms = start.elapsed().as_millis() as u64;

        Ok(ToolOutput {
            name: self.name().to_string(),
            data,
            fetch_time_ms,
        })
    }
}

#[derive(Debug, Serialize)]
struct PriceLookupContext<'a> {
    source: &'static str,
    as_of: String,
    currency: &'static str,
    result: &'a LookupOutcome,
}
