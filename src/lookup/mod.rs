//! Price lookup with search fallback.
//!
//! The chain is linear: lowercase the token name, try it as a provider
//! id against the price endpoint, and on a miss resolve the name via
//! the search endpoint and fetch the price for the top-ranked hit.
//! Every failure mode comes back as a [`LookupOutcome`] — the operation
//! never surfaces an error to the caller.

pub mod coingecko;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use coingecko::{CoinGeckoClient, CoinHit, FetchError};

/// Read side of a price provider.
///
/// Implemented by [`CoinGeckoClient`] for production; tests drive the
/// lookup chain through an in-memory stub.
#[async_trait]
pub trait PriceSource: Send + Sync {
    /// USD spot price for a provider id, `None` when the provider has
    /// no USD quote under that id.
    async fn simple_price_usd(&self, id: &str) -> Result<Option<f64>, FetchError>;

    /// Candidate coins for a free-form query, in provider ranking order.
    async fn search_coins(&self, query: &str) -> Result<Vec<CoinHit>, FetchError>;
}

/// Successful lookup: the caller's token name echoed back plus a
/// display price string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceResult {
    pub token: String,
    pub price: String,
}

impl PriceResult {
    fn direct(token: &str, usd: f64) -> Self {
        Self {
            token: token.to_string(),
            price: format!("${} USD", usd),
        }
    }

    fn resolved(token: &str, usd: f64, id: &str) -> Self {
        Self {
            token: token.to_string(),
            price: format!("${} USD (found as {})", usd, id),
        }
    }
}

/// Failed lookup with a human-readable message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResult {
    pub error: String,
}

impl ErrorResult {
    fn no_match(token: &str) -> Self {
        Self {
            error: format!("Could not find {} or its price.", token),
        }
    }

    fn price_missing(token: &str) -> Self {
        Self {
            error: format!("Could not find price for {}.", token),
        }
    }
}

impl From<FetchError> for ErrorResult {
    fn from(err: FetchError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}

/// Outcome of a single lookup.
///
/// Serializes untagged, so a hit is `{"token": ..., "price": ...}` and
/// a miss is `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LookupOutcome {
    Price(PriceResult),
    Error(ErrorResult),
}

/// Look up the USD price for a free-form token name.
///
/// Total over its inputs: transport faults and malformed responses are
/// converted into [`LookupOutcome::Error`], never propagated.
pub async fn lookup_price<S: PriceSource>(source: &S, token_name: &str) -> LookupOutcome {
    match run_chain(source, token_name).await {
        Ok(outcome) => outcome,
        Err(err) => LookupOutcome::Error(ErrorResult::from(err)),
    }
}

async fn run_chain<S: PriceSource>(
    source: &S,
    token_name: &str,
) -> Result<LookupOutcome, FetchError> {
    let key = token_name.to_lowercase();

    if let Some(usd) = source.simple_price_usd(&key).await? {
        return Ok(LookupOutcome::Price(PriceResult::direct(token_name, usd)));
    }

    debug!(token = token_name, "direct lookup missed, trying search");

    // Search with the original casing; the provider does its own matching
    let hits = source.search_coins(token_name).await?;
    let first = match hits.first() {
        Some(hit) => hit,
        None => return Ok(LookupOutcome::Error(ErrorResult::no_match(token_name))),
    };

    match source.simple_price_usd(&first.id).await? {
        Some(usd) => Ok(LookupOutcome::Price(PriceResult::resolved(
            token_name, usd, &first.id,
        ))),
        None => Ok(LookupOutcome::Error(ErrorResult::price_missing(token_name))),
    }
}
