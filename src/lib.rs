//! CoinGecko-backed crypto price lookup.
//!
//! The core operation is [`lookup_price`]: given a free-form token
//! name, query the price endpoint directly and fall back to the search
//! endpoint when the name is not a known provider id. The result is
//! always a structured [`LookupOutcome`] — transport faults and
//! malformed responses are folded into its error variant.
//!
//! Hosts that speak the [`tools::Tool`] interface can mount the same
//! chain through [`CryptoPriceTool`].

pub mod cli;
pub mod lookup;
pub mod tools;
pub mod utils;

pub use lookup::{
    lookup_price, CoinGeckoClient, CoinHit, ErrorResult, FetchError, LookupOutcome, PriceResult,
    PriceSource,
};
pub use tools::crypto_price::CryptoPriceTool;
pub use tools::{Tool, ToolOutput};
