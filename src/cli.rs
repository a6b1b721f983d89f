//! CLI argument parsing for the price lookup host.
//!
//! Uses clap for argument parsing with environment variable fallbacks.

use clap::{Parser, ValueHint};
use reqwest::Url;

use crate::lookup::coingecko::COINGECKO_API_BASE;

/// Crypto price lookup host
///
/// Looks up the current USD spot price for one or more token names
/// against the CoinGecko public API, resolving unknown names through
/// the search endpoint.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Token names to look up (e.g. bitcoin, Dogecoin)
    #[arg(required = true, num_args = 1..)]
    pub tokens: Vec<String>,

    /// Base URL of the CoinGecko-compatible API
    #[arg(
        long = "api-base",
        env = "COINGECKO_API_BASE",
        default_value = COINGECKO_API_BASE,
        value_hint = ValueHint::Url
    )]
    pub api_base: Url,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tokens_and_default_base() {
        let args = CliArgs::try_parse_from(["crypto-price", "bitcoin", "Dogecoin"]).unwrap();
        assert_eq!(args.tokens, vec!["bitcoin", "Dogecoin"]);
        assert_eq!(args.api_base.as_str(), "https://api.coingecko.com/api/v3");
    }

    #[test]
    fn requires_at_least_one_token() {
        assert!(CliArgs::try_parse_from(["crypto-price"]).is_err());
    }

    #[test]
    fn rejects_invalid_api_base() {
        let result =
            CliArgs::try_parse_from(["crypto-price", "--api-base", "not a url", "bitcoin"]);
        assert!(result.is_err());
    }
}
