use clap::Parser;
use crypto_price::cli::CliArgs;
use crypto_price::lookup::{lookup_price, CoinGeckoClient};
use crypto_price::utils::logging::init_logging;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let args = CliArgs::parse();
    let client = CoinGeckoClient::with_base_url(args.api_base.clone());

    for token in &args.tokens {
        info!("Looking up {}...", token);
        let outcome = lookup_price(&client, token).await;

        // Results go to stdout; diagnostics stay on the tracing side
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    Ok(())
}
