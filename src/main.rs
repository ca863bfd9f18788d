//! Local inspection tool for pricing feed payloads

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cryptobag::market_data::{decode_feed, Ticker};
use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// cryptobag CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Set the log level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Commands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a saved feed payload and print one line per ticker
    Quotes {
        /// JSON file holding a ticker object or an array of tickers
        #[arg(short, long)]
        file: PathBuf,

        /// Currency code of the quote to show
        #[arg(short, long, default_value = "USD")]
        currency: String,
    },
}

fn render(ticker: &Ticker, currency: &str) -> String {
    let supply = ticker
        .circulating_supply_percent()
        .map(|p| p.round_dp(4).to_string())
        .unwrap_or_else(|| "n/a".to_string());

    match (ticker.basic_info(currency), ticker.quote(currency)) {
        (Some(info), Some(quote)) => {
            let rate = quote
                .volume_market_cap_rate()
                .map(|r| format!("{}%", r.round_dp(2)))
                .unwrap_or_else(|| "n/a".to_string());
            format!(
                "#{:<4} {:<8} {:<24} {:>16} {:>9}  supply {}  vol/cap {}",
                ticker.rank, info.symbol, info.name, info.price, info.change_1d, supply, rate
            )
        }
        _ => format!(
            "#{:<4} {:<8} {:<24} no {} quote  supply {}",
            ticker.rank, ticker.symbol, ticker.name, currency, supply
        ),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables
    dotenv().ok();

    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cryptobag={0},market_data={0},account_service={0}", cli.log_level)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Quotes { file, currency } => {
            info!("Reading feed from {}", file.display());
            let payload = fs::read_to_string(&file).map_err(|e| {
                error!("Failed to read {}: {}", file.display(), e);
                e
            })?;

            let mut tickers = decode_feed(&payload)?;
            tickers.sort_by_key(|t| t.rank);

            for ticker in &tickers {
                println!("{}", render(ticker, &currency));
            }
            info!("Printed {} tickers", tickers.len());
        }
    }

    Ok(())
}
