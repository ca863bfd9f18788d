//! Decoding of pricing feed payloads

use common::error::Result;
use serde_json::Value;
use tracing::debug;

use crate::models::Ticker;

/// Decode a single ticker object
pub fn decode_ticker(json: &str) -> Result<Ticker> {
    Ticker::from_json(json)
}

/// Decode a JSON array of tickers
pub fn decode_tickers(json: &str) -> Result<Vec<Ticker>> {
    let tickers: Vec<Ticker> = serde_json::from_str(json)?;
    debug!("Decoded {} tickers", tickers.len());
    Ok(tickers)
}

/// Decode a payload holding either one ticker object or an array of them
pub fn decode_feed(json: &str) -> Result<Vec<Ticker>> {
    let value: Value = serde_json::from_str(json)?;

    let tickers = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Ticker>>(value)?,
        other => vec![serde_json::from_value::<Ticker>(other)?],
    };

    debug!("Decoded {} tickers from feed", tickers.len());
    Ok(tickers)
}
