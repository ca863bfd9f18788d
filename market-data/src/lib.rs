//! Market quote models decoded from the pricing feed

mod models;
pub mod feed;

pub use models::{Ticker, Quote, BasicCurrencyInfo, FALLBACK_CIRCULATING_SUPPLY};
pub use feed::{decode_feed, decode_ticker, decode_tickers};
