//! Market data models

use std::collections::HashMap;

use common::decimal::{precision, Amount, Percent, Supply};
use common::error::Result;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Numerator used for the circulating supply ratio when the feed does not
/// report a circulating supply.
pub const FALLBACK_CIRCULATING_SUPPLY: Supply = dec!(1000000);

/// Tradable asset with per-currency market statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticker {
    /// Caller-populated total, never part of the feed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<f64>,
    /// Coin id, e.g. btc-bitcoin
    pub id: String,
    /// Coin name, e.g. Bitcoin
    pub name: String,
    /// Logo URL
    #[serde(default)]
    pub logo: Option<String>,
    /// Coin symbol, e.g. BTC
    pub symbol: String,
    /// Position in the market capitalization ranking
    pub rank: i64,
    /// Coins circulating on the market, `None` when unknown
    #[serde(default)]
    pub circulating_supply: Option<Supply>,
    /// Total number of coins
    pub total_supply: Supply,
    /// Maximum number of coins that could exist
    pub max_supply: Supply,
    /// Volatility metric
    pub beta_value: Decimal,
    /// Last update time as reported by the feed
    pub last_updated: String,
    /// Market data keyed by currency code
    pub quotes: HashMap<String, Quote>,
}

impl Ticker {
    /// Decode a ticker from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode a ticker from JSON bytes
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Circulating supply / max supply.
    ///
    /// `None` only when `max_supply` is zero. A missing circulating supply is
    /// replaced by [`FALLBACK_CIRCULATING_SUPPLY`]. Results beyond the
    /// `Decimal` range saturate.
    pub fn circulating_supply_percent(&self) -> Option<Percent> {
        if self.max_supply.is_zero() {
            return None;
        }

        let circulating = self.circulating_supply.unwrap_or(FALLBACK_CIRCULATING_SUPPLY);
        Some(saturating_div(circulating, self.max_supply))
    }

    /// Quote for a currency code
    pub fn quote(&self, currency: &str) -> Option<&Quote> {
        self.quotes.get(currency)
    }

    /// Set the caller-computed total
    pub fn set_totals(&mut self, totals: f64) {
        self.totals = Some(totals);
    }

    /// Display summary in one currency
    pub fn basic_info(&self, currency: &str) -> Option<BasicCurrencyInfo> {
        let quote = self.quote(currency)?;

        Some(BasicCurrencyInfo {
            name: self.name.clone(),
            symbol: self.symbol.clone(),
            logo: self.logo.clone().unwrap_or_default(),
            price: format!("{:.2}", quote.price),
            change_1d: format_change(quote.percent_change_24h),
        })
    }
}

/// Coin market data in one currency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Price
    pub price: f64,
    /// Volume from last 24h
    pub volume_24h: Amount,
    /// Volume change in last 24h
    pub volume_24h_change_24h: Percent,
    /// Market capitalization
    pub market_cap: Amount,
    /// Market capitalization change in last 24h
    pub market_cap_change_24h: Percent,
    pub percent_change_1h: Percent,
    pub percent_change_12h: Percent,
    pub percent_change_24h: Percent,
    pub percent_change_7d: Percent,
    pub percent_change_30d: Percent,
    pub percent_change_1y: Percent,
    /// All time high price
    #[serde(default)]
    pub ath_price: Option<Decimal>,
    /// All time high date
    #[serde(default)]
    pub ath_date: Option<String>,
    /// Percentage price change from the all time high
    #[serde(default)]
    pub percent_from_price_ath: Option<Percent>,
}

impl Quote {
    /// 24h volume as a percentage of market capitalization, `None` only when
    /// the market cap is zero
    pub fn volume_market_cap_rate(&self) -> Option<Percent> {
        if self.market_cap.is_zero() {
            return None;
        }

        Some(saturating_div(self.volume_24h, self.market_cap).saturating_mul(dec!(100)))
    }
}

/// Condensed ticker view for list display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicCurrencyInfo {
    pub name: String,
    pub symbol: String,
    pub logo: String,
    pub price: String,
    pub change_1d: String,
}

/// Division clamped to the `Decimal` range. `divisor` must be non-zero.
fn saturating_div(dividend: Decimal, divisor: Decimal) -> Decimal {
    dividend.checked_div(divisor).unwrap_or_else(|| {
        if dividend.is_sign_negative() == divisor.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        }
    })
}

fn format_change(change: Percent) -> String {
    let rounded = change.round_dp_with_strategy(
        precision::PERCENT_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    );

    if rounded.is_zero() {
        "0.00%".to_string()
    } else if rounded.is_sign_positive() {
        format!("+{:.2}%", rounded)
    } else {
        format!("{:.2}%", rounded)
    }
}
