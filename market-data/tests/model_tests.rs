use common::error::Error;
use market_data::{decode_feed, decode_ticker, decode_tickers, Quote, Ticker, FALLBACK_CIRCULATING_SUPPLY};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

fn quote_json() -> Value {
    json!({
        "price": 27123.45,
        "volume_24h": 1000,
        "volume_24h_change_24h": -3.2,
        "market_cap": 4000,
        "market_cap_change_24h": 0.7,
        "percent_change_1h": 0.1,
        "percent_change_12h": -0.4,
        "percent_change_24h": 2.5,
        "percent_change_7d": 5,
        "percent_change_30d": -10.25,
        "percent_change_1y": 42,
        "ath_price": 68692.137,
        "ath_date": "2021-11-10T16:51:15Z",
        "percent_from_price_ath": -60.51
    })
}

fn ticker_json() -> Value {
    json!({
        "id": "btc-bitcoin",
        "name": "Bitcoin",
        "logo": "https://static.coinpaprika.com/coin/btc-bitcoin/logo.png",
        "symbol": "BTC",
        "rank": 1,
        "circulating_supply": 19350000,
        "total_supply": 19350000,
        "max_supply": 21000000,
        "beta_value": 0.9876,
        "last_updated": "2023-04-22T10:00:00Z",
        "quotes": { "USD": quote_json() }
    })
}

fn decode(value: &Value) -> Result<Ticker, Error> {
    decode_ticker(&value.to_string())
}

#[test]
fn test_decode_full_ticker() {
    let ticker = decode(&ticker_json()).unwrap();

    assert_eq!(ticker.id, "btc-bitcoin");
    assert_eq!(ticker.symbol, "BTC");
    assert_eq!(ticker.rank, 1);
    assert_eq!(ticker.circulating_supply, Some(dec!(19350000)));
    assert_eq!(ticker.max_supply, dec!(21000000));
    assert_eq!(ticker.beta_value, dec!(0.9876));
    assert_eq!(ticker.last_updated, "2023-04-22T10:00:00Z");
    assert!(ticker.totals.is_none());

    let usd = ticker.quote("USD").unwrap();
    assert_eq!(usd.price, 27123.45);
    assert_eq!(usd.percent_change_30d, dec!(-10.25));
    assert_eq!(usd.ath_price, Some(dec!(68692.137)));
    assert!(ticker.quote("EUR").is_none());
}

#[test]
fn test_decode_accepts_string_decimals() {
    let mut value = ticker_json();
    value["total_supply"] = json!("123456789.123456789");
    value["max_supply"] = json!("0");

    let ticker = decode(&value).unwrap();
    assert_eq!(ticker.total_supply, dec!(123456789.123456789));
    assert!(ticker.max_supply.is_zero());
}

const EXACT_NUMBERS_TICKER: &str = r#"{
    "id": "eth-ethereum",
    "name": "Ethereum",
    "symbol": "ETH",
    "rank": 2,
    "circulating_supply": 120345678.987654321987,
    "total_supply": 123456789.123456789,
    "max_supply": 987654321.000000001,
    "beta_value": 1.0123456789012345678,
    "last_updated": "2023-04-22T10:00:00Z",
    "quotes": {
        "USD": {
            "price": 1850.12,
            "volume_24h": 7654321098.123456789012,
            "volume_24h_change_24h": -3.141592653589793238,
            "market_cap": 222222222222.22222222,
            "market_cap_change_24h": 0.1,
            "percent_change_1h": 0.123456789123456789,
            "percent_change_12h": -0.4,
            "percent_change_24h": 2.5,
            "percent_change_7d": 5,
            "percent_change_30d": -10.25,
            "percent_change_1y": 42,
            "ath_price": 4878.26123456789012345
        }
    }
}"#;

#[test]
fn test_decode_numeric_decimals_are_exact() {
    let single = decode_ticker(EXACT_NUMBERS_TICKER).unwrap();
    let from_feed = decode_feed(EXACT_NUMBERS_TICKER).unwrap().remove(0);

    for ticker in [single, from_feed] {
        assert_eq!(ticker.total_supply, dec!(123456789.123456789));
        assert_eq!(ticker.circulating_supply, Some(dec!(120345678.987654321987)));
        assert_eq!(ticker.max_supply, dec!(987654321.000000001));
        assert_eq!(ticker.beta_value, dec!(1.0123456789012345678));

        let usd = ticker.quote("USD").unwrap();
        assert_eq!(usd.price, 1850.12);
        assert_eq!(usd.volume_24h, dec!(7654321098.123456789012));
        assert_eq!(usd.volume_24h_change_24h, dec!(-3.141592653589793238));
        assert_eq!(usd.market_cap, dec!(222222222222.22222222));
        assert_eq!(usd.percent_change_1h, dec!(0.123456789123456789));
        assert_eq!(usd.ath_price, Some(dec!(4878.26123456789012345)));
        assert!(usd.percent_from_price_ath.is_none());
    }
}

#[test]
fn test_decode_missing_required_fields_fails() {
    for field in [
        "id", "name", "symbol", "rank", "total_supply", "max_supply",
        "beta_value", "last_updated", "quotes",
    ] {
        let mut value = ticker_json();
        value.as_object_mut().unwrap().remove(field);

        match decode(&value) {
            Err(Error::Decode(_)) => {}
            other => panic!("missing {} should fail to decode, got {:?}", field, other),
        }
    }
}

#[test]
fn test_decode_wrong_shape_fails() {
    let mut value = ticker_json();
    value["rank"] = json!("first");
    assert!(matches!(decode(&value), Err(Error::Decode(_))));

    let mut value = ticker_json();
    value["quotes"]["USD"].as_object_mut().unwrap().remove("market_cap");
    assert!(matches!(decode(&value), Err(Error::Decode(_))));

    assert!(matches!(decode_ticker("not json"), Err(Error::Decode(_))));
}

#[test]
fn test_decode_optional_fields_may_be_absent() {
    let mut value = ticker_json();
    let obj = value.as_object_mut().unwrap();
    obj.remove("logo");
    obj.remove("circulating_supply");
    let quote = value["quotes"]["USD"].as_object_mut().unwrap();
    quote.remove("ath_price");
    quote.remove("ath_date");
    quote.insert("percent_from_price_ath".to_string(), Value::Null);

    let ticker = decode(&value).unwrap();
    assert!(ticker.logo.is_none());
    assert!(ticker.circulating_supply.is_none());

    let usd = ticker.quote("USD").unwrap();
    assert!(usd.ath_price.is_none());
    assert!(usd.ath_date.is_none());
    assert!(usd.percent_from_price_ath.is_none());
}

#[test]
fn test_circulating_supply_percent() {
    let ticker = decode(&ticker_json()).unwrap();
    assert_eq!(
        ticker.circulating_supply_percent(),
        Some(dec!(19350000) / dec!(21000000))
    );
}

#[test]
fn test_circulating_supply_percent_uses_fallback() {
    let mut value = ticker_json();
    value.as_object_mut().unwrap().remove("circulating_supply");

    let ticker = decode(&value).unwrap();
    assert_eq!(
        ticker.circulating_supply_percent(),
        Some(FALLBACK_CIRCULATING_SUPPLY / dec!(21000000))
    );
}

#[test]
fn test_circulating_supply_percent_undefined_for_zero_max_supply() {
    for circulating in [json!(19350000), json!(0), Value::Null] {
        let mut value = ticker_json();
        value["max_supply"] = json!("0");
        value["circulating_supply"] = circulating;

        let ticker = decode(&value).unwrap();
        assert_eq!(ticker.circulating_supply_percent(), None);
    }
}

#[test]
fn test_derived_metrics_saturate_instead_of_overflowing() {
    let mut ticker = decode(&ticker_json()).unwrap();
    ticker.circulating_supply = Some(Decimal::MAX);
    ticker.max_supply = Decimal::new(1, 28);
    assert_eq!(ticker.circulating_supply_percent(), Some(Decimal::MAX));

    let mut quote = ticker.quote("USD").unwrap().clone();
    quote.volume_24h = Decimal::MAX;
    quote.market_cap = dec!(1);
    assert_eq!(quote.volume_market_cap_rate(), Some(Decimal::MAX));

    quote.volume_24h = Decimal::MIN;
    assert_eq!(quote.volume_market_cap_rate(), Some(Decimal::MIN));
}

#[test]
fn test_volume_market_cap_rate() {
    let quote: Quote = serde_json::from_value(quote_json()).unwrap();
    assert_eq!(quote.volume_market_cap_rate(), Some(dec!(25)));

    let mut zero_cap = quote.clone();
    zero_cap.market_cap = Decimal::ZERO;
    assert_eq!(zero_cap.volume_market_cap_rate(), None);

    let mut zero_volume = quote;
    zero_volume.volume_24h = Decimal::ZERO;
    assert_eq!(zero_volume.volume_market_cap_rate(), Some(Decimal::ZERO));
}

#[test]
fn test_quote_equality_is_structural() {
    let a: Quote = serde_json::from_value(quote_json()).unwrap();
    let b: Quote = serde_json::from_value(quote_json()).unwrap();
    assert_eq!(a, b);

    let mut c = b.clone();
    c.price = 1.0;
    assert_ne!(a, c);
}

#[test]
fn test_totals_are_caller_populated() {
    let mut ticker = decode(&ticker_json()).unwrap();
    ticker.set_totals(1250.0);
    assert_eq!(ticker.totals, Some(1250.0));
}

#[test]
fn test_basic_info() {
    let ticker = decode(&ticker_json()).unwrap();
    let info = ticker.basic_info("USD").unwrap();

    assert_eq!(info.name, "Bitcoin");
    assert_eq!(info.symbol, "BTC");
    assert_eq!(info.logo, "https://static.coinpaprika.com/coin/btc-bitcoin/logo.png");
    assert_eq!(info.price, "27123.45");
    assert_eq!(info.change_1d, "+2.50%");
    assert!(ticker.basic_info("EUR").is_none());
}

#[test]
fn test_decode_collections() {
    let array = json!([ticker_json(), ticker_json()]).to_string();
    assert_eq!(decode_tickers(&array).unwrap().len(), 2);
    assert_eq!(decode_feed(&array).unwrap().len(), 2);
    assert_eq!(decode_feed(&ticker_json().to_string()).unwrap().len(), 1);

    assert!(matches!(decode_tickers(&ticker_json().to_string()), Err(Error::Decode(_))));
    assert!(matches!(decode_feed("[{\"id\": \"x\"}]"), Err(Error::Decode(_))));
}
