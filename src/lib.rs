//! cryptobag: user account orchestration and crypto market quote models
//!
//! Re-exports the member crates so the binary and the integration tests can
//! reach everything through one path.

pub use account_service;
pub use common;
pub use market_data;

pub use account_service::{AccountService, AccountServiceConfig};
pub use common::{Error, Result};
pub use market_data::{Quote, Ticker};
