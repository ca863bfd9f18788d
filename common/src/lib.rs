//! Common types and utilities for cryptobag
//!
//! This library contains the shared error taxonomy, decimal aliases and
//! account domain models used by the account service and the market data
//! crates.

pub mod error;
pub mod model;
pub mod decimal;

/// Re-export important types
pub use error::{Error, Result, ErrorExt, ProviderError, StoreError};
pub use decimal::*;
