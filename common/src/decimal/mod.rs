//! Decimal type utilities for exact supply and percentage figures

use rust_decimal::Decimal;
pub use rust_decimal_macros::dec;

/// Token count (circulating, total or maximum supply)
pub type Supply = Decimal;

/// Currency-denominated amount such as volume or market capitalization
pub type Amount = Decimal;

/// Percentage or ratio value
pub type Percent = Decimal;

/// Precision helpers for display
pub mod precision {
    /// Percentage precision used in summaries (2 decimal places)
    pub const PERCENT_PRECISION: u32 = 2;
}
