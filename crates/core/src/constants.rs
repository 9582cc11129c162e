use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Percentage that a complete allocation must sum to
pub const FULL_ALLOCATION: Decimal = dec!(100);

/// Smallest percentage a region can hold
pub const MIN_REGION_PERCENT: Decimal = dec!(0);

/// Difference from the saved baseline (in percentage points) that counts as a change.
/// Anything at or below this is treated as rounding noise.
pub const CHANGE_TOLERANCE: Decimal = dec!(1);

/// Decimal places kept for slider-reported percentages
pub const PERCENT_DECIMAL_PRECISION: u32 = 2;

/// Prefix of cache keys for portfolio sets derived from a custom allocation
pub const CUSTOM_PORTFOLIO_SET_PREFIX: &str = "goal";
