//! Money
//!
//! Amounts are carried as `u64` minor units (kobo). Formatting for display goes
//! through `rusty_money` so templates never hand-roll currency strings.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso};
use thiserror::Error;

/// An amount too large to be represented for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("amount {0} is too large to display")]
pub struct AmountOverflow(pub u64);

/// Format minor units as a Naira string, e.g. `₦5,675.00`.
///
/// # Errors
///
/// Returns [`AmountOverflow`] when the amount does not fit in an `i64`.
pub fn format_amount(amount: u64) -> Result<String, AmountOverflow> {
    let minor = i64::try_from(amount).map_err(|_overflow| AmountOverflow(amount))?;

    Ok(Money::from_minor(minor, iso::NGN).to_string())
}

/// `rate` percent of `amount`, rounded half away from zero to a whole minor unit.
///
/// Negative rates are treated as zero. Saturates at `u64::MAX`.
pub fn percentage_of(amount: u64, rate: Decimal) -> u64 {
    let rate = rate.max(Decimal::ZERO);

    Decimal::from(amount)
        .checked_mul(rate)
        .and_then(|value| value.checked_div(Decimal::ONE_HUNDRED))
        .map_or(u64::MAX, |value| {
            value
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
                .to_u64()
                .unwrap_or(u64::MAX)
        })
}
