//! Business rules
//!
//! The flat delivery fee and tax policy, and the checkout total derived from them.

use rust_decimal::Decimal;

use crate::{
    delivery::Destination,
    locations::LocationCostTable,
    money::percentage_of,
    validation::{ValidationError, non_negative},
};

/// Upper bound for the tax rate, in percent.
pub const MAX_TAX_RATE: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places a stored tax rate keeps.
pub const TAX_RATE_SCALE: u32 = 2;

/// Store-wide pricing policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessRules {
    /// Flat delivery fee in minor units, used when no location override applies.
    pub delivery_fee: u64,

    /// Tax rate in percent, within `0..=100`, with at most two decimal places.
    pub tax_rate: Decimal,

    /// Whether tax is charged at all.
    pub tax_enabled: bool,
}

impl Default for BusinessRules {
    fn default() -> Self {
        Self {
            delivery_fee: 0,
            tax_rate: Decimal::ZERO,
            tax_enabled: false,
        }
    }
}

/// A partial change to [`BusinessRules`]. Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BusinessRulesUpdate {
    /// New flat fee. Must not be negative.
    pub delivery_fee: Option<i64>,

    /// New tax rate. Must be within `0..=100`.
    pub tax_rate: Option<Decimal>,

    /// New tax switch.
    pub tax_enabled: Option<bool>,
}

impl BusinessRulesUpdate {
    /// Whether the update changes nothing.
    pub fn is_empty(&self) -> bool {
        self.delivery_fee.is_none() && self.tax_rate.is_none() && self.tax_enabled.is_none()
    }
}

/// Where the delivery fee of an [`OrderTotal`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeSource {
    /// The flat fee from the business rules.
    Flat,

    /// A location cost table override.
    Location,
}

/// Breakdown of a checkout total. All amounts in minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTotal {
    /// Sum of line items.
    pub subtotal: u64,

    /// Delivery fee charged.
    pub delivery_fee: u64,

    /// Tax charged on the subtotal only.
    pub tax: u64,

    /// `subtotal + delivery_fee + tax`.
    pub total: u64,

    /// Origin of `delivery_fee`.
    pub fee_source: FeeSource,
}

impl BusinessRules {
    /// Validate every supplied field, then merge into a new record.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming the first invalid field. `self` is never modified.
    pub fn apply(&self, update: &BusinessRulesUpdate) -> Result<Self, ValidationError> {
        let delivery_fee = update
            .delivery_fee
            .map(|fee| non_negative("deliveryFee", fee))
            .transpose()?;

        let tax_rate = update.tax_rate.map(validate_tax_rate).transpose()?;

        Ok(Self {
            delivery_fee: delivery_fee.unwrap_or(self.delivery_fee),
            tax_rate: tax_rate.unwrap_or(self.tax_rate),
            tax_enabled: update.tax_enabled.unwrap_or(self.tax_enabled),
        })
    }

    /// Tax owed on `subtotal`. Zero whenever tax is disabled.
    pub fn tax_on(&self, subtotal: u64) -> u64 {
        if self.tax_enabled {
            percentage_of(subtotal, self.tax_rate)
        } else {
            0
        }
    }

    /// Total for `subtotal`, preferring `location_fee` over the flat fee when given.
    pub fn order_total(&self, subtotal: u64, location_fee: Option<u64>) -> OrderTotal {
        let (delivery_fee, fee_source) = match location_fee {
            Some(fee) => (fee, FeeSource::Location),
            None => (self.delivery_fee, FeeSource::Flat),
        };

        let tax = self.tax_on(subtotal);

        OrderTotal {
            subtotal,
            delivery_fee,
            tax,
            total: subtotal.saturating_add(delivery_fee).saturating_add(tax),
            fee_source,
        }
    }
}

fn validate_tax_rate(rate: Decimal) -> Result<Decimal, ValidationError> {
    if rate < Decimal::ZERO || rate > MAX_TAX_RATE {
        return Err(ValidationError::OutOfRange {
            field: "taxRate",
            min: 0,
            max: 100,
        });
    }

    let rate = rate.normalize();

    if rate.scale() > TAX_RATE_SCALE {
        return Err(ValidationError::Invalid {
            field: "taxRate",
            reason: format!("at most {TAX_RATE_SCALE} decimal places are allowed"),
        });
    }

    Ok(rate)
}

/// Checkout total for `subtotal` delivered to `destination`.
///
/// The fee is the table's override for the destination when one exists, otherwise
/// the flat fee. Without a destination the flat fee always applies.
pub fn compute_order_total(
    rules: &BusinessRules,
    table: &LocationCostTable,
    subtotal: u64,
    destination: Option<&Destination>,
) -> OrderTotal {
    let location_fee = destination.and_then(|destination| table.cost_for(destination));

    rules.order_total(subtotal, location_fee)
}
