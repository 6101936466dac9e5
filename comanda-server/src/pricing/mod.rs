//! Order pricing engine
//!
//! Money calculation using rust_decimal for precision. All arithmetic is
//! done in `Decimal` internally; amounts are stored/serialized as `f64`
//! rounded to 2 decimal places on the way out.
//!
//! The total of an order is the sum over its items of the dish price plus
//! the item's change prices. The tip is tracked on the order separately
//! and is never folded into the total.

use rust_decimal::prelude::*;
use thiserror::Error;

use crate::db::models::OrderItem;
use crate::utils::AppError;

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed price per dish or change (€1,000,000)
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Price validation failure, tied to the offending field
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PriceError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{0} must be non-negative")]
    Negative(&'static str),

    #[error("{0} exceeds the maximum allowed price")]
    TooLarge(&'static str),
}

impl PriceError {
    /// The request field this failure refers to
    pub fn field(&self) -> &'static str {
        match self {
            PriceError::NotFinite(f) | PriceError::Negative(f) | PriceError::TooLarge(f) => f,
        }
    }
}

impl From<PriceError> for AppError {
    fn from(e: PriceError) -> Self {
        AppError::field(e.field(), e.to_string())
    }
}

/// Convert f64 to Decimal for calculation
///
/// Input values should be pre-validated via [`validate_items`] at the
/// boundary. If NaN/Infinity somehow reaches here, logs an error and
/// returns ZERO to avoid silent data corruption.
#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_else(|| {
        tracing::error!(value = ?value, "Non-finite f64 in monetary calculation, defaulting to zero");
        Decimal::ZERO
    })
}

/// Convert Decimal back to f64 for storage, rounded to 2 decimal places
#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .expect("Decimal rounded to 2dp is always representable as f64")
}

/// Validate order items before totaling
///
/// Dish prices must be finite, non-negative and bounded; change prices
/// must be finite and bounded but may be negative (discounts).
pub fn validate_items(items: &[OrderItem]) -> Result<(), PriceError> {
    for item in items {
        if !item.dish_price.is_finite() {
            return Err(PriceError::NotFinite("dish_price"));
        }
        if item.dish_price < 0.0 {
            return Err(PriceError::Negative("dish_price"));
        }
        if item.dish_price > MAX_PRICE {
            return Err(PriceError::TooLarge("dish_price"));
        }
        for change in &item.change_list {
            if !change.change_price.is_finite() {
                return Err(PriceError::NotFinite("change_price"));
            }
            if change.change_price.abs() > MAX_PRICE {
                return Err(PriceError::TooLarge("change_price"));
            }
        }
    }
    Ok(())
}

/// Compute an order's tip-exclusive total
///
/// total = Σ over items of (dish_price + Σ change_price)
pub fn order_total(items: &[OrderItem]) -> Decimal {
    let mut total = Decimal::ZERO;
    for item in items {
        total += to_decimal(item.dish_price);
        for change in &item.change_list {
            total += to_decimal(change.change_price);
        }
    }
    total
}

#[cfg(test)]
mod tests;
