//! Order Pricing

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::vouchers::{AmountType, VoucherDiscount, VoucherType};

/// Errors that can occur while pricing an order.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PricingError {
    /// Catalog prices must be greater than zero.
    #[error("unit price must be greater than zero, got {0}")]
    NonPositiveUnitPrice(Decimal),

    /// An order must contain at least one pair.
    #[error("total pairs must be greater than zero")]
    NoPairs,

    /// Voucher amounts cannot be negative.
    #[error("voucher amount cannot be negative, got {0}")]
    NegativeVoucherAmount(Decimal),

    /// Delivery fees cannot be negative.
    #[error("delivery fee cannot be negative, got {0}")]
    NegativeDeliveryFee(Decimal),

    /// Decimal arithmetic overflowed.
    #[error("order price overflowed")]
    Overflow,
}

/// A fully priced order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderPricing {
    /// Catalog price of a single pair.
    pub unit_price: Decimal,

    /// Number of pairs in the order.
    pub total_pairs: u32,

    /// `unit_price * total_pairs`
    pub subtotal: Decimal,

    /// Voucher discount, never more than `subtotal`.
    pub discount: Decimal,

    /// Flat delivery fee.
    pub delivery_fee: Decimal,

    /// `subtotal - discount + delivery_fee`
    pub total_amount: Decimal,
}

/// Price an order of `total_pairs` pairs at `unit_price` each.
///
/// Voucher amounts larger than the order are clamped: a free pair voucher never
/// frees more pairs than were ordered and a discount never exceeds the subtotal.
///
/// # Errors
///
/// - [`PricingError::NonPositiveUnitPrice`]: `unit_price` is zero or negative.
/// - [`PricingError::NoPairs`]: `total_pairs` is zero.
/// - [`PricingError::NegativeVoucherAmount`]: the voucher amount is negative.
/// - [`PricingError::NegativeDeliveryFee`]: `delivery_fee` is negative.
/// - [`PricingError::Overflow`]: the result does not fit in a [`Decimal`].
pub fn price_order(
    unit_price: Decimal,
    total_pairs: u32,
    voucher: Option<&VoucherDiscount>,
    delivery_fee: Decimal,
) -> Result<OrderPricing, PricingError> {
    if unit_price <= Decimal::ZERO {
        return Err(PricingError::NonPositiveUnitPrice(unit_price));
    }

    if total_pairs == 0 {
        return Err(PricingError::NoPairs);
    }

    if delivery_fee < Decimal::ZERO {
        return Err(PricingError::NegativeDeliveryFee(delivery_fee));
    }

    let subtotal = unit_price
        .checked_mul(Decimal::from(total_pairs))
        .ok_or(PricingError::Overflow)?;

    let discount = match voucher {
        Some(voucher) => voucher_discount(voucher, unit_price, total_pairs, subtotal)?,
        None => Decimal::ZERO,
    };

    let total_amount = subtotal
        .checked_sub(discount)
        .and_then(|net| net.checked_add(delivery_fee))
        .ok_or(PricingError::Overflow)?;

    Ok(OrderPricing {
        unit_price,
        total_pairs,
        subtotal,
        discount,
        delivery_fee,
        total_amount,
    })
}

fn voucher_discount(
    voucher: &VoucherDiscount,
    unit_price: Decimal,
    total_pairs: u32,
    subtotal: Decimal,
) -> Result<Decimal, PricingError> {
    if voucher.amount < Decimal::ZERO {
        return Err(PricingError::NegativeVoucherAmount(voucher.amount));
    }

    let discount = match (voucher.voucher_type, voucher.amount_type) {
        (VoucherType::FreePair, _) => {
            let free_pairs = voucher.amount.trunc().min(Decimal::from(total_pairs));

            unit_price
                .checked_mul(free_pairs)
                .ok_or(PricingError::Overflow)?
        }
        (VoucherType::Discount, AmountType::Amount) => voucher.amount,
        (VoucherType::Discount, AmountType::Percentage) => subtotal
            .checked_mul(voucher.amount)
            .and_then(|scaled| scaled.checked_div(Decimal::ONE_HUNDRED))
            .ok_or(PricingError::Overflow)?
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
    };

    Ok(discount.min(subtotal))
}
