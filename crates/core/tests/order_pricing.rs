//! Pricing an order end to end: validate the voucher, then price with it.

use jiff::{SignedDuration, Timestamp};
use rust_decimal::Decimal;
use testresult::TestResult;

use shoeclean::{
    pricing::price_order,
    vouchers::{AmountType, Redeemable, VoucherDiscount, VoucherError, VoucherType, validate},
};

#[derive(Debug, Clone)]
struct Voucher {
    discount: VoucherDiscount,
    quantity: i32,
    expired_at: Timestamp,
}

impl Redeemable for Voucher {
    fn remaining_quantity(&self) -> i32 {
        self.quantity
    }

    fn expired_at(&self) -> Timestamp {
        self.expired_at
    }
}

fn voucher(voucher_type: VoucherType, amount: i64, quantity: i32) -> Voucher {
    Voucher {
        discount: VoucherDiscount {
            voucher_type,
            amount_type: AmountType::Amount,
            amount: Decimal::from(amount),
        },
        quantity,
        expired_at: Timestamp::now() + SignedDuration::from_hours(24 * 7),
    }
}

#[test]
fn free_pair_voucher_example() -> TestResult {
    let voucher = validate(voucher(VoucherType::FreePair, 1, 5), Timestamp::now())?;

    let pricing = price_order(
        Decimal::from(15000),
        2,
        Some(&voucher.discount),
        Decimal::ZERO,
    )?;

    assert_eq!(pricing.subtotal, Decimal::from(30000));
    assert_eq!(pricing.discount, Decimal::from(15000));
    assert_eq!(pricing.total_amount, Decimal::from(15000));

    Ok(())
}

#[test]
fn discount_voucher_example() -> TestResult {
    let voucher = validate(voucher(VoucherType::Discount, 10000, 5), Timestamp::now())?;

    let pricing = price_order(
        Decimal::from(15000),
        2,
        Some(&voucher.discount),
        Decimal::ZERO,
    )?;

    assert_eq!(pricing.subtotal, Decimal::from(30000));
    assert_eq!(pricing.discount, Decimal::from(10000));
    assert_eq!(pricing.total_amount, Decimal::from(20000));

    Ok(())
}

#[test]
fn discount_never_exceeds_subtotal() -> TestResult {
    for pairs in 1..=6_u32 {
        for amount in [0_i64, 1, 5, 10, 10_000, 1_000_000] {
            for voucher_type in [VoucherType::FreePair, VoucherType::Discount] {
                let voucher = voucher(voucher_type, amount, 1);
                let pricing = price_order(
                    Decimal::from(12500),
                    pairs,
                    Some(&voucher.discount),
                    Decimal::ZERO,
                )?;

                assert!(
                    pricing.discount >= Decimal::ZERO && pricing.discount <= pricing.subtotal,
                    "discount {} out of range for subtotal {}",
                    pricing.discount,
                    pricing.subtotal
                );
                assert!(
                    pricing.total_amount >= Decimal::ZERO,
                    "negative total for {voucher_type} {amount} x {pairs}"
                );
            }
        }
    }

    Ok(())
}

#[test]
fn exhausted_voucher_is_rejected_before_pricing() {
    let result = validate(voucher(VoucherType::Discount, 10000, 0), Timestamp::now());

    assert!(matches!(result, Err(VoucherError::QuotaExceeded { quantity: 0 })));
}

#[test]
fn expired_voucher_is_rejected_before_pricing() {
    let mut expired = voucher(VoucherType::FreePair, 1, 5);
    expired.expired_at = Timestamp::now() - SignedDuration::from_hours(1);

    let result = validate(expired, Timestamp::now());

    assert!(matches!(result, Err(VoucherError::Expired { .. })));
}
