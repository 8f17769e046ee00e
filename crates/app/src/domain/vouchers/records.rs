//! Voucher Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::vouchers::{AmountType, Redeemable, VoucherDiscount, VoucherType};

use crate::uuids::TypedUuid;

/// Voucher UUID
pub type VoucherUuid = TypedUuid<VoucherRecord>;

/// Voucher Record
#[derive(Debug, Clone, PartialEq)]
pub struct VoucherRecord {
    pub uuid: VoucherUuid,
    pub code: String,
    pub voucher_type: VoucherType,
    pub amount_type: AmountType,
    pub amount: Decimal,
    pub quantity: i32,
    pub expired_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl VoucherRecord {
    /// The pricing-relevant part of the voucher.
    #[must_use]
    pub fn discount(&self) -> VoucherDiscount {
        VoucherDiscount {
            voucher_type: self.voucher_type,
            amount_type: self.amount_type,
            amount: self.amount,
        }
    }
}

impl Redeemable for VoucherRecord {
    fn remaining_quantity(&self) -> i32 {
        self.quantity
    }

    fn expired_at(&self) -> Timestamp {
        self.expired_at
    }
}
