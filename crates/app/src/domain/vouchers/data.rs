//! Vouchers Data

use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::vouchers::{AmountType, VoucherType};

/// New Voucher Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewVoucher {
    pub code: String,
    pub voucher_type: VoucherType,
    pub amount_type: AmountType,
    pub amount: Decimal,
    pub quantity: i32,
    pub expired_at: Timestamp,
}
