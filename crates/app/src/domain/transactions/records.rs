//! Transaction Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::{
    catalog::ServiceType,
    transactions::{TransactionMethod, TransactionStatus},
};

use crate::{domain::orders::records::OrderUuid, uuids::TypedUuid};

/// Transaction UUID
pub type TransactionUuid = TypedUuid<TransactionRecord>;

/// Transaction Record
///
/// `total_amount` is the order subtotal, `deduction` the voucher discount and
/// `final_amount` what the customer pays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionRecord {
    pub uuid: TransactionUuid,
    pub order_uuid: OrderUuid,
    pub total_amount: Decimal,
    pub deduction: Decimal,
    pub final_amount: Decimal,
    pub status: TransactionStatus,
    pub method: TransactionMethod,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A transaction joined with its order, as listed to the customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionDetails {
    pub uuid: TransactionUuid,
    pub usc_id: String,
    pub service_type: ServiceType,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub total_amount: Decimal,
    pub method: TransactionMethod,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
}
