//! Order Records

use jiff::Timestamp;
use rust_decimal::Decimal;
use shoeclean::{catalog::ServiceType, orders::OrderStatus, pricing::OrderPricing};

use crate::{
    domain::{
        accounts::records::AccountUuid,
        addresses::records::{AddressRecord, AddressUuid},
        catalogs::records::CatalogUuid,
        sneakers::records::SneakerUuid,
        vouchers::records::VoucherUuid,
    },
    uuids::TypedUuid,
};

/// Order UUID
pub type OrderUuid = TypedUuid<OrderRecord>;

/// Order Record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub uuid: OrderUuid,
    pub usc_id: String,
    pub account_uuid: AccountUuid,
    pub address_uuid: AddressUuid,
    pub catalog_uuid: CatalogUuid,
    pub voucher_uuid: Option<VoucherUuid>,
    pub status: OrderStatus,
    pub total_pairs: u32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A priced view of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDetails {
    pub usc_id: String,
    pub address: AddressRecord,
    pub sneakers: Vec<SneakerUuid>,
    pub total_pairs: u32,
    pub service_type: ServiceType,
    pub status: OrderStatus,
    pub voucher_code: Option<String>,
    pub price: Decimal,
    pub subtotal: Decimal,
    pub discount: Decimal,
    pub delivery_fee: Decimal,
    pub total_amount: Decimal,
}

impl OrderDetails {
    pub(crate) fn new(
        order: &OrderRecord,
        address: AddressRecord,
        sneakers: Vec<SneakerUuid>,
        service_type: ServiceType,
        voucher_code: Option<String>,
        pricing: &OrderPricing,
    ) -> Self {
        Self {
            usc_id: order.usc_id.clone(),
            address,
            sneakers,
            total_pairs: order.total_pairs,
            service_type,
            status: order.status,
            voucher_code,
            price: pricing.unit_price,
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            delivery_fee: pricing.delivery_fee,
            total_amount: pricing.total_amount,
        }
    }
}
