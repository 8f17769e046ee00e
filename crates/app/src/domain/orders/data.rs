//! Orders Data

use shoeclean::{catalog::ServiceType, transactions::TransactionMethod};

use crate::domain::{addresses::records::AddressUuid, sneakers::records::SneakerUuid};

/// New Order Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    /// Pickup and delivery address; must belong to the ordering account.
    pub address: AddressUuid,

    /// Sneakers to clean. Sneakers of other accounts are ignored.
    pub sneakers: Vec<SneakerUuid>,

    pub service_type: ServiceType,

    pub total_pairs: u32,
}

/// How the customer confirms an order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub method: TransactionMethod,
    pub voucher_code: Option<String>,
}
