//! Shoeclean Domain Concerns

pub mod accounts;
pub mod addresses;
pub mod catalogs;
pub mod notifications;
pub mod orders;
pub mod sneakers;
pub mod transactions;
pub mod vouchers;
