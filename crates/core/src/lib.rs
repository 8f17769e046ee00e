//! Shoeclean
//!
//! Domain rules for the Urban Sole Care cleaning service: order pricing, voucher validation and
//! order identifiers. Nothing in this crate performs I/O.

pub mod catalog;
pub mod labels;
pub mod orders;
pub mod pricing;
pub mod transactions;
pub mod vouchers;
