//! Order Handlers

pub(crate) mod confirm;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod preview;
