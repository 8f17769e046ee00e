//! Address Handlers

pub(crate) mod create;
pub(crate) mod delete;
pub(crate) mod get;
pub(crate) mod index;
pub(crate) mod main;
pub(crate) mod patch;
pub(crate) mod replace;
