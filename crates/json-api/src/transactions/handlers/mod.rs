//! Transaction Handlers

pub(crate) mod index;
