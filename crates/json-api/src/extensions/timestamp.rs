//! Timestamp query parsing helpers.

use jiff::Timestamp;
use salvo::{oapi::extract::QueryParam, prelude::StatusError};

use crate::extensions::*;

pub(crate) trait TimestampQueryExt {
    /// Parse an optional RFC 3339 query parameter named `name`.
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, StatusError>;
}

impl TimestampQueryExt for QueryParam<String, false> {
    fn into_timestamp(self, name: &str) -> Result<Option<Timestamp>, StatusError> {
        self.into_inner()
            .map(|value| value.parse::<Timestamp>())
            .transpose()
            .or_400(&format!("could not parse \"{name}\" query parameter"))
    }
}
