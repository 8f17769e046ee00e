//! Catalog

use std::{fmt, str::FromStr};

use crate::labels::UnknownLabelError;

/// A cleaning service offered in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ServiceType {
    /// Full wash, inside and out.
    DeepCleaning,

    /// Quick exterior clean.
    RapidCleaning,

    /// Sole and upper repair.
    Repair,
}

impl ServiceType {
    /// Every service type, in catalog order.
    pub const ALL: [ServiceType; 3] = [Self::DeepCleaning, Self::RapidCleaning, Self::Repair];

    /// The persisted label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DeepCleaning => "DEEP_CLEANING",
            Self::RapidCleaning => "RAPID_CLEANING",
            Self::Repair => "REPAIR",
        }
    }
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceType {
    type Err = UnknownLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|service_type| service_type.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownLabelError::new("service type", value))
    }
}
