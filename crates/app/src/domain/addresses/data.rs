//! Addresses Data

use crate::domain::addresses::records::AddressRecord;

/// New Address Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAddress {
    pub label: String,
    pub line: String,
    pub city: String,
    pub district: String,
    pub subdistrict: String,
    pub state: String,
}

impl NewAddress {
    /// Name of the first field that is empty or whitespace.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        first_blank([
            ("label", &self.label),
            ("line", &self.line),
            ("city", &self.city),
            ("district", &self.district),
            ("subdistrict", &self.subdistrict),
            ("state", &self.state),
        ])
    }
}

/// Full replacement of an address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressUpdate {
    pub label: String,
    pub line: String,
    pub city: String,
    pub district: String,
    pub subdistrict: String,
    pub state: String,
    pub is_main: bool,
}

impl AddressUpdate {
    /// Name of the first field that is empty or whitespace.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        first_blank([
            ("label", &self.label),
            ("line", &self.line),
            ("city", &self.city),
            ("district", &self.district),
            ("subdistrict", &self.subdistrict),
            ("state", &self.state),
        ])
    }
}

/// Partial update; absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressPatch {
    pub label: Option<String>,
    pub line: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub subdistrict: Option<String>,
    pub state: Option<String>,
    pub is_main: Option<bool>,
}

impl AddressPatch {
    /// Merge the patch over `current`.
    #[must_use]
    pub fn apply(self, current: &AddressRecord) -> AddressUpdate {
        AddressUpdate {
            label: self.label.unwrap_or_else(|| current.label.clone()),
            line: self.line.unwrap_or_else(|| current.line.clone()),
            city: self.city.unwrap_or_else(|| current.city.clone()),
            district: self.district.unwrap_or_else(|| current.district.clone()),
            subdistrict: self.subdistrict.unwrap_or_else(|| current.subdistrict.clone()),
            state: self.state.unwrap_or_else(|| current.state.clone()),
            is_main: self.is_main.unwrap_or(current.is_main),
        }
    }
}

fn first_blank<const N: usize>(fields: [(&'static str, &String); N]) -> Option<&'static str> {
    fields
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;

    use crate::domain::{accounts::records::AccountUuid, addresses::records::AddressUuid};

    use super::*;

    fn current() -> AddressRecord {
        AddressRecord {
            uuid: AddressUuid::new(),
            account_uuid: AccountUuid::new(),
            label: "Home".to_string(),
            line: "Jl. Merdeka 1".to_string(),
            city: "Bandung".to_string(),
            district: "Sumur Bandung".to_string(),
            subdistrict: "Braga".to_string(),
            state: "Jawa Barat".to_string(),
            is_main: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let patch = AddressPatch {
            city: Some("Jakarta".to_string()),
            ..AddressPatch::default()
        };

        let update = patch.apply(&current());

        assert_eq!(update.city, "Jakarta");
        assert_eq!(update.label, "Home");
        assert!(update.is_main);
    }

    #[test]
    fn blank_field_is_reported_by_name() {
        let address = NewAddress {
            label: "Office".to_string(),
            line: "  ".to_string(),
            city: "Bandung".to_string(),
            district: String::new(),
            subdistrict: "Braga".to_string(),
            state: "Jawa Barat".to_string(),
        };

        assert_eq!(address.blank_field(), Some("line"));
    }
}
