//! Sneakers Data

use crate::domain::sneakers::records::SneakerRecord;

/// New Sneaker Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSneaker {
    pub brand: String,
    pub color: String,
    pub image_url: Option<String>,
}

impl NewSneaker {
    /// Name of the first required field that is empty or whitespace.
    #[must_use]
    pub fn blank_field(&self) -> Option<&'static str> {
        if self.brand.trim().is_empty() {
            Some("brand")
        } else if self.color.trim().is_empty() {
            Some("color")
        } else {
            None
        }
    }
}

/// Partial update; absent fields keep their current value.
///
/// `image_url: Some(None)` removes the image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SneakerPatch {
    pub brand: Option<String>,
    pub color: Option<String>,
    pub image_url: Option<Option<String>>,
}

impl SneakerPatch {
    /// Merge the patch over `current`.
    #[must_use]
    pub fn apply(self, current: &SneakerRecord) -> NewSneaker {
        NewSneaker {
            brand: self.brand.unwrap_or_else(|| current.brand.clone()),
            color: self.color.unwrap_or_else(|| current.color.clone()),
            image_url: self.image_url.unwrap_or_else(|| current.image_url.clone()),
        }
    }
}
