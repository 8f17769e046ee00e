//! Record identifiers
//!
//! Every table keys its rows with a v7 [`Uuid`]. [`TypedUuid`] tags that uuid
//! with the record it belongs to so an address uuid cannot be passed where a
//! sneaker uuid is expected.

use std::{cmp::Ordering, fmt, hash, marker::PhantomData, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// A [`Uuid`] tagged with the record type it identifies.
///
/// The tag is held as `fn() -> T` so the identifier is `Send`, `Sync` and
/// `Copy` whatever `T` is.
pub struct TypedUuid<T> {
    raw: Uuid,
    record: PhantomData<fn() -> T>,
}

impl<T> TypedUuid<T> {
    /// A fresh time-ordered identifier.
    #[must_use]
    pub fn new() -> Self {
        Self::from_uuid(Uuid::now_v7())
    }

    #[must_use]
    pub const fn from_uuid(raw: Uuid) -> Self {
        Self {
            raw,
            record: PhantomData,
        }
    }

    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.raw
    }

    const fn as_uuid(&self) -> &Uuid {
        &self.raw
    }
}

impl<T> Default for TypedUuid<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for TypedUuid<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for TypedUuid<T> {}

// The tag carries no data, so every comparison goes through the raw uuid.

impl<T> PartialEq for TypedUuid<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_uuid() == other.as_uuid()
    }
}

impl<T> Eq for TypedUuid<T> {}

impl<T> PartialOrd for TypedUuid<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for TypedUuid<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_uuid().cmp(other.as_uuid())
    }
}

impl<T> hash::Hash for TypedUuid<T> {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_uuid().hash(state);
    }
}

impl<T> fmt::Debug for TypedUuid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_uuid())
    }
}

impl<T> fmt::Display for TypedUuid<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_uuid())
    }
}

impl<T> From<Uuid> for TypedUuid<T> {
    fn from(raw: Uuid) -> Self {
        Self::from_uuid(raw)
    }
}

impl<T> From<TypedUuid<T>> for Uuid {
    fn from(id: TypedUuid<T>) -> Self {
        id.into_uuid()
    }
}

impl<T> FromStr for TypedUuid<T> {
    type Err = uuid::Error;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        text.parse::<Uuid>().map(Self::from_uuid)
    }
}

impl<T> Serialize for TypedUuid<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_uuid().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for TypedUuid<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Uuid::deserialize(deserializer).map(Self::from_uuid)
    }
}
