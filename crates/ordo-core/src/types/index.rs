use crate::{error::InternalError, types::ChildId};
use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// OrderIndex
///
/// Durable position of a child within its parent's collection.
///
/// The persisted width is a signed 16-bit integer, so a collection holds at
/// most `OrderIndex::CAPACITY` children. Stored values may be negative or
/// otherwise corrupt; only values produced by `from_position` are dense.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
#[serde(transparent)]
pub struct OrderIndex(i16);

impl OrderIndex {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i16::MAX);

    /// Number of distinct non-negative index values.
    pub const CAPACITY: usize = 1 << 15;

    #[must_use]
    pub const fn new(raw: i16) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> i16 {
        self.0
    }

    /// Convert a canonical position into its stored index.
    pub fn from_position(position: usize) -> Result<Self, InternalError> {
        i16::try_from(position)
            .map(Self)
            .map_err(|_| InternalError::capacity_exceeded(position + 1, Self::CAPACITY))
    }

    /// Returns the canonical position this index denotes, if it is in range
    /// for a collection of `len` children.
    #[must_use]
    pub fn as_position(self, len: usize) -> Option<usize> {
        usize::try_from(self.0).ok().filter(|pos| *pos < len)
    }
}

impl From<OrderIndex> for i16 {
    fn from(index: OrderIndex) -> Self {
        index.0
    }
}

///
/// ChildRecord
///
/// One child as fetched from the store: its key and currently stored index.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChildRecord {
    pub id: ChildId,
    pub index: OrderIndex,
}

impl ChildRecord {
    #[must_use]
    pub const fn new(id: ChildId, index: OrderIndex) -> Self {
        Self { id, index }
    }
}

///
/// TESTS
///
