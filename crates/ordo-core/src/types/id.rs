use derive_more::{Deref, Display};
use ulid::Ulid;

///
/// ParentId
///
/// Key of an entity that owns an ordered child collection.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct ParentId(Ulid);

impl ParentId {
    #[must_use]
    pub const fn new(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(Ulid(n))
    }
}

impl From<Ulid> for ParentId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

///
/// ChildId
///
/// Key of one child record. Child keys are issued by the store and are
/// monotonic in creation order, which `TieBreak::ChildKey` relies on.
///

#[derive(Clone, Copy, Debug, Deref, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(transparent)]
pub struct ChildId(Ulid);

impl ChildId {
    #[must_use]
    pub const fn new(ulid: Ulid) -> Self {
        Self(ulid)
    }

    #[must_use]
    pub const fn from_u128(n: u128) -> Self {
        Self(Ulid(n))
    }
}

impl From<Ulid> for ChildId {
    fn from(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

///
/// TESTS
///
