//! Store collaborator boundary.
//!
//! The order engine never owns persistence. It reads a snapshot through
//! [`ChildStore::fetch_children`] and issues mechanical mutations; atomicity
//! belongs to whatever unit of work implements the trait.

mod memory;

use crate::{
    error::InternalError,
    types::{ChildId, ChildRecord, OrderIndex, ParentId},
};

pub use memory::{MemoryStore, StoreTransaction};

///
/// ChildStore
///
/// Persistence operations the order engine consumes.
///
/// `fetch_children` may return children in any order; the order it chooses
/// is the tie-break used by `TieBreak::FetchOrder` and must be stable for
/// the duration of one operation.
///

pub trait ChildStore {
    fn fetch_children(&self, parent: ParentId) -> Result<Vec<ChildRecord>, InternalError>;

    fn create_child(
        &mut self,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<ChildId, InternalError>;

    fn set_index(&mut self, child: ChildId, index: OrderIndex) -> Result<(), InternalError>;

    /// Delete `child`, dropping its parent reference with it.
    fn delete_child(&mut self, child: ChildId) -> Result<(), InternalError>;

    /// Move `child` under `parent` with a fresh index.
    fn set_parent(
        &mut self,
        child: ChildId,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<(), InternalError>;
}

impl<S: ChildStore + ?Sized> ChildStore for &mut S {
    fn fetch_children(&self, parent: ParentId) -> Result<Vec<ChildRecord>, InternalError> {
        (**self).fetch_children(parent)
    }

    fn create_child(
        &mut self,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<ChildId, InternalError> {
        (**self).create_child(parent, index)
    }

    fn set_index(&mut self, child: ChildId, index: OrderIndex) -> Result<(), InternalError> {
        (**self).set_index(child, index)
    }

    fn delete_child(&mut self, child: ChildId) -> Result<(), InternalError> {
        (**self).delete_child(child)
    }

    fn set_parent(
        &mut self,
        child: ChildId,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<(), InternalError> {
        (**self).set_parent(child, parent, index)
    }
}
