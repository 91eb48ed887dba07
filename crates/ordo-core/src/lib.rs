//! Core runtime for Ordo: dense order-index maintenance for parent-owned
//! child collections.
//!
//! Order is never stored as a list. Each child carries a durable `index`, and
//! every structural operation (append, remove, move, transfer) rebuilds the
//! canonical order from those indices, assigns a dense `0..n` sequence, and
//! writes only the children whose index actually changes. Gaps and
//! duplicates left behind by partial writes or merges are repaired by the
//! next operation on the collection.
//!
//! Layers, leaves first:
//! - `order`: pure index assignment over a snapshot.
//! - `write`: minimal diff of a plan into store mutations.
//! - `store`: the persistence collaborator and an in-memory reference store.
//! - `session`: the operation surface used by callers.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod obs;
pub mod order;
pub mod session;
pub mod store;
pub mod traits;
pub mod types;
pub mod write;

///
/// CONSTANTS
///

/// Largest number of children one parent can hold with a 16-bit index.
pub const MAX_CHILDREN: usize = types::OrderIndex::CAPACITY;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        traits::{CollectionKind, Path},
        types::{ChildId, ChildRecord, OrderIndex, ParentId},
    };
}
