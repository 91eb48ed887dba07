//! ## Crate layout
//! - `core`: order engine, store boundary, session facade, and observability.
//! - `error`: public error type with a stable kind + origin taxonomy.
//!
//! The `prelude` mirrors the surface used by application code that owns
//! ordered collections.

pub use ordo_core as core;

pub mod error;

pub use error::{Error, ErrorKind, ErrorOrigin};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        config::{OrderConfig, TieBreak},
        diagnostics::OrderReport,
        order::OrderedChildren,
        session::{Collection, OrderSession, WriteReport},
        store::{ChildStore, MemoryStore, StoreTransaction},
        traits::{CollectionKind, Path},
        types::{ChildId, ChildRecord, OrderIndex, ParentId},
    };
    pub use crate::error::Error;
}
