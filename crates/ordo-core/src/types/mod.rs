mod id;
mod index;

pub use id::{ChildId, ParentId};
pub use index::{ChildRecord, OrderIndex};
