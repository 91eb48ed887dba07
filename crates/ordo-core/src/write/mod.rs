//! Minimal mutation writer.
//!
//! Turns an [`OrderPlan`] into the smallest batch of store mutations that
//! realizes it: a child whose stored index already equals its target never
//! appears in the batch, so change tracking downstream of the store only
//! sees children that really moved.


use crate::{
    error::InternalError,
    order::OrderPlan,
    store::ChildStore,
    types::{ChildId, OrderIndex, ParentId},
};

///
/// ChildMutation
///
/// One mechanical store mutation.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChildMutation {
    Create {
        parent: ParentId,
        index: OrderIndex,
    },
    SetIndex {
        child: ChildId,
        index: OrderIndex,
    },
    Delete {
        child: ChildId,
    },
    Reparent {
        child: ChildId,
        parent: ParentId,
        index: OrderIndex,
    },
}

impl ChildMutation {
    /// Child touched by this mutation, if it already exists.
    #[must_use]
    pub const fn child(&self) -> Option<ChildId> {
        match self {
            Self::Create { .. } => None,
            Self::SetIndex { child, .. }
            | Self::Delete { child }
            | Self::Reparent { child, .. } => Some(*child),
        }
    }
}

///
/// MutationBatch
///
/// Ordered mutations for one operation: deletes, then index writes, then
/// creates and reparents. The caller's transaction commits the batch as a
/// unit.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MutationBatch {
    ops: Vec<ChildMutation>,
    skipped: usize,
}

impl MutationBatch {
    /// Diff a plan for `parent` against the stored indices it was built from.
    #[must_use]
    pub fn from_plan(parent: ParentId, plan: &OrderPlan) -> Self {
        let mut batch = Self::default();

        if let Some(removed) = plan.removed {
            batch.ops.push(ChildMutation::Delete { child: removed.id });
        }
        batch.stage_index_writes(plan);
        if let Some(index) = plan.created {
            batch.ops.push(ChildMutation::Create { parent, index });
        }

        batch
    }

    /// Diff the two halves of a transfer.
    ///
    /// `source` must be a remove plan for `child` and `destination` an append
    /// plan; the child is reparented into the append slot instead of being
    /// deleted and recreated.
    pub fn from_transfer(
        child: ChildId,
        source: &OrderPlan,
        destination_parent: ParentId,
        destination: &OrderPlan,
    ) -> Result<Self, InternalError> {
        if source.removed.map(|removed| removed.id) != Some(child) {
            return Err(InternalError::write_internal(format!(
                "transfer source plan does not remove child {child}"
            )));
        }
        let index = destination.created.ok_or_else(|| {
            InternalError::write_internal("transfer destination plan has no append slot")
        })?;

        let mut batch = Self::default();
        batch.stage_index_writes(source);
        batch.stage_index_writes(destination);
        batch.ops.push(ChildMutation::Reparent {
            child,
            parent: destination_parent,
            index,
        });

        Ok(batch)
    }

    fn stage_index_writes(&mut self, plan: &OrderPlan) {
        for target in &plan.targets {
            if target.is_changed() {
                self.ops.push(ChildMutation::SetIndex {
                    child: target.id,
                    index: target.target,
                });
            } else {
                self.skipped += 1;
            }
        }
    }

    #[must_use]
    pub fn ops(&self) -> &[ChildMutation] {
        &self.ops
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.ops.len()
    }

    /// Pre-existing children left untouched because their index was already
    /// correct.
    #[must_use]
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn counts(&self) -> BatchCounts {
        let mut counts = BatchCounts {
            skipped: self.skipped as u64,
            ..BatchCounts::default()
        };
        for op in &self.ops {
            match op {
                ChildMutation::Create { .. } => counts.creates += 1,
                ChildMutation::SetIndex { .. } => counts.index_writes += 1,
                ChildMutation::Delete { .. } => counts.deletes += 1,
                ChildMutation::Reparent { .. } => counts.reparents += 1,
            }
        }

        counts
    }

    /// Index writes staged for `child`, if any.
    #[must_use]
    pub fn index_write_for(&self, child: ChildId) -> Option<OrderIndex> {
        self.ops.iter().find_map(|op| match op {
            ChildMutation::SetIndex { child: c, index } if *c == child => Some(*index),
            _ => None,
        })
    }
}

///
/// BatchCounts
///

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct BatchCounts {
    pub creates: u64,
    pub index_writes: u64,
    pub deletes: u64,
    pub reparents: u64,
    pub skipped: u64,
}

/// Issue every mutation in `batch` against `store`.
///
/// Returns the key of the child created by the batch, if any. A failure
/// leaves earlier mutations staged; the caller's transaction must be dropped.
pub fn apply_batch<S>(store: &mut S, batch: &MutationBatch) -> Result<Option<ChildId>, InternalError>
where
    S: ChildStore + ?Sized,
{
    let mut created = None;

    for op in batch.ops() {
        match *op {
            ChildMutation::Create { parent, index } => {
                created = Some(store.create_child(parent, index)?);
            }
            ChildMutation::SetIndex { child, index } => store.set_index(child, index)?,
            ChildMutation::Delete { child } => store.delete_child(child)?,
            ChildMutation::Reparent {
                child,
                parent,
                index,
            } => store.set_parent(child, parent, index)?,
        }
    }

    Ok(created)
}
