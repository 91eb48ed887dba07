use crate::{
    error::InternalError,
    order::OrderedChildren,
    types::{ChildId, ChildRecord, OrderIndex},
};
use std::fmt;

///
/// PlanKind
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PlanKind {
    Append,
    Remove,
    Move,
    Canonical,
}

impl PlanKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Remove => "remove",
            Self::Move => "move",
            Self::Canonical => "canonical",
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

///
/// IndexTarget
///
/// Target index for one pre-existing child, alongside the index it carries
/// right now.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct IndexTarget {
    pub id: ChildId,
    pub current: OrderIndex,
    pub target: OrderIndex,
}

impl IndexTarget {
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.current != self.target
    }
}

///
/// OrderPlan
///
/// Output of the index assigner for one operation.
///
/// Invariant: `targets` lists every surviving pre-existing child in final
/// canonical order, and `targets[i].target == i`. When `created` is set it
/// equals `targets.len()`.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OrderPlan {
    pub kind: PlanKind,
    pub targets: Vec<IndexTarget>,
    pub created: Option<OrderIndex>,
    pub removed: Option<ChildRecord>,

    /// True when this plan rewrites a snapshot that was not already dense.
    pub healed: bool,
}

impl OrderPlan {
    fn new(kind: PlanKind, healed: bool) -> Self {
        Self {
            kind,
            targets: Vec::new(),
            created: None,
            removed: None,
            healed,
        }
    }

    #[must_use]
    pub fn target_of(&self, id: ChildId) -> Option<OrderIndex> {
        self.targets
            .iter()
            .find(|target| target.id == id)
            .map(|target| target.target)
    }

    /// Number of pre-existing children whose index must be rewritten.
    #[must_use]
    pub fn changed_len(&self) -> usize {
        self.targets.iter().filter(|t| t.is_changed()).count()
    }

    /// Child keys in the order this plan leaves them (excluding a created child).
    #[must_use]
    pub fn resulting_ids(&self) -> Vec<ChildId> {
        self.targets.iter().map(|target| target.id).collect()
    }
}

// Assign dense targets 0..n in iteration order.
fn densify<'a>(
    children: impl IntoIterator<Item = &'a ChildRecord>,
) -> Result<Vec<IndexTarget>, InternalError> {
    children
        .into_iter()
        .enumerate()
        .map(|(position, child)| {
            Ok(IndexTarget {
                id: child.id,
                current: child.index,
                target: OrderIndex::from_position(position)?,
            })
        })
        .collect()
}

/// Re-densify a collection without changing its structure.
///
/// Running this over the snapshot a previous canonical plan produced yields
/// no changed targets.
pub fn plan_canonical(children: &OrderedChildren) -> Result<OrderPlan, InternalError> {
    let mut plan = OrderPlan::new(PlanKind::Canonical, !children.is_dense());
    plan.targets = densify(children.iter())?;

    Ok(plan)
}

/// Plan the append of one new child at the end of the collection.
///
/// Existing children are healed to their canonical rank and the new child
/// is given index `n`.
pub fn plan_append(
    children: &OrderedChildren,
    max_children: usize,
) -> Result<OrderPlan, InternalError> {
    let len = children.len();
    let max = max_children.min(OrderIndex::CAPACITY);
    if len >= max {
        return Err(InternalError::capacity_exceeded(len + 1, max));
    }

    let mut plan = OrderPlan::new(PlanKind::Append, !children.is_dense());
    plan.targets = densify(children.iter())?;
    plan.created = Some(OrderIndex::from_position(len)?);

    Ok(plan)
}

/// Plan the removal of `child`.
///
/// Survivors keep their relative canonical order and close the gap.
pub fn plan_remove(children: &OrderedChildren, child: ChildId) -> Result<OrderPlan, InternalError> {
    let position = children.position_of(child).ok_or_else(|| {
        InternalError::order_precondition(format!(
            "cannot remove child {child}: not a member of this collection"
        ))
    })?;

    let slice = children.as_slice();
    let mut plan = OrderPlan::new(PlanKind::Remove, !children.is_dense());
    plan.targets = densify(
        slice
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, child)| child),
    )?;
    plan.removed = Some(slice[position]);

    Ok(plan)
}

/// Plan an array-style move of the child at canonical position `from` to
/// canonical position `to`, where `to` addresses the list after removal.
///
/// `from == to` keeps the canonical order, so on a dense collection it
/// changes no target; a corrupt collection is still healed.
pub fn plan_move(
    children: &OrderedChildren,
    from: usize,
    to: usize,
) -> Result<OrderPlan, InternalError> {
    let len = children.len();
    if from >= len || to >= len {
        return Err(InternalError::order_precondition(format!(
            "move from {from} to {to} out of range for {len} children"
        )));
    }

    let mut reordered: Vec<&ChildRecord> = children.iter().collect();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);

    let mut plan = OrderPlan::new(PlanKind::Move, !children.is_dense());
    plan.targets = densify(reordered)?;

    Ok(plan)
}
