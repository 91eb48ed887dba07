use crate::{
    config::TieBreak,
    types::{ChildId, ChildRecord},
};

///
/// OrderedChildren
///
/// A parent's children in canonical order.
///
/// Built from a store snapshot on every operation; the stored `index` stays
/// the durable source of truth and this list is its in-memory projection.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct OrderedChildren {
    children: Vec<ChildRecord>,
}

impl OrderedChildren {
    /// Canonicalize a snapshot supplied in fetch order.
    #[must_use]
    pub fn from_snapshot(mut snapshot: Vec<ChildRecord>, tie_break: TieBreak) -> Self {
        // both sorts are stable, so FetchOrder keeps supply order among duplicates
        match tie_break {
            TieBreak::FetchOrder => snapshot.sort_by_key(|child| child.index),
            TieBreak::ChildKey => snapshot.sort_by_key(|child| (child.index, child.id)),
        }

        Self {
            children: snapshot,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn get(&self, position: usize) -> Option<&ChildRecord> {
        self.children.get(position)
    }

    #[must_use]
    pub fn position_of(&self, id: ChildId) -> Option<usize> {
        self.children.iter().position(|child| child.id == id)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ChildRecord> {
        self.children.iter()
    }

    /// Child keys in canonical order.
    #[must_use]
    pub fn ids(&self) -> Vec<ChildId> {
        self.children.iter().map(|child| child.id).collect()
    }

    /// True when every child's stored index equals its canonical position.
    #[must_use]
    pub fn is_dense(&self) -> bool {
        self.children
            .iter()
            .enumerate()
            .all(|(position, child)| usize::try_from(child.index.get()).ok() == Some(position))
    }

    pub(crate) fn as_slice(&self) -> &[ChildRecord] {
        &self.children
    }
}

impl IntoIterator for OrderedChildren {
    type Item = ChildRecord;
    type IntoIter = std::vec::IntoIter<ChildRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.into_iter()
    }
}
