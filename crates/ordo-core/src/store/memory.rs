use crate::{
    error::InternalError,
    store::ChildStore,
    types::{ChildId, ChildRecord, OrderIndex, ParentId},
    write::ChildMutation,
};
use std::{
    collections::BTreeMap,
    time::{SystemTime, UNIX_EPOCH},
};
use ulid::Ulid;

///
/// ChildRow
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct ChildRow {
    parent: ParentId,
    index: OrderIndex,
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
        })
}

///
/// KeyGenerator
///
/// Monotonic child-key generator; increments within the same millisecond
/// so keys always sort in creation order.
///

#[derive(Debug)]
struct KeyGenerator {
    previous: Ulid,
}

impl Default for KeyGenerator {
    fn default() -> Self {
        Self {
            previous: Ulid::nil(),
        }
    }
}

impl KeyGenerator {
    fn generate(&mut self) -> Result<ChildId, InternalError> {
        let ts = now_millis();

        // same ms, or the clock went backward
        let next = if ts <= self.previous.timestamp_ms() {
            self.previous
                .increment()
                .ok_or_else(|| InternalError::store_internal("child key generator overflow"))?
        } else {
            Ulid::from_parts(ts, 0)
        };
        self.previous = next;

        Ok(ChildId::new(next))
    }
}

///
/// MemoryStore
///
/// Reference in-memory child store.
///
/// Children are fetched in key order. Direct [`ChildStore`] calls commit
/// immediately; [`MemoryStore::transaction`] stages a batch and commits it
/// all at once.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: BTreeMap<ChildId, ChildRow>,
    keys: KeyGenerator,
    write_log: Vec<ChildMutation>,
    commits: u64,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a unit of work over this store.
    pub fn transaction(&mut self) -> StoreTransaction<'_> {
        StoreTransaction {
            store: self,
            overlay: BTreeMap::new(),
            staged: Vec::new(),
        }
    }

    /// Insert a child row verbatim, bypassing the order engine and the write
    /// log. Used to import existing data, including corrupt indices.
    pub fn insert_raw(
        &mut self,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<ChildId, InternalError> {
        let id = self.keys.generate()?;
        self.rows.insert(id, ChildRow { parent, index });

        Ok(id)
    }

    #[must_use]
    pub fn index_of(&self, child: ChildId) -> Option<OrderIndex> {
        self.rows.get(&child).map(|row| row.index)
    }

    #[must_use]
    pub fn parent_of(&self, child: ChildId) -> Option<ParentId> {
        self.rows.get(&child).map(|row| row.parent)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Every committed mutation, in commit order.
    #[must_use]
    pub fn write_log(&self) -> &[ChildMutation] {
        &self.write_log
    }

    /// Number of committed units of work, counting autocommitted calls.
    #[must_use]
    pub const fn commits(&self) -> u64 {
        self.commits
    }

    fn row_mut(&mut self, child: ChildId) -> Result<&mut ChildRow, InternalError> {
        self.rows
            .get_mut(&child)
            .ok_or_else(|| InternalError::store_not_found(child))
    }

    fn log(&mut self, op: ChildMutation) {
        self.write_log.push(op);
        self.commits += 1;
    }
}

impl ChildStore for MemoryStore {
    fn fetch_children(&self, parent: ParentId) -> Result<Vec<ChildRecord>, InternalError> {
        Ok(self
            .rows
            .iter()
            .filter(|(_, row)| row.parent == parent)
            .map(|(id, row)| ChildRecord::new(*id, row.index))
            .collect())
    }

    fn create_child(
        &mut self,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<ChildId, InternalError> {
        let id = self.keys.generate()?;
        self.rows.insert(id, ChildRow { parent, index });
        self.log(ChildMutation::Create { parent, index });

        Ok(id)
    }

    fn set_index(&mut self, child: ChildId, index: OrderIndex) -> Result<(), InternalError> {
        self.row_mut(child)?.index = index;
        self.log(ChildMutation::SetIndex { child, index });

        Ok(())
    }

    fn delete_child(&mut self, child: ChildId) -> Result<(), InternalError> {
        self.rows
            .remove(&child)
            .ok_or_else(|| InternalError::store_not_found(child))?;
        self.log(ChildMutation::Delete { child });

        Ok(())
    }

    fn set_parent(
        &mut self,
        child: ChildId,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<(), InternalError> {
        *self.row_mut(child)? = ChildRow { parent, index };
        self.log(ChildMutation::Reparent {
            child,
            parent,
            index,
        });

        Ok(())
    }
}

///
/// StoreTransaction
///
/// Staged unit of work over a [`MemoryStore`].
///
/// Reads observe staged rows first and fall back to committed rows.
/// Nothing reaches the store until [`StoreTransaction::commit`]; dropping
/// the transaction discards every staged mutation.
///

pub struct StoreTransaction<'a> {
    store: &'a mut MemoryStore,
    overlay: BTreeMap<ChildId, Option<ChildRow>>,
    staged: Vec<ChildMutation>,
}

impl StoreTransaction<'_> {
    fn row(&self, child: ChildId) -> Option<ChildRow> {
        match self.overlay.get(&child) {
            Some(staged) => *staged,
            None => self.store.rows.get(&child).copied(),
        }
    }

    fn require_row(&self, child: ChildId) -> Result<ChildRow, InternalError> {
        self.row(child)
            .ok_or_else(|| InternalError::store_not_found(child))
    }

    /// Mutations staged so far, in issue order.
    #[must_use]
    pub fn staged(&self) -> &[ChildMutation] {
        &self.staged
    }

    /// Apply every staged mutation to the store.
    pub fn commit(self) {
        let Self {
            store,
            overlay,
            staged,
        } = self;

        for (id, row) in overlay {
            match row {
                Some(row) => {
                    store.rows.insert(id, row);
                }
                None => {
                    store.rows.remove(&id);
                }
            }
        }
        store.write_log.extend(staged);
        store.commits += 1;
    }

    /// Discard every staged mutation.
    pub fn rollback(self) {}
}

impl ChildStore for StoreTransaction<'_> {
    fn fetch_children(&self, parent: ParentId) -> Result<Vec<ChildRecord>, InternalError> {
        let mut merged = BTreeMap::new();

        for (id, row) in &self.store.rows {
            if row.parent == parent && !self.overlay.contains_key(id) {
                merged.insert(*id, row.index);
            }
        }
        for (id, row) in &self.overlay {
            if let Some(row) = row
                && row.parent == parent
            {
                merged.insert(*id, row.index);
            }
        }

        Ok(merged
            .into_iter()
            .map(|(id, index)| ChildRecord::new(id, index))
            .collect())
    }

    fn create_child(
        &mut self,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<ChildId, InternalError> {
        let id = self.store.keys.generate()?;
        self.overlay.insert(id, Some(ChildRow { parent, index }));
        self.staged.push(ChildMutation::Create { parent, index });

        Ok(id)
    }

    fn set_index(&mut self, child: ChildId, index: OrderIndex) -> Result<(), InternalError> {
        let row = self.require_row(child)?;
        self.overlay.insert(child, Some(ChildRow { index, ..row }));
        self.staged.push(ChildMutation::SetIndex { child, index });

        Ok(())
    }

    fn delete_child(&mut self, child: ChildId) -> Result<(), InternalError> {
        self.require_row(child)?;
        self.overlay.insert(child, None);
        self.staged.push(ChildMutation::Delete { child });

        Ok(())
    }

    fn set_parent(
        &mut self,
        child: ChildId,
        parent: ParentId,
        index: OrderIndex,
    ) -> Result<(), InternalError> {
        self.require_row(child)?;
        self.overlay.insert(child, Some(ChildRow { parent, index }));
        self.staged.push(ChildMutation::Reparent {
            child,
            parent,
            index,
        });

        Ok(())
    }
}
