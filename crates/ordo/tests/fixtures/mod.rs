#![allow(dead_code)]

use ordo::prelude::*;

///
/// PurchaseModels
/// The models that belong to one purchase.
///

pub struct PurchaseModels;

impl Path for PurchaseModels {
    const PATH: &'static str = "fixtures::PurchaseModels";
}

impl CollectionKind for PurchaseModels {}

///
/// TrainMembers
/// The members that make up one composite train.
///

pub struct TrainMembers;

impl Path for TrainMembers {
    const PATH: &'static str = "fixtures::TrainMembers";
}

impl CollectionKind for TrainMembers {}

pub const PURCHASE: ParentId = ParentId::from_u128(0x0001);
pub const TRAIN_A: ParentId = ParentId::from_u128(0x0A00);
pub const TRAIN_B: ParentId = ParentId::from_u128(0x0B00);

/// Seed one child per stored index, in fetch order.
pub fn seed(store: &mut MemoryStore, parent: ParentId, indices: &[i16]) -> Vec<ChildId> {
    indices
        .iter()
        .map(|index| store.insert_raw(parent, OrderIndex::new(*index)).unwrap())
        .collect()
}

/// Stored index of each child, `None` once deleted.
pub fn indices_of(store: &MemoryStore, ids: &[ChildId]) -> Vec<Option<i16>> {
    ids.iter()
        .map(|id| store.index_of(*id).map(OrderIndex::get))
        .collect()
}

/// Sorted stored indices of every child of `parent`.
pub fn index_set(store: &MemoryStore, parent: ParentId) -> Vec<i16> {
    let mut indices = store
        .fetch_children(parent)
        .unwrap()
        .into_iter()
        .map(|child| child.index.get())
        .collect::<Vec<_>>();
    indices.sort_unstable();

    indices
}

pub fn dense(len: usize) -> Vec<i16> {
    (0..len).map(|i| i16::try_from(i).unwrap()).collect()
}
