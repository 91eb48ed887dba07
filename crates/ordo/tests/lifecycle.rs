mod fixtures;

use fixtures::{PURCHASE, PurchaseModels, TRAIN_A, TRAIN_B, TrainMembers, dense, index_set, indices_of, seed};
use ordo::{
    ErrorKind,
    core::obs::{metrics_report, metrics_reset_all},
    prelude::*,
};

#[test]
fn children_survive_reload_in_stored_order() {
    let mut store = MemoryStore::new();
    let (a, b, c) = {
        let mut session = OrderSession::new(&mut store);
        let mut models = session.collection::<PurchaseModels>(PURCHASE);
        let a = models.add_child().unwrap();
        let b = models.add_child().unwrap();
        let c = models.add_child().unwrap();
        models.move_child(2, 0).unwrap();
        (a, b, c)
    };

    // a fresh session sees only the durable indices
    let mut session = OrderSession::new(&mut store);
    let children = session.collection::<PurchaseModels>(PURCHASE).children().unwrap();

    assert_eq!(children.ids(), vec![c, a, b]);
    assert_eq!(children.position_of(a), Some(1));
}

#[test]
fn failed_operation_leaves_transaction_empty_and_store_untouched() {
    let mut store = MemoryStore::new();
    let ids = seed(&mut store, TRAIN_A, &[0, 1, 1]);

    let mut txn = store.transaction();
    let result = OrderSession::new(&mut txn)
        .collection::<TrainMembers>(TRAIN_A)
        .move_child(1, 7);
    let err = ordo::Error::from(result.unwrap_err());

    assert_eq!(err.kind, ErrorKind::Precondition);
    assert!(err.is_caller_error());
    txn.rollback();

    assert_eq!(indices_of(&store, &ids), vec![Some(0), Some(1), Some(1)]);
    assert!(store.write_log().is_empty());
}

#[test]
fn several_operations_commit_as_one_unit() {
    let mut store = MemoryStore::new();
    seed(&mut store, TRAIN_A, &[0, 1]);

    let mut txn = store.transaction();
    {
        let mut session = OrderSession::new(&mut txn);
        let mut members = session.collection::<TrainMembers>(TRAIN_A);
        members.add_child().unwrap();
        members.move_child(2, 0).unwrap();
        let first = members.children().unwrap().ids()[0];
        members.remove_child(first).unwrap();
    }
    txn.commit();

    assert_eq!(store.commits(), 1);
    assert_eq!(index_set(&store, TRAIN_A), dense(2));
}

#[test]
fn transfer_moves_member_between_trains() {
    let mut store = MemoryStore::new();
    let a = seed(&mut store, TRAIN_A, &[0, 1, 2]);
    let b = seed(&mut store, TRAIN_B, &[0, 1]);

    let mut session = OrderSession::new(&mut store);
    let report = session
        .collection::<TrainMembers>(TRAIN_A)
        .transfer_child(a[1], TRAIN_B)
        .unwrap();

    assert!(!report.healed);
    assert_eq!(report.index_writes(), 1);
    assert_eq!(store.parent_of(a[1]), Some(TRAIN_B));
    assert_eq!(indices_of(&store, &a), vec![Some(0), Some(2), Some(1)]);
    assert_eq!(indices_of(&store, &b), vec![Some(0), Some(1)]);
    assert_eq!(index_set(&store, TRAIN_A), dense(2));
    assert_eq!(index_set(&store, TRAIN_B), dense(3));
}

#[test]
fn transfer_of_foreign_child_is_rejected() {
    let mut store = MemoryStore::new();
    seed(&mut store, TRAIN_A, &[0]);
    let b = seed(&mut store, TRAIN_B, &[0]);

    let mut session = OrderSession::new(&mut store);
    let err = session
        .collection::<TrainMembers>(TRAIN_A)
        .transfer_child(b[0], TRAIN_B)
        .unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(store.parent_of(b[0]), Some(TRAIN_B));
}

#[test]
fn config_loaded_from_json_drives_session() {
    let config = OrderConfig::from_json_str(r#"{ "max_children": 2, "tie_break": "child_key" }"#)
        .unwrap();
    let mut store = MemoryStore::new();
    seed(&mut store, PURCHASE, &[0]);

    let mut session = OrderSession::with_config(&mut store, config).unwrap();
    let mut models = session.collection::<PurchaseModels>(PURCHASE);
    models.add_child().unwrap();
    let err = ordo::Error::from(models.add_child().unwrap_err());

    assert_eq!(err.kind, ErrorKind::Capacity);
}

#[test]
fn global_metrics_track_writes_and_heals() {
    metrics_reset_all();

    let mut store = MemoryStore::new();
    seed(&mut store, PURCHASE, &[3, 3]);

    let mut session = OrderSession::new(&mut store);
    let mut models = session.collection::<PurchaseModels>(PURCHASE);
    models.add_child().unwrap();
    models.move_child(0, 0).unwrap();
    assert!(models.move_child(0, 9).is_err());

    let report = metrics_report();
    assert_eq!(report.ops.add_calls, 1);
    assert_eq!(report.ops.move_calls, 2);
    assert_eq!(report.ops.rejected_calls, 1);
    assert_eq!(report.ops.creates, 1);
    assert_eq!(report.ops.index_writes, 2);
    assert_eq!(report.ops.heals, 1);

    let counters = &report.collections[PurchaseModels::PATH];
    assert_eq!(counters.calls, 3);
    assert_eq!(counters.skipped_writes, 3);
}

#[test]
fn inspect_then_heal_through_next_operation() {
    let mut store = MemoryStore::new();
    let ids = seed(&mut store, PURCHASE, &[5, -2, 5]);

    let mut session = OrderSession::new(&mut store);
    let mut models = session.collection::<PurchaseModels>(PURCHASE);
    let before = models.inspect().unwrap();
    assert!(!before.is_dense());
    assert_eq!(before.gaps, vec![0, 1, 2]);

    models.remove_child(ids[1]).unwrap();
    assert!(models.inspect().unwrap().is_dense());
    assert_eq!(indices_of(&store, &ids), vec![Some(0), None, Some(1)]);
}

#[test]
fn debug_session_behaves_like_quiet_session() {
    let config = OrderConfig::from_json_str(r#"{ "debug": true }"#).unwrap();
    let mut store = MemoryStore::new();
    let ids = seed(&mut store, PURCHASE, &[1, 1]);

    let mut session = OrderSession::with_config(&mut store, config).unwrap();
    assert!(session.config().debug);
    let mut models = session.collection::<PurchaseModels>(PURCHASE);
    models.add_child().unwrap();
    assert!(models.move_child(0, 5).is_err());

    let mut session = OrderSession::new(&mut store).debug();
    session
        .collection::<PurchaseModels>(PURCHASE)
        .move_child(0, 1)
        .unwrap();

    assert_eq!(indices_of(&store, &ids), vec![Some(1), Some(0)]);
    assert_eq!(index_set(&store, PURCHASE), dense(3));
}
