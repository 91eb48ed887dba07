mod fixtures;

use fixtures::{TRAIN_A, TrainMembers, dense, index_set, seed};
use ordo::prelude::*;
use proptest::prelude::*;

///
/// Op
/// One structural operation; positions are reduced modulo the live length.
///

#[derive(Clone, Debug)]
enum Op {
    Add,
    Remove(usize),
    Move(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        Just(Op::Add),
        any::<usize>().prop_map(Op::Remove),
        (any::<usize>(), any::<usize>()).prop_map(|(from, to)| Op::Move(from, to)),
    ]
}

fn arb_corrupt_indices() -> impl Strategy<Value = Vec<i16>> {
    prop::collection::vec(-4i16..16, 0..10)
}

fn apply(session: &mut OrderSession<&mut MemoryStore>, op: &Op) {
    let mut members = session.collection::<TrainMembers>(TRAIN_A);
    let len = members.children().unwrap().len();

    match *op {
        Op::Add => {
            members.add_child().unwrap();
        }
        Op::Remove(_) | Op::Move(..) if len == 0 => {}
        Op::Remove(at) => {
            let victim = members.children().unwrap().ids()[at % len];
            members.remove_child(victim).unwrap();
        }
        Op::Move(from, to) => {
            members.move_child(from % len, to % len).unwrap();
        }
    }
}

proptest! {
    #[test]
    fn any_operation_sequence_ends_dense(
        start in arb_corrupt_indices(),
        ops in prop::collection::vec(arb_op(), 1..16),
    ) {
        let mut store = MemoryStore::new();
        seed(&mut store, TRAIN_A, &start);

        let mut session = OrderSession::new(&mut store);
        for op in &ops {
            apply(&mut session, op);

            let len = session.collection::<TrainMembers>(TRAIN_A).children().unwrap().len();
            let store = session.store();
            prop_assert_eq!(index_set(store, TRAIN_A), dense(len));
        }
    }

    #[test]
    fn append_gives_new_child_index_len(start in arb_corrupt_indices()) {
        let mut store = MemoryStore::new();
        seed(&mut store, TRAIN_A, &start);

        let mut session = OrderSession::new(&mut store);
        let before = session.collection::<TrainMembers>(TRAIN_A).children().unwrap();
        let created = session.collection::<TrainMembers>(TRAIN_A).add_child().unwrap();
        let after = session.collection::<TrainMembers>(TRAIN_A).children().unwrap();

        let mut expected = before.ids();
        expected.push(created);
        prop_assert_eq!(after.ids(), expected);
        prop_assert!(after.is_dense());
    }

    #[test]
    fn healed_collection_needs_no_further_writes(start in arb_corrupt_indices()) {
        prop_assume!(start.len() >= 2);

        let mut store = MemoryStore::new();
        seed(&mut store, TRAIN_A, &start);

        let mut session = OrderSession::new(&mut store);
        let last = start.len() - 1;
        session.collection::<TrainMembers>(TRAIN_A).move_child(last, 0).unwrap();

        let snapshot = store.fetch_children(TRAIN_A).unwrap();
        let children = OrderedChildren::from_snapshot(snapshot, TieBreak::FetchOrder);
        let plan = ordo::core::order::plan_canonical(&children).unwrap();

        prop_assert_eq!(plan.changed_len(), 0);
    }

    #[test]
    fn move_never_touches_children_outside_span(
        len in 1usize..12,
        from_seed in any::<usize>(),
        to_seed in any::<usize>(),
    ) {
        let (from, to) = (from_seed % len, to_seed % len);
        let mut store = MemoryStore::new();
        let ids = seed(&mut store, TRAIN_A, &dense(len));

        let mut session = OrderSession::new(&mut store);
        session.collection::<TrainMembers>(TRAIN_A).move_child(from, to).unwrap();

        let (lo, hi) = (from.min(to), from.max(to));
        for (position, id) in ids.iter().enumerate() {
            if position < lo || position > hi {
                prop_assert!(!store.write_log().iter().any(|op| op.child() == Some(*id)));
            }
        }
    }
}
