//! Property-based invariant tests for `ObservableMap`.
//!
//! 1. Size and contents track a reference `BTreeMap` under any operation
//!    sequence.
//! 2. Each successful mutation produces exactly one notification with the
//!    right change kind; failed removals produce none.
//! 3. Tokens strictly increase and removed listeners stay silent.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use proptest::prelude::*;
use rtmodel_collections::{CollectionChange, ObservableMap};

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Insert(u8, u8),
    Remove(u8),
    Clear,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..16, any::<u8>()).prop_map(|(k, v)| Op::Insert(k, v)),
        3 => (0u8..16).prop_map(Op::Remove),
        1 => Just(Op::Clear),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1 + 2. Model equivalence and notification accounting
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn map_tracks_reference_model(ops in proptest::collection::vec(op_strategy(), 0..64)) {
        let map: ObservableMap<u8, u8> = ObservableMap::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let log_clone = Rc::clone(&log);
        let _revoker = map.subscribe(move |_, args| {
            log_clone.borrow_mut().push((args.collection_change(), args.key().copied()));
        });

        let mut model = BTreeMap::new();
        let mut expected = Vec::new();
        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    let replaced = model.insert(k, v).is_some();
                    prop_assert_eq!(map.insert(k, v), Ok(replaced));
                    let change = if replaced {
                        CollectionChange::ItemChanged
                    } else {
                        CollectionChange::ItemInserted
                    };
                    expected.push((change, Some(k)));
                }
                Op::Remove(k) => {
                    let removed = model.remove(&k);
                    prop_assert_eq!(map.remove(&k).ok(), removed);
                    if removed.is_some() {
                        expected.push((CollectionChange::ItemRemoved, Some(k)));
                    }
                }
                Op::Clear => {
                    model.clear();
                    prop_assert!(map.clear().is_ok());
                    expected.push((CollectionChange::Reset, None));
                }
            }
            prop_assert_eq!(map.size(), model.len());
        }

        let entries: Vec<(u8, u8)> = model.into_iter().collect();
        prop_assert_eq!(map.entries(), entries);
        prop_assert_eq!(map.version(), expected.len() as u64);
        prop_assert_eq!(&*log.borrow(), &expected);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Token monotonicity and removal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn removed_listeners_stay_silent(
        count in 1usize..8,
        remove_mask in any::<u8>(),
    ) {
        let map: ObservableMap<u8, u8> = ObservableMap::new();
        let hits = Rc::new(RefCell::new(vec![0u32; count]));
        let mut tokens = Vec::new();
        for i in 0..count {
            let hits = Rc::clone(&hits);
            tokens.push(map.add_map_changed(move |_, _| hits.borrow_mut()[i] += 1));
        }
        prop_assert!(tokens.windows(2).all(|w| w[0] < w[1]));

        for (i, token) in tokens.iter().enumerate() {
            if remove_mask & (1 << i) != 0 {
                prop_assert!(map.remove_map_changed(*token));
            }
        }
        map.insert(1, 1).unwrap();

        for (i, hit) in hits.borrow().iter().enumerate() {
            let removed = remove_mask & (1 << i) != 0;
            prop_assert_eq!(*hit, u32::from(!removed));
        }
    }
}
