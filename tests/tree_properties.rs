use btree_map::{BTree, BTreeError, Map};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum MapOp {
    Put(i32, i32),
    Remove(i32),
    Get(i32),
    Floor(i32),
    Ceiling(i32),
}

fn key_strategy() -> impl Strategy<Value = i32> {
    -200i32..200
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        4 => (key_strategy(), any::<i32>()).prop_map(|(k, v)| MapOp::Put(k, v)),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::Get),
        1 => key_strategy().prop_map(MapOp::Floor),
        1 => key_strategy().prop_map(MapOp::Ceiling),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_ops_match_btreemap(
        order in 3usize..9,
        ops in prop::collection::vec(map_op_strategy(), 1..400),
    ) {
        let mut tree = BTree::new(order).unwrap();
        let mut model = BTreeMap::new();

        for op in ops {
            match op {
                MapOp::Put(k, v) => {
                    prop_assert_eq!(tree.put(k, v), model.insert(k, v));
                }
                MapOp::Remove(k) => {
                    prop_assert_eq!(tree.remove(&k), model.remove(&k));
                }
                MapOp::Get(k) => {
                    prop_assert_eq!(tree.get(&k), model.get(&k));
                }
                MapOp::Floor(k) => {
                    prop_assert_eq!(tree.floor(&k), model.range(..=k).next_back());
                }
                MapOp::Ceiling(k) => {
                    prop_assert_eq!(tree.ceiling(&k), model.range(k..).next());
                }
            }
            prop_assert!(tree.check_invariants().is_ok(), "{:?}", tree.check_invariants());
            prop_assert_eq!(tree.len(), model.len());
        }

        let expected: Vec<(&i32, &i32)> = model.iter().collect();
        let forward: Vec<(&i32, &i32)> = tree.iter().collect();
        let backward: Vec<(&i32, &i32)> = tree.iter().rev().collect();
        prop_assert_eq!(&forward, &expected);
        prop_assert_eq!(backward, expected.into_iter().rev().collect::<Vec<_>>());
        prop_assert_eq!(tree.min(), model.iter().next());
        prop_assert_eq!(tree.max(), model.iter().next_back());
    }

    #[test]
    fn prop_keys_strictly_increasing(
        order in 3usize..12,
        keys in prop::collection::vec(any::<i64>(), 0..300),
    ) {
        let mut tree = BTree::new(order).unwrap();
        for key in keys {
            tree.put(key, ());
        }
        let keys = tree.keys();
        prop_assert!(keys.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn prop_json_round_trip(entries in prop::collection::btree_map("[a-z]{1,6}", any::<u32>(), 0..100)) {
        let mut source = BTree::new(4).unwrap();
        for (k, v) in &entries {
            source.put(k.clone(), *v);
        }

        let encoded = source.to_json().unwrap();
        let mut target: BTree<String, u32> = BTree::new(3).unwrap();
        target.from_json(&encoded).unwrap();

        prop_assert_eq!(target.keys(), source.keys());
        prop_assert_eq!(target.values(), source.values());
        prop_assert!(target.check_invariants().is_ok());
    }

    #[test]
    fn prop_iter_is_double_ended(
        keys in prop::collection::btree_set(any::<i16>(), 1..200),
        take_front in 0usize..100,
    ) {
        let mut tree = BTree::new(5).unwrap();
        for &key in &keys {
            tree.put(key, ());
        }

        let mut iter = tree.iter();
        let front: Vec<i16> = iter.by_ref().take(take_front).map(|(k, _)| *k).collect();
        prop_assert_eq!(iter.len(), keys.len() - front.len());
        let rest: Vec<i16> = iter.rev().map(|(k, _)| *k).collect();

        let mut joined = front;
        joined.extend(rest.into_iter().rev());
        prop_assert_eq!(joined, keys.into_iter().collect::<Vec<_>>());
    }
}

#[test]
fn test_shuffled_insert_then_remove_all() {
    let mut rng = StdRng::seed_from_u64(0xB7EE);

    for order in 3..=10 {
        let mut keys: Vec<u32> = (0..500).collect();
        keys.shuffle(&mut rng);

        let mut tree = BTree::new(order).unwrap();
        for &key in &keys {
            assert_eq!(tree.put(key, key * 2), None);
        }
        tree.check_invariants().unwrap();
        assert_eq!(tree.len(), keys.len());

        keys.shuffle(&mut rng);
        for (removed, key) in keys.iter().enumerate() {
            assert_eq!(tree.remove(key), Some(key * 2), "order {order}, key {key}");
            tree.check_invariants().unwrap();
            assert_eq!(tree.len(), keys.len() - removed - 1);
        }

        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.min(), None);
    }
}

#[test]
fn test_order_three_scenario() {
    let mut tree = BTree::new(3).unwrap();
    for key in [10, 20, 5, 6, 12, 30, 7, 17] {
        tree.put(key, key.to_string());
    }
    assert_eq!(tree.keys(), vec![&5, &6, &7, &10, &12, &17, &20, &30]);
    tree.check_invariants().unwrap();

    assert_eq!(tree.remove(&6), Some("6".to_string()));
    tree.check_invariants().unwrap();
    assert_eq!(tree.remove(&10), Some("10".to_string()));
    tree.check_invariants().unwrap();
    assert_eq!(tree.keys(), vec![&5, &7, &12, &17, &20, &30]);
}

#[test]
fn test_single_entry_lifecycle() {
    let mut tree = BTree::new(3).unwrap();
    tree.put(1, "one");
    assert_eq!(tree.remove(&1), Some("one"));
    assert!(tree.is_empty());
    assert_eq!(tree.get(&1), None);
    tree.check_invariants().unwrap();
}

#[test]
fn test_overwrite_keeps_size() {
    let mut tree = BTree::new(4).unwrap();
    for key in 0..20 {
        tree.put(key, 0);
    }
    let height = tree.height();
    assert_eq!(tree.put(7, 1), Some(0));
    assert_eq!(tree.len(), 20);
    assert_eq!(tree.height(), height);
    assert_eq!(tree.get(&7), Some(&1));
}

#[test]
fn test_remove_absent_changes_nothing() {
    let mut tree = BTree::new(3).unwrap();
    for key in (0..40).step_by(2) {
        tree.put(key, ());
    }
    let before = tree.to_string();
    assert_eq!(tree.remove(&7), None);
    assert_eq!(tree.remove(&100), None);
    assert_eq!(tree.to_string(), before);
    assert_eq!(tree.len(), 20);
}

#[test]
fn test_cursor_walks_both_ways() {
    let tree: BTree<i32, i32> = (1..=30).map(|k| (k, k * k)).collect();

    let mut cursor = tree.cursor();
    assert!(!cursor.is_valid());
    let mut forward = Vec::new();
    while cursor.next() {
        forward.push(*cursor.key().unwrap());
    }
    assert!(!cursor.is_valid());

    let mut backward = Vec::new();
    while cursor.prev() {
        backward.push(*cursor.key().unwrap());
    }
    backward.reverse();
    assert_eq!(forward, backward);
    assert_eq!(forward, (1..=30).collect::<Vec<_>>());

    assert!(cursor.first());
    assert_eq!(cursor.entry(), Some((&1, &1)));
    assert!(cursor.next_to(|_, v| *v > 100));
    assert_eq!(cursor.key(), Some(&11));
    assert!(cursor.prev_to(|k, _| k % 5 == 0));
    assert_eq!(cursor.key(), Some(&10));
    assert!(cursor.last());
    assert_eq!(cursor.value(), Some(&900));
    assert!(!cursor.next_to(|_, _| true));
}

#[test]
fn test_map_contract_and_errors() {
    fn drain(map: &mut dyn Map<u8, u8>) -> usize {
        let keys: Vec<u8> = map.keys().into_iter().copied().collect();
        keys.iter().filter(|k| map.remove(k).is_some()).count()
    }

    let mut tree = BTree::new(3).unwrap();
    for key in 0..50u8 {
        tree.put(key, key);
    }
    assert_eq!(drain(&mut tree), 50);
    assert!(tree.is_empty());

    assert!(matches!(
        BTree::<u8, u8>::new(2),
        Err(BTreeError::InvalidOrder { order: 2, min: 3 })
    ));
    assert!(matches!(
        tree.from_json(b"not json"),
        Err(BTreeError::Decode(_))
    ));
}
