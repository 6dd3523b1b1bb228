use rbtree::redblack::Tree;

use quickcheck::TestResult;
use std::collections::{BTreeMap, HashSet};

use crate::{init_logging, Op};

/// Applies a set of operations to a tree and a `BTreeMap`.
/// This way we can ensure that after a random smattering of inserts
/// and deletes we have the same keys and values in both. A key keeps the
/// value it was first inserted with, so the map only takes vacant keys.
fn do_ops<K, V>(ops: &[Op<K, V>], tree: &mut Tree<K, V>, map: &mut BTreeMap<K, V>) -> bool
where
    K: Ord + Clone,
    V: PartialEq + Clone,
{
    for op in ops {
        let agrees = match op {
            Op::Insert(k, v) => {
                let vacant = !map.contains_key(k);
                if vacant {
                    map.insert(k.clone(), v.clone());
                }
                tree.insert(k.clone(), v.clone()) == vacant
            }
            Op::Remove(k) => tree.remove(k) == map.remove(k),
            Op::Range(low, high) => {
                let expected: Vec<_> = if low <= high {
                    map.range(low.clone()..=high.clone()).collect()
                } else {
                    Vec::new()
                };
                tree.range(low, high) == expected
            }
            Op::Iter => tree.iter().eq(map.iter()),
        };
        if !agrees || tree.len() != map.len() {
            return false;
        }
    }

    true
}

fn within_height_bound<K, V>(tree: &Tree<K, V>) -> bool {
    tree.height() as f64 <= 2.0 * ((tree.len() + 1) as f64).log2()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8, i8>>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    let mut map = BTreeMap::new();

    do_ops(&ops, &mut tree, &mut map)
        && map.iter().all(|(key, value)| tree.find(key) == Some(value))
        && within_height_bound(&tree)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }

    xs.iter().all(|x| tree.find(x) == Some(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| tree.find(x).is_none())
}

#[quickcheck]
fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    for x in &xs {
        tree.insert(*x, *x);
    }
    for delete in &deletes {
        tree.delete(delete);
    }

    let mut still_present = xs;
    for delete in &deletes {
        // We may have inserted the same value multiple times - delete each one.
        while let Some(pos) = still_present.iter().position(|x| x == delete) {
            still_present.swap_remove(pos);
        }
    }

    deletes.iter().all(|x| tree.find(x).is_none())
        && still_present.iter().all(|x| tree.find(x).is_some())
}

#[quickcheck]
fn entries_are_sorted_and_sized(xs: Vec<i32>) -> bool {
    init_logging();
    let tree: Tree<_, _> = xs.iter().map(|&x| (x, i64::from(x) * 100)).collect();
    let entries = tree.entries();

    entries.len() == tree.len() && entries.windows(2).all(|pair| pair[0].0 < pair[1].0)
}

#[quickcheck]
fn first_insert_wins(xs: Vec<(u8, u32)>) -> bool {
    init_logging();
    let mut tree = Tree::new();
    let mut first = BTreeMap::new();
    for (key, value) in &xs {
        tree.insert(*key, *value);
        first.entry(*key).or_insert(*value);
    }

    tree.len() == first.len() && tree.iter().eq(first.iter())
}

#[quickcheck]
fn height_is_bounded(n: u8) -> bool {
    init_logging();
    let mut tree = Tree::new();
    for i in 0..n {
        tree.insert(i, i);
    }

    tree.len() == usize::from(n) && within_height_bound(&tree)
}

#[quickcheck]
fn insert_then_delete_restores_size(xs: Vec<i16>, key: i16) -> TestResult {
    init_logging();
    let mut tree: Tree<_, _> = xs.into_iter().map(|x| (x, ())).collect();
    if tree.contains_key(&key) {
        return TestResult::discard();
    }
    let before = tree.len();

    let inserted = tree.insert(key, ());
    let deleted = tree.delete(&key);

    TestResult::from_bool(inserted && deleted && tree.len() == before)
}

#[quickcheck]
fn deleting_every_key_empties_the_tree(xs: Vec<i16>) -> bool {
    init_logging();
    let mut tree: Tree<_, _> = xs.iter().map(|&x| (x, x)).collect();
    for x in &xs {
        tree.delete(x);
        if !within_height_bound(&tree) {
            return false;
        }
    }

    tree.is_empty() && tree.minimum().is_none() && tree.maximum().is_none()
}

#[quickcheck]
fn range_matches_filtered_entries(xs: Vec<i8>, low: i8, high: i8) -> bool {
    init_logging();
    let tree: Tree<_, _> = xs.into_iter().map(|x| (x, x)).collect();
    let expected: Vec<_> = tree
        .entries()
        .into_iter()
        .filter(|(key, _)| low <= **key && **key <= high)
        .collect();

    tree.range(&low, &high) == expected
}

#[quickcheck]
fn minimum_and_maximum_match_model(xs: Vec<i32>) -> bool {
    init_logging();
    let tree: Tree<_, _> = xs.iter().map(|&x| (x, ())).collect();
    let model: BTreeMap<_, _> = xs.iter().map(|&x| (x, ())).collect();

    tree.minimum() == model.iter().next() && tree.maximum() == model.iter().next_back()
}

#[quickcheck]
fn iterators_agree_with_entries(xs: Vec<u16>) -> bool {
    init_logging();
    let tree: Tree<_, _> = xs.into_iter().map(|x| (x, u32::from(x))).collect();
    let entries: Vec<_> = tree
        .entries()
        .into_iter()
        .map(|(key, value)| (*key, *value))
        .collect();

    let forwards: Vec<_> = tree.iter().map(|(key, value)| (*key, *value)).collect();
    let mut backwards: Vec<_> = tree.iter().rev().map(|(key, value)| (*key, *value)).collect();
    backwards.reverse();
    let owned: Vec<_> = tree.into_iter().collect();

    forwards == entries && backwards == entries && owned == entries
}

#[test]
fn duplicate_key_keeps_first_value() {
    init_logging();
    let mut tree = Tree::new();
    tree.insert(1, 100);
    tree.insert(1, 200);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.find(&1), Some(&100));
}

#[test]
fn minimum_and_maximum() {
    init_logging();
    let mut tree = Tree::new();
    for key in [5, 3, 1, 4, 2] {
        tree.insert(key, key * 100);
    }

    assert_eq!(tree.minimum(), Some((&1, &100)));
    assert_eq!(tree.maximum(), Some((&5, &500)));
}

#[test]
fn range_of_middle_keys() {
    init_logging();
    let mut tree = Tree::new();
    for key in 1..=5 {
        tree.insert(key, key * 100);
    }

    assert_eq!(tree.range(&2, &4), vec![(&2, &200), (&3, &300), (&4, &400)]);
}

#[test]
fn delete_on_empty_tree() {
    init_logging();
    let mut tree: Tree<i32, i32> = Tree::new();

    assert!(!tree.delete(&1));
    assert_eq!(tree.len(), 0);
}

#[test]
fn sequential_deletes_stay_balanced() {
    init_logging();
    let mut tree = Tree::new();
    for key in 1..=100 {
        tree.insert(key, key);
    }
    assert_eq!(tree.len(), 100);

    for key in 1..=25usize {
        assert!(tree.delete(&key));
        assert_eq!(tree.len(), 100 - key);
        let bound = 2.0 * ((100 - key + 1) as f64).log2();
        assert!(tree.height() as f64 <= bound);
    }
}

#[test]
fn empty_ranges() {
    init_logging();
    let mut tree = Tree::new();
    assert!(tree.range(&1, &5).is_empty());

    for key in 1..=5 {
        tree.insert(key, key * 100);
    }
    assert!(tree.range(&5, &1).is_empty());
    assert!(tree.range(&6, &10).is_empty());
}
