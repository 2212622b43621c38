use std::collections::HashMap;

use trinary::tree::{Key, Tree};

use crate::Op;

/// Applies a set of operations to a tree and a multiset model. This way
/// we can ensure that after a random smattering of inserts and deletes
/// we have the same key occurrences as the model.
fn apply(ops: &[Op], tree: &mut Tree, model: &mut HashMap<Key, usize>) {
    for op in ops {
        match *op {
            Op::Insert(key) => {
                tree.insert(key);
                *model.entry(key).or_insert(0) += 1;
            }
            Op::Delete(key) => {
                let expected = match model.get_mut(&key) {
                    Some(count) => {
                        *count -= 1;
                        if *count == 0 {
                            model.remove(&key);
                        }
                        true
                    }
                    None => false,
                };
                assert_eq!(tree.delete(key), expected);
            }
        }
    }
}

quickcheck::quickcheck! {
    fn matches_multiset_model(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        let mut model = HashMap::new();
        apply(&ops, &mut tree, &mut model);

        let mut tallied: HashMap<Key, usize> = HashMap::new();
        for (_, key) in tree.levels() {
            *tallied.entry(key).or_insert(0) += 1;
        }

        tree.len() == model.values().sum::<usize>()
            && tallied == model
            && model.iter().all(|(&key, &count)| tree.count(key) == count)
    }
}

quickcheck::quickcheck! {
    fn deleting_an_absent_key_changes_nothing(xs: Vec<i8>, probe: i8) -> bool {
        let mut tree = Tree::new();
        for &x in &xs {
            tree.insert(Key::from(x));
        }
        let probe = Key::from(probe);
        if tree.contains(probe) {
            return true;
        }

        let before: Vec<_> = tree.levels().collect();
        !tree.delete(probe) && tree.levels().collect::<Vec<_>>() == before
    }
}

quickcheck::quickcheck! {
    fn duplicates_survive_deletion_one_at_a_time(key: i8, n: u8) -> bool {
        let n = usize::from(n % 8) + 1;
        let key = Key::from(key);
        let mut tree = Tree::new();
        for _ in 0..n {
            tree.insert(key);
        }

        for remaining in (0..n).rev() {
            if !tree.delete(key) || tree.count(key) != remaining {
                return false;
            }
        }
        !tree.delete(key) && tree.is_empty()
    }
}

quickcheck::quickcheck! {
    fn level_indices_are_contiguous(ops: Vec<Op>) -> bool {
        let mut tree = Tree::new();
        let mut model = HashMap::new();
        apply(&ops, &mut tree, &mut model);

        let mut previous = None;
        for (level, _) in tree.levels() {
            let expected = match previous {
                None => level == 0,
                Some(p) => level == p || level == p + 1,
            };
            if !expected {
                return false;
            }
            previous = Some(level);
        }
        true
    }
}
