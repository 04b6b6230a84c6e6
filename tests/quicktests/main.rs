use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;

use ordered_bst::{arena, boxed};

/// Generates the same property tests for each tree flavor. The invoking module must have a
/// generic `Tree` type in scope.
macro_rules! tree_quicktests {
    () => {
        use std::collections::{BTreeMap, HashSet};

        use quickcheck_macros::quickcheck;

        use crate::Op;

        /// Applies a set of operations to a tree and a map counting how many copies of each value
        /// it should hold. Every deletion and search is checked against the map as it happens.
        fn do_ops(ops: &[Op<i8>], bst: &mut Tree<i8>, counts: &mut BTreeMap<i8, usize>) -> bool {
            for op in ops {
                match op {
                    Op::Insert(x) => {
                        bst.insert(*x);
                        *counts.entry(*x).or_default() += 1;
                    }
                    Op::Delete(x) => {
                        let expected = match counts.get_mut(x) {
                            Some(count) if *count > 0 => {
                                *count -= 1;
                                Some(*x)
                            }
                            _ => None,
                        };
                        if bst.delete(x) != expected {
                            return false;
                        }
                    }
                    Op::Find(x) => {
                        let present = counts.get(x).map_or(false, |count| *count > 0);
                        if bst.find(x).is_some() != present {
                            return false;
                        }
                    }
                }
            }
            true
        }

        #[quickcheck]
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut counts = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut counts)
                && tree.len() == counts.values().sum::<usize>()
                && counts
                    .iter()
                    .all(|(x, count)| (tree.find(x) == Some(x)) == (*count > 0))
        }

        #[quickcheck]
        fn contains(xs: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            tree.len() == xs.len() && xs.iter().all(|x| tree.find(x) == Some(x))
        }

        #[quickcheck]
        fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }
            let added: HashSet<_> = xs.into_iter().collect();
            let nots: HashSet<_> = nots.into_iter().collect();
            let mut nots = nots.difference(&added);

            nots.all(|x| tree.find(x).is_none() && tree.find_by(|v| v == x).is_none())
        }

        #[quickcheck]
        fn with_deletions(xs: Vec<i8>, deletes: Vec<i8>) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }
            let inserted = xs.len();
            let mut removed = 0;
            for delete in &deletes {
                // We may have inserted the same value multiple times - delete each one.
                while tree.delete(delete).is_some() {
                    removed += 1;
                }
            }

            let mut still_present = xs;
            still_present.retain(|x| !deletes.contains(x));

            tree.len() == still_present.len()
                && removed + still_present.len() == inserted
                && deletes.iter().all(|x| tree.find(x).is_none())
                && still_present.iter().all(|x| tree.find(x).is_some())
        }

        #[quickcheck]
        fn delete_absent_leaves_rendering(xs: Vec<i8>, absent: i8) -> bool {
            let mut tree = Tree::new();
            for x in xs.iter().filter(|x| **x != absent) {
                tree.insert(*x);
            }
            let before = tree.to_string();

            tree.delete(&absent).is_none() && tree.to_string() == before
        }

        #[quickcheck]
        fn find_by_agrees_with_find(xs: Vec<i8>, wanted: i8) -> bool {
            let mut tree = Tree::new();
            for x in &xs {
                tree.insert(*x);
            }

            tree.find_by(|v| *v == wanted) == tree.find(&wanted)
        }
    };
}

mod boxed_tree {
    use ordered_bst::boxed::Tree;

    tree_quicktests!();
}

mod arena_tree {
    use ordered_bst::arena::Tree;

    tree_quicktests!();
}

/// An enum for the various kinds of "things" to do to
/// binary search trees in a quicktest.
#[derive(Copy, Clone, Debug)]
pub enum Op<T> {
    /// Insert the T into the data structure
    Insert(T),
    /// Delete one copy of the T from the data structure
    Delete(T),
    /// Look the T up
    Find(T),
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Delete(T::arbitrary(g)),
            2 => Op::Find(T::arbitrary(g)),
            _ => unreachable!(),
        }
    }
}

/// Both flavors build identical shapes from identical operations.
#[quickcheck]
fn flavors_agree(ops: Vec<Op<i8>>) -> bool {
    let mut boxed = boxed::Tree::new();
    let mut arena = arena::Tree::new();
    for op in &ops {
        match op {
            Op::Insert(x) => {
                boxed.insert(*x);
                arena.insert(*x);
            }
            Op::Delete(x) => {
                if boxed.delete(x) != arena.delete(x) {
                    return false;
                }
            }
            Op::Find(x) => {
                if boxed.find(x) != arena.find(x) {
                    return false;
                }
            }
        }
    }

    boxed.len() == arena.len() && boxed.to_string() == arena.to_string()
}
