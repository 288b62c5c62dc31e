pub mod error;
pub mod index;
pub mod verify;

pub use error::{join_ids, join_links, Link, TreeError};
pub use index::{index, verify_order, HeadChildren, TreeIndex};
pub use verify::{verify_head_closure, HeadClosureError};

#[cfg(test)]
mod tests {
    use super::*;
    use msf_protocol::{FeatureBundle, FeatureLayer, Node, NodeId, Sentence, Upos};
    use proptest::prelude::*;

    /// One `X` node per entry; `heads[i]` is the head of node `i + 1`.
    fn sentence(heads: &[u32]) -> Sentence {
        Sentence::new(
            heads
                .iter()
                .enumerate()
                .map(|(i, &head)| Node::new(i as u32 + 1, "w", "w", Upos::X, head, "dep"))
                .collect(),
        )
    }

    fn ids(raw: &[u32]) -> Vec<NodeId> {
        raw.iter().copied().map(NodeId).collect()
    }

    #[test]
    fn test_pairs_are_ancestor_first_with_sorted_children() {
        // 3 is the root; 1 and 5 hang from 3, 2 and 4 from 1
        let index = index(&sentence(&[3, 1, 0, 1, 3])).unwrap();

        assert_eq!(index.root(), NodeId(3));
        assert_eq!(index.pairs().len(), 2);
        assert_eq!(index.pairs()[0].head, NodeId(3));
        assert_eq!(index.pairs()[0].children, ids(&[1, 5]));
        assert_eq!(index.children(NodeId(1)), ids(&[2, 4]).as_slice());
        assert!(index.children(NodeId(5)).is_empty());

        let heads: Vec<NodeId> = index.bottom_up().map(|pair| pair.head).collect();
        assert_eq!(heads, ids(&[1, 3]));
    }

    #[test]
    fn test_single_word_sentence_has_no_pairs() {
        let index = index(&sentence(&[0])).unwrap();
        assert!(index.pairs().is_empty());
        assert_eq!(index.root(), NodeId(1));
    }

    #[test]
    fn test_malformed_trees() {
        assert_eq!(index(&sentence(&[])).unwrap_err(), TreeError::NoRoot);
        assert_eq!(
            index(&sentence(&[0, 0, 1])).unwrap_err(),
            TreeError::MultipleRoots(ids(&[1, 2]))
        );

        let err = index(&sentence(&[0, 9])).unwrap_err();
        assert_eq!(err.code(), "TREE_DANGLING_2");

        // 2 -> 3 -> 2, detached from the root
        let err = index(&sentence(&[0, 3, 2])).unwrap_err();
        assert_eq!(err, TreeError::Cycle(ids(&[2, 3])));
        assert_eq!(err.code(), "TREE_CYCLE_2-3");

        let mut dup = sentence(&[0, 1]);
        dup.nodes[1].id = NodeId(1);
        assert_eq!(index(&dup).unwrap_err().code(), "TREE_DUPLICATE_1");
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let err = index(&sentence(&[0, 2])).unwrap_err();
        assert_eq!(err, TreeError::Cycle(ids(&[2])));
    }

    #[test]
    fn test_verify_order_rejects_head_before_reached() {
        let pairs = vec![
            HeadChildren { head: NodeId(1), children: ids(&[2]) },
            HeadChildren { head: NodeId(3), children: ids(&[4]) },
        ];
        assert_eq!(verify_order(NodeId(1), &pairs), Err(TreeError::OrderViolation(NodeId(3))));
    }

    #[test]
    fn test_head_closure() {
        let s = sentence(&[0, 1, 2]);
        let mut layer = FeatureLayer::new();
        layer.insert(NodeId(1), FeatureBundle::new());
        layer.insert(NodeId(3), FeatureBundle::new());

        let err = verify_head_closure(&s, &layer).unwrap_err();
        assert_eq!(err.links, vec![Link { id: NodeId(3), head: NodeId(2) }]);
        assert_eq!(join_links(&err.links), "3->2");

        layer.insert(NodeId(2), FeatureBundle::new());
        assert!(verify_head_closure(&s, &layer).is_ok());
    }

    /// Random trees with shuffled labels: `heads[i]` is the head of node `i + 1`.
    fn arb_tree() -> impl Strategy<Value = Vec<u32>> {
        (1usize..40)
            .prop_flat_map(|n| {
                (
                    prop::collection::vec(any::<prop::sample::Index>(), n),
                    Just((1..=n as u32).collect::<Vec<_>>()).prop_shuffle(),
                )
            })
            .prop_map(|(picks, labels)| {
                // labels[k] is the k-th node attached; it hangs from an earlier one
                let mut heads = vec![0u32; labels.len()];
                for k in 1..labels.len() {
                    heads[labels[k] as usize - 1] = labels[picks[k].index(k)];
                }
                heads
            })
    }

    proptest! {
        #[test]
        fn test_index_order_holds_for_random_trees(heads in arb_tree()) {
            let s = sentence(&heads);
            let index = index(&s).unwrap();

            // every non-root node is a child exactly once
            let mut children: Vec<NodeId> =
                index.pairs().iter().flat_map(|p| p.children.iter().copied()).collect();
            children.sort();
            let mut expected: Vec<NodeId> =
                s.nodes.iter().filter(|n| !n.head.is_root()).map(|n| n.id).collect();
            expected.sort();
            prop_assert_eq!(children, expected);

            prop_assert!(verify_order(index.root(), index.pairs()).is_ok());

            // leaves-first: a head comes after every head among its dependents
            let order: Vec<NodeId> = index.bottom_up().map(|p| p.head).collect();
            for (i, pair) in index.bottom_up().enumerate() {
                for child in &pair.children {
                    if let Some(j) = order.iter().position(|h| h == child) {
                        prop_assert!(j < i);
                    }
                }
            }
        }

        #[test]
        fn test_random_cycle_is_rejected(heads in arb_tree(), pick in any::<prop::sample::Index>(), target in any::<prop::sample::Index>()) {
            let non_root: Vec<u32> =
                (1..=heads.len() as u32).filter(|&id| heads[id as usize - 1] != 0).collect();
            prop_assume!(!non_root.is_empty());
            let x = non_root[pick.index(non_root.len())];

            // x and everything below it
            let below_x = |mut id: u32| loop {
                if id == x {
                    return true;
                }
                if id == 0 {
                    return false;
                }
                id = heads[id as usize - 1];
            };
            let subtree: Vec<u32> = (1..=heads.len() as u32).filter(|&id| below_x(id)).collect();
            let y = subtree[target.index(subtree.len())];

            let mut broken = heads.clone();
            broken[x as usize - 1] = y;

            match index(&sentence(&broken)) {
                Err(TreeError::Cycle(members)) => {
                    prop_assert!(members.contains(&NodeId(x)));
                    prop_assert!(members.contains(&NodeId(y)));
                }
                other => prop_assert!(false, "expected a cycle, got {:?}", other),
            }
        }
    }
}
