use super::*;

fn graph_with(ids: &[u64]) -> SceneGraph {
    let mut g = SceneGraph::new();
    for &id in ids {
        g.create(NodeId(id), Some("Group".to_string()), Attributes::new())
            .unwrap();
    }
    g
}

fn child_ids(g: &SceneGraph, id: u64) -> Vec<u64> {
    g.children(NodeId(id)).map(|n| n.id().0).collect()
}

#[test]
fn new_graph_has_only_the_root() {
    let g = SceneGraph::new();
    assert_eq!(g.node_count(), 1);
    assert_eq!(g.root().id(), NodeId::ROOT);
    assert_eq!(g.root().kind(), None);
    assert_eq!(g.traversal_order(), vec![NodeId::ROOT]);
    g.check_invariants().unwrap();
}

#[test]
fn create_rejects_duplicate_ids() {
    let mut g = graph_with(&[1]);
    assert!(g.create(NodeId(1), None, Attributes::new()).is_err());
    assert!(g.create(NodeId(0), None, Attributes::new()).is_err());
}

#[test]
fn insert_appends_and_splices_before() {
    let mut g = graph_with(&[1, 2, 3, 4]);
    g.insert(NodeId::ROOT, NodeId(1), None).unwrap();
    g.insert(NodeId::ROOT, NodeId(3), None).unwrap();
    g.insert(NodeId::ROOT, NodeId(2), Some(NodeId(3))).unwrap();
    g.insert(NodeId::ROOT, NodeId(4), Some(NodeId(1))).unwrap();
    assert_eq!(child_ids(&g, 0), vec![4, 1, 2, 3]);
    assert_eq!(g.root().first_child(), Some(NodeId(4)));
    assert_eq!(g.root().last_child(), Some(NodeId(3)));
    assert_eq!(g.get(NodeId(4)).unwrap().previous(), None);
    assert_eq!(g.get(NodeId(3)).unwrap().next(), None);
    g.check_invariants().unwrap();
}

#[test]
fn insert_before_first_child_keeps_last_child() {
    let mut g = graph_with(&[1, 2]);
    g.insert(NodeId::ROOT, NodeId(1), None).unwrap();
    g.insert(NodeId::ROOT, NodeId(2), Some(NodeId(1))).unwrap();
    assert_eq!(child_ids(&g, 0), vec![2, 1]);
    assert_eq!(g.root().last_child(), Some(NodeId(1)));
    g.check_invariants().unwrap();
}

#[test]
fn reinsert_moves_between_parents_without_dangling_links() {
    let mut g = graph_with(&[10, 20, 1, 2, 3, 4]);
    g.insert(NodeId::ROOT, NodeId(10), None).unwrap();
    g.insert(NodeId::ROOT, NodeId(20), None).unwrap();
    for id in [1, 2, 3] {
        g.insert(NodeId(10), NodeId(id), None).unwrap();
    }
    g.insert(NodeId(20), NodeId(4), None).unwrap();

    g.insert(NodeId(20), NodeId(2), Some(NodeId(4))).unwrap();
    assert_eq!(child_ids(&g, 10), vec![1, 3]);
    assert_eq!(child_ids(&g, 20), vec![2, 4]);
    assert_eq!(g.get(NodeId(2)).unwrap().parent(), Some(NodeId(20)));
    g.check_invariants().unwrap();

    // Same parent, different position.
    g.insert(NodeId(10), NodeId(3), Some(NodeId(1))).unwrap();
    assert_eq!(child_ids(&g, 10), vec![3, 1]);
    g.insert(NodeId(10), NodeId(3), None).unwrap();
    assert_eq!(child_ids(&g, 10), vec![1, 3]);
    g.check_invariants().unwrap();
}

#[test]
fn insert_validates_preconditions() {
    let mut g = graph_with(&[1, 2, 3]);
    g.insert(NodeId::ROOT, NodeId(1), None).unwrap();
    g.insert(NodeId(1), NodeId(2), None).unwrap();

    assert!(g.insert(NodeId(1), NodeId::ROOT, None).is_err());
    assert!(g.insert(NodeId(99), NodeId(3), None).is_err());
    assert!(g.insert(NodeId(1), NodeId(99), None).is_err());
    assert!(g.insert(NodeId(2), NodeId(1), None).is_err(), "cycle");
    assert!(g.insert(NodeId(1), NodeId(1), None).is_err(), "self parent");
    assert!(g.insert(NodeId(1), NodeId(3), Some(NodeId(3))).is_err());
    assert!(
        g.insert(NodeId::ROOT, NodeId(3), Some(NodeId(2))).is_err(),
        "before must be a child of the parent"
    );
    assert_eq!(child_ids(&g, 0), vec![1]);
    assert_eq!(child_ids(&g, 1), vec![2]);
    g.check_invariants().unwrap();
}

#[test]
fn remove_unlinks_and_requires_attachment() {
    let mut g = graph_with(&[1, 2, 3]);
    for id in [1, 2, 3] {
        g.insert(NodeId::ROOT, NodeId(id), None).unwrap();
    }
    g.remove(NodeId(2)).unwrap();
    assert_eq!(child_ids(&g, 0), vec![1, 3]);
    let n = g.get(NodeId(2)).unwrap();
    assert_eq!((n.parent(), n.previous(), n.next()), (None, None, None));
    assert!(g.remove(NodeId(2)).is_err());
    assert!(g.remove(NodeId(42)).is_err());

    g.remove(NodeId(1)).unwrap();
    g.remove(NodeId(3)).unwrap();
    assert_eq!(g.root().first_child(), None);
    assert_eq!(g.root().last_child(), None);
    g.check_invariants().unwrap();
}

#[test]
fn detach_drops_index_entry_but_keeps_descendants_indexed() {
    let mut g = graph_with(&[1, 2, 3, 4]);
    g.insert(NodeId::ROOT, NodeId(1), None).unwrap();
    g.insert(NodeId(1), NodeId(2), None).unwrap();
    g.insert(NodeId(1), NodeId(3), None).unwrap();
    g.insert(NodeId(3), NodeId(4), None).unwrap();

    let removed = g.detach(NodeId(1)).unwrap();
    assert_eq!(removed.id(), NodeId(1));
    assert!(!g.contains(NodeId(1)));
    assert!(g.contains(NodeId(2)));
    assert!(g.contains(NodeId(3)));
    assert!(g.contains(NodeId(4)));
    assert_eq!(g.get(NodeId(2)).unwrap().parent(), None);
    assert_eq!(g.get(NodeId(3)).unwrap().previous(), None);
    assert_eq!(child_ids(&g, 3), vec![4]);
    assert_eq!(g.traversal_order(), vec![NodeId::ROOT]);
    g.check_invariants().unwrap();
}

#[test]
fn detach_works_for_unattached_nodes_and_refuses_root() {
    let mut g = graph_with(&[5]);
    assert!(g.detach(NodeId(5)).is_some());
    assert!(!g.contains(NodeId(5)));
    assert!(g.detach(NodeId(5)).is_none());
    assert!(g.detach(NodeId::ROOT).is_none());
    assert!(g.contains(NodeId::ROOT));
}

#[test]
fn traversal_order_is_preorder() {
    let mut g = graph_with(&[1, 2, 3, 4, 5]);
    g.insert(NodeId::ROOT, NodeId(1), None).unwrap();
    g.insert(NodeId::ROOT, NodeId(4), None).unwrap();
    g.insert(NodeId(1), NodeId(2), None).unwrap();
    g.insert(NodeId(1), NodeId(3), None).unwrap();
    g.insert(NodeId(4), NodeId(5), None).unwrap();
    let order: Vec<u64> = g.traversal_order().into_iter().map(|id| id.0).collect();
    assert_eq!(order, vec![0, 1, 2, 3, 4, 5]);
}

#[test]
fn invariants_hold_over_arbitrary_operation_sequences() {
    // Fixed-seed xorshift sequence.
    let mut state: u64 = 0x9E37_79B9_7F4A_7C15;
    let mut next = move |bound: u64| {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state % bound
    };

    const IDS: u64 = 12;
    let mut g = graph_with(&(1..=IDS).collect::<Vec<_>>());
    for step in 0..2_000 {
        let node = NodeId(next(IDS) + 1);
        match next(4) {
            0 | 1 => {
                let parent = NodeId(next(IDS + 1));
                let before = match next(3) {
                    0 => None,
                    _ => Some(NodeId(next(IDS) + 1)),
                };
                let _ = g.insert(parent, node, before);
            }
            2 => {
                let _ = g.remove(node);
            }
            _ => {
                if g.detach(node).is_some() {
                    g.create(node, None, Attributes::new()).unwrap();
                }
            }
        }
        if let Err(err) = g.check_invariants() {
            panic!("step {step}: {err}");
        }
    }
}
