use glyphspot::lowlevel::{assemble, Landmarks};
use glyphspot::{GlyphSpotError, NodeId, PartTree, Point};

fn landmarks(points: &[(i32, i32)], com: (i32, i32)) -> Landmarks {
    Landmarks {
        points: points.iter().map(|&(r, c)| Point::new(r, c)).collect(),
        center_of_mass: Point::new(com.0, com.1),
    }
}

fn find_node(tree: &PartTree, position: Point) -> NodeId {
    tree.ids()
        .find(|&id| tree.position(id) == position)
        .expect("node with position exists")
}

#[test]
fn greedy_attachment_breaks_ties_by_scan_order() {
    let set = landmarks(&[(0, 0), (1, 1), (5, 5), (1, 2)], (0, 0));
    let tree = assemble(&set).unwrap();

    let root = tree.root();
    assert_eq!(tree.position(root), Point::new(0, 0));

    // (1,1) and (1,2) are both sqrt(2)-ish candidates in the first pass;
    // (1,1) is scanned first and wins. (1,2) then hangs off (1,1), and
    // (5,5) off (1,2).
    let n11 = find_node(&tree, Point::new(1, 1));
    let n12 = find_node(&tree, Point::new(1, 2));
    let n55 = find_node(&tree, Point::new(5, 5));
    assert_eq!(tree.parent(n11), Some(root));
    assert_eq!(tree.parent(n12), Some(n11));
    assert_eq!(tree.parent(n55), Some(n12));
}

#[test]
fn every_landmark_joins_the_tree_exactly_once() {
    let set = landmarks(
        &[(2, 3), (9, 1), (4, 4), (0, 7), (6, 6), (3, 0)],
        (4, 4),
    );
    let tree = assemble(&set).unwrap();
    assert_eq!(tree.len(), 6);

    // Exactly one root.
    let roots: Vec<NodeId> = tree.ids().filter(|&id| tree.parent(id).is_none()).collect();
    assert_eq!(roots, vec![tree.root()]);

    // Every node reaches the root through parent links without cycles.
    for id in tree.ids() {
        let mut current = id;
        let mut hops = 0;
        while let Some(parent) = tree.parent(current) {
            current = parent;
            hops += 1;
            assert!(hops <= tree.len(), "cycle reached from {id:?}");
        }
        assert_eq!(current, tree.root());
    }

    // Each non-root node appears in exactly one children list.
    for id in tree.ids() {
        let appearances: usize = tree
            .ids()
            .map(|p| tree.children(p).iter().filter(|&&c| c == id).count())
            .sum();
        let expected = usize::from(id != tree.root());
        assert_eq!(appearances, expected);
    }
}

#[test]
fn offsets_round_trip_to_child_positions() {
    let set = landmarks(&[(5, 5), (2, 9), (8, 1), (0, 0)], (4, 4));
    let tree = assemble(&set).unwrap();

    for id in tree.ids() {
        match (tree.parent(id), tree.offset(id)) {
            (Some(parent), Some(offset)) => {
                assert_eq!(tree.position(parent) + offset, tree.position(id));
            }
            (None, None) => assert_eq!(id, tree.root()),
            other => panic!("inconsistent parent/offset pair: {other:?}"),
        }
    }
}

#[test]
fn root_selection_prefers_the_first_minimum() {
    // (3, 0) and (0, 3) are equidistant from the center of mass; the first
    // in landmark order becomes root.
    let set = landmarks(&[(3, 0), (0, 3), (9, 9)], (0, 0));
    let tree = assemble(&set).unwrap();
    assert_eq!(tree.position(tree.root()), Point::new(3, 0));
}

#[test]
fn single_landmark_yields_a_root_only_tree() {
    let set = landmarks(&[(4, 2)], (4, 2));
    let tree = assemble(&set).unwrap();
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.parent(tree.root()), None);
    assert!(tree.children(tree.root()).is_empty());
    assert_eq!(tree.post_order(), vec![tree.root()]);
}

#[test]
fn empty_landmark_set_is_invalid_input() {
    let set = landmarks(&[], (0, 0));
    let err = assemble(&set).unwrap_err();
    assert!(matches!(err, GlyphSpotError::InvalidInput { .. }));
}

#[test]
fn post_order_visits_children_before_parents() {
    let set = landmarks(&[(0, 0), (0, 3), (0, 6), (3, 0)], (0, 0));
    let tree = assemble(&set).unwrap();

    let order = tree.post_order();
    assert_eq!(order.len(), tree.len());
    let rank = |id: NodeId| order.iter().position(|&o| o == id).unwrap();
    for id in tree.ids() {
        for &child in tree.children(id) {
            assert!(rank(child) < rank(id));
        }
    }
    assert_eq!(*order.last().unwrap(), tree.root());
}
