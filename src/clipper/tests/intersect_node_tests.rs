use crate::clipper::intersect_node::IntersectNodes;
use crate::geometry::point::IntPoint;

#[test]
fn sort_puts_bottom_crossings_first() {
    let mut nodes = IntersectNodes::new();

    nodes.add(1, 2, IntPoint::new(0, 3));
    nodes.add(3, 4, IntPoint::new(5, 8));
    nodes.add(5, 6, IntPoint::new(2, 3));
    nodes.sort();

    assert_eq!(nodes.get(0).pt, IntPoint::new(5, 8));
    assert_eq!((nodes.get(1).edge1, nodes.get(1).edge2), (1, 2));
    assert_eq!((nodes.get(2).edge1, nodes.get(2).edge2), (5, 6));
}

#[test]
fn swap_and_drain() {
    let mut nodes = IntersectNodes::new();

    nodes.add(1, 2, IntPoint::new(0, 0));
    nodes.add(3, 4, IntPoint::new(1, 1));
    nodes.swap(0, 1);

    let drained: Vec<(usize, usize)> = nodes.drain().map(|node| (node.edge1, node.edge2)).collect();

    assert_eq!(drained, vec![(3, 4), (1, 2)]);
    assert!(nodes.is_empty());
}

#[test]
fn clear_empties_the_list() {
    let mut nodes = IntersectNodes::new();

    nodes.add(1, 2, IntPoint::new(0, 0));
    assert_eq!(nodes.len(), 1);

    nodes.clear();
    assert!(nodes.is_empty());
}
