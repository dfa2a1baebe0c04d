use super::{path, square};
use crate::clipper::constants::{HORIZONTAL, UNASSIGNED};
use crate::clipper::enums::{ClipType, PolyFillType, PolyType};
use crate::clipper::t_edge::{EdgeList, TEdge};
use crate::geometry::point::IntPoint;

#[test]
fn square_builds_four_linked_edges() {
    let mut t_edge = TEdge::new();
    let start = t_edge.create_path(square(0, 0, 10).points(), PolyType::Subject);

    assert_eq!(start, 1);
    assert_eq!(t_edge.len(), 4);
    assert_eq!(t_edge.get(1).next, 2);
    assert_eq!(t_edge.get(1).prev, 4);
    assert_eq!(t_edge.dx(1), HORIZONTAL);
    assert_eq!(t_edge.bot(2), IntPoint::new(10, 10));
    assert_eq!(t_edge.top(2), IntPoint::new(10, 0));
}

#[test]
fn collinear_path_is_rejected_without_leftovers() {
    let mut t_edge = TEdge::new();

    assert_eq!(
        t_edge.create_path(path(&[(0, 0), (5, 5), (10, 10)]).points(), PolyType::Subject),
        UNASSIGNED
    );
    assert!(t_edge.is_empty());
}

#[test]
fn short_and_closing_duplicates_are_rejected() {
    let mut t_edge = TEdge::new();

    assert_eq!(
        t_edge.create_path(path(&[(0, 0), (4, 4), (4, 4), (0, 0)]).points(), PolyType::Clip),
        UNASSIGNED
    );
    assert_eq!(t_edge.create_path(&[], PolyType::Clip), UNASSIGNED);
    assert!(t_edge.is_empty());
}

#[test]
fn top_x_rounds_half_away_from_zero() {
    let mut t_edge = TEdge::new();
    let start = t_edge.create_path(path(&[(0, 0), (3, 2), (0, 2)]).points(), PolyType::Subject);

    assert_eq!(t_edge.top(start), IntPoint::new(0, 0));
    assert_eq!(t_edge.bot(start), IntPoint::new(3, 2));
    assert_eq!(t_edge.top_x(start, 0), 0);
    assert_eq!(t_edge.top_x(start, 1), 1);
    assert_eq!(t_edge.top_x(start, 2), 3);
}

#[test]
fn maxima_pair_shares_the_top_vertex() {
    let mut t_edge = TEdge::new();
    let start = t_edge.create_path(path(&[(0, 10), (5, 0), (10, 10)]).points(), PolyType::Subject);

    assert_eq!(start, 1);
    assert_eq!(t_edge.maxima_pair(1), 2);
    assert_eq!(t_edge.maxima_pair(2), 1);
    assert_eq!(t_edge.maxima_pair(3), UNASSIGNED);
    assert!(t_edge.is_maxima(1, 0));
    assert!(!t_edge.is_maxima(1, 10));
}

#[test]
fn active_list_keeps_x_order() {
    let mut t_edge = TEdge::new();
    t_edge.create_path(square(0, 0, 10).points(), PolyType::Subject);
    t_edge.init(ClipType::Union, PolyFillType::NonZero, PolyFillType::NonZero);

    for edge in [2, 4] {
        let bot = t_edge.bot(edge);
        t_edge.get_mut(edge).curr = bot;
    }

    t_edge.insert_edge_into_ael(2, UNASSIGNED);
    t_edge.insert_edge_into_ael(4, UNASSIGNED);

    assert_eq!(t_edge.active, 4);
    assert_eq!(t_edge.next_in_ael(4), 2);
    assert_eq!(t_edge.prev_in_ael(2), 4);

    t_edge.swap_positions_in_list(4, 2, EdgeList::Active);

    assert_eq!(t_edge.active, 2);
    assert_eq!(t_edge.next_in_ael(2), 4);
    assert_eq!(t_edge.next_in_ael(4), UNASSIGNED);

    t_edge.delete_from_ael(2);

    assert_eq!(t_edge.active, 4);
    assert_eq!(t_edge.prev_in_ael(4), UNASSIGNED);
}

#[test]
fn sorted_list_pops_last_added_first() {
    let mut t_edge = TEdge::new();
    t_edge.create_path(square(0, 0, 10).points(), PolyType::Subject);

    t_edge.add_edge_to_sel(1);
    t_edge.add_edge_to_sel(3);

    assert_eq!(t_edge.pop_edge_from_sel(), Some(3));
    assert_eq!(t_edge.pop_edge_from_sel(), Some(1));
    assert_eq!(t_edge.pop_edge_from_sel(), None);
}

#[test]
fn even_odd_crossing_swaps_winding_counts() {
    let mut t_edge = TEdge::new();
    t_edge.create_path(square(0, 0, 10).points(), PolyType::Subject);
    t_edge.init(ClipType::Union, PolyFillType::EvenOdd, PolyFillType::EvenOdd);

    t_edge.get_mut(2).wind_cnt = 1;
    t_edge.get_mut(4).wind_cnt = 2;
    t_edge.cross_winding_counts(2, 4);

    assert_eq!(t_edge.get(2).wind_cnt, 2);
    assert_eq!(t_edge.get(4).wind_cnt, 1);
}

#[test]
fn crossing_of_two_diagonals() {
    let mut t_edge = TEdge::new();
    t_edge.create_path(path(&[(0, 0), (10, 10), (10, 0), (0, 10)]).points(), PolyType::Subject);

    for edge in [1, 3] {
        let bot = t_edge.bot(edge);
        t_edge.get_mut(edge).curr = bot;
    }

    assert_eq!(t_edge.intersect_point(1, 3), IntPoint::new(5, 5));
}
