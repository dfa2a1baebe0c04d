use crate::clipper::constants::UNASSIGNED;
use crate::clipper::enums::Direction;
use crate::clipper::out_rec::OutRec;
use crate::geometry::point::IntPoint;

fn build_ring(out_rec: &mut OutRec, points: &[(i64, i64)]) -> usize {
    let (rec_index, _) = out_rec.start_polygon(IntPoint::from(points[0]));

    for point in points.iter().skip(1) {
        out_rec.add_point(rec_index, IntPoint::from(*point), false);
    }

    rec_index
}

#[test]
fn fix_directions_makes_outers_positive() {
    let mut out_rec = OutRec::new(false, false);
    let rec_index = build_ring(&mut out_rec, &[(0, 0), (10, 0), (10, 10), (0, 10)]);

    assert_eq!(out_rec.point_count(out_rec.rec(rec_index).pts), 4);
    assert_eq!(out_rec.area(rec_index), -200);

    out_rec.fix_directions();

    assert_eq!(out_rec.area(rec_index), 200);

    let paths = out_rec.build_result();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].area(), 100.0);
}

#[test]
fn reversed_solution_keeps_outers_negative() {
    let mut out_rec = OutRec::new(true, false);
    let rec_index = build_ring(&mut out_rec, &[(0, 0), (10, 0), (10, 10), (0, 10)]);

    out_rec.fix_directions();

    assert_eq!(out_rec.area(rec_index), -200);
}

#[test]
fn repeated_end_point_is_not_added() {
    let mut out_rec = OutRec::new(false, false);
    let (rec_index, first) = out_rec.start_polygon(IntPoint::new(1, 1));
    let second = out_rec.add_point(rec_index, IntPoint::new(4, 1), false);

    assert_eq!(out_rec.add_point(rec_index, IntPoint::new(4, 1), false), second);
    assert_eq!(out_rec.add_point(rec_index, IntPoint::new(1, 1), true), first);
    assert_eq!(out_rec.point_count(first), 2);
    assert_eq!(out_rec.last_point(rec_index, Direction::Left), first);
    assert_eq!(out_rec.last_point(rec_index, Direction::Right), second);
}

#[test]
fn fixup_drops_collinear_vertices() {
    let mut out_rec = OutRec::new(false, false);
    let rec_index = build_ring(&mut out_rec, &[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);

    out_rec.fixup_out_polygon(rec_index);

    assert_eq!(out_rec.point_count(out_rec.rec(rec_index).pts), 4);
}

#[test]
fn strictly_simple_fixup_keeps_collinear_vertices() {
    let mut out_rec = OutRec::new(false, true);
    let rec_index = build_ring(&mut out_rec, &[(0, 0), (5, 0), (10, 0), (10, 10), (0, 10)]);

    out_rec.fixup_out_polygon(rec_index);

    assert_eq!(out_rec.point_count(out_rec.rec(rec_index).pts), 5);
}

#[test]
fn fixup_discards_degenerate_rings() {
    let mut out_rec = OutRec::new(false, false);
    let rec_index = build_ring(&mut out_rec, &[(0, 0), (5, 5), (10, 10)]);

    out_rec.fixup_out_polygon(rec_index);

    assert_eq!(out_rec.rec(rec_index).pts, UNASSIGNED);
    assert!(out_rec.build_result().is_empty());
}

#[test]
fn append_splices_rings_and_retires_the_second() {
    let mut out_rec = OutRec::new(false, false);
    let rec1 = build_ring(&mut out_rec, &[(0, 0), (5, 0)]);
    let rec2 = build_ring(&mut out_rec, &[(5, 10), (0, 10)]);

    out_rec.append(rec1, rec2, Direction::Right, Direction::Left);

    assert_eq!(out_rec.rec(rec2).pts, UNASSIGNED);
    assert_eq!(out_rec.get_out_rec(rec2), rec1);
    assert_eq!(out_rec.point_count(out_rec.rec(rec1).pts), 4);
    assert_eq!(out_rec.area(rec1), -100);

    out_rec.fix_directions();

    let paths = out_rec.build_result();
    assert_eq!(paths.len(), 1);
    assert_eq!(paths[0].area(), 50.0);
}

#[test]
fn touching_ring_is_split_in_two() {
    let mut out_rec = OutRec::new(false, true);
    build_ring(
        &mut out_rec,
        &[(0, 0), (10, 0), (5, 5), (10, 10), (0, 10), (5, 5)],
    );

    out_rec.do_simple_polygons();

    let paths = out_rec.build_result();
    assert_eq!(paths.len(), 2);
    assert!(paths.iter().all(|path| path.len() == 3));
}

#[test]
fn hole_state_follows_first_left() {
    let mut out_rec = OutRec::new(false, false);
    let outer = out_rec.create();
    let hole = out_rec.create();
    let island = out_rec.create();

    out_rec.set_hole_state(hole, outer);
    out_rec.set_hole_state(island, hole);

    assert!(!out_rec.rec(outer).is_hole);
    assert!(out_rec.rec(hole).is_hole);
    assert!(!out_rec.rec(island).is_hole);
    assert!(out_rec.is_right_of(island, outer));
    assert!(!out_rec.is_right_of(outer, island));
}
