use crate::geometry::path::{Path, Paths};
use crate::geometry::point::IntPoint;
use std::collections::BTreeSet;

pub mod clipper_tests;
pub mod intersect_node_tests;
pub mod local_minima_tests;
pub mod out_rec_tests;
pub mod scanbeam_tests;
pub mod t_edge_tests;

/// Counter-clockwise (y up) axis aligned square.
pub fn square(left: i64, top: i64, size: i64) -> Path {
    [
        (left, top),
        (left + size, top),
        (left + size, top + size),
        (left, top + size),
    ]
    .into_iter()
    .collect()
}

pub fn path(points: &[(i64, i64)]) -> Path {
    points.iter().cloned().collect()
}

/// Vertices of every path, ignoring start point and order.
pub fn point_set(paths: &Paths) -> BTreeSet<(i64, i64)> {
    paths.iter().flat_map(|path| path.iter()).collect()
}

pub fn expected_set(points: &[(i64, i64)]) -> BTreeSet<(i64, i64)> {
    points.iter().cloned().collect()
}

pub fn cross(o: &IntPoint, a: &IntPoint, b: &IntPoint) -> i128 {
    (a.x as i128 - o.x as i128) * (b.y as i128 - o.y as i128)
        - (a.y as i128 - o.y as i128) * (b.x as i128 - o.x as i128)
}

fn on_segment(a: &IntPoint, b: &IntPoint, p: &IntPoint) -> bool {
    cross(a, b, p) == 0
        && a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
}

fn segments_meet(a: &IntPoint, b: &IntPoint, c: &IntPoint, d: &IntPoint) -> bool {
    let (d1, d2) = (cross(a, b, c).signum(), cross(a, b, d).signum());
    let (d3, d4) = (cross(c, d, a).signum(), cross(c, d, b).signum());

    (d1 * d2 < 0 && d3 * d4 < 0)
        || on_segment(a, b, c)
        || on_segment(a, b, d)
        || on_segment(c, d, a)
        || on_segment(c, d, b)
}

/// No repeated vertex, no spike, and no two non-adjacent edges meeting.
pub fn is_simple(path: &Path) -> bool {
    let points = path.points();
    let count = points.len();

    if count < 3 {
        return false;
    }

    for i in 0..count {
        if points[i + 1..].contains(&points[i]) {
            return false;
        }

        let (a, b, c) = (&points[i], &points[(i + 1) % count], &points[(i + 2) % count]);
        let dot = (b.x as i128 - a.x as i128) * (c.x as i128 - b.x as i128)
            + (b.y as i128 - a.y as i128) * (c.y as i128 - b.y as i128);

        if cross(a, b, c) == 0 && dot < 0 {
            return false;
        }
    }

    for i in 0..count {
        for j in i + 2..count {
            if i == 0 && j == count - 1 {
                continue;
            }

            if segments_meet(&points[i], &points[i + 1], &points[j], &points[(j + 1) % count]) {
                return false;
            }
        }
    }

    true
}
