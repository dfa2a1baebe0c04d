use std::cmp::Ordering;
use std::collections::HashMap;

use crate::geometry::path::{Path, Paths};
use crate::geometry::point::IntPoint;
use crate::utils::math::{double_area, point_in_polygon};

/// Undirected segment stored with `lo < hi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Segment {
    lo: IntPoint,
    hi: IntPoint,
}

impl Segment {
    fn new(a: IntPoint, b: IntPoint) -> Self {
        if a < b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    fn min_y(&self) -> i64 {
        self.lo.y.min(self.hi.y)
    }

    fn max_y(&self) -> i64 {
        self.lo.y.max(self.hi.y)
    }
}

/// Lower or upper limit `num / den` (with `den > 0`) on a segment parameter.
#[derive(Clone, Copy)]
struct Bound {
    num: i128,
    den: i128,
    open: bool,
}

/// Rebuilds the output rings as simple, non-crossing rings.
///
/// The even-odd union of the rings is kept. Rings that touch themselves are
/// split apart, edges shared by two rings cancel, and every ring is then
/// classified as outer or hole by how many other rings enclose it. Outers come
/// out counter-clockwise (y up) unless `reverse_solution` is set.
pub fn resolve_rings(rings: &Paths, preserve_collinear: bool, reverse_solution: bool) -> Paths {
    let mut segments = Vec::new();

    for ring in rings.iter() {
        let points = ring.points();

        for (i, point) in points.iter().enumerate() {
            let next = points[(i + 1) % points.len()];

            if *point != next {
                segments.push(Segment::new(*point, next));
            }
        }
    }

    let segments = split_at_vertices(snap_round(segments));
    let edges = cancel_pairs(segments);
    let rings = walk_rings(&edges);

    classify(rings, preserve_collinear, reverse_solution)
}

/// Sign of `(a - o) x (b - o)`, compared without forming the difference.
fn orientation(o: &IntPoint, a: &IntPoint, b: &IntPoint) -> Ordering {
    let lhs = (a.x as i128 - o.x as i128) * (b.y as i128 - o.y as i128);
    let rhs = (a.y as i128 - o.y as i128) * (b.x as i128 - o.x as i128);

    lhs.cmp(&rhs)
}

/// Routes every segment through the centers of the unit pixels it passes that
/// hold an endpoint or a crossing. Rounded segments never cross each other.
fn snap_round(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.sort();

    let mut hot: Vec<IntPoint> = segments.iter().flat_map(|s| [s.lo, s.hi]).collect();

    for (i, first) in segments.iter().enumerate() {
        for second in &segments[i + 1..] {
            if second.lo.x > first.hi.x {
                break;
            }

            if second.max_y() < first.min_y() || second.min_y() > first.max_y() {
                continue;
            }

            if let Some(pixel) = crossing_pixel(first, second) {
                hot.push(pixel);
            }
        }
    }

    hot.sort();
    hot.dedup();

    let mut snapped = Vec::with_capacity(segments.len());

    for segment in &segments {
        let min_x = segment.lo.x.saturating_sub(1);
        let max_x = segment.hi.x.saturating_add(1);
        let min_y = segment.min_y().saturating_sub(1);
        let max_y = segment.max_y().saturating_add(1);
        let start = hot.partition_point(|pixel| pixel.x < min_x);
        let mut pixels = Vec::new();

        for pixel in &hot[start..] {
            if pixel.x > max_x {
                break;
            }

            if pixel.y < min_y || pixel.y > max_y {
                continue;
            }

            if *pixel == segment.lo || *pixel == segment.hi || passes_through_pixel(segment, pixel) {
                pixels.push(*pixel);
            }
        }

        order_along(segment, &mut pixels);

        for pair in pixels.windows(2) {
            if pair[0] != pair[1] {
                snapped.push(Segment::new(pair[0], pair[1]));
            }
        }
    }

    snapped
}

/// Pixel holding the proper crossing of two segments, if they cross.
fn crossing_pixel(first: &Segment, second: &Segment) -> Option<IntPoint> {
    let (a, b, c, d) = (&first.lo, &first.hi, &second.lo, &second.hi);
    let d1 = orientation(a, b, c);
    let d2 = orientation(a, b, d);
    let d3 = orientation(c, d, a);
    let d4 = orientation(c, d, b);

    if d1 == Ordering::Equal || d2 == Ordering::Equal || d1 == d2 {
        return None;
    }

    if d3 == Ordering::Equal || d4 == Ordering::Equal || d3 == d4 {
        return None;
    }

    Some(exact_crossing(a, b, c, d).unwrap_or_else(|| approximate_crossing(a, b, c, d)))
}

fn exact_crossing(a: &IntPoint, b: &IntPoint, c: &IntPoint, d: &IntPoint) -> Option<IntPoint> {
    let (rx, ry) = (b.x as i128 - a.x as i128, b.y as i128 - a.y as i128);
    let (sx, sy) = (d.x as i128 - c.x as i128, d.y as i128 - c.y as i128);
    let (qx, qy) = (c.x as i128 - a.x as i128, c.y as i128 - a.y as i128);
    let mut num = qx.checked_mul(sy)?.checked_sub(qy.checked_mul(sx)?)?;
    let mut den = rx.checked_mul(sy)?.checked_sub(ry.checked_mul(sx)?)?;

    if den < 0 {
        num = num.checked_neg()?;
        den = den.checked_neg()?;
    }

    let x = (a.x as i128).checked_mul(den)?.checked_add(rx.checked_mul(num)?)?;
    let y = (a.y as i128).checked_mul(den)?.checked_add(ry.checked_mul(num)?)?;

    Some(IntPoint::new(pixel_center(x, den)?, pixel_center(y, den)?))
}

fn approximate_crossing(a: &IntPoint, b: &IntPoint, c: &IntPoint, d: &IntPoint) -> IntPoint {
    let (rx, ry) = (b.x as f64 - a.x as f64, b.y as f64 - a.y as f64);
    let (sx, sy) = (d.x as f64 - c.x as f64, d.y as f64 - c.y as f64);
    let (qx, qy) = (c.x as f64 - a.x as f64, c.y as f64 - a.y as f64);
    let den = rx * sy - ry * sx;
    let t = if den == 0.0 {
        0.5
    } else {
        ((qx * sy - qy * sx) / den).clamp(0.0, 1.0)
    };

    IntPoint::new(
        (a.x as f64 + rx * t + 0.5).floor() as i64,
        (a.y as f64 + ry * t + 0.5).floor() as i64,
    )
}

/// `floor(numerator / denominator + 1/2)` for a positive denominator.
fn pixel_center(numerator: i128, denominator: i128) -> Option<i64> {
    let twice = numerator.checked_mul(2)?.checked_add(denominator)?;
    let value = twice.div_euclid(denominator.checked_mul(2)?);

    i64::try_from(value).ok()
}

/// Whether the segment meets the half-open pixel `[c - 1/2, c + 1/2)` on both axes.
fn passes_through_pixel(segment: &Segment, center: &IntPoint) -> bool {
    exact_pixel_test(segment, center).unwrap_or_else(|| approximate_pixel_test(segment, center))
}

fn exact_pixel_test(segment: &Segment, center: &IntPoint) -> Option<bool> {
    let mut low = Bound { num: 0, den: 1, open: false };
    let mut high = Bound { num: 1, den: 1, open: false };
    let axes = [
        (segment.lo.x, segment.hi.x, center.x),
        (segment.lo.y, segment.hi.y, center.y),
    ];

    // Doubled coordinates keep the pixel edges integral.
    for (start, end, middle) in axes {
        let p = 2 * start as i128;
        let dp = 2 * (end as i128 - start as i128);
        let left = 2 * middle as i128 - 1;
        let right = 2 * middle as i128 + 1;

        match dp.cmp(&0) {
            Ordering::Equal => {
                if p < left || p >= right {
                    return Some(false);
                }
            }
            Ordering::Greater => {
                raise(&mut low, Bound { num: left - p, den: dp, open: false })?;
                lower(&mut high, Bound { num: right - p, den: dp, open: true })?;
            }
            Ordering::Less => {
                raise(&mut low, Bound { num: p - right, den: -dp, open: true })?;
                lower(&mut high, Bound { num: p - left, den: -dp, open: false })?;
            }
        }
    }

    Some(match compare_bounds(&low, &high)? {
        Ordering::Less => true,
        Ordering::Equal => !low.open && !high.open,
        Ordering::Greater => false,
    })
}

fn approximate_pixel_test(segment: &Segment, center: &IntPoint) -> bool {
    let mut low = 0.0f64;
    let mut high = 1.0f64;
    let axes = [
        (segment.lo.x, segment.hi.x, center.x),
        (segment.lo.y, segment.hi.y, center.y),
    ];

    for (start, end, middle) in axes {
        let p = start as f64;
        let dp = end as f64 - start as f64;
        let left = middle as f64 - 0.5;
        let right = middle as f64 + 0.5;

        if dp == 0.0 {
            if p < left || p >= right {
                return false;
            }

            continue;
        }

        let t1 = (left - p) / dp;
        let t2 = (right - p) / dp;

        low = low.max(t1.min(t2));
        high = high.min(t1.max(t2));
    }

    low <= high
}

fn compare_bounds(a: &Bound, b: &Bound) -> Option<Ordering> {
    Some(a.num.checked_mul(b.den)?.cmp(&b.num.checked_mul(a.den)?))
}

fn raise(low: &mut Bound, candidate: Bound) -> Option<()> {
    match compare_bounds(&candidate, low)? {
        Ordering::Greater => *low = candidate,
        Ordering::Equal => low.open |= candidate.open,
        Ordering::Less => {}
    }

    Some(())
}

fn lower(high: &mut Bound, candidate: Bound) -> Option<()> {
    match compare_bounds(&candidate, high)? {
        Ordering::Less => *high = candidate,
        Ordering::Equal => high.open |= candidate.open,
        Ordering::Greater => {}
    }

    Some(())
}

/// Sorts pixel centers by their projection on the segment direction.
fn order_along(segment: &Segment, pixels: &mut [IntPoint]) {
    let (dx, dy) = (
        segment.hi.x as i128 - segment.lo.x as i128,
        segment.hi.y as i128 - segment.lo.y as i128,
    );
    let exact: Option<Vec<i128>> = pixels
        .iter()
        .map(|pixel| {
            let px = (pixel.x as i128 - segment.lo.x as i128).checked_mul(dx)?;
            let py = (pixel.y as i128 - segment.lo.y as i128).checked_mul(dy)?;

            px.checked_add(py)
        })
        .collect();

    let mut keyed: Vec<(usize, IntPoint)> = pixels.iter().copied().enumerate().collect();

    match exact {
        Some(keys) => keyed.sort_by(|a, b| keys[a.0].cmp(&keys[b.0]).then(a.1.cmp(&b.1))),
        None => {
            let keys: Vec<f64> = pixels
                .iter()
                .map(|pixel| {
                    (pixel.x as f64 - segment.lo.x as f64) * dx as f64
                        + (pixel.y as f64 - segment.lo.y as f64) * dy as f64
                })
                .collect();

            keyed.sort_by(|a, b| keys[a.0].total_cmp(&keys[b.0]).then(a.1.cmp(&b.1)));
        }
    }

    for (slot, (_, pixel)) in pixels.iter_mut().zip(keyed) {
        *slot = pixel;
    }
}

/// Breaks segments at every vertex lying inside them.
fn split_at_vertices(segments: Vec<Segment>) -> Vec<Segment> {
    let mut vertices: Vec<IntPoint> = segments.iter().flat_map(|s| [s.lo, s.hi]).collect();

    vertices.sort();
    vertices.dedup();

    let mut pieces = Vec::with_capacity(segments.len());

    for segment in segments {
        let first = vertices.partition_point(|vertex| *vertex <= segment.lo);
        let mut start = segment.lo;

        for vertex in &vertices[first..] {
            if *vertex >= segment.hi {
                break;
            }

            if vertex.y < segment.min_y() || vertex.y > segment.max_y() {
                continue;
            }

            if orientation(&segment.lo, &segment.hi, vertex) == Ordering::Equal {
                pieces.push(Segment::new(start, *vertex));
                start = *vertex;
            }
        }

        pieces.push(Segment::new(start, segment.hi));
    }

    pieces
}

/// Keeps one copy of each segment that occurs an odd number of times.
fn cancel_pairs(mut segments: Vec<Segment>) -> Vec<Segment> {
    segments.sort();

    let mut edges = Vec::with_capacity(segments.len());
    let mut i = 0;

    while i < segments.len() {
        let mut j = i + 1;

        while j < segments.len() && segments[j] == segments[i] {
            j += 1;
        }

        if (j - i) % 2 == 1 {
            edges.push(segments[i]);
        }

        i = j;
    }

    edges
}

/// Counter-clockwise order of the directions `vertex -> a` and `vertex -> b`,
/// starting from the positive x axis.
fn compare_directions(vertex: &IntPoint, a: &IntPoint, b: &IntPoint) -> Ordering {
    let lower_half = |p: &IntPoint| p.y < vertex.y || (p.y == vertex.y && p.x < vertex.x);

    lower_half(a)
        .cmp(&lower_half(b))
        .then_with(|| orientation(vertex, a, b).reverse())
}

/// Pairs the edges at each vertex in angular order and follows the pairing
/// into closed rings, splitting every ring where it revisits a vertex.
fn walk_rings(edges: &[Segment]) -> Vec<Vec<IntPoint>> {
    let mut incident: HashMap<IntPoint, Vec<usize>> = HashMap::new();

    for (index, edge) in edges.iter().enumerate() {
        incident.entry(edge.lo).or_default().push(index);
        incident.entry(edge.hi).or_default().push(index);
    }

    let other_end = |index: usize, vertex: &IntPoint| {
        if edges[index].lo == *vertex {
            edges[index].hi
        } else {
            edges[index].lo
        }
    };
    // `links[e][0]` continues at `lo`, `links[e][1]` at `hi`.
    let mut links: Vec<[Option<usize>; 2]> = vec![[None, None]; edges.len()];

    for (vertex, list) in incident.iter_mut() {
        list.sort_by(|a, b| compare_directions(vertex, &other_end(*a, vertex), &other_end(*b, vertex)));

        for pair in list.chunks_exact(2) {
            let (a, b) = (pair[0], pair[1]);

            links[a][usize::from(edges[a].hi == *vertex)] = Some(b);
            links[b][usize::from(edges[b].hi == *vertex)] = Some(a);
        }
    }

    let mut used = vec![false; edges.len()];
    let mut rings = Vec::new();

    for start in 0..edges.len() {
        if used[start] {
            continue;
        }

        let mut ring = Vec::new();
        let mut vertex = edges[start].lo;
        let mut edge = start;
        let mut closed = false;

        loop {
            used[edge] = true;
            ring.push(vertex);

            let end = usize::from(edges[edge].lo == vertex);

            vertex = other_end(edge, &vertex);

            match links[edge][end] {
                Some(next) if next == start => {
                    closed = true;
                    break;
                }
                Some(next) if !used[next] => edge = next,
                _ => break,
            }
        }

        if closed {
            split_touching(ring, &mut rings);
        }
    }

    rings
}

fn split_touching(ring: Vec<IntPoint>, rings: &mut Vec<Vec<IntPoint>>) {
    let mut stack: Vec<IntPoint> = Vec::with_capacity(ring.len());
    let mut positions: HashMap<IntPoint, usize> = HashMap::new();

    for point in ring {
        if let Some(&at) = positions.get(&point) {
            let part = stack.split_off(at);

            for p in &part {
                positions.remove(p);
            }

            rings.push(part);
        }

        positions.insert(point, stack.len());
        stack.push(point);
    }

    rings.push(stack);
}

/// Whether `vertex -> target` leaves a ring vertex into the ring's interior.
fn in_sector(vertex: &IntPoint, prev: &IntPoint, next: &IntPoint, target: &IntPoint, ccw: bool) -> bool {
    // the interior sweeps counter-clockwise from `from` to `to`
    let (from, to) = if ccw { (next, prev) } else { (prev, next) };

    match orientation(vertex, from, to) {
        Ordering::Greater => {
            orientation(vertex, from, target) == Ordering::Greater
                && orientation(vertex, target, to) == Ordering::Greater
        }
        Ordering::Less => {
            !(orientation(vertex, to, target) != Ordering::Less
                && orientation(vertex, target, from) != Ordering::Less)
        }
        Ordering::Equal => orientation(vertex, from, target) == Ordering::Greater,
    }
}

fn encloses(outer: &[IntPoint], outer_ccw: bool, inner: &[IntPoint]) -> bool {
    for point in inner {
        match point_in_polygon(point, outer) {
            1 => return true,
            0 => return false,
            _ => {}
        }
    }

    let count = outer.len();

    outer
        .iter()
        .position(|point| *point == inner[0])
        .map_or(false, |i| {
            in_sector(
                &inner[0],
                &outer[(i + count - 1) % count],
                &outer[(i + 1) % count],
                &inner[1],
                outer_ccw,
            )
        })
}

fn classify(rings: Vec<Vec<IntPoint>>, preserve_collinear: bool, reverse_solution: bool) -> Paths {
    let rings: Vec<(Vec<IntPoint>, i128)> = rings
        .into_iter()
        .filter(|ring| ring.len() >= 3)
        .map(|ring| {
            let area = double_area(&ring);
            (ring, area)
        })
        .filter(|(_, area)| *area != 0)
        .collect();
    let bounds: Vec<(IntPoint, IntPoint)> = rings
        .iter()
        .map(|(ring, _)| {
            ring.iter().fold((ring[0], ring[0]), |(min, max), p| {
                (
                    IntPoint::new(min.x.min(p.x), min.y.min(p.y)),
                    IntPoint::new(max.x.max(p.x), max.y.max(p.y)),
                )
            })
        })
        .collect();

    let mut result = Paths::with_capacity(rings.len());

    for (i, (ring, area)) in rings.iter().enumerate() {
        let (min, max) = bounds[i];
        let depth = rings
            .iter()
            .enumerate()
            .filter(|(j, (outer, outer_area))| {
                let (outer_min, outer_max) = bounds[*j];

                *j != i
                    && outer_area.abs() > area.abs()
                    && outer_min.x <= min.x
                    && outer_min.y <= min.y
                    && outer_max.x >= max.x
                    && outer_max.y >= max.y
                    && encloses(outer, *outer_area > 0, ring)
            })
            .count();
        let is_hole = depth % 2 == 1;
        let mut points = ring.clone();

        if (*area > 0) == (is_hole != reverse_solution) {
            points.reverse();
        }

        if !preserve_collinear {
            points = strip_collinear(points);
        }

        result.add_path(Path::from(points));
    }

    result
}

fn strip_collinear(points: Vec<IntPoint>) -> Vec<IntPoint> {
    let count = points.len();

    (0..count)
        .filter(|&i| {
            let prev = &points[(i + count - 1) % count];
            let next = &points[(i + 1) % count];

            orientation(prev, &points[i], next) != Ordering::Equal
        })
        .map(|i| points[i])
        .collect()
}
