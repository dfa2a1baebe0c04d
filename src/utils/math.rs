use crate::geometry::point::IntPoint;

#[inline(always)]
pub fn cycle_index(index: usize, size: usize, offset: isize) -> usize {
    ((index as isize + offset).rem_euclid(size as isize)) as usize
}

/// Integer division rounded half away from zero.
#[inline(always)]
pub fn round_div(numerator: i128, denominator: i128) -> i128 {
    let quotient = numerator / denominator;
    let remainder = numerator % denominator;

    if remainder.abs() * 2 >= denominator.abs() {
        if (numerator < 0) != (denominator < 0) {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    }
}

/// Exact test for `pt1 -> pt2` and `pt2 -> pt3` lying on one line.
#[inline(always)]
pub fn slopes_equal(pt1: &IntPoint, pt2: &IntPoint, pt3: &IntPoint) -> bool {
    slopes_equal_4(pt1, pt2, pt2, pt3)
}

/// Exact test for segments `pt1 -> pt2` and `pt3 -> pt4` being parallel.
#[inline(always)]
pub fn slopes_equal_4(pt1: &IntPoint, pt2: &IntPoint, pt3: &IntPoint, pt4: &IntPoint) -> bool {
    let dy1 = pt1.y as i128 - pt2.y as i128;
    let dx1 = pt1.x as i128 - pt2.x as i128;
    let dy2 = pt3.y as i128 - pt4.y as i128;
    let dx2 = pt3.x as i128 - pt4.x as i128;

    dy1 * dx2 == dx1 * dy2
}

pub fn pt2_is_between_pt1_and_pt3(pt1: &IntPoint, pt2: &IntPoint, pt3: &IntPoint) -> bool {
    if pt1 == pt3 || pt1 == pt2 || pt3 == pt2 {
        false
    } else if pt1.x != pt3.x {
        (pt2.x > pt1.x) == (pt2.x < pt3.x)
    } else {
        (pt2.y > pt1.y) == (pt2.y < pt3.y)
    }
}

/// Inverse slope `dx/dy` of `pt1 -> pt2`, or `horizontal` when both share a row.
#[inline(always)]
pub fn get_dx(pt1: &IntPoint, pt2: &IntPoint, horizontal: f64) -> f64 {
    if pt1.y == pt2.y {
        horizontal
    } else {
        (pt2.x - pt1.x) as f64 / (pt2.y - pt1.y) as f64
    }
}

/// Twice the signed area of a closed ring, computed exactly.
pub fn double_area<'a, I>(points: I) -> i128
where
    I: IntoIterator<Item = &'a IntPoint>,
    I::IntoIter: Clone,
{
    let iter = points.into_iter();
    let mut prev = match iter.clone().last() {
        Some(point) => *point,
        None => return 0,
    };
    let mut acc: i128 = 0;

    for point in iter {
        acc += prev.x as i128 * point.y as i128 - point.x as i128 * prev.y as i128;
        prev = *point;
    }

    acc
}

/// Classifies `pt` against a closed ring: 0 outside, 1 inside, -1 on the boundary.
pub fn point_in_polygon(pt: &IntPoint, ring: &[IntPoint]) -> i32 {
    let count = ring.len();

    if count < 3 {
        return 0;
    }

    let mut result = 0;

    for i in 0..count {
        let curr = &ring[i];
        let next = &ring[cycle_index(i, count, 1)];

        if next.y == pt.y
            && (next.x == pt.x || (curr.y == pt.y && ((next.x > pt.x) == (curr.x < pt.x))))
        {
            return -1;
        }

        if (curr.y < pt.y) == (next.y < pt.y) {
            continue;
        }

        if curr.x >= pt.x && next.x > pt.x {
            result = 1 - result;
            continue;
        }

        if curr.x < pt.x && next.x <= pt.x {
            continue;
        }

        let d = (curr.x as i128 - pt.x as i128) * (next.y as i128 - pt.y as i128)
            - (next.x as i128 - pt.x as i128) * (curr.y as i128 - pt.y as i128);

        if d == 0 {
            return -1;
        }

        if (d > 0) == (next.y > curr.y) {
            result = 1 - result;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<IntPoint> {
        vec![
            IntPoint::new(0, 0),
            IntPoint::new(10, 0),
            IntPoint::new(10, 10),
            IntPoint::new(0, 10),
        ]
    }

    #[test]
    fn round_div_rounds_half_away_from_zero() {
        assert_eq!(round_div(5, 2), 3);
        assert_eq!(round_div(-5, 2), -3);
        assert_eq!(round_div(5, -2), -3);
        assert_eq!(round_div(7, 3), 2);
        assert_eq!(round_div(-7, 3), -2);
        assert_eq!(round_div(0, 9), 0);
    }

    #[test]
    fn slopes_equal_survives_large_coordinates() {
        let big = 1i64 << 61;
        let a = IntPoint::new(-big, -big);
        let b = IntPoint::new(0, 0);
        let c = IntPoint::new(big, big);

        assert!(slopes_equal(&a, &b, &c));
        assert!(!slopes_equal(&a, &b, &IntPoint::new(big, big - 1)));
    }

    #[test]
    fn double_area_of_ccw_square_is_positive() {
        assert_eq!(double_area(&square()), 200);
        let mut reversed = square();
        reversed.reverse();
        assert_eq!(double_area(&reversed), -200);
    }

    #[test]
    fn point_in_polygon_distinguishes_inside_outside_and_boundary() {
        let ring = square();

        assert_eq!(point_in_polygon(&IntPoint::new(5, 5), &ring), 1);
        assert_eq!(point_in_polygon(&IntPoint::new(15, 5), &ring), 0);
        assert_eq!(point_in_polygon(&IntPoint::new(10, 5), &ring), -1);
        assert_eq!(point_in_polygon(&IntPoint::new(0, 0), &ring), -1);
    }

    #[test]
    fn between_requires_strict_ordering() {
        let a = IntPoint::new(0, 0);
        let b = IntPoint::new(5, 0);
        let c = IntPoint::new(10, 0);

        assert!(pt2_is_between_pt1_and_pt3(&a, &b, &c));
        assert!(!pt2_is_between_pt1_and_pt3(&a, &c, &b));
        assert!(!pt2_is_between_pt1_and_pt3(&a, &a, &c));
    }
}
