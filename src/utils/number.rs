use crate::utils::round::ClipperRound;
use num_traits::{FromPrimitive, Num, Signed, ToPrimitive};
use std::ops::{Add, Mul, Neg, Sub};

fn wrap(index: usize, offset: usize, len: usize) -> usize {
    (index + offset) % len
}

pub trait Number:
    Num
    + Copy
    + PartialOrd
    + FromPrimitive
    + ToPrimitive
    + ClipperRound
    + Signed
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn min_num(self, other: Self) -> Self;
    fn max_num(self, other: Self) -> Self;

    /// Signed shoelace area of a flat `[x0, y0, x1, y1, ...]` buffer.
    /// Counter-clockwise rings (y axis up) are positive.
    fn polygon_area(points: &[Self]) -> f64 {
        let len = points.len();

        if len < 6 || len & 1 != 0 {
            return 0.0;
        }

        let n_points = len >> 1;
        let mut acc = 0.0;

        for i in 0..n_points {
            let base = i << 1;
            let x0 = points[wrap(base, 0, len)].to_f64().unwrap_or(0.0);
            let y0 = points[wrap(base, 1, len)].to_f64().unwrap_or(0.0);
            let x1 = points[wrap(base, 2, len)].to_f64().unwrap_or(0.0);
            let y1 = points[wrap(base, 3, len)].to_f64().unwrap_or(0.0);

            acc += x0 * y1 - x1 * y0;
        }

        0.5 * acc
    }
}

impl Number for f64 {
    #[inline(always)]
    fn min_num(self, other: Self) -> Self {
        self.min(other)
    }

    #[inline(always)]
    fn max_num(self, other: Self) -> Self {
        self.max(other)
    }
}

impl Number for i64 {
    #[inline(always)]
    fn min_num(self, other: Self) -> Self {
        self.min(other)
    }

    #[inline(always)]
    fn max_num(self, other: Self) -> Self {
        self.max(other)
    }

    fn polygon_area(points: &[Self]) -> f64 {
        let len = points.len();

        if len < 6 || len & 1 != 0 {
            return 0.0;
        }

        let n_points = len >> 1;
        let mut acc: i128 = 0;

        for i in 0..n_points {
            let base = i << 1;
            let x0 = points[wrap(base, 0, len)] as i128;
            let y0 = points[wrap(base, 1, len)] as i128;
            let x1 = points[wrap(base, 2, len)] as i128;
            let y1 = points[wrap(base, 3, len)] as i128;

            acc += x0 * y1 - x1 * y0;
        }

        acc as f64 * 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn area_sign_follows_winding() {
        let ccw: [i64; 8] = [0, 0, 10, 0, 10, 10, 0, 10];
        let cw: [i64; 8] = [0, 0, 0, 10, 10, 10, 10, 0];

        assert_eq!(i64::polygon_area(&ccw), 100.0);
        assert_eq!(i64::polygon_area(&cw), -100.0);
        assert_eq!(f64::polygon_area(&[0.0, 0.0, 4.0, 0.0, 0.0, 3.0]), 6.0);
    }

    #[test]
    fn degenerate_buffers_have_no_area() {
        assert_eq!(i64::polygon_area(&[0, 0, 1, 1]), 0.0);
        assert_eq!(f64::polygon_area(&[0.0, 0.0, 1.0, 1.0, 2.0]), 0.0);
    }
}
