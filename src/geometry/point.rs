use crate::utils::number::Number;
use crate::utils::round::round_to_i64;

/// Points order by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Point<T: Number> {
    pub x: T,
    pub y: T,
}

pub type IntPoint = Point<i64>;
pub type DoublePoint = Point<f64>;

impl<T: Number> Point<T> {
    #[inline(always)]
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    #[inline(always)]
    pub fn add(&self, other: &Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    #[inline(always)]
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    #[inline(always)]
    pub fn reverse(&self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl DoublePoint {
    #[inline(always)]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline(always)]
    pub fn cross(&self, other: &Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Unit normal of the segment `from -> to`, pointing to its right in a y-up frame.
    pub fn unit_normal(from: &IntPoint, to: &IntPoint) -> Self {
        if from == to {
            return Self::new(0.0, 0.0);
        }

        let dx = to.x as f64 - from.x as f64;
        let dy = to.y as f64 - from.y as f64;
        let f = 1.0 / (dx * dx + dy * dy).sqrt();

        Self::new(dy * f, -dx * f)
    }
}

impl IntPoint {
    /// Offsets the point by `normal * delta`, rounding the result.
    #[inline(always)]
    pub fn offset(&self, normal: &DoublePoint, delta: f64) -> Self {
        IntPoint::new(
            round_to_i64(self.x as f64 + normal.x * delta),
            round_to_i64(self.y as f64 + normal.y * delta),
        )
    }
}

impl From<(i64, i64)> for IntPoint {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl From<IntPoint> for (i64, i64) {
    fn from(point: IntPoint) -> Self {
        (point.x, point.y)
    }
}
