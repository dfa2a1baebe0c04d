use crate::geometry::path::{Path, Paths};
use crate::geometry::point::Point;
use crate::utils::number::Number;

/// Axis-aligned bounds; `top` is the smallest y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundRect<T: Number> {
    pub left: T,
    pub top: T,
    pub right: T,
    pub bottom: T,
}

impl<T: Number> BoundRect<T> {
    pub fn new(left: T, top: T, right: T, bottom: T) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn from_point(point: &Point<T>) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    pub fn include(&mut self, point: &Point<T>) {
        self.left = self.left.min_num(point.x);
        self.top = self.top.min_num(point.y);
        self.right = self.right.max_num(point.x);
        self.bottom = self.bottom.max_num(point.y);
    }

    pub fn width(&self) -> T {
        self.right - self.left
    }

    pub fn height(&self) -> T {
        self.bottom - self.top
    }

    pub fn expanded(&self, margin: T) -> Self {
        Self::new(
            self.left - margin,
            self.top - margin,
            self.right + margin,
            self.bottom + margin,
        )
    }
}

impl BoundRect<i64> {
    /// Bounds of every point in `paths`, or `None` when there are no points.
    pub fn from_paths(paths: &Paths) -> Option<Self> {
        let mut points = paths.iter().flat_map(|path| path.points().iter());
        let mut result = Self::from_point(points.next()?);

        points.for_each(|point| result.include(point));

        Some(result)
    }

    /// Clockwise ring (y up) around the rectangle, starting at `(left, bottom)`.
    pub fn to_path(&self) -> Path {
        [
            (self.left, self.bottom),
            (self.right, self.bottom),
            (self.right, self.top),
            (self.left, self.top),
        ]
        .into_iter()
        .collect()
    }
}
