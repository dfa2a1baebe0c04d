use std::ops::Index;

use crate::geometry::point::IntPoint;
use crate::utils::math::{double_area, point_in_polygon};

/// An ordered ring (or polyline, for offsetting) of integer points.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    points: Vec<IntPoint>,
}

impl Path {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    pub fn add_point(&mut self, x: i64, y: i64) {
        self.points.push(IntPoint::new(x, y));
    }

    pub fn push(&mut self, point: IntPoint) {
        self.points.push(point);
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<(i64, i64)> {
        self.points.get(index).map(|point| (point.x, point.y))
    }

    pub fn points(&self) -> &[IntPoint] {
        &self.points
    }

    /// Shoelace area; positive for counter-clockwise rings in a y-up frame.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        double_area(&self.points) as f64 * 0.5
    }

    /// `true` when the area is non-negative.
    pub fn orientation(&self) -> bool {
        double_area(&self.points) >= 0
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// 0 outside, 1 inside, -1 on the boundary.
    pub fn contains_point(&self, x: i64, y: i64) -> i32 {
        point_in_polygon(&IntPoint::new(x, y), &self.points)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.points.iter().map(|point| (point.x, point.y))
    }
}

impl Index<usize> for Path {
    type Output = IntPoint;

    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl From<Vec<IntPoint>> for Path {
    fn from(points: Vec<IntPoint>) -> Self {
        Self { points }
    }
}

impl From<Path> for Vec<IntPoint> {
    fn from(path: Path) -> Self {
        path.points
    }
}

impl FromIterator<(i64, i64)> for Path {
    fn from_iter<I: IntoIterator<Item = (i64, i64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().map(IntPoint::from).collect(),
        }
    }
}

impl FromIterator<IntPoint> for Path {
    fn from_iter<I: IntoIterator<Item = IntPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// An ordered collection of paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paths {
    paths: Vec<Path>,
}

impl Paths {
    pub fn new() -> Self {
        Self { paths: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            paths: Vec::with_capacity(capacity),
        }
    }

    pub fn add_path(&mut self, path: Path) {
        self.paths.push(path);
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Path {
        self.paths.remove(index)
    }

    /// Sum of the signed areas, so holes subtract from their outers.
    pub fn area(&self) -> f64 {
        self.paths.iter().map(Path::area).sum()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Path> {
        self.paths.iter()
    }
}

impl Index<usize> for Paths {
    type Output = Path;

    fn index(&self, index: usize) -> &Self::Output {
        &self.paths[index]
    }
}

impl From<Vec<Path>> for Paths {
    fn from(paths: Vec<Path>) -> Self {
        Self { paths }
    }
}

impl From<Path> for Paths {
    fn from(path: Path) -> Self {
        Self { paths: vec![path] }
    }
}

impl FromIterator<Path> for Paths {
    fn from_iter<I: IntoIterator<Item = Path>>(iter: I) -> Self {
        Self {
            paths: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Paths {
    type Item = Path;
    type IntoIter = std::vec::IntoIter<Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Paths {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
