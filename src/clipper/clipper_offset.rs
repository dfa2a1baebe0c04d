use crate::clipper::clipper::{check_range, Clipper};
use crate::clipper::constants::{OFFSET_FRAME_MARGIN, TOLERANCE, TWO_PI};
use crate::clipper::enums::{ClipType, EndType, JoinType, PolyFillType, PolyType};
use crate::clipper::error::ClipperError;
use crate::geometry::bound_rect::BoundRect;
use crate::geometry::path::{Path, Paths};
use crate::geometry::point::{DoublePoint, IntPoint};
use crate::offset_config::OffsetConfig;
use crate::utils::round::round_to_i64;
use crate::wasm_log;
use std::f64::consts::PI;

struct OffsetNode {
    contour: Path,
    join_type: JoinType,
    end_type: EndType,
}

/// Offsets closed polygons and open polylines by a signed distance.
pub struct ClipperOffset {
    nodes: Vec<OffsetNode>,
    lowest: Option<(usize, usize)>,
    config: OffsetConfig,
    src_poly: Vec<IntPoint>,
    dest_poly: Vec<IntPoint>,
    dest_polys: Paths,
    normals: Vec<DoublePoint>,
    delta: f64,
    sin_a: f64,
    sin: f64,
    cos: f64,
    miter_lim: f64,
    steps_per_rad: f64,
}

impl Default for ClipperOffset {
    fn default() -> Self {
        Self::new(OffsetConfig::default())
    }
}

impl ClipperOffset {
    pub fn new(config: OffsetConfig) -> Self {
        Self {
            nodes: Vec::new(),
            lowest: None,
            config,
            src_poly: Vec::new(),
            dest_poly: Vec::new(),
            dest_polys: Paths::new(),
            normals: Vec::new(),
            delta: 0.0,
            sin_a: 0.0,
            sin: 0.0,
            cos: 0.0,
            miter_lim: 0.0,
            steps_per_rad: 0.0,
        }
    }

    pub fn config(&self) -> OffsetConfig {
        self.config
    }

    pub fn set_miter_limit(&mut self, value: f64) {
        self.config.set_miter_limit(value);
    }

    pub fn set_arc_tolerance(&mut self, value: f64) {
        self.config.set_arc_tolerance(value);
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.lowest = None;
    }

    /// Registers a path with its corner and end treatment. Consecutive
    /// duplicates are dropped; closed polygons with fewer than three distinct
    /// points are ignored and give `Ok(false)`.
    pub fn add_path(&mut self, path: &Path, join_type: JoinType, end_type: EndType) -> Result<bool, ClipperError> {
        check_range(path)?;

        let points = path.points();

        if points.is_empty() {
            return Ok(false);
        }

        let mut high_index = points.len() - 1;

        if end_type.is_closed() {
            while high_index > 0 && points[0] == points[high_index] {
                high_index -= 1;
            }
        }

        let mut contour = Path::with_capacity(high_index + 1);
        let mut last = points[0];
        let mut lowest = 0;
        let mut lowest_pt = last;

        contour.push(last);

        for point in points.iter().take(high_index + 1).skip(1) {
            if *point == last {
                continue;
            }

            contour.push(*point);
            last = *point;

            if is_lower(point, &lowest_pt) {
                lowest = contour.len() - 1;
                lowest_pt = *point;
            }
        }

        if end_type == EndType::ClosedPolygon && contour.len() < 3 {
            return Ok(false);
        }

        self.nodes.push(OffsetNode {
            contour,
            join_type,
            end_type,
        });

        if end_type != EndType::ClosedPolygon {
            return Ok(true);
        }

        let node_index = self.nodes.len() - 1;
        let replaces = match self.lowest {
            None => true,
            Some((node, point)) => is_lower(&lowest_pt, &self.nodes[node].contour.points()[point]),
        };

        if replaces {
            self.lowest = Some((node_index, lowest));
        }

        Ok(true)
    }

    pub fn add_paths(&mut self, paths: &Paths, join_type: JoinType, end_type: EndType) -> Result<bool, ClipperError> {
        let mut result = false;

        for path in paths.iter() {
            if self.add_path(path, join_type, end_type)? {
                result = true;
            }
        }

        Ok(result)
    }

    /// The polygon owning the lowest vertex decides which orientation counts
    /// as outer; closed lines are always made positive. Returns which stored
    /// contours must be walked backwards.
    fn orientation_fixes(&self) -> Vec<bool> {
        let is_lowest_reversed = match self.lowest {
            Some((node, _)) => !self.nodes[node].contour.orientation(),
            None => false,
        };

        self.nodes
            .iter()
            .map(|node| match node.end_type {
                EndType::ClosedPolygon => is_lowest_reversed,
                EndType::ClosedLine => is_lowest_reversed == node.contour.orientation(),
                _ => false,
            })
            .collect()
    }

    /// Offsets every registered path by `delta` and resolves overlaps. The
    /// registered paths are left untouched; a zero delta returns the closed
    /// polygons as they were added.
    pub fn execute(&mut self, delta: f64) -> Paths {
        if delta.abs() < TOLERANCE {
            return self
                .nodes
                .iter()
                .filter(|node| node.end_type == EndType::ClosedPolygon)
                .map(|node| node.contour.clone())
                .collect();
        }

        let fixes = self.orientation_fixes();
        self.do_offset(delta, &fixes);

        let mut clipper = Clipper::new();

        if let Err(error) = clipper.add_paths(&self.dest_polys, PolyType::Subject) {
            wasm_log!("Offset aborted: {}", error);
            return Paths::new();
        }

        if delta > 0.0 {
            return clipper.execute(ClipType::Union, PolyFillType::Positive, PolyFillType::Positive);
        }

        let frame = match BoundRect::from_paths(&self.dest_polys) {
            Some(bounds) => bounds.expanded(OFFSET_FRAME_MARGIN).to_path(),
            None => return Paths::new(),
        };

        if let Err(error) = clipper.add_path(&frame, PolyType::Subject) {
            wasm_log!("Offset aborted: {}", error);
            return Paths::new();
        }

        clipper.set_reverse_solution(true);

        let mut result = clipper.execute(ClipType::Union, PolyFillType::Negative, PolyFillType::Negative);
        let frame_index = result
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.area().abs().total_cmp(&b.1.area().abs()))
            .map(|(index, _)| index);

        // the frame encloses every other ring
        if let Some(index) = frame_index {
            result.remove(index);
            wasm_log!("Removed offset frame, {} paths left", result.len());
        }

        result
    }

    fn do_offset(&mut self, delta: f64, fixes: &[bool]) {
        self.dest_polys.clear();
        self.delta = delta;
        self.miter_lim = self.config.miter_threshold();

        let y = self.config.arc_tolerance_for(delta);
        let mut steps = PI / (1.0 - y / delta.abs()).acos();

        if steps > delta.abs() * PI {
            steps = delta.abs() * PI;
        }

        self.sin = (TWO_PI / steps).sin();
        self.cos = (TWO_PI / steps).cos();
        self.steps_per_rad = steps / TWO_PI;

        if delta < 0.0 {
            self.sin = -self.sin;
        }

        for node_index in 0..self.nodes.len() {
            let (join_type, end_type) = {
                let node = &self.nodes[node_index];
                self.src_poly.clear();
                self.src_poly.extend_from_slice(node.contour.points());
                (node.join_type, node.end_type)
            };

            if fixes[node_index] {
                self.src_poly.reverse();
            }

            let len = self.src_poly.len();

            if len == 0 || (delta <= 0.0 && (len < 3 || end_type != EndType::ClosedPolygon)) {
                continue;
            }

            self.dest_poly.clear();

            if len == 1 {
                self.offset_single_point(join_type, steps);
                continue;
            }

            self.build_normals(end_type);

            match end_type {
                EndType::ClosedPolygon => {
                    let mut k = len - 1;
                    for j in 0..len {
                        k = self.offset_point(j, k, join_type);
                    }
                    self.flush_dest_poly();
                }
                EndType::ClosedLine => {
                    let mut k = len - 1;
                    for j in 0..len {
                        k = self.offset_point(j, k, join_type);
                    }
                    self.flush_dest_poly();

                    // walk back along the other side
                    let last = self.normals[len - 1];
                    for j in (1..len).rev() {
                        self.normals[j] = self.normals[j - 1].reverse();
                    }
                    self.normals[0] = last.reverse();

                    k = 0;
                    for j in (0..len).rev() {
                        k = self.offset_point(j, k, join_type);
                    }
                    self.flush_dest_poly();
                }
                _ => self.offset_open_path(join_type, end_type),
            }
        }
    }

    fn flush_dest_poly(&mut self) {
        let points = std::mem::take(&mut self.dest_poly);
        self.dest_polys.add_path(Path::from(points));
    }

    fn build_normals(&mut self, end_type: EndType) {
        let len = self.src_poly.len();

        self.normals.clear();

        for j in 0..len - 1 {
            self.normals
                .push(DoublePoint::unit_normal(&self.src_poly[j], &self.src_poly[j + 1]));
        }

        let closing = if end_type.is_closed() {
            DoublePoint::unit_normal(&self.src_poly[len - 1], &self.src_poly[0])
        } else {
            self.normals[len - 2]
        };

        self.normals.push(closing);
    }

    /// A lone point becomes a circle (round joins) or a square.
    fn offset_single_point(&mut self, join_type: JoinType, steps: f64) {
        let center = self.src_poly[0];

        if join_type == JoinType::Round {
            let mut x = 1.0;
            let mut y = 0.0;
            let mut j = 1.0;

            while j <= steps {
                self.dest_poly
                    .push(center.offset(&DoublePoint::new(x, y), self.delta));
                let x2 = x;
                x = x * self.cos - self.sin * y;
                y = x2 * self.sin + y * self.cos;
                j += 1.0;
            }
        } else {
            for (x, y) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
                self.dest_poly
                    .push(center.offset(&DoublePoint::new(x, y), self.delta));
            }
        }

        self.flush_dest_poly();
    }

    fn offset_open_path(&mut self, join_type: JoinType, end_type: EndType) {
        let len = self.src_poly.len();
        let mut k = 0;

        for j in 1..len - 1 {
            k = self.offset_point(j, k, join_type);
        }

        let j = len - 1;

        if end_type == EndType::OpenButt {
            let pt = self.src_poly[j];
            let normal = self.normals[j];
            self.dest_poly.push(pt.offset(&normal, self.delta));
            self.dest_poly.push(pt.offset(&normal, -self.delta));
        } else {
            self.sin_a = 0.0;
            self.normals[j] = self.normals[j].reverse();
            self.do_cap(j, len - 2, end_type);
        }

        // walk back along the other side
        for j in (1..len).rev() {
            self.normals[j] = self.normals[j - 1].reverse();
        }
        self.normals[0] = self.normals[1].reverse();

        k = len - 1;
        for j in (1..len - 1).rev() {
            k = self.offset_point(j, k, join_type);
        }

        if end_type == EndType::OpenButt {
            let pt = self.src_poly[0];
            let normal = self.normals[0];
            self.dest_poly.push(pt.offset(&normal, -self.delta));
            self.dest_poly.push(pt.offset(&normal, self.delta));
        } else {
            self.sin_a = 0.0;
            self.do_cap(0, 1, end_type);
        }

        self.flush_dest_poly();
    }

    fn do_cap(&mut self, j: usize, k: usize, end_type: EndType) {
        if end_type == EndType::OpenSquare {
            self.do_square(j, k);
        } else {
            self.do_round(j, k);
        }
    }

    /// Emits the join at vertex `j` between edge normals `k` and `j`; returns
    /// the normal index to use as `k` for the next vertex.
    fn offset_point(&mut self, j: usize, k: usize, join_type: JoinType) -> usize {
        let normal_j = self.normals[j];
        let normal_k = self.normals[k];
        let pt = self.src_poly[j];

        self.sin_a = normal_k.cross(&normal_j);

        if (self.sin_a * self.delta).abs() < 1.0 {
            // nearly collinear edges
            if normal_k.dot(&normal_j) > 0.0 {
                self.dest_poly.push(pt.offset(&normal_k, self.delta));
                return k;
            }
        } else {
            self.sin_a = self.sin_a.clamp(-1.0, 1.0);
        }

        if self.sin_a * self.delta < 0.0 {
            self.dest_poly.push(pt.offset(&normal_k, self.delta));
            self.dest_poly.push(pt);
            self.dest_poly.push(pt.offset(&normal_j, self.delta));
        } else {
            match join_type {
                JoinType::Miter => {
                    let r = 1.0 + normal_j.dot(&normal_k);
                    if r >= self.miter_lim {
                        self.do_miter(j, k, r);
                    } else {
                        self.do_square(j, k);
                    }
                }
                JoinType::Square => self.do_square(j, k),
                JoinType::Round => self.do_round(j, k),
            }
        }

        j
    }

    fn do_square(&mut self, j: usize, k: usize) {
        let normal_j = self.normals[j];
        let normal_k = self.normals[k];
        let pt = self.src_poly[j];
        let dx = (self.sin_a.atan2(normal_k.dot(&normal_j)) / 4.0).tan();

        self.dest_poly.push(pt.offset(
            &DoublePoint::new(normal_k.x - normal_k.y * dx, normal_k.y + normal_k.x * dx),
            self.delta,
        ));
        self.dest_poly.push(pt.offset(
            &DoublePoint::new(normal_j.x + normal_j.y * dx, normal_j.y - normal_j.x * dx),
            self.delta,
        ));
    }

    fn do_miter(&mut self, j: usize, k: usize, r: f64) {
        let q = self.delta / r;
        let bisector = self.normals[k].add(&self.normals[j]);

        self.dest_poly.push(self.src_poly[j].offset(&bisector, q));
    }

    fn do_round(&mut self, j: usize, k: usize) {
        let normal_j = self.normals[j];
        let normal_k = self.normals[k];
        let pt = self.src_poly[j];
        let a = self.sin_a.atan2(normal_k.dot(&normal_j));
        let steps = round_to_i64(self.steps_per_rad * a.abs()).max(1);
        let mut x = normal_k.x;
        let mut y = normal_k.y;

        for _ in 0..steps {
            self.dest_poly
                .push(pt.offset(&DoublePoint::new(x, y), self.delta));
            let x2 = x;
            x = x * self.cos - self.sin * y;
            y = x2 * self.sin + y * self.cos;
        }

        self.dest_poly.push(pt.offset(&normal_j, self.delta));
    }
}

/// Lower means larger y, ties broken by smaller x.
#[inline(always)]
fn is_lower(point: &IntPoint, other: &IntPoint) -> bool {
    point.y > other.y || (point.y == other.y && point.x < other.x)
}
