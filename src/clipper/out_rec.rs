use crate::clipper::constants::{HORIZONTAL, UNASSIGNED};
use crate::clipper::enums::Direction;
use crate::clipper::join::{get_overlap, Join, Joins};
use crate::geometry::path::{Path, Paths};
use crate::geometry::point::IntPoint;
use crate::utils::math::{double_area, get_dx, point_in_polygon, pt2_is_between_pt1_and_pt3, slopes_equal};

#[derive(Debug, Clone, Copy)]
pub struct OutPt {
    pub idx: usize,
    pub pt: IntPoint,
    pub next: usize,
    pub prev: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct Rec {
    pub idx: usize,
    pub is_hole: bool,
    pub first_left: usize,
    pub pts: usize,
    pub bottom_pt: usize,
}

/// Output polygons under construction. Each record owns a circular list of
/// points; `pts` is the left-most end and `prev(pts)` the right-most end.
pub struct OutRec {
    recs: Vec<Rec>,
    points: Vec<OutPt>,
    is_reverse_solution: bool,
    is_strictly_simple: bool,
}

impl OutRec {
    pub fn new(is_reverse_solution: bool, is_strictly_simple: bool) -> Self {
        Self {
            recs: Vec::new(),
            points: Vec::new(),
            is_reverse_solution,
            is_strictly_simple,
        }
    }

    pub fn strictly_simple(&self) -> bool {
        self.is_strictly_simple
    }

    pub fn reverse_solution(&self) -> bool {
        self.is_reverse_solution
    }

    pub fn set_strictly_simple(&mut self, value: bool) {
        self.is_strictly_simple = value;
    }

    pub fn set_reverse_solution(&mut self, value: bool) {
        self.is_reverse_solution = value;
    }

    pub fn dispose(&mut self) {
        self.recs.clear();
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.recs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recs.is_empty()
    }

    #[inline(always)]
    pub fn rec(&self, index: usize) -> &Rec {
        &self.recs[index - 1]
    }

    #[inline(always)]
    fn rec_mut(&mut self, index: usize) -> &mut Rec {
        &mut self.recs[index - 1]
    }

    #[inline(always)]
    fn point(&self, index: usize) -> &OutPt {
        &self.points[index - 1]
    }

    #[inline(always)]
    fn point_mut(&mut self, index: usize) -> &mut OutPt {
        &mut self.points[index - 1]
    }

    #[inline(always)]
    pub fn pt(&self, index: usize) -> IntPoint {
        self.point(index).pt
    }

    #[inline(always)]
    pub fn next(&self, index: usize) -> usize {
        self.point(index).next
    }

    #[inline(always)]
    pub fn prev(&self, index: usize) -> usize {
        self.point(index).prev
    }

    #[inline(always)]
    fn set_next(&mut self, index: usize, value: usize) {
        self.point_mut(index).next = value;
    }

    #[inline(always)]
    fn set_prev(&mut self, index: usize, value: usize) {
        self.point_mut(index).prev = value;
    }

    /// Owner record of an output point, following merged records.
    pub fn point_rec(&self, index: usize) -> usize {
        self.get_out_rec(self.point(index).idx)
    }

    pub fn create(&mut self) -> usize {
        let idx = self.recs.len() + 1;

        self.recs.push(Rec {
            idx,
            is_hole: false,
            first_left: UNASSIGNED,
            pts: UNASSIGNED,
            bottom_pt: UNASSIGNED,
        });

        idx
    }

    fn new_point(&mut self, idx: usize, pt: IntPoint, next: usize, prev: usize) -> usize {
        self.points.push(OutPt { idx, pt, next, prev });
        self.points.len()
    }

    /// Starts a new record whose ring holds the single point `pt`.
    pub fn start_polygon(&mut self, pt: IntPoint) -> (usize, usize) {
        let rec_index = self.create();
        let index = self.points.len() + 1;
        let point = self.new_point(rec_index, pt, index, index);

        self.rec_mut(rec_index).pts = point;

        (rec_index, point)
    }

    /// Adds `pt` at the left end (`to_front`) or the right end of a ring,
    /// skipping it when it repeats that end.
    pub fn add_point(&mut self, rec_index: usize, pt: IntPoint, to_front: bool) -> usize {
        let op = self.rec(rec_index).pts;
        let op_prev = self.prev(op);

        if to_front && pt == self.pt(op) {
            return op;
        }
        if !to_front && pt == self.pt(op_prev) {
            return op_prev;
        }

        let idx = self.rec(rec_index).idx;
        let point = self.new_point(idx, pt, op, op_prev);

        self.set_next(op_prev, point);
        self.set_prev(op, point);

        if to_front {
            self.rec_mut(rec_index).pts = point;
        }

        point
    }

    pub fn last_point(&self, rec_index: usize, side: Direction) -> usize {
        let pts = self.rec(rec_index).pts;

        if side == Direction::Left {
            pts
        } else {
            self.prev(pts)
        }
    }

    pub fn get_out_rec(&self, index: usize) -> usize {
        let mut result = index;

        while result != self.rec(result).idx {
            result = self.rec(result).idx;
        }

        result
    }

    pub fn set_hole_state(&mut self, rec_index: usize, first_left: usize) {
        let is_hole = first_left != UNASSIGNED && !self.rec(first_left).is_hole;
        let rec = self.rec_mut(rec_index);

        rec.first_left = first_left;
        rec.is_hole = is_hole;
    }

    fn reverse_links(&mut self, index: usize) {
        if index == UNASSIGNED {
            return;
        }

        let mut current = index;

        loop {
            let point = self.point_mut(current);
            let next = point.next;
            point.next = point.prev;
            point.prev = next;
            current = next;

            if current == index {
                break;
            }
        }
    }

    pub fn point_count(&self, index: usize) -> usize {
        if index == UNASSIGNED {
            return 0;
        }

        let mut result = 0;
        let mut current = index;

        loop {
            result += 1;
            current = self.next(current);

            if current == index {
                break;
            }
        }

        result
    }

    /// Ring points in output order: from `prev(index)` walking backwards.
    fn export_points(&self, index: usize) -> Vec<IntPoint> {
        let count = self.point_count(index);
        let mut result = Vec::with_capacity(count);

        if count == 0 {
            return result;
        }

        let mut current = self.prev(index);

        for _ in 0..count {
            result.push(self.pt(current));
            current = self.prev(current);
        }

        result
    }

    fn ring_area(&self, index: usize) -> i128 {
        double_area(&self.export_points(index))
    }

    pub fn area(&self, rec_index: usize) -> i128 {
        self.ring_area(self.rec(rec_index).pts)
    }

    fn needs_reverse(&self, rec_index: usize) -> bool {
        (self.rec(rec_index).is_hole != self.is_reverse_solution) == (self.area(rec_index) > 0)
    }

    /// Orients outers positive and holes negative (swapped when the
    /// solution is reversed).
    pub fn fix_directions(&mut self) {
        for rec_index in 1..=self.recs.len() {
            let pts = self.rec(rec_index).pts;

            if pts != UNASSIGNED && self.needs_reverse(rec_index) {
                self.reverse_links(pts);
            }
        }
    }

    pub fn is_right_of(&self, rec1: usize, rec2: usize) -> bool {
        let mut current = rec1;

        loop {
            current = self.rec(current).first_left;

            if current == rec2 {
                return true;
            }
            if current == UNASSIGNED {
                return false;
            }
        }
    }

    /// The fragment whose hole state wins when two records merge.
    pub fn get_hole_state_rec(&mut self, rec1: usize, rec2: usize) -> usize {
        if self.is_right_of(rec1, rec2) {
            rec2
        } else if self.is_right_of(rec2, rec1) {
            rec1
        } else {
            self.get_lowermost_rec(rec1, rec2)
        }
    }

    fn get_lowermost_rec(&mut self, rec1: usize, rec2: usize) -> usize {
        for rec_index in [rec1, rec2] {
            if self.rec(rec_index).bottom_pt == UNASSIGNED {
                let bottom = self.get_bottom_pt(self.rec(rec_index).pts);
                self.rec_mut(rec_index).bottom_pt = bottom;
            }
        }

        let out_pt1 = self.rec(rec1).bottom_pt;
        let out_pt2 = self.rec(rec2).bottom_pt;
        let pt1 = self.pt(out_pt1);
        let pt2 = self.pt(out_pt2);

        if pt1.y > pt2.y {
            rec1
        } else if pt1.y < pt2.y {
            rec2
        } else if pt1.x < pt2.x {
            rec1
        } else if pt1.x > pt2.x {
            rec2
        } else if self.next(out_pt1) == out_pt1 {
            rec2
        } else if self.next(out_pt2) == out_pt2 {
            rec1
        } else if self.first_is_bottom_pt(out_pt1, out_pt2) {
            rec1
        } else {
            rec2
        }
    }

    fn get_bottom_pt(&self, index: usize) -> usize {
        let mut result = index;
        let mut dups = UNASSIGNED;
        let mut current = self.next(result);

        while current != result {
            let pt = self.pt(current);
            let best = self.pt(result);

            if pt.y > best.y {
                result = current;
                dups = UNASSIGNED;
            } else if pt.y == best.y && pt.x <= best.x {
                if pt.x < best.x {
                    dups = UNASSIGNED;
                    result = current;
                } else if self.next(current) != result && self.prev(current) != result {
                    dups = current;
                }
            }

            current = self.next(current);
        }

        if dups != UNASSIGNED {
            // several vertices share the bottom point
            while dups != current {
                if !self.first_is_bottom_pt(current, dups) {
                    result = dups;
                }

                dups = self.next(dups);
                while self.pt(dups) != self.pt(result) {
                    dups = self.next(dups);
                }
            }
        }

        result
    }

    fn neighbour_dx(&self, index: usize, forward: bool) -> f64 {
        let pt = self.pt(index);
        let step = |i: usize| if forward { self.next(i) } else { self.prev(i) };
        let mut current = step(index);

        while self.pt(current) == pt && current != index {
            current = step(current);
        }

        get_dx(&pt, &self.pt(current), HORIZONTAL).abs()
    }

    fn first_is_bottom_pt(&self, bottom1: usize, bottom2: usize) -> bool {
        let dx1p = self.neighbour_dx(bottom1, false);
        let dx1n = self.neighbour_dx(bottom1, true);
        let dx2p = self.neighbour_dx(bottom2, false);
        let dx2n = self.neighbour_dx(bottom2, true);

        if dx1p.max(dx1n) == dx2p.max(dx2n) && dx1p.min(dx1n) == dx2p.min(dx2n) {
            self.ring_area(bottom1) > 0
        } else {
            (dx1p >= dx2p && dx1p >= dx2n) || (dx1n >= dx2p && dx1n >= dx2n)
        }
    }

    /// Splices the ring of `rec2` onto `rec1` at the ends given by the edge
    /// sides, and retires `rec2`.
    pub fn append(&mut self, rec1: usize, rec2: usize, side1: Direction, side2: Direction) {
        let hole_state_rec = self.get_hole_state_rec(rec1, rec2);

        let p1_lft = self.rec(rec1).pts;
        let p1_rt = self.prev(p1_lft);
        let p2_lft = self.rec(rec2).pts;
        let p2_rt = self.prev(p2_lft);

        match (side1, side2) {
            (Direction::Left, Direction::Left) => {
                // z y x a b c
                self.reverse_links(p2_lft);
                self.set_next(p2_lft, p1_lft);
                self.set_prev(p1_lft, p2_lft);
                self.set_next(p1_rt, p2_rt);
                self.set_prev(p2_rt, p1_rt);
                self.rec_mut(rec1).pts = p2_rt;
            }
            (Direction::Left, Direction::Right) => {
                // x y z a b c
                self.set_next(p2_rt, p1_lft);
                self.set_prev(p1_lft, p2_rt);
                self.set_prev(p2_lft, p1_rt);
                self.set_next(p1_rt, p2_lft);
                self.rec_mut(rec1).pts = p2_lft;
            }
            (Direction::Right, Direction::Right) => {
                // a b c z y x
                self.reverse_links(p2_lft);
                self.set_next(p1_rt, p2_rt);
                self.set_prev(p2_rt, p1_rt);
                self.set_next(p2_lft, p1_lft);
                self.set_prev(p1_lft, p2_lft);
            }
            (Direction::Right, Direction::Left) => {
                // a b c x y z
                self.set_next(p1_rt, p2_lft);
                self.set_prev(p2_lft, p1_rt);
                self.set_prev(p1_lft, p2_rt);
                self.set_next(p2_rt, p1_lft);
            }
        }

        self.rec_mut(rec1).bottom_pt = UNASSIGNED;

        if hole_state_rec == rec2 {
            let (first_left, is_hole) = {
                let rec = self.rec(rec2);
                (rec.first_left, rec.is_hole)
            };

            if first_left != rec1 {
                self.rec_mut(rec1).first_left = first_left;
            }
            self.rec_mut(rec1).is_hole = is_hole;
        }

        let idx = self.rec(rec1).idx;
        let rec = self.rec_mut(rec2);
        rec.pts = UNASSIGNED;
        rec.bottom_pt = UNASSIGNED;
        rec.first_left = rec1;
        rec.idx = idx;
    }

    /// Removes duplicate vertices and collinear joints; drops rings that
    /// collapse below three points.
    pub fn fixup_out_polygon(&mut self, rec_index: usize) {
        let preserve_collinear = self.is_strictly_simple;
        let mut last_ok = UNASSIGNED;
        let mut pp = self.rec(rec_index).pts;

        self.rec_mut(rec_index).bottom_pt = UNASSIGNED;

        loop {
            let prev = self.prev(pp);
            let next = self.next(pp);

            if prev == pp || prev == next {
                self.rec_mut(rec_index).pts = UNASSIGNED;
                return;
            }

            let pt = self.pt(pp);
            let prev_pt = self.pt(prev);
            let next_pt = self.pt(next);

            if pt == next_pt
                || pt == prev_pt
                || (slopes_equal(&prev_pt, &pt, &next_pt)
                    && (!preserve_collinear
                        || !pt2_is_between_pt1_and_pt3(&prev_pt, &pt, &next_pt)))
            {
                last_ok = UNASSIGNED;
                self.set_next(prev, next);
                self.set_prev(next, prev);
                pp = prev;
            } else if pp == last_ok {
                break;
            } else {
                if last_ok == UNASSIGNED {
                    last_ok = pp;
                }
                pp = next;
            }
        }

        self.rec_mut(rec_index).pts = pp;
    }

    fn dup_out_pt(&mut self, index: usize, insert_after: bool) -> usize {
        let source = *self.point(index);

        if insert_after {
            let result = self.new_point(source.idx, source.pt, source.next, index);
            self.set_prev(source.next, result);
            self.set_next(index, result);
            result
        } else {
            let result = self.new_point(source.idx, source.pt, index, source.prev);
            self.set_next(source.prev, result);
            self.set_prev(index, result);
            result
        }
    }

    fn link_pair(&mut self, op1: usize, op2: usize, op1b: usize, op2b: usize, reverse: bool) {
        if reverse {
            self.set_prev(op1, op2);
            self.set_next(op2, op1);
            self.set_next(op1b, op2b);
            self.set_prev(op2b, op1b);
        } else {
            self.set_next(op1, op2);
            self.set_prev(op2, op1);
            self.set_prev(op1b, op2b);
            self.set_next(op2b, op1b);
        }
    }

    /// Steps from `index` over vertices sharing its position.
    fn skip_same_point(&self, index: usize, forward: bool) -> usize {
        let pt = self.pt(index);
        let mut current = if forward { self.next(index) } else { self.prev(index) };

        while self.pt(current) == pt && current != index {
            current = if forward { self.next(current) } else { self.prev(current) };
        }

        current
    }

    fn join_points(&mut self, join: &mut Join, rec1: usize, rec2: usize) -> bool {
        let mut op1 = join.out_pt1;
        let mut op2 = join.out_pt2;
        let off_pt = join.off_pt;
        let is_horizontal = self.pt(op1).y == off_pt.y;

        if is_horizontal && off_pt == self.pt(op1) && off_pt == self.pt(op2) {
            // strictly simple join
            if rec1 != rec2 {
                return false;
            }

            let mut op1b = self.next(op1);
            while op1b != op1 && self.pt(op1b) == off_pt {
                op1b = self.next(op1b);
            }
            let reverse1 = self.pt(op1b).y > off_pt.y;

            let mut op2b = self.next(op2);
            while op2b != op2 && self.pt(op2b) == off_pt {
                op2b = self.next(op2b);
            }
            let reverse2 = self.pt(op2b).y > off_pt.y;

            if reverse1 == reverse2 {
                return false;
            }

            let op1b = self.dup_out_pt(op1, !reverse1);
            let op2b = self.dup_out_pt(op2, reverse1);
            self.link_pair(op1, op2, op1b, op2b, reverse1);
            join.out_pt1 = op1;
            join.out_pt2 = op1b;

            return true;
        }

        if is_horizontal {
            // op1/op2 can sit anywhere along the collinear horizontals
            let mut op1b = op1;
            while self.pt(self.prev(op1)).y == self.pt(op1).y && self.prev(op1) != op1b && self.prev(op1) != op2 {
                op1 = self.prev(op1);
            }
            while self.pt(self.next(op1b)).y == self.pt(op1b).y && self.next(op1b) != op1 && self.next(op1b) != op2 {
                op1b = self.next(op1b);
            }
            if self.next(op1b) == op1 || self.next(op1b) == op2 {
                return false;
            }

            let mut op2b = op2;
            while self.pt(self.prev(op2)).y == self.pt(op2).y && self.prev(op2) != op2b && self.prev(op2) != op1b {
                op2 = self.prev(op2);
            }
            while self.pt(self.next(op2b)).y == self.pt(op2b).y && self.next(op2b) != op2 && self.next(op2b) != op1 {
                op2b = self.next(op2b);
            }
            if self.next(op2b) == op2 || self.next(op2b) == op1 {
                return false;
            }

            let (left, right) = match get_overlap(
                self.pt(op1).x,
                self.pt(op1b).x,
                self.pt(op2).x,
                self.pt(op2b).x,
            ) {
                Some(overlap) => overlap,
                None => return false,
            };

            let in_range = |x: i64| x >= left && x <= right;
            let (pt, discard_left) = if in_range(self.pt(op1).x) {
                (self.pt(op1), self.pt(op1).x > self.pt(op1b).x)
            } else if in_range(self.pt(op2).x) {
                (self.pt(op2), self.pt(op2).x > self.pt(op2b).x)
            } else if in_range(self.pt(op1b).x) {
                (self.pt(op1b), self.pt(op1b).x > self.pt(op1).x)
            } else {
                (self.pt(op2b), self.pt(op2b).x > self.pt(op2).x)
            };

            join.out_pt1 = op1;
            join.out_pt2 = op2;

            return self.join_horz(op1, op1b, op2, op2b, pt, discard_left);
        }

        // op1 and op2 share the bottom of the overlap, off_pt lies above
        let mut op1b = self.skip_same_point(op1, true);
        let reverse1 = self.pt(op1b).y > self.pt(op1).y || !slopes_equal(&self.pt(op1), &self.pt(op1b), &off_pt);
        if reverse1 {
            op1b = self.skip_same_point(op1, false);
            if self.pt(op1b).y > self.pt(op1).y || !slopes_equal(&self.pt(op1), &self.pt(op1b), &off_pt) {
                return false;
            }
        }

        let mut op2b = self.skip_same_point(op2, true);
        let reverse2 = self.pt(op2b).y > self.pt(op2).y || !slopes_equal(&self.pt(op2), &self.pt(op2b), &off_pt);
        if reverse2 {
            op2b = self.skip_same_point(op2, false);
            if self.pt(op2b).y > self.pt(op2).y || !slopes_equal(&self.pt(op2), &self.pt(op2b), &off_pt) {
                return false;
            }
        }

        if op1b == op1 || op2b == op2 || op1b == op2b || (rec1 == rec2 && reverse1 == reverse2) {
            return false;
        }

        let op1b = self.dup_out_pt(op1, !reverse1);
        let op2b = self.dup_out_pt(op2, reverse1);
        self.link_pair(op1, op2, op1b, op2b, reverse1);
        join.out_pt1 = op1;
        join.out_pt2 = op1b;

        true
    }

    /// Walks `op` along its horizontal towards `pt` and leaves a duplicated
    /// vertex exactly at `pt`.
    fn split_horizontal_at(&mut self, op: usize, pt: IntPoint, left_to_right: bool, discard_left: bool) -> (usize, usize) {
        let mut op = op;

        if left_to_right {
            while self.pt(self.next(op)).x <= pt.x
                && self.pt(self.next(op)).x >= self.pt(op).x
                && self.pt(self.next(op)).y == pt.y
            {
                op = self.next(op);
            }
            if discard_left && self.pt(op).x != pt.x {
                op = self.next(op);
            }
        } else {
            while self.pt(self.next(op)).x >= pt.x
                && self.pt(self.next(op)).x <= self.pt(op).x
                && self.pt(self.next(op)).y == pt.y
            {
                op = self.next(op);
            }
            if !discard_left && self.pt(op).x != pt.x {
                op = self.next(op);
            }
        }

        let insert_after = left_to_right != discard_left;
        let mut opb = self.dup_out_pt(op, insert_after);

        if self.pt(opb) != pt {
            op = opb;
            self.point_mut(op).pt = pt;
            opb = self.dup_out_pt(op, insert_after);
        }

        (op, opb)
    }

    fn join_horz(&mut self, op1: usize, op1b: usize, op2: usize, op2b: usize, pt: IntPoint, discard_left: bool) -> bool {
        let left_to_right1 = self.pt(op1).x <= self.pt(op1b).x;
        let left_to_right2 = self.pt(op2).x <= self.pt(op2b).x;

        if left_to_right1 == left_to_right2 {
            return false;
        }

        let (op1, op1b) = self.split_horizontal_at(op1, pt, left_to_right1, discard_left);
        let (op2, op2b) = self.split_horizontal_at(op2, pt, left_to_right2, discard_left);

        self.link_pair(op1, op2, op1b, op2b, left_to_right1 == discard_left);

        true
    }

    fn update_out_pt_idxs(&mut self, rec_index: usize) {
        let pts = self.rec(rec_index).pts;
        let mut current = pts;

        loop {
            self.point_mut(current).idx = rec_index;
            current = self.prev(current);

            if current == pts {
                break;
            }
        }
    }

    /// Whether ring `out_pt1` lies inside ring `out_pt2`.
    fn poly2_contains_poly1(&self, out_pt1: usize, out_pt2: usize) -> bool {
        let ring = self.export_points(out_pt2);
        let mut current = out_pt1;

        loop {
            let result = point_in_polygon(&self.pt(current), &ring);

            if result >= 0 {
                return result > 0;
            }

            current = self.next(current);

            if current == out_pt1 {
                return true;
            }
        }
    }

    /// Assigns hole state and nesting to the two halves of a split ring.
    fn classify_split(&mut self, rec1: usize, rec2: usize, fix_orientation: bool) {
        let pts1 = self.rec(rec1).pts;
        let pts2 = self.rec(rec2).pts;

        if self.poly2_contains_poly1(pts2, pts1) {
            let is_hole = !self.rec(rec1).is_hole;
            let rec = self.rec_mut(rec2);
            rec.is_hole = is_hole;
            rec.first_left = rec1;

            if fix_orientation && self.needs_reverse(rec2) {
                self.reverse_links(pts2);
            }
        } else if self.poly2_contains_poly1(pts1, pts2) {
            let (is_hole, first_left) = {
                let rec = self.rec(rec1);
                (rec.is_hole, rec.first_left)
            };

            let rec = self.rec_mut(rec2);
            rec.is_hole = is_hole;
            rec.first_left = first_left;

            let rec = self.rec_mut(rec1);
            rec.is_hole = !is_hole;
            rec.first_left = rec2;

            if fix_orientation && self.needs_reverse(rec1) {
                self.reverse_links(pts1);
            }
        } else {
            let (is_hole, first_left) = {
                let rec = self.rec(rec1);
                (rec.is_hole, rec.first_left)
            };

            let rec = self.rec_mut(rec2);
            rec.is_hole = is_hole;
            rec.first_left = first_left;
        }
    }

    /// Merges the output points recorded as overlapping during the sweep,
    /// either joining two rings or splitting one ring in two.
    pub fn join_common_edges(&mut self, joins: &Joins) {
        for i in 0..joins.len() {
            let mut join = joins.get(i);
            let rec1 = self.point_rec(join.out_pt1);
            let mut rec2 = self.point_rec(join.out_pt2);

            if self.rec(rec1).pts == UNASSIGNED || self.rec(rec2).pts == UNASSIGNED {
                continue;
            }

            let hole_state_rec = if rec1 == rec2 {
                rec1
            } else {
                self.get_hole_state_rec(rec1, rec2)
            };

            if !self.join_points(&mut join, rec1, rec2) {
                continue;
            }

            if rec1 == rec2 {
                // the ring was split in two
                self.rec_mut(rec1).pts = join.out_pt1;
                self.rec_mut(rec1).bottom_pt = UNASSIGNED;
                rec2 = self.create();
                self.rec_mut(rec2).pts = join.out_pt2;
                self.update_out_pt_idxs(rec2);
                self.classify_split(rec1, rec2, true);
            } else {
                let (idx, is_hole) = (self.rec(rec1).idx, self.rec(hole_state_rec).is_hole);
                let first_left2 = self.rec(rec2).first_left;

                let rec = self.rec_mut(rec2);
                rec.pts = UNASSIGNED;
                rec.bottom_pt = UNASSIGNED;
                rec.idx = idx;

                self.rec_mut(rec1).is_hole = is_hole;
                if hole_state_rec == rec2 {
                    self.rec_mut(rec1).first_left = first_left2;
                }
                self.rec_mut(rec2).first_left = rec1;
            }
        }
    }

    pub fn fixup_out_polygons(&mut self) {
        for rec_index in 1..=self.recs.len() {
            if self.rec(rec_index).pts != UNASSIGNED {
                self.fixup_out_polygon(rec_index);
            }
        }
    }

    /// Splits rings that touch themselves at a vertex.
    pub fn do_simple_polygons(&mut self) {
        let mut i = 0;

        while i < self.recs.len() {
            i += 1;
            let rec_index = i;
            let mut op = self.rec(rec_index).pts;

            if op == UNASSIGNED {
                continue;
            }

            loop {
                let mut op2 = self.next(op);

                while op2 != self.rec(rec_index).pts {
                    if self.pt(op) == self.pt(op2) && self.next(op2) != op && self.prev(op2) != op {
                        let op3 = self.prev(op);
                        let op4 = self.prev(op2);
                        self.set_prev(op, op4);
                        self.set_next(op4, op);
                        self.set_prev(op2, op3);
                        self.set_next(op3, op2);

                        self.rec_mut(rec_index).pts = op;
                        let rec2 = self.create();
                        self.rec_mut(rec2).pts = op2;
                        self.update_out_pt_idxs(rec2);
                        self.classify_split(rec_index, rec2, false);

                        op2 = op;
                    }

                    op2 = self.next(op2);
                }

                op = self.next(op);

                if op == self.rec(rec_index).pts {
                    break;
                }
            }
        }
    }

    pub fn build_result(&self) -> Paths {
        let mut result = Paths::with_capacity(self.recs.len());

        for rec in self.recs.iter() {
            if rec.pts == UNASSIGNED {
                continue;
            }

            let points = self.export_points(rec.pts);

            if points.len() < 3 {
                continue;
            }

            result.add_path(Path::from(points));
        }

        result
    }
}
