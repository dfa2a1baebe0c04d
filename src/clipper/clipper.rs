use crate::{
    clipper::{
        constants::{HI_RANGE, UNASSIGNED},
        enums::{ClipType, Direction, PolyFillType, PolyType},
        error::ClipperError,
        intersect_node::IntersectNodes,
        join::{horz_segments_overlap, Joins},
        local_minima::LocalMinima,
        out_rec::OutRec,
        ring_resolver::resolve_rings,
        scanbeam::Scanbeam,
        t_edge::{EdgeList, TEdge},
    },
    geometry::{
        path::{Path, Paths},
        point::IntPoint,
    },
    utils::math::slopes_equal_4,
    wasm_log,
};

/// Rejects paths holding a coordinate beyond `HI_RANGE`.
pub(crate) fn check_range(path: &Path) -> Result<(), ClipperError> {
    match path
        .points()
        .iter()
        .flat_map(|point| [point.x, point.y])
        .find(|value| value.unsigned_abs() > HI_RANGE as u64)
    {
        Some(value) => {
            wasm_log!("Rejected path with coordinate {}", value);
            Err(ClipperError::CoordinateOutOfRange(value))
        }
        None => Ok(()),
    }
}

/// Vatti sweep over closed subject and clip polygons.
pub struct Clipper {
    local_minima: LocalMinima,
    intersections: IntersectNodes,
    scanbeam: Scanbeam,
    t_edge: TEdge,
    joins: Joins,
    out_rec: OutRec,
    maxima: Vec<i64>,
}

impl Default for Clipper {
    fn default() -> Self {
        Self::new()
    }
}

impl Clipper {
    pub fn new() -> Self {
        Self::with_options(false, false)
    }

    /// `reverse_solution` flips the orientation of every output path,
    /// `strictly_simple` keeps collinear vertices, including those where
    /// another output ring touches an edge.
    pub fn with_options(reverse_solution: bool, strictly_simple: bool) -> Self {
        Self {
            local_minima: LocalMinima::new(),
            intersections: IntersectNodes::new(),
            scanbeam: Scanbeam::new(),
            t_edge: TEdge::new(),
            joins: Joins::new(),
            out_rec: OutRec::new(reverse_solution, strictly_simple),
            maxima: Vec::new(),
        }
    }

    pub fn set_reverse_solution(&mut self, value: bool) {
        self.out_rec.set_reverse_solution(value);
    }

    pub fn set_strictly_simple(&mut self, value: bool) {
        self.out_rec.set_strictly_simple(value);
    }

    /// Registers a closed path. Returns `Ok(false)` when the path has no area
    /// to contribute.
    pub fn add_path(&mut self, path: &Path, poly_type: PolyType) -> Result<bool, ClipperError> {
        check_range(path)?;

        let mut edge_index = self.t_edge.create_path(path.points(), poly_type);

        if edge_index == UNASSIGNED {
            return Ok(false);
        }

        let mut min_index = UNASSIGNED;

        loop {
            edge_index = self.t_edge.find_next_loc_min(edge_index);

            if edge_index == min_index {
                break;
            }
            if min_index == UNASSIGNED {
                min_index = edge_index;
            }

            let prev = self.t_edge.get(edge_index).prev;
            let (left_bound, right_bound, left_is_forward) = if self.t_edge.dx(edge_index) < self.t_edge.dx(prev) {
                (prev, edge_index, false)
            } else {
                (edge_index, prev, true)
            };

            let wind_delta = if self.t_edge.get(left_bound).next == right_bound {
                -1
            } else {
                1
            };
            self.t_edge.get_mut(left_bound).wind_delta = wind_delta;
            self.t_edge.get_mut(right_bound).wind_delta = -wind_delta;

            self.local_minima
                .insert(self.t_edge.bot(edge_index).y, left_bound, right_bound);

            let left_next = self.t_edge.process_bound(left_bound, left_is_forward);
            let right_next = self.t_edge.process_bound(right_bound, !left_is_forward);

            edge_index = if left_is_forward { left_next } else { right_next };
        }

        Ok(true)
    }

    pub fn add_paths(&mut self, paths: &Paths, poly_type: PolyType) -> Result<bool, ClipperError> {
        let mut result = false;

        for path in paths.iter() {
            if self.add_path(path, poly_type)? {
                result = true;
            }
        }

        Ok(result)
    }

    /// Drops every registered path.
    pub fn clear(&mut self) {
        self.local_minima.clear();
        self.t_edge.clear();
        self.scanbeam.clean();
        self.intersections.clear();
        self.joins.clear();
        self.out_rec.dispose();
        self.maxima.clear();
    }

    /// Runs the boolean operation over the registered paths. Registered input
    /// is left untouched, so repeated calls return the same result.
    pub fn execute(&mut self, clip_type: ClipType, subject_fill: PolyFillType, clip_fill: PolyFillType) -> Paths {
        self.t_edge.init(clip_type, subject_fill, clip_fill);

        let result = match self.execute_internal() {
            Ok(()) => resolve_rings(
                &self.out_rec.build_result(),
                self.out_rec.strictly_simple(),
                self.out_rec.reverse_solution(),
            ),
            Err(error) => {
                wasm_log!("Clipping aborted: {}", error);
                Paths::new()
            }
        };

        self.intersections.clear();
        self.joins.clear();
        self.out_rec.dispose();
        self.maxima.clear();

        result
    }

    fn reset(&mut self) {
        self.local_minima.reset();
        self.scanbeam.clean();
        self.t_edge.reset();

        for i in 1..=self.local_minima.len() {
            self.scanbeam.insert(self.local_minima.get_y(i));
            self.t_edge
                .reset_bound(self.local_minima.get_left_bound(i), Direction::Left);
            self.t_edge
                .reset_bound(self.local_minima.get_right_bound(i), Direction::Right);
        }
    }

    fn execute_internal(&mut self) -> Result<(), ClipperError> {
        self.reset();
        self.maxima.clear();

        let bot_y = match self.scanbeam.pop() {
            Some(y) => y,
            None => return Ok(()),
        };

        self.insert_local_minima_into_ael(bot_y);

        while let Some(top_y) = self.scanbeam.pop() {
            self.process_horizontals()?;
            self.joins.clear_ghosts();
            self.process_intersections(top_y)?;
            self.process_edges_at_top_of_scanbeam(top_y)?;
            self.insert_local_minima_into_ael(top_y);
        }

        if self.local_minima.has_pending() {
            return Err(ClipperError::MinimaPending);
        }

        self.out_rec.fix_directions();

        if !self.joins.is_empty() {
            self.out_rec.join_common_edges(&self.joins);
        }

        self.out_rec.fixup_out_polygons();

        if self.out_rec.strictly_simple() {
            self.out_rec.do_simple_polygons();
        }

        Ok(())
    }

    /// Moves an edge on to the next edge of its bound, scheduling its top.
    fn update_edge_into_ael(&mut self, edge_index: usize) -> Result<usize, ClipperError> {
        let next = self
            .t_edge
            .update_edge_into_ael(edge_index)
            .ok_or(ClipperError::BoundExhausted(edge_index))?;

        if !self.t_edge.is_horizontal(next) {
            self.scanbeam.insert(self.t_edge.top(next).y);
        }

        Ok(next)
    }

    fn insert_local_minima_into_ael(&mut self, bot_y: i64) {
        while let Some((left_bound, right_bound)) = self.local_minima.pop(bot_y) {
            self.t_edge.insert_edge_into_ael(left_bound, UNASSIGNED);
            self.t_edge.insert_edge_into_ael(right_bound, left_bound);
            self.t_edge.set_winding_count(left_bound);

            let (wind_cnt, wind_cnt2) = {
                let edge = self.t_edge.get(left_bound);
                (edge.wind_cnt, edge.wind_cnt2)
            };
            let right = self.t_edge.get_mut(right_bound);
            right.wind_cnt = wind_cnt;
            right.wind_cnt2 = wind_cnt2;

            let bot = self.t_edge.bot(left_bound);
            let out_pt1 = if self.t_edge.is_contributing(left_bound) {
                self.add_local_min_poly(left_bound, right_bound, bot)
            } else {
                UNASSIGNED
            };

            self.scanbeam.insert(self.t_edge.top(left_bound).y);

            if self.t_edge.is_horizontal(right_bound) {
                self.t_edge.add_edge_to_sel(right_bound);
                let next = self.t_edge.next_in_lml(right_bound);
                if next != UNASSIGNED {
                    self.scanbeam.insert(self.t_edge.top(next).y);
                }
            } else {
                self.scanbeam.insert(self.t_edge.top(right_bound).y);
            }

            // a horizontal right bound may overlap a horizontal output edge
            // finished at this row
            if out_pt1 != UNASSIGNED && self.t_edge.is_horizontal(right_bound) {
                let (bot_x, top_x) = (self.t_edge.bot(right_bound).x, self.t_edge.top(right_bound).x);
                let overlapping: Vec<_> = self
                    .joins
                    .ghosts()
                    .iter()
                    .filter(|ghost| {
                        horz_segments_overlap(self.out_rec.pt(ghost.out_pt1).x, ghost.off_pt.x, bot_x, top_x)
                    })
                    .copied()
                    .collect();

                for ghost in overlapping {
                    self.joins.add_join(ghost.out_pt1, out_pt1, ghost.off_pt);
                }
            }

            let prev = self.t_edge.prev_in_ael(left_bound);
            if self.t_edge.is_assigned(left_bound)
                && prev != UNASSIGNED
                && self.t_edge.curr(prev).x == self.t_edge.bot(left_bound).x
                && self.t_edge.is_assigned(prev)
                && slopes_equal_4(
                    &self.t_edge.bot(prev),
                    &self.t_edge.top(prev),
                    &self.t_edge.curr(left_bound),
                    &self.t_edge.top(left_bound),
                )
            {
                let out_pt2 = self.add_out_pt(prev, bot);
                self.joins
                    .add_join(out_pt1, out_pt2, self.t_edge.top(left_bound));
            }

            if self.t_edge.next_in_ael(left_bound) != right_bound {
                let prev = self.t_edge.prev_in_ael(right_bound);

                if self.t_edge.is_assigned(right_bound)
                    && self.t_edge.is_assigned(prev)
                    && self.t_edge.curr_slopes_equal(prev, right_bound)
                {
                    let out_pt2 = self.add_out_pt(prev, self.t_edge.bot(right_bound));
                    self.joins
                        .add_join(out_pt1, out_pt2, self.t_edge.top(right_bound));
                }

                let curr = self.t_edge.curr(left_bound);
                let mut edge = self.t_edge.next_in_ael(left_bound);

                while edge != UNASSIGNED && edge != right_bound {
                    // right_bound sits to the right of edge above the crossing
                    self.intersect_edges(right_bound, edge, curr);
                    edge = self.t_edge.next_in_ael(edge);
                }
            }
        }
    }

    fn process_horizontals(&mut self) -> Result<(), ClipperError> {
        while let Some(horz_edge) = self.t_edge.pop_edge_from_sel() {
            self.process_horizontal(horz_edge)?;
        }

        Ok(())
    }

    /// Joins `out_pt` to the last output point of every queued horizontal
    /// that overlaps `horz_edge`, then leaves a ghost join for later bounds.
    fn prepare_horz_joins(&mut self, horz_edge: usize, out_pt: usize, ghost_pt: IntPoint) {
        let (bot_x, top_x) = (self.t_edge.bot(horz_edge).x, self.t_edge.top(horz_edge).x);
        let mut next_horz = self.t_edge.sorted;

        while next_horz != UNASSIGNED {
            if self.t_edge.is_assigned(next_horz)
                && horz_segments_overlap(bot_x, top_x, self.t_edge.bot(next_horz).x, self.t_edge.top(next_horz).x)
            {
                let rec = self.t_edge.out_idx(next_horz);
                let out_pt2 = self.out_rec.last_point(rec, self.t_edge.side(next_horz));
                self.joins
                    .add_join(out_pt2, out_pt, self.t_edge.top(next_horz));
            }

            next_horz = self.t_edge.next_in_sel(next_horz);
        }

        self.joins.add_ghost(out_pt, ghost_pt);
    }

    fn process_horizontal(&mut self, horz_edge: usize) -> Result<(), ClipperError> {
        let mut horz_edge = horz_edge;
        let (mut dir, mut horz_left, mut horz_right) = self.t_edge.horz_direction(horz_edge);

        let mut last_horz = horz_edge;
        loop {
            let next = self.t_edge.next_in_lml(last_horz);
            if next == UNASSIGNED || !self.t_edge.is_horizontal(next) {
                break;
            }
            last_horz = next;
        }

        let max_pair = if self.t_edge.next_in_lml(last_horz) == UNASSIGNED {
            self.t_edge.maxima_pair(last_horz)
        } else {
            UNASSIGNED
        };

        // cursor into the sorted maxima: the next index going right, or the
        // count of entries still available going left
        let maxima_len = self.maxima.len();
        let mut max_cursor = 0;

        if maxima_len > 0 {
            let bot_x = self.t_edge.bot(horz_edge).x;
            let last_top_x = self.t_edge.top(last_horz).x;

            if dir == Direction::Right {
                while max_cursor < maxima_len && self.maxima[max_cursor] <= bot_x {
                    max_cursor += 1;
                }
                if max_cursor < maxima_len && self.maxima[max_cursor] >= last_top_x {
                    max_cursor = maxima_len;
                }
            } else {
                max_cursor = maxima_len;
                while max_cursor > 0 && self.maxima[max_cursor - 1] > bot_x {
                    max_cursor -= 1;
                }
                if max_cursor > 0 && self.maxima[max_cursor - 1] <= last_top_x {
                    max_cursor = 0;
                }
            }
        }

        let mut out_pt1 = UNASSIGNED;

        loop {
            let is_last_horz = horz_edge == last_horz;
            let mut edge = self.t_edge.next_in_direction(horz_edge, dir);

            while edge != UNASSIGNED {
                let edge_x = self.t_edge.curr(edge).x;

                // touching maxima become vertices of the horizontal
                if maxima_len > 0 {
                    let horz_y = self.t_edge.bot(horz_edge).y;

                    if dir == Direction::Right {
                        while max_cursor < maxima_len && self.maxima[max_cursor] < edge_x {
                            if self.t_edge.is_assigned(horz_edge) {
                                self.add_out_pt(horz_edge, IntPoint::new(self.maxima[max_cursor], horz_y));
                            }
                            max_cursor += 1;
                        }
                    } else {
                        while max_cursor > 0 && self.maxima[max_cursor - 1] > edge_x {
                            if self.t_edge.is_assigned(horz_edge) {
                                self.add_out_pt(horz_edge, IntPoint::new(self.maxima[max_cursor - 1], horz_y));
                            }
                            max_cursor -= 1;
                        }
                    }
                }

                if (dir == Direction::Right && edge_x > horz_right) || (dir == Direction::Left && edge_x < horz_left) {
                    break;
                }

                // at the end of an intermediate horizontal the next bound edge
                // stays to the left of anything steeper
                let next_lml = self.t_edge.next_in_lml(horz_edge);
                if edge_x == self.t_edge.top(horz_edge).x
                    && next_lml != UNASSIGNED
                    && self.t_edge.dx(edge) < self.t_edge.dx(next_lml)
                {
                    break;
                }

                if self.t_edge.is_assigned(horz_edge) {
                    out_pt1 = self.add_out_pt(horz_edge, self.t_edge.curr(edge));
                    self.prepare_horz_joins(horz_edge, out_pt1, self.t_edge.bot(horz_edge));
                }

                if edge == max_pair && is_last_horz {
                    if self.t_edge.is_assigned(horz_edge) {
                        self.add_local_max_poly(horz_edge, max_pair, self.t_edge.top(horz_edge));
                    }
                    self.t_edge.delete_from_ael(horz_edge);
                    self.t_edge.delete_from_ael(max_pair);
                    return Ok(());
                }

                let pt = IntPoint::new(edge_x, self.t_edge.curr(horz_edge).y);

                if dir == Direction::Right {
                    self.intersect_edges(horz_edge, edge, pt);
                } else {
                    self.intersect_edges(edge, horz_edge, pt);
                }

                let next = self.t_edge.next_in_direction(edge, dir);
                self.t_edge
                    .swap_positions_in_list(horz_edge, edge, EdgeList::Active);
                edge = next;
            }

            let next_lml = self.t_edge.next_in_lml(horz_edge);
            if next_lml == UNASSIGNED || !self.t_edge.is_horizontal(next_lml) {
                break;
            }

            horz_edge = self.update_edge_into_ael(horz_edge)?;
            if self.t_edge.is_assigned(horz_edge) {
                self.add_out_pt(horz_edge, self.t_edge.bot(horz_edge));
            }

            (dir, horz_left, horz_right) = self.t_edge.horz_direction(horz_edge);
        }

        if self.t_edge.is_assigned(horz_edge) && out_pt1 == UNASSIGNED {
            let rec = self.t_edge.out_idx(horz_edge);
            out_pt1 = self.out_rec.last_point(rec, self.t_edge.side(horz_edge));
            self.prepare_horz_joins(horz_edge, out_pt1, self.t_edge.top(horz_edge));
        }

        if self.t_edge.next_in_lml(horz_edge) == UNASSIGNED {
            if self.t_edge.is_assigned(horz_edge) {
                self.add_out_pt(horz_edge, self.t_edge.top(horz_edge));
            }
            self.t_edge.delete_from_ael(horz_edge);
            return Ok(());
        }

        if !self.t_edge.is_assigned(horz_edge) {
            self.update_edge_into_ael(horz_edge)?;
            return Ok(());
        }

        let out_pt1 = self.add_out_pt(horz_edge, self.t_edge.top(horz_edge));
        let horz_edge = self.update_edge_into_ael(horz_edge)?;
        let bot = self.t_edge.bot(horz_edge);
        let top = self.t_edge.top(horz_edge);

        // the promoted edge is no longer horizontal
        for neighbour in [
            self.t_edge.prev_in_ael(horz_edge),
            self.t_edge.next_in_ael(horz_edge),
        ] {
            if self.is_joinable_neighbour(horz_edge, neighbour) {
                let out_pt2 = self.add_out_pt(neighbour, bot);
                self.joins.add_join(out_pt1, out_pt2, top);
                break;
            }
        }

        Ok(())
    }

    /// Whether `neighbour` starts at the bottom of `edge` with the same slope
    /// and already contributes to the output.
    fn is_joinable_neighbour(&self, edge: usize, neighbour: usize) -> bool {
        if neighbour == UNASSIGNED {
            return false;
        }

        let curr = self.t_edge.curr(neighbour);

        curr == self.t_edge.bot(edge)
            && self.t_edge.is_assigned(neighbour)
            && curr.y > self.t_edge.top(neighbour).y
            && self.t_edge.slopes_equal(edge, neighbour)
    }

    fn process_intersections(&mut self, top_y: i64) -> Result<(), ClipperError> {
        if self.t_edge.active == UNASSIGNED {
            return Ok(());
        }

        self.build_intersect_list(top_y);

        let result = match self.intersections.len() {
            0 => Ok(()),
            1 => {
                self.process_intersect_list();
                Ok(())
            }
            _ => {
                if self.fixup_intersection_order() {
                    self.process_intersect_list();
                    Ok(())
                } else {
                    Err(ClipperError::IntersectionOrder)
                }
            }
        };

        self.t_edge.sorted = UNASSIGNED;
        self.intersections.clear();

        result
    }

    /// Bubble sorts the SEL by x at `top_y`, recording each swap as a crossing.
    fn build_intersect_list(&mut self, top_y: i64) {
        self.t_edge.prepare_for_intersections(top_y);

        loop {
            let mut is_modified = false;
            let mut edge = self.t_edge.sorted;

            loop {
                let next = self.t_edge.next_in_sel(edge);
                if next == UNASSIGNED {
                    break;
                }

                if self.t_edge.curr(edge).x > self.t_edge.curr(next).x {
                    let mut pt = self.t_edge.intersect_point(edge, next);
                    if pt.y < top_y {
                        pt = IntPoint::new(self.t_edge.top_x(edge, top_y), top_y);
                    }

                    self.intersections.add(edge, next, pt);
                    self.t_edge
                        .swap_positions_in_list(edge, next, EdgeList::Sorted);
                    is_modified = true;
                } else {
                    edge = next;
                }
            }

            // the last edge is in place, shrink the unsorted range
            let prev = self.t_edge.get(edge).prev_in_sel;
            if prev == UNASSIGNED {
                break;
            }
            self.t_edge.get_mut(prev).next_in_sel = UNASSIGNED;

            if !is_modified {
                break;
            }
        }

        self.t_edge.sorted = UNASSIGNED;
    }

    fn edges_adjacent(&self, node_index: usize) -> bool {
        let node = self.intersections.get(node_index);
        let edge = self.t_edge.get(node.edge1);

        edge.next_in_sel == node.edge2 || edge.prev_in_sel == node.edge2
    }

    /// Reorders crossings so that each one swaps edges that are adjacent at
    /// the time it is applied.
    fn fixup_intersection_order(&mut self) -> bool {
        self.t_edge.copy_ael_to_sel();
        self.intersections.sort();

        let count = self.intersections.len();

        for i in 0..count {
            if !self.edges_adjacent(i) {
                let mut j = i + 1;
                while j < count && !self.edges_adjacent(j) {
                    j += 1;
                }
                if j == count {
                    return false;
                }
                self.intersections.swap(i, j);
            }

            let node = self.intersections.get(i);
            self.t_edge
                .swap_positions_in_list(node.edge1, node.edge2, EdgeList::Sorted);
        }

        true
    }

    fn process_intersect_list(&mut self) {
        let nodes: Vec<_> = self.intersections.drain().collect();

        for node in nodes {
            self.intersect_edges(node.edge1, node.edge2, node.pt);
            self.t_edge
                .swap_positions_in_list(node.edge1, node.edge2, EdgeList::Active);
        }
    }

    /// Applies the crossing of `edge1` and `edge2` at `pt`; `edge1` is to the
    /// right of `edge2` above the crossing.
    fn intersect_edges(&mut self, edge1: usize, edge2: usize, pt: IntPoint) {
        let is_contributing1 = self.t_edge.is_assigned(edge1);
        let is_contributing2 = self.t_edge.is_assigned(edge2);

        self.t_edge.cross_winding_counts(edge1, edge2);

        let wind1 = self.t_edge.fill_winding(edge1);
        let wind2 = self.t_edge.fill_winding(edge2);
        let poly_type1 = self.t_edge.get(edge1).poly_type;
        let poly_type2 = self.t_edge.get(edge2).poly_type;
        let is_unit1 = wind1 == 0 || wind1 == 1;
        let is_unit2 = wind2 == 0 || wind2 == 1;

        if is_contributing1 && is_contributing2 {
            if !is_unit1 || !is_unit2 || (poly_type1 != poly_type2 && self.t_edge.clip_type() != ClipType::Xor) {
                self.add_local_max_poly(edge1, edge2, pt);
            } else {
                self.add_out_pt(edge1, pt);
                self.add_out_pt(edge2, pt);
                self.t_edge.swap_sides(edge1, edge2);
                self.t_edge.swap_poly_indexes(edge1, edge2);
            }
        } else if is_contributing1 {
            if is_unit2 {
                self.add_out_pt(edge1, pt);
                self.t_edge.swap_sides(edge1, edge2);
                self.t_edge.swap_poly_indexes(edge1, edge2);
            }
        } else if is_contributing2 {
            if is_unit1 {
                self.add_out_pt(edge2, pt);
                self.t_edge.swap_sides(edge1, edge2);
                self.t_edge.swap_poly_indexes(edge1, edge2);
            }
        } else if is_unit1 && is_unit2 {
            // neither edge contributes yet
            let wind1_alt = self.t_edge.fill_winding2(edge1);
            let wind2_alt = self.t_edge.fill_winding2(edge2);

            if poly_type1 != poly_type2 {
                self.add_local_min_poly(edge1, edge2, pt);
            } else if wind1 == 1 && wind2 == 1 {
                let starts_polygon = match self.t_edge.clip_type() {
                    ClipType::Intersection => wind1_alt > 0 && wind2_alt > 0,
                    ClipType::Union => wind1_alt <= 0 && wind2_alt <= 0,
                    ClipType::Difference => match poly_type1 {
                        PolyType::Clip => wind1_alt > 0 && wind2_alt > 0,
                        PolyType::Subject => wind1_alt <= 0 && wind2_alt <= 0,
                    },
                    ClipType::Xor => true,
                };

                if starts_polygon {
                    self.add_local_min_poly(edge1, edge2, pt);
                }
            } else {
                self.t_edge.swap_sides(edge1, edge2);
            }
        }
    }

    fn process_edges_at_top_of_scanbeam(&mut self, top_y: i64) -> Result<(), ClipperError> {
        let is_strictly_simple = self.out_rec.strictly_simple();
        let mut edge = self.t_edge.active;

        while edge != UNASSIGNED {
            // maxima are handled like bent horizontals unless their pair is a
            // real horizontal
            let mut is_maxima_edge = self.t_edge.is_maxima(edge, top_y);

            if is_maxima_edge {
                let max_pair = self.t_edge.maxima_pair_ex(edge);
                is_maxima_edge = max_pair == UNASSIGNED || !self.t_edge.is_horizontal(max_pair);
            }

            if is_maxima_edge {
                if is_strictly_simple {
                    self.maxima.push(self.t_edge.top(edge).x);
                }

                let prev = self.t_edge.prev_in_ael(edge);
                self.do_maxima(edge)?;

                edge = if prev == UNASSIGNED {
                    self.t_edge.active
                } else {
                    self.t_edge.next_in_ael(prev)
                };
                continue;
            }

            let next_lml = self.t_edge.next_in_lml(edge);
            if self.t_edge.is_intermediate(edge, top_y) && self.t_edge.is_horizontal(next_lml) {
                edge = self.update_edge_into_ael(edge)?;
                if self.t_edge.is_assigned(edge) {
                    self.add_out_pt(edge, self.t_edge.bot(edge));
                }
                self.t_edge.add_edge_to_sel(edge);
            } else {
                let x = self.t_edge.top_x(edge, top_y);
                self.t_edge.get_mut(edge).curr = IntPoint::new(x, top_y);
            }

            // edges touching at this row both get a vertex here
            if is_strictly_simple {
                let prev = self.t_edge.prev_in_ael(edge);
                if self.t_edge.is_assigned(edge)
                    && prev != UNASSIGNED
                    && self.t_edge.is_assigned(prev)
                    && self.t_edge.curr(prev).x == self.t_edge.curr(edge).x
                {
                    let pt = self.t_edge.curr(edge);
                    let out_pt = self.add_out_pt(prev, pt);
                    let out_pt2 = self.add_out_pt(edge, pt);
                    self.joins.add_join(out_pt, out_pt2, pt);
                }
            }

            edge = self.t_edge.next_in_ael(edge);
        }

        self.maxima.sort_unstable();
        self.process_horizontals()?;
        self.maxima.clear();

        edge = self.t_edge.active;

        while edge != UNASSIGNED {
            if self.t_edge.is_intermediate(edge, top_y) {
                let out_pt = if self.t_edge.is_assigned(edge) {
                    self.add_out_pt(edge, self.t_edge.top(edge))
                } else {
                    UNASSIGNED
                };

                edge = self.update_edge_into_ael(edge)?;

                if out_pt != UNASSIGNED {
                    let bot = self.t_edge.bot(edge);

                    for neighbour in [self.t_edge.prev_in_ael(edge), self.t_edge.next_in_ael(edge)] {
                        if neighbour != UNASSIGNED
                            && self.t_edge.curr(neighbour) == bot
                            && self.t_edge.is_assigned(neighbour)
                            && self.t_edge.curr(neighbour).y > self.t_edge.top(neighbour).y
                            && self.t_edge.curr_slopes_equal(edge, neighbour)
                        {
                            let out_pt2 = self.add_out_pt(neighbour, bot);
                            self.joins.add_join(out_pt, out_pt2, self.t_edge.top(edge));
                            break;
                        }
                    }
                }
            }

            edge = self.t_edge.next_in_ael(edge);
        }

        Ok(())
    }

    fn do_maxima(&mut self, edge_index: usize) -> Result<(), ClipperError> {
        let max_pair = self.t_edge.maxima_pair_ex(edge_index);

        if max_pair == UNASSIGNED {
            if self.t_edge.is_assigned(edge_index) {
                self.add_out_pt(edge_index, self.t_edge.top(edge_index));
            }
            self.t_edge.delete_from_ael(edge_index);
            return Ok(());
        }

        let top = self.t_edge.top(edge_index);
        let mut next = self.t_edge.next_in_ael(edge_index);

        while next != UNASSIGNED && next != max_pair {
            self.intersect_edges(edge_index, next, top);
            self.t_edge
                .swap_positions_in_list(edge_index, next, EdgeList::Active);
            next = self.t_edge.next_in_ael(edge_index);
        }

        match (
            self.t_edge.is_assigned(edge_index),
            self.t_edge.is_assigned(max_pair),
        ) {
            (false, false) => {}
            (true, true) => self.add_local_max_poly(edge_index, max_pair, top),
            _ => return Err(ClipperError::MaximaPair(edge_index)),
        }

        self.t_edge.delete_from_ael(edge_index);
        self.t_edge.delete_from_ael(max_pair);

        Ok(())
    }

    /// Outer when no contributing edge encloses the edge on the left, hole
    /// when an odd number of distinct output polygons do.
    fn set_hole_state(&mut self, edge_index: usize, rec_index: usize) {
        let mut edge = self.t_edge.prev_in_ael(edge_index);
        let mut enclosing = UNASSIGNED;

        while edge != UNASSIGNED {
            if self.t_edge.is_assigned(edge) {
                if enclosing == UNASSIGNED {
                    enclosing = edge;
                } else if self.t_edge.out_idx(enclosing) == self.t_edge.out_idx(edge) {
                    enclosing = UNASSIGNED;
                }
            }

            edge = self.t_edge.prev_in_ael(edge);
        }

        let first_left = if enclosing == UNASSIGNED {
            UNASSIGNED
        } else {
            self.t_edge.out_idx(enclosing)
        };

        self.out_rec.set_hole_state(rec_index, first_left);
    }

    fn add_out_pt(&mut self, edge_index: usize, pt: IntPoint) -> usize {
        if self.t_edge.is_assigned(edge_index) {
            let rec = self.t_edge.out_idx(edge_index);
            let to_front = self.t_edge.side(edge_index) == Direction::Left;

            return self.out_rec.add_point(rec, pt, to_front);
        }

        let (rec, out_pt) = self.out_rec.start_polygon(pt);
        self.set_hole_state(edge_index, rec);
        self.t_edge.get_mut(edge_index).out_idx = rec;

        out_pt
    }

    fn add_local_min_poly(&mut self, edge1: usize, edge2: usize, pt: IntPoint) -> usize {
        let (edge, other) = if self.t_edge.is_horizontal(edge2) || self.t_edge.dx(edge1) > self.t_edge.dx(edge2) {
            (edge1, edge2)
        } else {
            (edge2, edge1)
        };

        let result = self.add_out_pt(edge, pt);
        let out_idx = self.t_edge.out_idx(edge);

        self.t_edge.get_mut(other).out_idx = out_idx;
        self.t_edge.get_mut(edge).side = Direction::Left;
        self.t_edge.get_mut(other).side = Direction::Right;

        let prev = if self.t_edge.prev_in_ael(edge) == other {
            self.t_edge.prev_in_ael(other)
        } else {
            self.t_edge.prev_in_ael(edge)
        };

        if prev != UNASSIGNED
            && self.t_edge.is_assigned(prev)
            && self.t_edge.top(prev).y < pt.y
            && self.t_edge.top(edge).y < pt.y
        {
            let x_prev = self.t_edge.top_x(prev, pt.y);
            let x_edge = self.t_edge.top_x(edge, pt.y);

            if x_prev == x_edge
                && slopes_equal_4(
                    &IntPoint::new(x_prev, pt.y),
                    &self.t_edge.top(prev),
                    &IntPoint::new(x_edge, pt.y),
                    &self.t_edge.top(edge),
                )
            {
                let out_pt = self.add_out_pt(prev, pt);
                self.joins.add_join(result, out_pt, self.t_edge.top(edge));
            }
        }

        result
    }

    fn add_local_max_poly(&mut self, edge1: usize, edge2: usize, pt: IntPoint) {
        self.add_out_pt(edge1, pt);

        let out_idx1 = self.t_edge.out_idx(edge1);
        let out_idx2 = self.t_edge.out_idx(edge2);

        if out_idx1 == out_idx2 {
            self.t_edge.get_mut(edge1).out_idx = UNASSIGNED;
            self.t_edge.get_mut(edge2).out_idx = UNASSIGNED;
        } else if out_idx1 < out_idx2 {
            self.append_polygon(edge1, edge2);
        } else {
            self.append_polygon(edge2, edge1);
        }
    }

    /// Merges the output polygon of `edge2` into the one of `edge1`.
    fn append_polygon(&mut self, edge1: usize, edge2: usize) {
        let rec1 = self.t_edge.out_idx(edge1);
        let rec2 = self.t_edge.out_idx(edge2);
        let side1 = self.t_edge.side(edge1);

        self.out_rec
            .append(rec1, rec2, side1, self.t_edge.side(edge2));

        self.t_edge.get_mut(edge1).out_idx = UNASSIGNED;
        self.t_edge.get_mut(edge2).out_idx = UNASSIGNED;

        let mut edge = self.t_edge.active;

        while edge != UNASSIGNED {
            if self.t_edge.out_idx(edge) == rec2 {
                let item = self.t_edge.get_mut(edge);
                item.out_idx = rec1;
                item.side = side1;
                break;
            }

            edge = self.t_edge.next_in_ael(edge);
        }
    }
}
