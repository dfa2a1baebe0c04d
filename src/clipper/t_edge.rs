use crate::clipper::constants::{HORIZONTAL, UNASSIGNED};
use crate::clipper::enums::{ClipType, Direction, PolyFillType, PolyType};
use crate::geometry::point::IntPoint;
use crate::utils::math::{round_div, slopes_equal, slopes_equal_4};
use crate::utils::round::round_to_i64;

#[derive(Debug, Clone)]
pub struct Edge {
    pub bot: IntPoint,
    pub curr: IntPoint,
    pub top: IntPoint,
    pub delta: IntPoint,
    pub dx: f64,
    pub poly_type: PolyType,
    pub side: Direction,
    pub wind_delta: i32,
    pub wind_cnt: i32,
    pub wind_cnt2: i32,
    pub out_idx: usize,
    pub next: usize,
    pub prev: usize,
    pub next_in_lml: usize,
    pub next_in_ael: usize,
    pub prev_in_ael: usize,
    pub next_in_sel: usize,
    pub prev_in_sel: usize,
}

impl Edge {
    fn new(curr: IntPoint, next: usize, prev: usize, poly_type: PolyType) -> Self {
        Self {
            bot: IntPoint::default(),
            curr,
            top: IntPoint::default(),
            delta: IntPoint::default(),
            dx: 0.0,
            poly_type,
            side: Direction::Left,
            wind_delta: 0,
            wind_cnt: 0,
            wind_cnt2: 0,
            out_idx: UNASSIGNED,
            next,
            prev,
            next_in_lml: UNASSIGNED,
            next_in_ael: UNASSIGNED,
            prev_in_ael: UNASSIGNED,
            next_in_sel: UNASSIGNED,
            prev_in_sel: UNASSIGNED,
        }
    }

    #[inline(always)]
    pub fn is_horizontal(&self) -> bool {
        self.delta.y == 0
    }

    fn set_dx(&mut self) {
        self.delta = self.top.sub(&self.bot);
        self.dx = if self.delta.y == 0 {
            HORIZONTAL
        } else {
            self.delta.x as f64 / self.delta.y as f64
        };
    }

    fn reverse_horizontal(&mut self) {
        std::mem::swap(&mut self.top.x, &mut self.bot.x);
        self.set_dx();
    }

    /// X where the edge crosses row `y`, rounded half away from zero.
    pub fn top_x(&self, y: i64) -> i64 {
        if y == self.top.y {
            return self.top.x;
        }

        if self.delta.y == 0 {
            return self.bot.x;
        }

        let offset = round_div(
            self.delta.x as i128 * (y as i128 - self.bot.y as i128),
            self.delta.y as i128,
        );

        self.bot.x + offset as i64
    }
}

/// Which linked list a swap applies to.
#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum EdgeList {
    Active,
    Sorted,
}

/// Arena of every edge built from the input paths, plus the heads of the
/// active (AEL) and sorted (SEL) edge lists.
pub struct TEdge {
    edges: Vec<Edge>,
    pub active: usize,
    pub sorted: usize,
    clip_type: ClipType,
    subject_fill: PolyFillType,
    clip_fill: PolyFillType,
}

impl TEdge {
    pub fn new() -> Self {
        Self {
            edges: Vec::new(),
            active: UNASSIGNED,
            sorted: UNASSIGNED,
            clip_type: ClipType::Intersection,
            subject_fill: PolyFillType::EvenOdd,
            clip_fill: PolyFillType::EvenOdd,
        }
    }

    pub fn init(&mut self, clip_type: ClipType, subject_fill: PolyFillType, clip_fill: PolyFillType) {
        self.clip_type = clip_type;
        self.subject_fill = subject_fill;
        self.clip_fill = clip_fill;
        self.active = UNASSIGNED;
        self.sorted = UNASSIGNED;
    }

    pub fn clear(&mut self) {
        self.edges.clear();
        self.active = UNASSIGNED;
        self.sorted = UNASSIGNED;
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    #[inline(always)]
    pub fn get(&self, index: usize) -> &Edge {
        &self.edges[index - 1]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, index: usize) -> &mut Edge {
        &mut self.edges[index - 1]
    }

    #[inline(always)]
    pub fn is_horizontal(&self, index: usize) -> bool {
        self.get(index).is_horizontal()
    }

    #[inline(always)]
    pub fn curr(&self, index: usize) -> IntPoint {
        self.get(index).curr
    }

    #[inline(always)]
    pub fn top(&self, index: usize) -> IntPoint {
        self.get(index).top
    }

    #[inline(always)]
    pub fn bot(&self, index: usize) -> IntPoint {
        self.get(index).bot
    }

    #[inline(always)]
    pub fn dx(&self, index: usize) -> f64 {
        self.get(index).dx
    }

    #[inline(always)]
    pub fn out_idx(&self, index: usize) -> usize {
        self.get(index).out_idx
    }

    #[inline(always)]
    pub fn is_assigned(&self, index: usize) -> bool {
        self.get(index).out_idx != UNASSIGNED
    }

    #[inline(always)]
    pub fn side(&self, index: usize) -> Direction {
        self.get(index).side
    }

    #[inline(always)]
    pub fn wind_delta(&self, index: usize) -> i32 {
        self.get(index).wind_delta
    }

    #[inline(always)]
    pub fn next_in_lml(&self, index: usize) -> usize {
        self.get(index).next_in_lml
    }

    #[inline(always)]
    pub fn next_in_ael(&self, index: usize) -> usize {
        self.get(index).next_in_ael
    }

    #[inline(always)]
    pub fn prev_in_ael(&self, index: usize) -> usize {
        self.get(index).prev_in_ael
    }

    #[inline(always)]
    pub fn next_in_sel(&self, index: usize) -> usize {
        self.get(index).next_in_sel
    }

    #[inline(always)]
    pub fn top_x(&self, index: usize, y: i64) -> i64 {
        self.get(index).top_x(y)
    }

    /// Builds the edge ring of a closed path, dropping duplicate vertices and
    /// collinear joints. Returns the first surviving edge, or `UNASSIGNED`
    /// when the path has no area to contribute.
    pub fn create_path(&mut self, path: &[IntPoint], poly_type: PolyType) -> usize {
        if path.is_empty() {
            return UNASSIGNED;
        }

        let mut high_index = path.len() - 1;
        while high_index > 0 && path[high_index] == path[0] {
            high_index -= 1;
        }
        while high_index > 0 && path[high_index] == path[high_index - 1] {
            high_index -= 1;
        }
        if high_index < 2 {
            return UNASSIGNED;
        }

        let count = high_index + 1;
        let base = self.edges.len();

        for i in 0..count {
            let next = base + (i + 1) % count + 1;
            let prev = base + (i + count - 1) % count + 1;
            self.edges.push(Edge::new(path[i], next, prev, poly_type));
        }

        let mut start = base + 1;
        let mut edge = start;
        let mut loop_stop = start;

        loop {
            let next = self.get(edge).next;
            let prev = self.get(edge).prev;

            if self.curr(edge) == self.curr(next) {
                if edge == next {
                    break;
                }
                if edge == start {
                    start = next;
                }
                edge = self.remove(edge);
                loop_stop = edge;
                continue;
            }

            if prev == next {
                break;
            }

            if slopes_equal(&self.curr(prev), &self.curr(edge), &self.curr(next)) {
                if edge == start {
                    start = next;
                }
                edge = self.remove(edge);
                edge = self.get(edge).prev;
                loop_stop = edge;
                continue;
            }

            edge = next;
            if edge == loop_stop {
                break;
            }
        }

        if self.get(edge).prev == self.get(edge).next {
            self.edges.truncate(base);
            return UNASSIGNED;
        }

        let mut is_flat = true;
        let start_y = self.curr(start).y;
        edge = start;

        loop {
            self.init_bounds(edge);
            edge = self.get(edge).next;
            if is_flat && self.curr(edge).y != start_y {
                is_flat = false;
            }
            if edge == start {
                break;
            }
        }

        if is_flat {
            self.edges.truncate(base);
            return UNASSIGNED;
        }

        start
    }

    fn init_bounds(&mut self, index: usize) {
        let next_curr = self.curr(self.get(index).next);
        let edge = self.get_mut(index);

        if edge.curr.y >= next_curr.y {
            edge.bot = edge.curr;
            edge.top = next_curr;
        } else {
            edge.top = edge.curr;
            edge.bot = next_curr;
        }

        edge.set_dx();
    }

    fn remove(&mut self, index: usize) -> usize {
        let (prev, next) = {
            let edge = self.get(index);
            (edge.prev, edge.next)
        };

        self.get_mut(prev).next = next;
        self.get_mut(next).prev = prev;
        self.get_mut(index).prev = UNASSIGNED;

        next
    }

    /// Advances to the next local minimum of the ring (left aligned when it is
    /// a horizontal).
    pub fn find_next_loc_min(&self, index: usize) -> usize {
        let mut edge = index;

        loop {
            while self.bot(edge) != self.bot(self.get(edge).prev) || self.curr(edge) == self.top(edge) {
                edge = self.get(edge).next;
            }

            if !self.is_horizontal(edge) && !self.is_horizontal(self.get(edge).prev) {
                break;
            }

            while self.is_horizontal(self.get(edge).prev) {
                edge = self.get(edge).prev;
            }

            let horizontal_start = edge;

            while self.is_horizontal(edge) {
                edge = self.get(edge).next;
            }

            if self.top(edge).y == self.bot(self.get(edge).prev).y {
                continue;
            }

            if self.bot(self.get(horizontal_start).prev).x < self.bot(edge).x {
                edge = horizontal_start;
            }

            break;
        }

        edge
    }

    /// Chains one bound through `next_in_lml` and returns the edge just past it.
    pub fn process_bound(&mut self, index: usize, is_forward: bool) -> usize {
        let mut edge = index;
        let mut result = index;

        if self.is_horizontal(edge) {
            let start = if is_forward {
                self.get(edge).prev
            } else {
                self.get(edge).next
            };

            if self.is_horizontal(start) {
                if self.bot(start).x != self.bot(edge).x && self.top(start).x != self.bot(edge).x {
                    self.get_mut(edge).reverse_horizontal();
                }
            } else if self.bot(start).x != self.bot(edge).x {
                self.get_mut(edge).reverse_horizontal();
            }
        }

        let start = edge;

        if is_forward {
            while self.top(result).y == self.bot(self.get(result).next).y {
                result = self.get(result).next;
            }

            if self.is_horizontal(result) {
                let mut horizontal = result;
                while self.is_horizontal(self.get(horizontal).prev) {
                    horizontal = self.get(horizontal).prev;
                }
                let before = self.get(horizontal).prev;
                if self.top(before).x > self.top(self.get(result).next).x {
                    result = before;
                }
            }

            while edge != result {
                let next = self.get(edge).next;
                self.get_mut(edge).next_in_lml = next;
                self.reverse_bound_horizontal(edge, start, self.get(edge).prev);
                edge = next;
            }

            self.reverse_bound_horizontal(edge, start, self.get(edge).prev);

            self.get(result).next
        } else {
            while self.top(result).y == self.bot(self.get(result).prev).y {
                result = self.get(result).prev;
            }

            if self.is_horizontal(result) {
                let mut horizontal = result;
                while self.is_horizontal(self.get(horizontal).next) {
                    horizontal = self.get(horizontal).next;
                }
                let after = self.get(horizontal).next;
                if self.top(after).x >= self.top(self.get(result).prev).x {
                    result = after;
                }
            }

            while edge != result {
                let prev = self.get(edge).prev;
                self.get_mut(edge).next_in_lml = prev;
                self.reverse_bound_horizontal(edge, start, self.get(edge).next);
                edge = prev;
            }

            self.reverse_bound_horizontal(edge, start, self.get(edge).next);

            self.get(result).prev
        }
    }

    fn reverse_bound_horizontal(&mut self, edge: usize, start: usize, neighbour: usize) {
        if self.is_horizontal(edge) && edge != start && self.bot(edge).x != self.top(neighbour).x {
            self.get_mut(edge).reverse_horizontal();
        }
    }

    /// Puts a bound head back into its pre-sweep state.
    pub fn reset_bound(&mut self, index: usize, side: Direction) {
        if index == UNASSIGNED {
            return;
        }

        let edge = self.get_mut(index);
        edge.curr = edge.bot;
        edge.side = side;
        edge.out_idx = UNASSIGNED;
    }

    /// Clears every sweep link so that a new execution starts clean.
    pub fn reset(&mut self) {
        for edge in self.edges.iter_mut() {
            edge.out_idx = UNASSIGNED;
            edge.wind_cnt = 0;
            edge.wind_cnt2 = 0;
            edge.next_in_ael = UNASSIGNED;
            edge.prev_in_ael = UNASSIGNED;
            edge.next_in_sel = UNASSIGNED;
            edge.prev_in_sel = UNASSIGNED;
        }

        self.active = UNASSIGNED;
        self.sorted = UNASSIGNED;
    }

    fn fill_types(&self, index: usize) -> (PolyFillType, PolyFillType) {
        match self.get(index).poly_type {
            PolyType::Subject => (self.subject_fill, self.clip_fill),
            PolyType::Clip => (self.clip_fill, self.subject_fill),
        }
    }

    #[inline(always)]
    pub fn is_even_odd_fill(&self, index: usize) -> bool {
        self.fill_types(index).0 == PolyFillType::EvenOdd
    }

    #[inline(always)]
    fn is_even_odd_alt_fill(&self, index: usize) -> bool {
        self.fill_types(index).1 == PolyFillType::EvenOdd
    }

    /// Own winding count as seen through the edge's fill rule.
    pub fn fill_winding(&self, index: usize) -> i32 {
        let wind_cnt = self.get(index).wind_cnt;

        match self.fill_types(index).0 {
            PolyFillType::Positive => wind_cnt,
            PolyFillType::Negative => -wind_cnt,
            _ => wind_cnt.abs(),
        }
    }

    /// Opposite winding count as seen through the other role's fill rule.
    pub fn fill_winding2(&self, index: usize) -> i32 {
        let wind_cnt2 = self.get(index).wind_cnt2;

        match self.fill_types(index).1 {
            PolyFillType::Positive => wind_cnt2,
            PolyFillType::Negative => -wind_cnt2,
            _ => wind_cnt2.abs(),
        }
    }

    pub fn clip_type(&self) -> ClipType {
        self.clip_type
    }

    /// Computes both winding counts of a freshly inserted edge from its AEL
    /// predecessors.
    pub fn set_winding_count(&mut self, index: usize) {
        let poly_type = self.get(index).poly_type;
        let wind_delta = self.get(index).wind_delta;
        let mut edge = self.get(index).prev_in_ael;

        while edge != UNASSIGNED && self.get(edge).poly_type != poly_type {
            edge = self.get(edge).prev_in_ael;
        }

        let mut wind_cnt2;

        if edge == UNASSIGNED {
            self.get_mut(index).wind_cnt = wind_delta;
            wind_cnt2 = 0;
            edge = self.active;
        } else if self.is_even_odd_fill(index) {
            self.get_mut(index).wind_cnt = wind_delta;
            wind_cnt2 = self.get(edge).wind_cnt2;
            edge = self.get(edge).next_in_ael;
        } else {
            let prev = self.get(edge).clone();

            let wind_cnt = if prev.wind_cnt * prev.wind_delta < 0 {
                if prev.wind_cnt.abs() > 1 {
                    if prev.wind_delta * wind_delta < 0 {
                        prev.wind_cnt
                    } else {
                        prev.wind_cnt + wind_delta
                    }
                } else {
                    wind_delta
                }
            } else if prev.wind_delta * wind_delta < 0 {
                prev.wind_cnt
            } else {
                prev.wind_cnt + wind_delta
            };

            self.get_mut(index).wind_cnt = wind_cnt;
            wind_cnt2 = prev.wind_cnt2;
            edge = prev.next_in_ael;
        }

        if self.is_even_odd_alt_fill(index) {
            while edge != index {
                wind_cnt2 = if wind_cnt2 == 0 { 1 } else { 0 };
                edge = self.get(edge).next_in_ael;
            }
        } else {
            while edge != index {
                wind_cnt2 += self.get(edge).wind_delta;
                edge = self.get(edge).next_in_ael;
            }
        }

        self.get_mut(index).wind_cnt2 = wind_cnt2;
    }

    /// Whether the edge lies on the boundary of the boolean result.
    pub fn is_contributing(&self, index: usize) -> bool {
        let edge = self.get(index);
        let (fill, alt_fill) = self.fill_types(index);

        let is_on_own_boundary = match fill {
            PolyFillType::EvenOdd => true,
            PolyFillType::NonZero => edge.wind_cnt.abs() == 1,
            PolyFillType::Positive => edge.wind_cnt == 1,
            PolyFillType::Negative => edge.wind_cnt == -1,
        };

        if !is_on_own_boundary {
            return false;
        }

        let inside_other = match alt_fill {
            PolyFillType::EvenOdd | PolyFillType::NonZero => edge.wind_cnt2 != 0,
            PolyFillType::Positive => edge.wind_cnt2 > 0,
            PolyFillType::Negative => edge.wind_cnt2 < 0,
        };

        match self.clip_type {
            ClipType::Intersection => inside_other,
            ClipType::Union => !inside_other,
            ClipType::Difference => match edge.poly_type {
                PolyType::Subject => !inside_other,
                PolyType::Clip => inside_other,
            },
            ClipType::Xor => true,
        }
    }

    /// Whether `edge` must be placed before `current` in the AEL.
    fn inserts_before(&self, current: usize, edge: usize) -> bool {
        let e1 = self.get(current);
        let e2 = self.get(edge);

        if e2.curr.x == e1.curr.x {
            if e2.top.y > e1.top.y {
                e2.top.x < e1.top_x(e2.top.y)
            } else {
                e1.top.x > e2.top_x(e1.top.y)
            }
        } else {
            e2.curr.x < e1.curr.x
        }
    }

    pub fn insert_edge_into_ael(&mut self, index: usize, start_edge: usize) {
        if self.active == UNASSIGNED {
            let edge = self.get_mut(index);
            edge.prev_in_ael = UNASSIGNED;
            edge.next_in_ael = UNASSIGNED;
            self.active = index;
            return;
        }

        if start_edge == UNASSIGNED && self.inserts_before(self.active, index) {
            let active = self.active;
            let edge = self.get_mut(index);
            edge.prev_in_ael = UNASSIGNED;
            edge.next_in_ael = active;
            self.get_mut(active).prev_in_ael = index;
            self.active = index;
            return;
        }

        let mut current = if start_edge == UNASSIGNED {
            self.active
        } else {
            start_edge
        };

        loop {
            let next = self.get(current).next_in_ael;
            if next == UNASSIGNED || self.inserts_before(next, index) {
                break;
            }
            current = next;
        }

        let next = self.get(current).next_in_ael;
        self.get_mut(index).next_in_ael = next;
        if next != UNASSIGNED {
            self.get_mut(next).prev_in_ael = index;
        }
        self.get_mut(index).prev_in_ael = current;
        self.get_mut(current).next_in_ael = index;
    }

    pub fn delete_from_ael(&mut self, index: usize) {
        let (prev, next) = {
            let edge = self.get(index);
            (edge.prev_in_ael, edge.next_in_ael)
        };

        if prev == UNASSIGNED && next == UNASSIGNED && index != self.active {
            return;
        }

        if prev != UNASSIGNED {
            self.get_mut(prev).next_in_ael = next;
        } else {
            self.active = next;
        }
        if next != UNASSIGNED {
            self.get_mut(next).prev_in_ael = prev;
        }

        let edge = self.get_mut(index);
        edge.next_in_ael = UNASSIGNED;
        edge.prev_in_ael = UNASSIGNED;
    }

    pub fn delete_from_sel(&mut self, index: usize) {
        let (prev, next) = {
            let edge = self.get(index);
            (edge.prev_in_sel, edge.next_in_sel)
        };

        if prev == UNASSIGNED && next == UNASSIGNED && index != self.sorted {
            return;
        }

        if prev != UNASSIGNED {
            self.get_mut(prev).next_in_sel = next;
        } else {
            self.sorted = next;
        }
        if next != UNASSIGNED {
            self.get_mut(next).prev_in_sel = prev;
        }

        let edge = self.get_mut(index);
        edge.next_in_sel = UNASSIGNED;
        edge.prev_in_sel = UNASSIGNED;
    }

    /// Pushes a horizontal onto the SEL; processing order does not matter.
    pub fn add_edge_to_sel(&mut self, index: usize) {
        let sorted = self.sorted;
        {
            let edge = self.get_mut(index);
            edge.prev_in_sel = UNASSIGNED;
            edge.next_in_sel = sorted;
        }
        if sorted != UNASSIGNED {
            self.get_mut(sorted).prev_in_sel = index;
        }
        self.sorted = index;
    }

    pub fn pop_edge_from_sel(&mut self) -> Option<usize> {
        let result = self.sorted;

        if result == UNASSIGNED {
            return None;
        }

        self.delete_from_sel(result);
        Some(result)
    }

    pub fn copy_ael_to_sel(&mut self) {
        let mut edge = self.active;
        self.sorted = edge;

        while edge != UNASSIGNED {
            let item = self.get_mut(edge);
            item.prev_in_sel = item.prev_in_ael;
            item.next_in_sel = item.next_in_ael;
            edge = item.next_in_ael;
        }
    }

    /// Copies the AEL into the SEL, moving every `curr` to its position on row `top_y`.
    pub fn prepare_for_intersections(&mut self, top_y: i64) {
        let mut edge = self.active;
        self.sorted = edge;

        while edge != UNASSIGNED {
            let item = self.get_mut(edge);
            item.prev_in_sel = item.prev_in_ael;
            item.next_in_sel = item.next_in_ael;
            item.curr.x = item.top_x(top_y);
            edge = item.next_in_ael;
        }
    }

    fn links(&self, index: usize, list: EdgeList) -> (usize, usize) {
        let edge = self.get(index);
        match list {
            EdgeList::Active => (edge.prev_in_ael, edge.next_in_ael),
            EdgeList::Sorted => (edge.prev_in_sel, edge.next_in_sel),
        }
    }

    fn set_prev(&mut self, index: usize, value: usize, list: EdgeList) {
        if index == UNASSIGNED {
            return;
        }
        match list {
            EdgeList::Active => self.get_mut(index).prev_in_ael = value,
            EdgeList::Sorted => self.get_mut(index).prev_in_sel = value,
        }
    }

    fn set_next(&mut self, index: usize, value: usize, list: EdgeList) {
        if index == UNASSIGNED {
            return;
        }
        match list {
            EdgeList::Active => self.get_mut(index).next_in_ael = value,
            EdgeList::Sorted => self.get_mut(index).next_in_sel = value,
        }
    }

    pub fn swap_positions_in_list(&mut self, edge1: usize, edge2: usize, list: EdgeList) {
        let (prev1, next1) = self.links(edge1, list);
        let (prev2, next2) = self.links(edge2, list);

        // an edge with no neighbours has already left the list
        if next1 == prev1 || next2 == prev2 {
            return;
        }

        if next1 == edge2 {
            self.set_prev(next2, edge1, list);
            self.set_next(prev1, edge2, list);
            self.set_prev(edge2, prev1, list);
            self.set_next(edge2, edge1, list);
            self.set_prev(edge1, edge2, list);
            self.set_next(edge1, next2, list);
        } else if next2 == edge1 {
            self.set_prev(next1, edge2, list);
            self.set_next(prev2, edge1, list);
            self.set_prev(edge1, prev2, list);
            self.set_next(edge1, edge2, list);
            self.set_prev(edge2, edge1, list);
            self.set_next(edge2, next1, list);
        } else {
            self.set_next(edge1, next2, list);
            self.set_prev(next2, edge1, list);
            self.set_prev(edge1, prev2, list);
            self.set_next(prev2, edge1, list);
            self.set_next(edge2, next1, list);
            self.set_prev(next1, edge2, list);
            self.set_prev(edge2, prev1, list);
            self.set_next(prev1, edge2, list);
        }

        let head = if self.links(edge1, list).0 == UNASSIGNED {
            edge1
        } else if self.links(edge2, list).0 == UNASSIGNED {
            edge2
        } else {
            return;
        };

        match list {
            EdgeList::Active => self.active = head,
            EdgeList::Sorted => self.sorted = head,
        }
    }

    /// Replaces an edge in the AEL with the next edge of its bound, carrying
    /// over the winding state. Returns the promoted edge.
    pub fn update_edge_into_ael(&mut self, index: usize) -> Option<usize> {
        let next = self.get(index).next_in_lml;

        if next == UNASSIGNED {
            return None;
        }

        let source = self.get(index).clone();

        if source.prev_in_ael != UNASSIGNED {
            self.get_mut(source.prev_in_ael).next_in_ael = next;
        } else {
            self.active = next;
        }
        if source.next_in_ael != UNASSIGNED {
            self.get_mut(source.next_in_ael).prev_in_ael = next;
        }

        let edge = self.get_mut(next);
        edge.out_idx = source.out_idx;
        edge.side = source.side;
        edge.wind_delta = source.wind_delta;
        edge.wind_cnt = source.wind_cnt;
        edge.wind_cnt2 = source.wind_cnt2;
        edge.curr = edge.bot;
        edge.prev_in_ael = source.prev_in_ael;
        edge.next_in_ael = source.next_in_ael;

        Some(next)
    }

    /// The edge that ends at the same top vertex, when this is a true maximum.
    pub fn maxima_pair(&self, index: usize) -> usize {
        let edge = self.get(index);
        let next = self.get(edge.next);
        let prev = self.get(edge.prev);

        if next.top == edge.top && next.next_in_lml == UNASSIGNED {
            edge.next
        } else if prev.top == edge.top && prev.next_in_lml == UNASSIGNED {
            edge.prev
        } else {
            UNASSIGNED
        }
    }

    /// Like `maxima_pair` but ignores a non-horizontal pair that has already
    /// left the AEL.
    pub fn maxima_pair_ex(&self, index: usize) -> usize {
        let result = self.maxima_pair(index);

        if result != UNASSIGNED {
            let pair = self.get(result);
            if pair.next_in_ael == pair.prev_in_ael && !pair.is_horizontal() {
                return UNASSIGNED;
            }
        }

        result
    }

    #[inline(always)]
    pub fn is_maxima(&self, index: usize, y: i64) -> bool {
        index != UNASSIGNED && self.get(index).top.y == y && self.get(index).next_in_lml == UNASSIGNED
    }

    #[inline(always)]
    pub fn is_intermediate(&self, index: usize, y: i64) -> bool {
        self.get(index).top.y == y && self.get(index).next_in_lml != UNASSIGNED
    }

    pub fn slopes_equal(&self, edge1: usize, edge2: usize) -> bool {
        let e1 = self.get(edge1);
        let e2 = self.get(edge2);

        e1.delta.y as i128 * e2.delta.x as i128 == e1.delta.x as i128 * e2.delta.y as i128
    }

    /// Horizontal travel direction and x extent of a horizontal edge.
    pub fn horz_direction(&self, index: usize) -> (Direction, i64, i64) {
        let edge = self.get(index);

        if edge.bot.x < edge.top.x {
            (Direction::Right, edge.bot.x, edge.top.x)
        } else {
            (Direction::Left, edge.top.x, edge.bot.x)
        }
    }

    pub fn next_in_direction(&self, index: usize, direction: Direction) -> usize {
        match direction {
            Direction::Right => self.get(index).next_in_ael,
            Direction::Left => self.get(index).prev_in_ael,
        }
    }

    pub fn swap_sides(&mut self, edge1: usize, edge2: usize) {
        let side1 = self.get(edge1).side;
        let side2 = self.get(edge2).side;
        self.get_mut(edge1).side = side2;
        self.get_mut(edge2).side = side1;
    }

    pub fn swap_poly_indexes(&mut self, edge1: usize, edge2: usize) {
        let out1 = self.get(edge1).out_idx;
        let out2 = self.get(edge2).out_idx;
        self.get_mut(edge1).out_idx = out2;
        self.get_mut(edge2).out_idx = out1;
    }

    /// Updates both winding counts where `edge1` crosses `edge2`; `edge1` is
    /// to the right of `edge2` above the crossing.
    pub fn cross_winding_counts(&mut self, edge1: usize, edge2: usize) {
        let e1 = self.get(edge1).clone();
        let e2 = self.get(edge2).clone();

        if e1.poly_type == e2.poly_type {
            if self.is_even_odd_fill(edge1) {
                self.get_mut(edge1).wind_cnt = e2.wind_cnt;
                self.get_mut(edge2).wind_cnt = e1.wind_cnt;
            } else {
                self.get_mut(edge1).wind_cnt = if e1.wind_cnt + e2.wind_delta == 0 {
                    -e1.wind_cnt
                } else {
                    e1.wind_cnt + e2.wind_delta
                };
                self.get_mut(edge2).wind_cnt = if e2.wind_cnt - e1.wind_delta == 0 {
                    -e2.wind_cnt
                } else {
                    e2.wind_cnt - e1.wind_delta
                };
            }
        } else {
            self.get_mut(edge1).wind_cnt2 = if self.is_even_odd_fill(edge2) {
                if e1.wind_cnt2 == 0 {
                    1
                } else {
                    0
                }
            } else {
                e1.wind_cnt2 + e2.wind_delta
            };
            self.get_mut(edge2).wind_cnt2 = if self.is_even_odd_fill(edge1) {
                if e2.wind_cnt2 == 0 {
                    1
                } else {
                    0
                }
            } else {
                e2.wind_cnt2 - e1.wind_delta
            };
        }
    }

    /// Crossing point of two edges. Exact rational arithmetic when the
    /// products fit in `i128`, otherwise a double precision fallback.
    pub fn intersect_point(&self, edge1: usize, edge2: usize) -> IntPoint {
        let e1 = self.get(edge1);
        let e2 = self.get(edge2);

        let mut result = match exact_intersection(e1, e2) {
            Some(point) => point,
            None => approximate_intersection(e1, e2),
        };

        if result.y < e1.top.y || result.y < e2.top.y {
            result.y = e1.top.y.max(e2.top.y);
            result.x = if e1.dx.abs() < e2.dx.abs() {
                e1.top_x(result.y)
            } else {
                e2.top_x(result.y)
            };
        }

        if result.y > e1.curr.y {
            result.y = e1.curr.y;
            result.x = if e1.dx.abs() > e2.dx.abs() {
                e2.top_x(result.y)
            } else {
                e1.top_x(result.y)
            };
        }

        result
    }

    /// Parallel test on the remaining parts (`curr -> top`) of two edges.
    pub fn curr_slopes_equal(&self, index: usize, other: usize) -> bool {
        let e1 = self.get(index);
        let e2 = self.get(other);

        slopes_equal_4(&e1.curr, &e1.top, &e2.curr, &e2.top)
    }
}

fn exact_intersection(e1: &Edge, e2: &Edge) -> Option<IntPoint> {
    let d1x = e1.delta.x as i128;
    let d1y = e1.delta.y as i128;
    let d2x = e2.delta.x as i128;
    let d2y = e2.delta.y as i128;
    let denominator = d1x.checked_mul(d2y)?.checked_sub(d1y.checked_mul(d2x)?)?;

    if denominator == 0 {
        let y = e1.curr.y;
        return Some(IntPoint::new(e1.top_x(y), y));
    }

    let bx = e2.bot.x as i128 - e1.bot.x as i128;
    let by = e2.bot.y as i128 - e1.bot.y as i128;
    let numerator = bx.checked_mul(d2y)?.checked_sub(by.checked_mul(d2x)?)?;

    let x = (e1.bot.x as i128)
        .checked_mul(denominator)?
        .checked_add(d1x.checked_mul(numerator)?)?;
    let y = (e1.bot.y as i128)
        .checked_mul(denominator)?
        .checked_add(d1y.checked_mul(numerator)?)?;

    Some(IntPoint::new(
        round_div(x, denominator) as i64,
        round_div(y, denominator) as i64,
    ))
}

fn approximate_intersection(e1: &Edge, e2: &Edge) -> IntPoint {
    if e1.dx == e2.dx {
        let y = e1.curr.y;
        return IntPoint::new(e1.top_x(y), y);
    }

    if e1.delta.x == 0 {
        let x = e1.bot.x;
        let y = if e2.is_horizontal() {
            e2.bot.y
        } else {
            let b2 = e2.bot.y as f64 - e2.bot.x as f64 / e2.dx;
            round_to_i64(x as f64 / e2.dx + b2)
        };
        return IntPoint::new(x, y);
    }

    if e2.delta.x == 0 {
        let x = e2.bot.x;
        let y = if e1.is_horizontal() {
            e1.bot.y
        } else {
            let b1 = e1.bot.y as f64 - e1.bot.x as f64 / e1.dx;
            round_to_i64(x as f64 / e1.dx + b1)
        };
        return IntPoint::new(x, y);
    }

    let b1 = e1.bot.x as f64 - e1.bot.y as f64 * e1.dx;
    let b2 = e2.bot.x as f64 - e2.bot.y as f64 * e2.dx;
    let q = (b2 - b1) / (e1.dx - e2.dx);
    let x = if e1.dx.abs() < e2.dx.abs() {
        e1.dx * q + b1
    } else {
        e2.dx * q + b2
    };

    IntPoint::new(round_to_i64(x), round_to_i64(q))
}
