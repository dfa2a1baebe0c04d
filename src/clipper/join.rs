use crate::geometry::point::IntPoint;

/// Two output vertices whose edges overlap and must be merged after the sweep.
/// `out_pt2` is `UNASSIGNED` for ghost joins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Join {
    pub out_pt1: usize,
    pub out_pt2: usize,
    pub off_pt: IntPoint,
}

pub struct Joins {
    joins: Vec<Join>,
    ghosts: Vec<Join>,
}

impl Joins {
    pub fn new() -> Self {
        Self {
            joins: Vec::new(),
            ghosts: Vec::new(),
        }
    }

    pub fn add_join(&mut self, out_pt1: usize, out_pt2: usize, off_pt: IntPoint) {
        self.joins.push(Join {
            out_pt1,
            out_pt2,
            off_pt,
        });
    }

    pub fn add_ghost(&mut self, out_pt: usize, off_pt: IntPoint) {
        self.ghosts.push(Join {
            out_pt1: out_pt,
            out_pt2: crate::clipper::constants::UNASSIGNED,
            off_pt,
        });
    }

    pub fn len(&self) -> usize {
        self.joins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.joins.is_empty()
    }

    pub fn get(&self, index: usize) -> Join {
        self.joins[index]
    }

    pub fn ghosts(&self) -> &[Join] {
        &self.ghosts
    }

    pub fn clear_ghosts(&mut self) {
        self.ghosts.clear();
    }

    pub fn clear(&mut self) {
        self.joins.clear();
        self.ghosts.clear();
    }
}

pub fn horz_segments_overlap(seg1a: i64, seg1b: i64, seg2a: i64, seg2b: i64) -> bool {
    let (seg1a, seg1b) = if seg1a > seg1b { (seg1b, seg1a) } else { (seg1a, seg1b) };
    let (seg2a, seg2b) = if seg2a > seg2b { (seg2b, seg2a) } else { (seg2a, seg2b) };

    seg1a < seg2b && seg2a < seg1b
}

/// Shared x range of two horizontal spans, if it has positive length.
pub fn get_overlap(a1: i64, a2: i64, b1: i64, b2: i64) -> Option<(i64, i64)> {
    let (left, right) = if a1 < a2 {
        if b1 < b2 {
            (a1.max(b1), a2.min(b2))
        } else {
            (a1.max(b2), a2.min(b1))
        }
    } else if b1 < b2 {
        (a2.max(b1), a1.min(b2))
    } else {
        (a2.max(b2), a1.min(b1))
    };

    if left < right {
        Some((left, right))
    } else {
        None
    }
}
