#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocMin {
    pub y: i64,
    pub left_bound: usize,
    pub right_bound: usize,
}

/// Local minima of every added path, consumed bottom-up (largest y first)
/// by the sweep.
pub struct LocalMinima {
    items: Vec<LocMin>,
    current: usize,
}

impl LocalMinima {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            current: 0,
        }
    }

    pub fn insert(&mut self, y: i64, left_bound: usize, right_bound: usize) -> usize {
        self.items.push(LocMin {
            y,
            left_bound,
            right_bound,
        });

        self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.current = 0;
    }

    pub fn get_y(&self, index: usize) -> i64 {
        self.items[index - 1].y
    }

    pub fn get_left_bound(&self, index: usize) -> usize {
        self.items[index - 1].left_bound
    }

    pub fn get_right_bound(&self, index: usize) -> usize {
        self.items[index - 1].right_bound
    }

    /// Stable sort by descending y and rewind the cursor.
    pub fn reset(&mut self) {
        self.items.sort_by(|a, b| b.y.cmp(&a.y));
        self.current = 0;
    }

    pub fn has_pending(&self) -> bool {
        self.current < self.items.len()
    }

    /// Takes the next minimum when it activates on row `y`.
    pub fn pop(&mut self, y: i64) -> Option<(usize, usize)> {
        match self.items.get(self.current) {
            Some(item) if item.y == y => {
                self.current += 1;
                Some((item.left_bound, item.right_bound))
            }
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &LocMin> {
        self.items.iter()
    }
}
