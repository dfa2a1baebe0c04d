/// Distinct sweep rows, popped from the largest y down.
pub struct Scanbeam {
    values: Vec<i64>,
}

impl Scanbeam {
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    pub fn insert(&mut self, y: i64) {
        if let Err(index) = self.values.binary_search(&y) {
            self.values.insert(index, y);
        }
    }

    pub fn pop(&mut self) -> Option<i64> {
        self.values.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clean(&mut self) {
        self.values.clear();
    }
}
