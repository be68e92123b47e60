use std::fmt;

/// Occupancy grid for multi-agent navigation instances.
///
/// Cells are addressed by a linear index `row * cols + col`.
/// `true` marks an obstacle, `false` a free cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
    /// Revision number - incremented whenever an occupancy value changes
    revision: u64,
}

impl Grid {
    /// Create a new grid with every cell free.
    ///
    /// Panics if either dimension is zero or `rows * cols` overflows; loaders
    /// check with [`Grid::checked_size`] first.
    pub fn new(rows: usize, cols: usize) -> Self {
        let size = match Self::checked_size(rows, cols) {
            Some(size) => size,
            None => panic!("invalid grid dimensions {}x{}", rows, cols),
        };
        Grid {
            rows,
            cols,
            cells: vec![false; size],
            revision: 0,
        }
    }

    /// Cell count of a `rows` x `cols` grid, or `None` if a dimension is zero or the product overflows
    pub fn checked_size(rows: usize, cols: usize) -> Option<usize> {
        if rows == 0 || cols == 0 {
            return None;
        }
        rows.checked_mul(cols)
    }

    /// Create a grid with specific obstacle cells
    pub fn with_obstacles(rows: usize, cols: usize, obstacles: &[usize]) -> Self {
        let mut grid = Self::new(rows, cols);
        for &idx in obstacles {
            grid.set_obstacle(idx, true);
        }
        grid
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Total number of cells
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    /// Current grid revision number
    pub fn get_revision(&self) -> u64 {
        self.revision
    }

    /// Convert (row, col) to a linear index
    pub fn linearize(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({}, {}) out of bounds for {}x{} grid",
            row,
            col,
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    pub fn row_of(&self, idx: usize) -> usize {
        self.assert_in_bounds(idx);
        idx / self.cols
    }

    pub fn col_of(&self, idx: usize) -> usize {
        self.assert_in_bounds(idx);
        idx % self.cols
    }

    /// Convert a linear index to (row, col)
    pub fn coords(&self, idx: usize) -> (usize, usize) {
        (self.row_of(idx), self.col_of(idx))
    }

    pub fn manhattan(&self, a: usize, b: usize) -> usize {
        self.row_of(a).abs_diff(self.row_of(b)) + self.col_of(a).abs_diff(self.col_of(b))
    }

    pub fn contains(&self, idx: usize) -> bool {
        idx < self.cells.len()
    }

    fn assert_in_bounds(&self, idx: usize) {
        assert!(
            self.contains(idx),
            "cell index {} out of bounds for grid of {} cells",
            idx,
            self.cells.len()
        );
    }

    /// Occupancy lookup. Panics on an out-of-range index.
    pub fn is_obstacle(&self, idx: usize) -> bool {
        self.assert_in_bounds(idx);
        self.cells[idx]
    }

    /// Set occupancy of a cell without any connectivity check.
    ///
    /// Used by loaders and the border pass; file content is authoritative.
    pub fn set_obstacle(&mut self, idx: usize, blocked: bool) {
        self.assert_in_bounds(idx);
        if self.cells[idx] != blocked {
            self.cells[idx] = blocked;
            self.revision += 1;
        }
    }

    /// Flip a cell without touching the revision; callers either undo it or
    /// publish it with [`Grid::commit_change`].
    pub(crate) fn mark_tentative(&mut self, idx: usize, blocked: bool) {
        self.cells[idx] = blocked;
    }

    pub(crate) fn commit_change(&mut self) {
        self.revision += 1;
    }

    pub(crate) fn set_revision(&mut self, revision: u64) {
        self.revision = revision;
    }

    /// A move is valid when `next` is in bounds, free, and orthogonally adjacent to `curr`
    pub fn valid_move(&self, curr: usize, next: usize) -> bool {
        if !self.contains(next) {
            return false;
        }
        if self.cells[next] {
            return false;
        }
        self.manhattan(curr, next) < 2
    }

    /// Free orthogonal neighbours of `idx`, in east, west, south, north order.
    /// Panics on an out-of-range index.
    pub fn neighbors(&self, idx: usize) -> Vec<usize> {
        self.assert_in_bounds(idx);
        // in a single column, +-1 and +-cols name the same cells
        let horizontal = self.cols > 1;
        let candidates = [
            idx.checked_add(1).filter(|_| horizontal),
            idx.checked_sub(1).filter(|_| horizontal),
            idx.checked_add(self.cols),
            idx.checked_sub(self.cols),
        ];
        candidates
            .into_iter()
            .flatten()
            .filter(|&next| self.valid_move(idx, next))
            .collect()
    }

    /// True if the cell lies on the outer ring of the grid
    pub fn is_border(&self, idx: usize) -> bool {
        let (row, col) = self.coords(idx);
        row == 0 || col == 0 || row + 1 == self.rows || col + 1 == self.cols
    }

    /// Mark every cell on the outer ring as an obstacle
    pub fn add_border(&mut self) {
        for idx in 0..self.size() {
            if self.is_border(idx) {
                self.set_obstacle(idx, true);
            }
        }
    }

    pub fn free_cells(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, blocked)| !**blocked)
            .map(|(idx, _)| idx)
    }

    pub fn free_count(&self) -> usize {
        self.cells.iter().filter(|&&blocked| !blocked).count()
    }

    pub fn obstacle_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, blocked)| **blocked)
            .map(|(idx, _)| idx)
            .collect()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for &blocked in row {
                f.write_str(if blocked { "@" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
