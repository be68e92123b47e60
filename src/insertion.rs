//! Obstacle insertion that never splits free space into separate components.
//!
//! Blocking a cell can only disconnect free space by separating its own free
//! orthogonal neighbours, so only those neighbours are probed. Reachability is
//! transitive, so consecutive survivors are chained: at most three BFS calls.

use crate::connectivity::is_connected;
use crate::Grid;

impl Grid {
    /// In-bounds orthogonal cells of `idx` in north, east, south, west order.
    pub fn cardinal_cells(&self, idx: usize) -> [Option<usize>; 4] {
        let (row, col) = self.coords(idx);
        let north = row.checked_sub(1).map(|r| self.linearize(r, col));
        let east = (col + 1 < self.cols()).then(|| self.linearize(row, col + 1));
        let south = (row + 1 < self.rows()).then(|| self.linearize(row + 1, col));
        let west = col.checked_sub(1).map(|c| self.linearize(row, c));
        [north, east, south, west]
    }

    /// Block `candidate` if doing so keeps every pair of free cells mutually reachable.
    ///
    /// Returns `false` without changing the grid when the cell is already an
    /// obstacle or when blocking it would disconnect two of its free neighbours.
    /// A candidate with fewer than two free neighbours is accepted without any search.
    ///
    /// Panics if `candidate` is out of bounds.
    pub fn try_add_obstacle(&mut self, candidate: usize) -> bool {
        if self.is_obstacle(candidate) {
            return false;
        }
        self.mark_tentative(candidate, true);

        let survivors: Vec<usize> = self
            .cardinal_cells(candidate)
            .into_iter()
            .flatten()
            .filter(|&idx| !self.is_obstacle(idx))
            .collect();

        for pair in survivors.windows(2) {
            if !is_connected(self, pair[0], pair[1]) {
                log::trace!(
                    "rejected obstacle at ({}, {}): separates {} from {}",
                    self.row_of(candidate),
                    self.col_of(candidate),
                    pair[0],
                    pair[1]
                );
                self.mark_tentative(candidate, false);
                return false;
            }
        }

        self.commit_change();
        true
    }
}
