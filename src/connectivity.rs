//! Breadth-first reachability queries over the free space of a [`Grid`].

use crate::Grid;
use std::collections::VecDeque;

/// True if `goal` can be reached from `start` through free cells.
///
/// Stops as soon as `goal` is dequeued. `start == goal` is always connected.
/// Panics if either cell is outside the grid.
pub fn is_connected(grid: &Grid, start: usize, goal: usize) -> bool {
    for idx in [start, goal] {
        assert!(
            grid.contains(idx),
            "cell index {} out of bounds for grid of {} cells",
            idx,
            grid.size()
        );
    }
    let mut open = VecDeque::new();
    let mut closed = vec![false; grid.size()];
    open.push_back(start);
    closed[start] = true;

    while let Some(curr) = open.pop_front() {
        if curr == goal {
            return true;
        }
        for next in grid.neighbors(curr) {
            if closed[next] {
                continue;
            }
            open.push_back(next);
            closed[next] = true;
        }
    }
    false
}

/// Flood fill from `start`; the returned mask marks every reached cell.
pub fn reachable_from(grid: &Grid, start: usize) -> Vec<bool> {
    let mut open = VecDeque::new();
    let mut closed = vec![false; grid.size()];
    if grid.is_obstacle(start) {
        return closed;
    }
    open.push_back(start);
    closed[start] = true;

    while let Some(curr) = open.pop_front() {
        for next in grid.neighbors(curr) {
            if !closed[next] {
                closed[next] = true;
                open.push_back(next);
            }
        }
    }
    closed
}

/// Number of connected components of free space.
pub fn component_count(grid: &Grid) -> usize {
    let mut seen = vec![false; grid.size()];
    let mut components = 0;

    for idx in grid.free_cells() {
        if seen[idx] {
            continue;
        }
        components += 1;
        let reached = reachable_from(grid, idx);
        for (cell, hit) in reached.into_iter().enumerate() {
            if hit {
                seen[cell] = true;
            }
        }
    }
    components
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_equals_goal() {
        let grid = Grid::new(3, 3);
        assert!(is_connected(&grid, 4, 4));
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn goal_outside_grid_panics() {
        let grid = Grid::new(3, 3);
        is_connected(&grid, 0, 9);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn start_outside_grid_panics() {
        let grid = Grid::new(3, 3);
        is_connected(&grid, 12, 0);
    }

    #[test]
    fn wall_splits_grid() {
        // ..@..
        // ..@..
        // ..@..
        let grid = Grid::with_obstacles(3, 5, &[2, 7, 12]);
        assert!(!is_connected(&grid, 0, 4));
        assert!(is_connected(&grid, 0, 11));
        assert_eq!(component_count(&grid), 2);
    }

    #[test]
    fn no_diagonal_moves() {
        // .@
        // @.
        let grid = Grid::with_obstacles(2, 2, &[1, 2]);
        assert!(!is_connected(&grid, 0, 3));
    }

    #[test]
    fn row_wrap_is_not_a_path() {
        // @@.
        // .@@
        let grid = Grid::with_obstacles(2, 3, &[0, 1, 4, 5]);
        assert!(!is_connected(&grid, 2, 3));
        assert_eq!(component_count(&grid), 2);
    }

    #[test]
    fn flood_fill_from_obstacle_is_empty() {
        let grid = Grid::with_obstacles(2, 2, &[0]);
        assert!(reachable_from(&grid, 0).iter().all(|&hit| !hit));
    }

    #[test]
    fn fully_blocked_grid_has_no_components() {
        let grid = Grid::with_obstacles(1, 2, &[0, 1]);
        assert_eq!(component_count(&grid), 0);
    }
}
