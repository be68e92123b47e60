#![allow(dead_code)]

use mapfgrid::{component_count, is_connected, Grid};
use rand::rngs::SmallRng;
use rand::Rng;
use std::fs;
use std::path::PathBuf;

/// Parse a grid from the text format used in tests
/// - @: obstacle
/// - .: free cell
pub fn parse_grid(text: &str) -> Grid {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let rows = lines.len();
    let cols = lines.first().map(|line| line.chars().count()).unwrap_or(0);

    let mut grid = Grid::new(rows, cols);
    for (row, line) in lines.iter().enumerate() {
        assert_eq!(line.chars().count(), cols, "ragged test grid at row {}", row);
        for (col, ch) in line.chars().enumerate() {
            if ch == '@' {
                let idx = grid.linearize(row, col);
                grid.set_obstacle(idx, true);
            }
        }
    }
    grid
}

/// Random grid where each cell is an obstacle with probability `density`
pub fn random_grid(rng: &mut SmallRng, rows: usize, cols: usize, density: f64) -> Grid {
    let mut grid = Grid::new(rows, cols);
    for idx in 0..grid.size() {
        if rng.random_bool(density) {
            grid.set_obstacle(idx, true);
        }
    }
    grid
}

/// True if every pair of free cells is mutually reachable, checked pair by pair
pub fn all_pairs_connected(grid: &Grid) -> bool {
    let free: Vec<usize> = grid.free_cells().collect();
    free.iter()
        .all(|&a| free.iter().all(|&b| is_connected(grid, a, b)))
}

/// Whether blocking `candidate` keeps the number of free-space components from growing
pub fn brute_force_accepts(grid: &Grid, candidate: usize) -> bool {
    if grid.is_obstacle(candidate) {
        return false;
    }
    let before = component_count(grid);
    let mut blocked = grid.clone();
    blocked.set_obstacle(candidate, true);
    component_count(&blocked) <= before
}

/// Per-test scratch directory under the system temp dir, emptied on creation
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mapfgrid-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}
