//! Random grid generation by rejection sampling through [`Grid::try_add_obstacle`].
//!
//! The requested size is padded with a one-cell obstacle border. Candidates are
//! drawn uniformly over the whole padded grid; border draws are simply rejected.
//! Without an attempt cap the loop runs until the target count is reached, which
//! may never happen when the target approaches the number of cells that can be
//! blocked while keeping free space connected.

use crate::error::{Error, Result};
use crate::Grid;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// What the requested obstacle count covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleBudget {
    /// Only cells placed inside the border count
    #[default]
    Interior,
    /// The mandatory border ring counts toward the total
    IncludingBorder,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Interior rows, excluding the border
    pub rows: usize,
    /// Interior columns, excluding the border
    pub cols: usize,
    pub obstacles: usize,
    pub budget: ObstacleBudget,
    /// Give up after this many candidate draws; `None` never gives up
    pub max_attempts: Option<u64>,
}

impl GeneratorConfig {
    pub fn new(rows: usize, cols: usize, obstacles: usize) -> Self {
        GeneratorConfig {
            rows,
            cols,
            obstacles,
            budget: ObstacleBudget::Interior,
            max_attempts: None,
        }
    }

    pub fn with_budget(mut self, budget: ObstacleBudget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: Option<u64>) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Number of border cells added around a `rows` x `cols` interior
    pub fn border_cells(&self) -> usize {
        2 * self.rows + 2 * self.cols + 4
    }

    /// Obstacles the inserter has to place inside the border
    pub fn interior_target(&self) -> Result<usize> {
        let padded = match (self.rows.checked_add(2), self.cols.checked_add(2)) {
            (Some(rows), Some(cols)) if self.rows > 0 && self.cols > 0 => Grid::checked_size(rows, cols),
            _ => None,
        };
        if padded.is_none() {
            return Err(Error::InvalidDimensions {
                rows: self.rows,
                cols: self.cols,
            });
        }
        let target = match self.budget {
            ObstacleBudget::Interior => self.obstacles,
            ObstacleBudget::IncludingBorder => self
                .obstacles
                .checked_sub(self.border_cells())
                .ok_or(Error::BudgetBelowBorder {
                    requested: self.obstacles,
                    border: self.border_cells(),
                })?,
        };
        let interior = self.rows * self.cols;
        if target >= interior {
            return Err(Error::TooManyObstacles {
                requested: target,
                capacity: interior - 1,
            });
        }
        Ok(target)
    }
}

/// Generate a `(rows + 2) x (cols + 2)` grid whose free space is one connected component.
pub fn generate_connected_grid<R: Rng>(config: &GeneratorConfig, rng: &mut R) -> Result<Grid> {
    let target = config.interior_target()?;
    log::info!(
        "Generate a {} x {} grid with {} obstacles",
        config.rows,
        config.cols,
        target
    );

    let mut grid = Grid::new(config.rows + 2, config.cols + 2);
    grid.add_border();

    let mut placed = 0;
    let mut attempts: u64 = 0;
    while placed < target {
        if let Some(limit) = config.max_attempts {
            if attempts >= limit {
                log::warn!(
                    "Stopped after {} attempts with {}/{} obstacles",
                    attempts,
                    placed,
                    target
                );
                return Err(Error::GenerationExhausted {
                    attempts,
                    placed,
                    requested: target,
                });
            }
        }
        attempts += 1;

        let loc = rng.random_range(0..grid.size());
        if grid.try_add_obstacle(loc) {
            placed += 1;
            log::trace!(
                "obstacle {}/{} at ({}, {})\n{}",
                placed,
                target,
                grid.row_of(loc),
                grid.col_of(loc),
                grid
            );
        }
    }

    log::debug!("Placed {} obstacles in {} attempts", placed, attempts);
    Ok(grid)
}

/// Unbounded generation with the obstacle count covering the interior only.
pub fn generate<R: Rng>(rows: usize, cols: usize, obstacles: usize, rng: &mut R) -> Result<Grid> {
    generate_connected_grid(&GeneratorConfig::new(rows, cols, obstacles), rng)
}
