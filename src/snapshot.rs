use crate::agents::Agents;
use crate::error::{Error, Result};
use crate::Grid;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// JSON snapshot of a grid and its agents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    /// Grid revision number
    pub revision: u64,
    /// Grid dimensions
    pub rows: usize,
    pub cols: usize,
    /// Obstacle cells (stored as linear indices)
    pub obstacles: Vec<usize>,
    #[serde(default)]
    pub agents: Agents,
}

impl InstanceSnapshot {
    pub fn from_instance(grid: &Grid, agents: &Agents) -> Self {
        InstanceSnapshot {
            revision: grid.get_revision(),
            rows: grid.rows(),
            cols: grid.cols(),
            obstacles: grid.obstacle_cells(),
            agents: agents.clone(),
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| Error::io(path, e))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let snapshot: InstanceSnapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }

    fn size(&self) -> Result<usize> {
        Grid::checked_size(self.rows, self.cols).ok_or(Error::InvalidDimensions {
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Rebuild the grid at the stored revision, rejecting obstacle indices outside it
    pub fn restore_grid(&self) -> Result<Grid> {
        let size = self.size()?;
        if let Some(&index) = self.obstacles.iter().find(|&&idx| idx >= size) {
            return Err(Error::OutOfBounds { index, size });
        }
        let mut grid = Grid::with_obstacles(self.rows, self.cols, &self.obstacles);
        grid.set_revision(self.revision);
        Ok(grid)
    }

    pub fn restore_agents(&self) -> Result<Agents> {
        let size = self.size()?;
        if self.agents.starts.len() != self.agents.goals.len() {
            return Err(Error::MissingInput(format!(
                "snapshot has {} starts but {} goals",
                self.agents.starts.len(),
                self.agents.goals.len()
            )));
        }
        let mut cells = self.agents.starts.iter().chain(&self.agents.goals).copied();
        if let Some(index) = cells.find(|&idx| idx >= size) {
            return Err(Error::OutOfBounds { index, size });
        }
        Ok(self.agents.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(rows: usize, cols: usize) -> InstanceSnapshot {
        InstanceSnapshot {
            revision: 0,
            rows,
            cols,
            obstacles: Vec::new(),
            agents: Agents::default(),
        }
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let snap = snapshot(usize::MAX, 2);
        assert!(matches!(snap.restore_grid(), Err(Error::InvalidDimensions { .. })));
        assert!(matches!(snap.restore_agents(), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(snapshot(0, 4).restore_grid(), Err(Error::InvalidDimensions { .. })));
    }

    #[test]
    fn revision_survives_restore() {
        let mut grid = Grid::new(3, 3);
        assert!(grid.try_add_obstacle(0));
        grid.set_obstacle(0, false);
        grid.set_obstacle(8, true);
        assert_eq!(grid.get_revision(), 3);
        let snap = InstanceSnapshot::from_instance(&grid, &Agents::default());
        let restored = snap.restore_grid().unwrap();
        assert_eq!(restored.get_revision(), grid.get_revision());
        assert_eq!(restored, grid);
    }
}
