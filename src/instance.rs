use crate::agents::{load_agents, save_agents, Agents};
use crate::config::{AgentsConfig, MapConfig};
use crate::error::{Error, Result};
use crate::generator::generate_connected_grid;
use crate::map_format::{load_map, save_map};
use crate::snapshot::InstanceSnapshot;
use crate::Grid;
use rand::Rng;
use std::path::PathBuf;

/// A map plus agent start/goal assignments, backed by two files
#[derive(Clone, Debug)]
pub struct Instance {
    pub map_path: PathBuf,
    pub agents_path: PathBuf,
    pub grid: Grid,
    pub agents: Agents,
}

impl Instance {
    /// Load the map and agents files, generating and saving whichever is missing.
    pub fn load_or_generate<R: Rng>(map: &MapConfig, agents: &AgentsConfig, rng: &mut R) -> Result<Self> {
        let map_path = PathBuf::from(&map.path);
        let agents_path = PathBuf::from(&agents.path);

        let grid = match load_map(&map_path)? {
            Some(grid) => grid,
            None if map.rows > 0 && map.cols > 0 => {
                log::info!("Generate random map since {} was not found", map_path.display());
                let grid = generate_connected_grid(&map.generator_config(), rng)?;
                save_map(&grid, &map_path)?;
                grid
            }
            None => {
                return Err(Error::MissingInput(format!(
                    "map file {} not found",
                    map_path.display()
                )))
            }
        };

        let agent_list = match load_agents(&agents_path, &grid, agents.count)? {
            Some(agent_list) => agent_list,
            None if agents.count > 0 => {
                log::info!("Generate random agents since {} was not found", agents_path.display());
                let agent_list = if agents.warehouse_width == 0 {
                    Agents::generate_uniform(&grid, agents.count, rng)?
                } else {
                    Agents::generate_warehouse(&grid, agents.count, agents.warehouse_width, rng)?
                };
                save_agents(&agent_list, &grid, &agents_path)?;
                agent_list
            }
            None => {
                return Err(Error::MissingInput(format!(
                    "agent file {} not found",
                    agents_path.display()
                )))
            }
        };

        Ok(Instance {
            map_path,
            agents_path,
            grid,
            agents: agent_list,
        })
    }

    pub fn save_map(&self) -> Result<()> {
        save_map(&self.grid, &self.map_path)
    }

    pub fn snapshot(&self) -> InstanceSnapshot {
        InstanceSnapshot::from_instance(&self.grid, &self.agents)
    }

    /// Map followed by the agent list
    pub fn report(&self) -> String {
        format!("{}{}", self.grid, self.agents.report(&self.grid))
    }
}
