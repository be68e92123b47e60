pub mod agents;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod generator;
pub mod grid;
pub mod insertion;
pub mod instance;
pub mod map_format;
pub mod snapshot;

pub use agents::Agents;
pub use config::Config;
pub use connectivity::{component_count, is_connected, reachable_from};
pub use error::{Error, Result};
pub use generator::{generate, generate_connected_grid, GeneratorConfig, ObstacleBudget};
pub use grid::Grid;
pub use instance::Instance;
