use crate::generator::{GeneratorConfig, ObstacleBudget};
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "mapfgrid.toml";

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub map: MapConfig,
    #[serde(default)]
    pub agents: AgentsConfig,
    #[serde(default)]
    pub random: RandomConfig,
    #[serde(default)]
    pub viewer: ViewerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MapConfig {
    #[serde(default = "default_map_path")]
    pub path: String,
    #[serde(default = "default_rows")]
    pub rows: usize,
    #[serde(default = "default_cols")]
    pub cols: usize,
    #[serde(default = "default_obstacles")]
    pub obstacles: usize,
    #[serde(default)]
    pub obstacle_budget: ObstacleBudget,
    /// Candidate draws before generation gives up; 0 never gives up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AgentsConfig {
    #[serde(default = "default_agents_path")]
    pub path: String,
    #[serde(default = "default_agent_count")]
    pub count: usize,
    /// 0 places agents uniformly; otherwise width of the warehouse strips
    #[serde(default)]
    pub warehouse_width: usize,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct RandomConfig {
    /// Fixed seed for reproducible runs; drawn from OS entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ViewerConfig {
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

// Default values
fn default_map_path() -> String { "random.map".to_string() }
fn default_rows() -> usize { 16 }
fn default_cols() -> usize { 16 }
fn default_obstacles() -> usize { 40 }
fn default_max_attempts() -> Option<u64> { Some(1_000_000) }
fn default_agents_path() -> String { "random.agents".to_string() }
fn default_agent_count() -> usize { 8 }
fn default_cell_size() -> f32 { 24.0 }
fn default_window_title() -> String { "mapfgrid - Instance Viewer".to_string() }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }
fn default_log_level() -> String { "info".to_string() }

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            path: default_map_path(),
            rows: default_rows(),
            cols: default_cols(),
            obstacles: default_obstacles(),
            obstacle_budget: ObstacleBudget::default(),
            max_attempts: default_max_attempts(),
        }
    }
}

impl Default for AgentsConfig {
    fn default() -> Self {
        Self {
            path: default_agents_path(),
            count: default_agent_count(),
            warehouse_width: 0,
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            window_title: default_window_title(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            map: MapConfig::default(),
            agents: AgentsConfig::default(),
            random: RandomConfig::default(),
            viewer: ViewerConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl MapConfig {
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.rows, self.cols, self.obstacles)
            .with_budget(self.obstacle_budget)
            .with_max_attempts(self.max_attempts.filter(|&n| n > 0))
    }
}

impl Config {
    pub fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Load configuration from file, or use defaults if it doesn't exist or fails to parse.
    ///
    /// Runs before logging is set up, so it reports to the console directly.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::parse(&contents) {
                Ok(config) => {
                    println!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    eprintln!("Warning: Failed to parse {}: {}", path.display(), e);
                    eprintln!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                println!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }
}
