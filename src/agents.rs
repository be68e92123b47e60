use crate::error::{Error, Result};
use crate::Grid;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Start and goal cells (linear indices) for each agent
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agents {
    pub starts: Vec<usize>,
    pub goals: Vec<usize>,
}

impl Agents {
    pub fn len(&self) -> usize {
        self.starts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.starts.is_empty()
    }

    /// Random starts and goals anywhere in free space.
    ///
    /// Starts are pairwise distinct and goals are pairwise distinct; a goal may
    /// coincide with some agent's start.
    pub fn generate_uniform<R: Rng>(grid: &Grid, count: usize, rng: &mut R) -> Result<Self> {
        let available = grid.free_count();
        if count > available {
            return Err(Error::TooManyAgents {
                requested: count,
                available,
            });
        }
        log::info!("Generate {} random start and goal locations", count);

        let mut used_starts = vec![false; grid.size()];
        let mut used_goals = vec![false; grid.size()];
        let mut agents = Agents::default();

        while agents.len() < count {
            let start = grid.linearize(rng.random_range(0..grid.rows()), rng.random_range(0..grid.cols()));
            if grid.is_obstacle(start) || used_starts[start] {
                continue;
            }
            used_starts[start] = true;

            let mut goal = rng.random_range(0..grid.size());
            while grid.is_obstacle(goal) || used_goals[goal] {
                goal = rng.random_range(0..grid.size());
            }
            used_goals[goal] = true;

            agents.starts.push(start);
            agents.goals.push(goal);
        }
        Ok(agents)
    }

    /// Warehouse pattern: agents start in one outer strip of `width` columns and
    /// head for the opposite strip. Even-numbered agents start on the right.
    pub fn generate_warehouse<R: Rng>(grid: &Grid, count: usize, width: usize, rng: &mut R) -> Result<Self> {
        if width == 0 || 2 * width > grid.cols() {
            return Err(Error::InvalidWarehouseWidth {
                width,
                cols: grid.cols(),
            });
        }
        // the busier side needs ceil(count / 2) cells in each strip
        let per_side = count.div_ceil(2);
        let left = strip_free_count(grid, 0..width);
        let right = strip_free_count(grid, grid.cols() - width..grid.cols());
        let available = left.min(right);
        if per_side > available {
            return Err(Error::TooManyAgents {
                requested: count,
                available: 2 * available,
            });
        }
        log::info!("Generate {} warehouse start and goal locations", count);

        let starts = pick_strip_cells(grid, count, width, 0, rng);
        let goals = pick_strip_cells(grid, count, width, 1, rng);
        Ok(Agents { starts, goals })
    }

    /// One line per agent: `Agent i : S=(r,c) ; G=(r,c)`
    pub fn report(&self, grid: &Grid) -> String {
        let mut out = String::new();
        for (i, (&start, &goal)) in self.starts.iter().zip(&self.goals).enumerate() {
            let _ = writeln!(
                out,
                "Agent{} : S=({},{}) ; G=({},{})",
                i,
                grid.row_of(start),
                grid.col_of(start),
                grid.row_of(goal),
                grid.col_of(goal)
            );
        }
        out
    }
}

fn strip_free_count(grid: &Grid, cols: std::ops::Range<usize>) -> usize {
    (0..grid.rows())
        .flat_map(|row| cols.clone().map(move |col| (row, col)))
        .filter(|&(row, col)| !grid.is_obstacle(grid.linearize(row, col)))
        .count()
}

/// Draw one distinct free cell per agent; agent k uses the right strip when `k % 2 == right_parity`
fn pick_strip_cells<R: Rng>(grid: &Grid, count: usize, width: usize, right_parity: usize, rng: &mut R) -> Vec<usize> {
    let mut used = vec![false; grid.size()];
    let mut cells = Vec::with_capacity(count);
    while cells.len() < count {
        let row = rng.random_range(0..grid.rows());
        let mut col = rng.random_range(0..width);
        if cells.len() % 2 == right_parity {
            col = grid.cols() - col - 1;
        }
        let idx = grid.linearize(row, col);
        if grid.is_obstacle(idx) || used[idx] {
            continue;
        }
        used[idx] = true;
        cells.push(idx);
    }
    cells
}

/// Load an agents file. A missing file is `Ok(None)`.
///
/// `count` is the number of agents to read from a scenario file; local files carry their own count.
pub fn load_agents(path: &Path, grid: &Grid, count: usize) -> Result<Option<Agents>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_agents(&contents, path, grid, count).map(Some)
}

pub fn parse_agents(contents: &str, path: &Path, grid: &Grid, count: usize) -> Result<Agents> {
    let mut lines = contents.lines().enumerate().map(|(i, line)| (i + 1, line));
    let (_, header) = lines
        .next()
        .ok_or_else(|| Error::parse(path, 1, "empty agents file"))?;

    let mut agents = Agents::default();

    if header.starts_with('v') {
        if count == 0 {
            return Err(Error::MissingInput(
                "the number of agents must be positive to read a scenario file".to_string(),
            ));
        }
        log::info!("Load {} agents from scenario format", count);
        for i in 0..count {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| Error::parse(path, i + 2, "missing agent line"))?;
            // bucket, map name, map width, map height, then start and goal as col, row
            let fields: Vec<&str> = line.split('\t').skip(4).collect();
            let [start_col, start_row, goal_col, goal_row] = parse_four(&fields, path, line_no)?;
            agents.starts.push(cell_at(grid, start_row, start_col, path, line_no)?);
            agents.goals.push(cell_at(grid, goal_row, goal_col, path, line_no)?);
        }
    } else {
        let total: usize = header
            .split(',')
            .next()
            .map(str::trim)
            .and_then(|t| t.parse().ok())
            .ok_or_else(|| Error::parse(path, 1, format!("invalid agent count '{}'", header)))?;
        log::info!("Load {} agents from local format", total);
        for i in 0..total {
            let (line_no, line) = lines
                .next()
                .ok_or_else(|| Error::parse(path, i + 2, "missing agent line"))?;
            let fields: Vec<&str> = line.split(',').collect();
            let [start_row, start_col, goal_row, goal_col] = parse_four(&fields, path, line_no)?;
            agents.starts.push(cell_at(grid, start_row, start_col, path, line_no)?);
            agents.goals.push(cell_at(grid, goal_row, goal_col, path, line_no)?);
        }
    }
    Ok(agents)
}

fn parse_four(fields: &[&str], path: &Path, line_no: usize) -> Result<[usize; 4]> {
    let mut values = [0; 4];
    for (slot, value) in values.iter_mut().enumerate() {
        let token = fields
            .get(slot)
            .map(|t| t.trim())
            .ok_or_else(|| Error::parse(path, line_no, "expected four coordinates"))?;
        *value = token
            .parse()
            .map_err(|_| Error::parse(path, line_no, format!("invalid coordinate '{}'", token)))?;
    }
    Ok(values)
}

fn cell_at(grid: &Grid, row: usize, col: usize, path: &Path, line_no: usize) -> Result<usize> {
    if row >= grid.rows() || col >= grid.cols() {
        return Err(Error::parse(
            path,
            line_no,
            format!("cell ({}, {}) outside {}x{} map", row, col, grid.rows(), grid.cols()),
        ));
    }
    Ok(grid.linearize(row, col))
}

/// Write agents in the local layout
pub fn save_agents(agents: &Agents, grid: &Grid, path: &Path) -> Result<()> {
    fs::write(path, format_agents(agents, grid)).map_err(|e| Error::io(path, e))
}

pub fn format_agents(agents: &Agents, grid: &Grid) -> String {
    let mut out = format!("{}\n", agents.len());
    for (&start, &goal) in agents.starts.iter().zip(&agents.goals) {
        let _ = writeln!(
            out,
            "{},{},{},{},",
            grid.row_of(start),
            grid.col_of(start),
            grid.row_of(goal),
            grid.col_of(goal)
        );
    }
    out
}
