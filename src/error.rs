use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading, generating or saving an instance.
///
/// Rejected obstacle insertions are not errors; see [`crate::Grid::try_add_obstacle`].
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}:{line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("snapshot json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid grid dimensions {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("cannot place {requested} obstacles, capacity is {capacity}")]
    TooManyObstacles { requested: usize, capacity: usize },

    #[error("obstacle budget {requested} does not cover the {border} border cells")]
    BudgetBelowBorder { requested: usize, border: usize },

    #[error("gave up after {attempts} attempts with {placed}/{requested} obstacles placed")]
    GenerationExhausted {
        attempts: u64,
        placed: usize,
        requested: usize,
    },

    #[error("cannot place {requested} agents, only {available} cells available")]
    TooManyAgents { requested: usize, available: usize },

    #[error("warehouse strips of width {width} do not fit side by side in {cols} columns")]
    InvalidWarehouseWidth { width: usize, cols: usize },

    #[error("cell index {index} out of bounds for grid of {size} cells")]
    OutOfBounds { index: usize, size: usize },

    #[error("{0}")]
    MissingInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}
