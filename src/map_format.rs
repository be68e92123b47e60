//! Text map files.
//!
//! Two layouts are read:
//! - benchmark: a `type ...` line, `height H`, `width W`, `map`, then H rows
//! - local: a `rows,cols` header, then the rows
//!
//! A cell is free iff its character is `.`. Maps are always written in the local layout.

use crate::error::{Error, Result};
use crate::Grid;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapFormat {
    Benchmark,
    Local,
}

/// Load a map file. A missing file is `Ok(None)` so the caller may generate one instead.
pub fn load_map(path: &Path) -> Result<Option<Grid>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    parse_map(&contents, path).map(Some)
}

/// Parse map text; `path` is only used in error messages.
pub fn parse_map(contents: &str, path: &Path) -> Result<Grid> {
    let mut lines = contents.lines().enumerate().map(|(i, line)| (i + 1, line));

    let (header_no, header) = lines
        .next()
        .ok_or_else(|| Error::parse(path, 1, "empty map file"))?;

    let format = if header.starts_with('t') {
        MapFormat::Benchmark
    } else {
        MapFormat::Local
    };

    let (rows, cols) = match format {
        MapFormat::Benchmark => {
            log::info!("Load map from benchmark format");
            let rows = keyed_value(lines.next(), path, header_no + 1, "height")?;
            let cols = keyed_value(lines.next(), path, header_no + 2, "width")?;
            // skip "map"
            lines.next();
            (rows, cols)
        }
        MapFormat::Local => {
            log::info!("Load map from local format");
            let mut fields = header.split(',').map(str::trim);
            let rows = parse_number(fields.next(), path, header_no)?;
            let cols = parse_number(fields.next(), path, header_no)?;
            (rows, cols)
        }
    };

    if Grid::checked_size(rows, cols).is_none() {
        return Err(Error::InvalidDimensions { rows, cols });
    }

    // rows are read in full before the grid is allocated
    let mut obstacles = Vec::new();
    for row in 0..rows {
        let (line_no, line) = lines
            .next()
            .ok_or_else(|| Error::parse(path, header_no + row + 1, "missing map row"))?;
        let cells: Vec<char> = line.chars().take(cols).collect();
        if cells.len() < cols {
            return Err(Error::parse(
                path,
                line_no,
                format!("expected {} cells, found {}", cols, cells.len()),
            ));
        }
        obstacles.extend(
            cells
                .into_iter()
                .enumerate()
                .filter(|&(_, ch)| ch != '.')
                .map(|(col, _)| row * cols + col),
        );
    }
    let grid = Grid::with_obstacles(rows, cols, &obstacles);
    Ok(grid)
}

/// Write the map in the local layout.
pub fn save_map(grid: &Grid, path: &Path) -> Result<()> {
    fs::write(path, format_map(grid)).map_err(|e| Error::io(path, e))
}

pub fn format_map(grid: &Grid) -> String {
    format!("{},{}\n{}", grid.rows(), grid.cols(), grid)
}

/// Parse the second whitespace-separated token of a `key value` line
fn keyed_value(line: Option<(usize, &str)>, path: &Path, expected_line: usize, key: &str) -> Result<usize> {
    let (line_no, line) =
        line.ok_or_else(|| Error::parse(path, expected_line, format!("missing {} line", key)))?;
    let mut tokens = line.split_whitespace();
    tokens.next();
    parse_number(tokens.next(), path, line_no)
}

fn parse_number(token: Option<&str>, path: &Path, line_no: usize) -> Result<usize> {
    let token = token.ok_or_else(|| Error::parse(path, line_no, "missing number"))?;
    token
        .parse()
        .map_err(|_| Error::parse(path, line_no, format!("invalid number '{}'", token)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_header_with_trailing_comma() {
        let grid = parse_map("2,3,\n.@.\n...\n", Path::new("m.map")).unwrap();
        assert_eq!(grid.obstacle_cells(), vec![1]);
    }

    #[test]
    fn any_non_dot_is_an_obstacle() {
        let grid = parse_map("1,4\n.TW@\n", Path::new("m.map")).unwrap();
        assert_eq!(grid.obstacle_cells(), vec![1, 2, 3]);
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let err = parse_map(&format!("{},2\n..\n", usize::MAX), Path::new("m.map")).unwrap_err();
        assert!(matches!(err, Error::InvalidDimensions { .. }));
    }

    #[test]
    fn huge_header_without_rows_fails_before_allocating() {
        let err = parse_map("100000,100000\n", Path::new("m.map")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }

    #[test]
    fn bad_number_reports_line() {
        let err = parse_map("type octile\nheight x\nwidth 2\nmap\n", Path::new("b.map")).unwrap_err();
        assert!(matches!(err, Error::Parse { line: 2, .. }));
    }
}
