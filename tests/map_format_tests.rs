mod common;

use common::{parse_grid, scratch_dir};
use mapfgrid::map_format::{format_map, load_map, parse_map, save_map};
use mapfgrid::Error;
use std::fs;
use std::path::Path;

#[test]
fn test_benchmark_format() {
    let text = "type octile\nheight 3\nwidth 4\nmap\n@@@@\n@..T\n@@@@\n";
    let grid = parse_map(text, Path::new("bench.map")).unwrap();
    assert_eq!(grid.rows(), 3);
    assert_eq!(grid.cols(), 4);
    assert_eq!(grid.free_count(), 2);
    assert!(grid.is_obstacle(grid.linearize(1, 3)));
}

#[test]
fn test_local_format() {
    let grid = parse_map("2,3\n.@.\n...\n", Path::new("local.map")).unwrap();
    assert_eq!(grid, parse_grid(".@.\n..."));
}

#[test]
fn test_short_row_is_rejected() {
    let err = parse_map("2,3\n...\n..\n", Path::new("short.map")).unwrap_err();
    assert!(matches!(err, Error::Parse { line: 3, .. }), "{}", err);
}

#[test]
fn test_missing_rows_are_rejected() {
    let err = parse_map("3,2\n..\n", Path::new("missing.map")).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
}

#[test]
fn test_missing_file_is_none() {
    let dir = scratch_dir("map-missing");
    assert!(load_map(&dir.join("nope.map")).unwrap().is_none());
}

#[test]
fn test_save_writes_local_format_and_loads_back() {
    let dir = scratch_dir("map-save");
    let path = dir.join("saved.map");
    let grid = parse_grid(
        "
        @@@@@
        @..@@
        @...@
        @@@@@
        ",
    );

    save_map(&grid, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(text, "4,5\n@@@@@\n@..@@\n@...@\n@@@@@\n");
    assert_eq!(text, format_map(&grid));

    let loaded = load_map(&path).unwrap().unwrap();
    assert_eq!(loaded.obstacle_cells(), grid.obstacle_cells());
}
