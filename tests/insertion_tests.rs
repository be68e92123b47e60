mod common;

use common::{all_pairs_connected, brute_force_accepts, parse_grid, random_grid};
use mapfgrid::component_count;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_corridor_between_rooms_is_rejected() {
    let mut grid = parse_grid(
        "
        ..@..
        ..@..
        .....
        ..@..
        ..@..
        ",
    );
    let before = grid.clone();
    let corridor = grid.linearize(2, 2);

    assert!(!grid.try_add_obstacle(corridor));
    assert_eq!(grid, before, "rejected insertion must leave the grid untouched");
    assert!(!grid.is_obstacle(corridor));
}

#[test]
fn test_existing_obstacle_rejected_twice_without_change() {
    let mut grid = parse_grid(
        "
        .@.
        ...
        ",
    );
    let before = grid.clone();
    assert!(!grid.try_add_obstacle(1));
    assert!(!grid.try_add_obstacle(1));
    assert_eq!(grid, before);
}

#[test]
fn test_surrounded_cell_is_accepted() {
    let mut grid = parse_grid(
        "
        .@..
        @.@.
        .@..
        ",
    );
    let pocket = grid.linearize(1, 1);
    assert!(grid.try_add_obstacle(pocket));
    assert!(grid.is_obstacle(pocket));
}

#[test]
fn test_corner_cell_on_grid_boundary() {
    let mut grid = parse_grid(
        "
        ...
        .@.
        ...
        ",
    );
    assert!(grid.try_add_obstacle(0));
    // (0, 1) is a dead end once (0, 0) is blocked
    assert!(grid.try_add_obstacle(grid.linearize(0, 1)));
    // removing (1, 2) would strand (0, 2)
    assert!(!grid.try_add_obstacle(grid.linearize(1, 2)));
    assert_eq!(component_count(&grid), 1);
}

#[test]
fn test_verdict_matches_brute_force_on_random_grids() {
    let mut rng = SmallRng::seed_from_u64(2024);
    for round in 0..300 {
        let rows = rng.random_range(1..7);
        let cols = rng.random_range(1..7);
        let mut grid = random_grid(&mut rng, rows, cols, 0.3);
        let candidate = rng.random_range(0..grid.size());

        let expected = brute_force_accepts(&grid, candidate);
        let before = grid.clone();
        let accepted = grid.try_add_obstacle(candidate);

        assert_eq!(
            accepted, expected,
            "round {}: candidate {} on\n{}",
            round, candidate, before
        );
        if !accepted {
            assert_eq!(grid, before);
        }
    }
}

#[test]
fn test_repeated_insertions_keep_free_space_connected() {
    let mut rng = SmallRng::seed_from_u64(99);
    for _ in 0..10 {
        let mut grid = parse_grid(
            "
            ........
            ........
            ........
            ........
            ........
            ........
            ",
        );
        for _ in 0..200 {
            let candidate = rng.random_range(0..grid.size());
            grid.try_add_obstacle(candidate);
        }
        assert!(component_count(&grid) <= 1, "\n{}", grid);
        assert!(all_pairs_connected(&grid));
    }
}
