use garden_planner_catalog::Catalog;
use garden_planner_core::{ArrangementStats, CellCoord, Grid, PlantId, PlantProfile};
use garden_planner_system_analytics::arrangement_stats;

fn place(grid: &mut Grid, column: u32, row: u32, plant: &str) {
    let _ = grid.set(CellCoord::new(column, row), PlantId::new(plant));
}

#[test]
fn empty_grid_reports_capacity_only() {
    let stats = arrangement_stats(&Catalog::builtin(), &Grid::new(3, 4));
    assert_eq!(stats, ArrangementStats::new(12, 0, 0, 0));
    assert_eq!(stats.empty_squares(), 12);
}

#[test]
fn companion_pair_counts_once() {
    let mut grid = Grid::new(3, 3);
    place(&mut grid, 1, 1, "tomato");
    place(&mut grid, 2, 2, "basil");

    let stats = arrangement_stats(&Catalog::builtin(), &grid);
    assert_eq!(stats.filled_squares(), 2);
    assert_eq!(stats.empty_squares(), 7);
    assert_eq!(stats.unique_plants(), 2);
    assert_eq!(
        stats.companion_adjacencies(),
        1,
        "a symmetric companion pair must not be double counted",
    );
}

#[test]
fn one_sided_companion_still_counts_for_the_pair() {
    let catalog = Catalog::from_profiles([
        PlantProfile::new("chive", "Chive").with_companions(["rose"]),
        PlantProfile::new("rose", "Rose"),
    ])
    .expect("catalog builds");
    let mut grid = Grid::new(2, 1);
    place(&mut grid, 0, 0, "chive");
    place(&mut grid, 1, 0, "rose");

    assert_eq!(arrangement_stats(&catalog, &grid).companion_adjacencies(), 1);
}

#[test]
fn enemies_are_never_companions() {
    let catalog = Catalog::from_profiles([
        PlantProfile::new("mint", "Mint").with_companions(["parsley"]),
        PlantProfile::new("parsley", "Parsley").with_avoid(["mint"]),
    ])
    .expect("catalog builds");
    let mut grid = Grid::new(2, 1);
    place(&mut grid, 0, 0, "mint");
    place(&mut grid, 1, 0, "parsley");

    assert_eq!(arrangement_stats(&catalog, &grid).companion_adjacencies(), 0);
}

#[test]
fn companion_cluster_counts_every_pair() {
    let mut grid = Grid::new(2, 2);
    place(&mut grid, 0, 0, "tomato");
    place(&mut grid, 1, 0, "basil");
    place(&mut grid, 0, 1, "basil");
    place(&mut grid, 1, 1, "tomato");

    let stats = arrangement_stats(&Catalog::builtin(), &grid);
    // Four tomato/basil pairs; the basil/basil and tomato/tomato diagonals are neutral.
    assert_eq!(stats.companion_adjacencies(), 4);
    assert_eq!(stats.unique_plants(), 2);
}

#[test]
fn unknown_plants_are_counted_but_neutral() {
    let mut grid = Grid::new(2, 1);
    place(&mut grid, 0, 0, "okra");
    place(&mut grid, 1, 0, "tomato");

    let stats = arrangement_stats(&Catalog::builtin(), &grid);
    assert_eq!(stats, ArrangementStats::new(2, 2, 0, 2));
}
