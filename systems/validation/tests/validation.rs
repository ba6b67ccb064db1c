use garden_planner_catalog::Catalog;
use garden_planner_core::{CellCoord, Grid, PlantId, PlantProfile, Violation};
use garden_planner_system_validation::{validate_arrangement, violations_at};

fn grid_from(rows: &[&[Option<&str>]]) -> Grid {
    Grid::from_rows(
        rows.iter()
            .map(|row| row.iter().map(|cell| cell.map(PlantId::from)).collect())
            .collect(),
    )
    .expect("rows share one width")
}

#[test]
fn empty_grid_is_valid() {
    let result = validate_arrangement(&Catalog::builtin(), &Grid::new(4, 4));
    assert!(result.valid);
    assert!(result.violations.is_empty());
}

#[test]
fn adjacent_enemies_are_reported_once() {
    let grid = grid_from(&[&[Some("tomato"), Some("potato")]]);
    let result = validate_arrangement(&Catalog::builtin(), &grid);

    assert!(!result.valid);
    assert_eq!(
        result.violations,
        vec![Violation {
            cell: CellCoord::new(0, 0),
            plant: PlantId::new("tomato"),
            enemy_cell: CellCoord::new(1, 0),
            enemy: PlantId::new("potato"),
        }],
        "a pair must not be reported from both sides",
    );
}

#[test]
fn diagonal_enemies_are_violations() {
    let grid = grid_from(&[&[Some("fennel"), None], &[None, Some("basil")]]);
    let result = validate_arrangement(&Catalog::builtin(), &grid);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].enemy_cell, CellCoord::new(1, 1));
}

#[test]
fn one_sided_enemy_declaration_is_enforced() {
    let catalog = Catalog::from_profiles([
        PlantProfile::new("walnut", "Walnut").with_avoid(["apple"]),
        PlantProfile::new("apple", "Apple"),
    ])
    .expect("catalog builds");

    let forward = grid_from(&[&[Some("walnut"), Some("apple")]]);
    let backward = grid_from(&[&[Some("apple"), Some("walnut")]]);
    assert!(!validate_arrangement(&catalog, &forward).valid);
    assert!(!validate_arrangement(&catalog, &backward).valid);
}

#[test]
fn unknown_plants_never_conflict() {
    let grid = grid_from(&[&[Some("okra"), Some("tomato")], &[Some("potato"), None]]);
    let result = validate_arrangement(&Catalog::builtin(), &grid);
    assert_eq!(
        result.violations.len(),
        1,
        "only the tomato/potato pair should conflict"
    );
}

#[test]
fn validation_is_idempotent() {
    let catalog = Catalog::builtin();
    let grid = grid_from(&[
        &[Some("tomato"), Some("potato"), Some("cabbage")],
        &[Some("fennel"), Some("basil"), Some("strawberry")],
    ]);
    let before = grid.clone();

    let first = validate_arrangement(&catalog, &grid);
    let second = validate_arrangement(&catalog, &grid);
    assert_eq!(first, second);
    assert_eq!(grid, before, "validation must not mutate the grid");
}

#[test]
fn manual_swap_is_caught_by_cell_check() {
    let catalog = Catalog::builtin();
    let mut grid = grid_from(&[&[Some("tomato"), None, Some("potato")]]);
    assert!(validate_arrangement(&catalog, &grid).valid);

    assert!(grid.swap(CellCoord::new(1, 0), CellCoord::new(2, 0)));
    let local = violations_at(&catalog, &grid, CellCoord::new(1, 0));
    assert_eq!(local.len(), 1);
    assert_eq!(local[0].cell, CellCoord::new(0, 0));
    assert_eq!(local[0].enemy_cell, CellCoord::new(1, 0));

    let full = validate_arrangement(&catalog, &grid);
    assert_eq!(full.violations, local);
}

#[test]
fn cell_check_on_empty_cell_is_empty() {
    let grid = grid_from(&[&[Some("tomato"), None, Some("potato")]]);
    assert!(violations_at(&Catalog::builtin(), &grid, CellCoord::new(1, 0)).is_empty());
}
