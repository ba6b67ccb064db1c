#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Read-only validation of plant arrangements.
//!
//! Validation works on any grid, including grids edited by hand after
//! generation, and never mutates its input.

use garden_planner_core::{
    is_compatible, neighbors, CatalogOracle, CellCoord, Grid, PlantId, ValidationResult,
    Violation,
};
use tracing::debug;

/// Reports every pair of adjacent cells holding incompatible plants.
///
/// Each pair appears once, anchored at whichever cell comes first in
/// row-major order, and violations are listed in row-major order of that
/// anchor.
#[must_use]
pub fn validate_arrangement<C>(catalog: &C, grid: &Grid) -> ValidationResult
where
    C: CatalogOracle + ?Sized,
{
    let mut violations = Vec::new();

    for (cell, plant) in grid.occupied() {
        for neighbor in neighbors(cell, grid.width(), grid.height()) {
            if !follows(neighbor, cell) {
                continue;
            }
            let Some(other) = grid.get(neighbor) else {
                continue;
            };
            if !is_compatible(catalog, plant.as_str(), other.as_str()) {
                violations.push(violation(cell, plant, neighbor, other));
            }
        }
    }

    debug!(violations = violations.len(), "validated arrangement");
    ValidationResult::from_violations(violations)
}

/// Reports the conflicts involving a single cell, for feedback after a manual edit.
///
/// Violations use the same pair orientation as [`validate_arrangement`].
#[must_use]
pub fn violations_at<C>(catalog: &C, grid: &Grid, cell: CellCoord) -> Vec<Violation>
where
    C: CatalogOracle + ?Sized,
{
    let Some(plant) = grid.get(cell) else {
        return Vec::new();
    };

    neighbors(cell, grid.width(), grid.height())
        .filter_map(|neighbor| grid.get(neighbor).map(|other| (neighbor, other)))
        .filter(|(_, other)| !is_compatible(catalog, plant.as_str(), other.as_str()))
        .map(|(neighbor, other)| {
            if follows(neighbor, cell) {
                violation(cell, plant, neighbor, other)
            } else {
                violation(neighbor, other, cell, plant)
            }
        })
        .collect()
}

fn follows(candidate: CellCoord, anchor: CellCoord) -> bool {
    (candidate.row(), candidate.column()) > (anchor.row(), anchor.column())
}

fn violation(cell: CellCoord, plant: &PlantId, enemy_cell: CellCoord, enemy: &PlantId) -> Violation {
    Violation {
        cell,
        plant: plant.clone(),
        enemy_cell,
        enemy: enemy.clone(),
    }
}
