//! Greedy single-cell search used for every unit placement.

use garden_planner_core::{
    is_companion, is_compatible, neighbors, CatalogOracle, CellCoord, Grid, LockedMask,
};

/// Reports whether `plant` may be written into `cell`.
///
/// The cell must be inside the grid and empty, and no neighbouring plant may be
/// incompatible with `plant` in either direction. Locks are not consulted, so
/// editors can use this to vet manual drops.
#[must_use]
pub fn is_valid_placement<C>(catalog: &C, plant: &str, grid: &Grid, cell: CellCoord) -> bool
where
    C: CatalogOracle + ?Sized,
{
    grid.is_empty_at(cell) && has_no_enemy_neighbors(catalog, plant, grid, cell)
}

/// Number of cells around `cell` holding a companion of `plant`.
#[must_use]
pub fn companion_score<C>(catalog: &C, plant: &str, grid: &Grid, cell: CellCoord) -> usize
where
    C: CatalogOracle + ?Sized,
{
    neighbors(cell, grid.width(), grid.height())
        .filter_map(|neighbor| grid.get(neighbor))
        .filter(|other| is_companion(catalog, plant, other.as_str()))
        .count()
}

/// Finds the best free cell for one unit of `plant`.
///
/// Cells are scanned row-major. Occupied, locked, and enemy-adjacent cells are
/// skipped; among the rest the first cell with the highest companion score
/// wins. Returns `None` when no feasible cell exists.
#[must_use]
pub fn find_cell<C>(catalog: &C, plant: &str, grid: &Grid, locked: &LockedMask) -> Option<CellCoord>
where
    C: CatalogOracle + ?Sized,
{
    let mut best: Option<(CellCoord, usize)> = None;

    for (cell, slot) in grid.iter() {
        if slot.is_some() || locked.is_locked(cell) {
            continue;
        }
        if !has_no_enemy_neighbors(catalog, plant, grid, cell) {
            continue;
        }

        let score = companion_score(catalog, plant, grid, cell);
        let replace = match best {
            None => true,
            Some((_, best_score)) => score > best_score,
        };
        if replace {
            best = Some((cell, score));
        }
    }

    best.map(|(cell, _)| cell)
}

fn has_no_enemy_neighbors<C>(catalog: &C, plant: &str, grid: &Grid, cell: CellCoord) -> bool
where
    C: CatalogOracle + ?Sized,
{
    neighbors(cell, grid.width(), grid.height())
        .filter_map(|neighbor| grid.get(neighbor))
        .all(|other| is_compatible(catalog, plant, other.as_str()))
}
