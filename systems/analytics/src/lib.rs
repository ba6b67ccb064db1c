#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Occupancy and companion statistics for finished arrangements.

use std::collections::{BTreeMap, BTreeSet};

use garden_planner_core::{is_companion, neighbors, ArrangementStats, CatalogOracle, Grid, PlantId};

/// Summarises occupancy and companion adjacency for `grid`.
///
/// Every filled cell counts its companion neighbours; the sum is halved (with
/// floor) so a companion pair contributes once.
#[must_use]
pub fn arrangement_stats<C>(catalog: &C, grid: &Grid) -> ArrangementStats
where
    C: CatalogOracle + ?Sized,
{
    let mut companion_links = 0usize;
    let mut unique = BTreeSet::new();

    for (cell, plant) in grid.occupied() {
        let _ = unique.insert(plant);
        companion_links += neighbors(cell, grid.width(), grid.height())
            .filter_map(|neighbor| grid.get(neighbor))
            .filter(|other| is_companion(catalog, plant.as_str(), other.as_str()))
            .count();
    }

    ArrangementStats::new(
        saturating_u32(grid.cell_count()),
        saturating_u32(grid.filled_count()),
        saturating_u32(companion_links / 2),
        saturating_u32(unique.len()),
    )
}

/// Counts how many squares each plant occupies.
#[must_use]
pub fn plant_counts(grid: &Grid) -> BTreeMap<PlantId, u32> {
    let mut counts = BTreeMap::new();
    for (_, plant) in grid.occupied() {
        *counts.entry(plant.clone()).or_insert(0) += 1;
    }
    counts
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::plant_counts;
    use garden_planner_core::{CellCoord, Grid, PlantId};

    #[test]
    fn plant_counts_tally_each_square() {
        let mut grid = Grid::new(3, 1);
        let _ = grid.set(CellCoord::new(0, 0), PlantId::new("kale"));
        let _ = grid.set(CellCoord::new(2, 0), PlantId::new("kale"));
        let _ = grid.set(CellCoord::new(1, 0), PlantId::new("leek"));

        let counts = plant_counts(&grid);
        assert_eq!(counts.get("kale"), Some(&2));
        assert_eq!(counts.get("leek"), Some(&1));
        assert_eq!(counts.len(), 2);
    }
}
