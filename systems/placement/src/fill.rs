//! Proportional expansion of an arrangement into the remaining free cells.

use std::collections::{BTreeMap, BTreeSet};

use garden_planner_core::{CatalogOracle, Grid, LockedMask, PlantId, PlantSelection, Placement};
use tracing::warn;

use crate::engine::find_cell;

/// Adds further units of the selected plants until no free cell can take any
/// of them, returning the number of units added.
///
/// Each round ranks the candidates by `placed / (total + 1)` and places one
/// unit of the lowest-ranked plant that still has a feasible cell. Candidates
/// are the distinct known plants of `selections`, in selection order, which
/// also breaks ratio ties.
pub(crate) fn expand<C>(
    catalog: &C,
    selections: &[PlantSelection],
    grid: &mut Grid,
    locked: &LockedMask,
    placements: &mut Vec<Placement>,
    order: &mut Vec<(f64, usize)>,
) -> usize
where
    C: CatalogOracle + ?Sized,
{
    let candidates = fill_candidates(catalog, selections);
    let mut counts: BTreeMap<&PlantId, usize> = BTreeMap::new();
    for placement in placements.iter() {
        *counts.entry(&placement.plant).or_default() += 1;
    }
    let mut placed: Vec<usize> = candidates
        .iter()
        .map(|plant| counts.get(plant).copied().unwrap_or(0))
        .collect();
    let mut total = placements.len();
    let mut added = 0;

    while has_free_cell(grid, locked) {
        order.clear();
        let denominator = (total + 1) as f64;
        order.extend(
            placed
                .iter()
                .enumerate()
                .map(|(index, count)| (*count as f64 / denominator, index)),
        );
        order.sort_by(|a, b| a.0.total_cmp(&b.0));

        let next = order.iter().find_map(|(_, index)| {
            let plant = &candidates[*index];
            find_cell(catalog, plant.as_str(), grid, locked).map(|cell| (*index, cell))
        });

        let Some((index, cell)) = next else {
            warn!(added, "fill stopped early: no selected plant fits the remaining free cells");
            break;
        };

        let plant = candidates[index].clone();
        let _ = grid.set(cell, plant.clone());
        placements.push(Placement { plant, cell });
        placed[index] += 1;
        total += 1;
        added += 1;
    }

    added
}

fn fill_candidates<C>(catalog: &C, selections: &[PlantSelection]) -> Vec<PlantId>
where
    C: CatalogOracle + ?Sized,
{
    let mut seen = BTreeSet::new();
    selections
        .iter()
        .filter(|selection| catalog.lookup(selection.plant.as_str()).is_some())
        .filter(|selection| seen.insert(selection.plant.clone()))
        .map(|selection| selection.plant.clone())
        .collect()
}

fn has_free_cell(grid: &Grid, locked: &LockedMask) -> bool {
    grid.iter()
        .any(|(cell, slot)| slot.is_none() && !locked.is_locked(cell))
}
