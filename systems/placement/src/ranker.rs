//! Expansion of plant selections into unit placements, most constrained first.

use std::cmp::Reverse;

use garden_planner_core::{enemy_count, CatalogOracle, PlantId, PlantSelection};
use tracing::debug;

/// Expands `selections` into one token per requested square and orders them
/// by descending enemy count.
///
/// Unknown plants are dropped. The sort is stable, so plants with equal
/// enemy counts keep their selection order.
pub fn rank_units<C>(catalog: &C, selections: &[PlantSelection], out: &mut Vec<PlantId>)
where
    C: CatalogOracle + ?Sized,
{
    out.clear();

    for selection in selections {
        if catalog.lookup(selection.plant.as_str()).is_none() {
            debug!(plant = %selection.plant, "dropping selection for unknown plant");
            continue;
        }
        let units = selection.unit_count();
        out.extend(std::iter::repeat(selection.plant.clone()).take(units));
    }

    out.sort_by_key(|plant| Reverse(enemy_count(catalog, plant.as_str())));
}

/// Number of unit tokens [`rank_units`] would produce, saturating at `usize::MAX`.
#[must_use]
pub fn unit_total<C>(catalog: &C, selections: &[PlantSelection]) -> usize
where
    C: CatalogOracle + ?Sized,
{
    selections
        .iter()
        .filter(|selection| catalog.lookup(selection.plant.as_str()).is_some())
        .fold(0usize, |total, selection| {
            total.saturating_add(selection.unit_count())
        })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{rank_units, unit_total};
    use garden_planner_core::{CatalogOracle, PlantId, PlantProfile, PlantSelection};

    struct TableCatalog(BTreeMap<PlantId, PlantProfile>);

    impl CatalogOracle for TableCatalog {
        fn lookup(&self, id: &str) -> Option<&PlantProfile> {
            self.0.get(id)
        }
    }

    fn catalog() -> TableCatalog {
        let profiles = [
            PlantProfile::new("basil", "Basil"),
            PlantProfile::new("tomato", "Tomato").with_avoid(["potato", "fennel"]),
            PlantProfile::new("potato", "Potato").with_avoid(["tomato"]),
            PlantProfile::new("lettuce", "Lettuce"),
        ];
        TableCatalog(
            profiles
                .into_iter()
                .map(|profile| (profile.id().clone(), profile))
                .collect(),
        )
    }

    fn ranked(selections: &[PlantSelection]) -> Vec<String> {
        let mut out = Vec::new();
        rank_units(&catalog(), selections, &mut out);
        out.into_iter().map(|plant| plant.as_str().to_owned()).collect()
    }

    #[test]
    fn most_constrained_plants_come_first() {
        let order = ranked(&[
            PlantSelection::new("basil", 1.0),
            PlantSelection::new("potato", 1.0),
            PlantSelection::new("tomato", 2.0),
        ]);
        assert_eq!(order, vec!["tomato", "tomato", "potato", "basil"]);
    }

    #[test]
    fn ties_keep_selection_order() {
        let order = ranked(&[
            PlantSelection::new("lettuce", 1.0),
            PlantSelection::new("basil", 2.0),
            PlantSelection::new("lettuce", 1.0),
        ]);
        assert_eq!(order, vec!["lettuce", "basil", "basil", "lettuce"]);
    }

    #[test]
    fn fractional_quantities_round_up_and_unknown_plants_drop() {
        let order = ranked(&[
            PlantSelection::new("okra", 4.0),
            PlantSelection::new("basil", 1.25),
        ]);
        assert_eq!(order, vec!["basil", "basil"]);
    }

    #[test]
    fn unit_total_matches_expansion_and_saturates() {
        let catalog = catalog();
        let selections = [
            PlantSelection::new("okra", 4.0),
            PlantSelection::new("basil", 1.25),
            PlantSelection::new("tomato", 3.0),
        ];
        let mut out = Vec::new();
        rank_units(&catalog, &selections, &mut out);
        assert_eq!(unit_total(&catalog, &selections), out.len());

        let huge = [
            PlantSelection::new("basil", 1e30),
            PlantSelection::new("lettuce", 1e30),
        ];
        assert_eq!(unit_total(&catalog, &huge), usize::MAX);
    }

    #[test]
    fn output_buffer_is_reset_between_calls() {
        let catalog = catalog();
        let mut out = vec![PlantId::new("stale")];
        rank_units(&catalog, &[PlantSelection::new("basil", 1.0)], &mut out);
        assert_eq!(out, vec![PlantId::new("basil")]);
    }
}
