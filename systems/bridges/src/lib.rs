#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Suggestions for separator plants between two enemies.
//!
//! A bridge plant is compatible with both members of an incompatible pair, so
//! it can occupy the cells between them. Suggestions are advisory; the
//! placement system never consults them.

use garden_planner_core::{is_compatible, CatalogOracle, PlantId};

/// Reports whether `candidate` can sit between `first_enemy` and `second_enemy`.
///
/// Always `false` when the two plants are not actually incompatible.
#[must_use]
pub fn is_bridge<C>(catalog: &C, candidate: &str, first_enemy: &str, second_enemy: &str) -> bool
where
    C: CatalogOracle + ?Sized,
{
    !is_compatible(catalog, first_enemy, second_enemy)
        && is_compatible(catalog, candidate, first_enemy)
        && is_compatible(catalog, candidate, second_enemy)
}

/// Filters `pool` down to the bridge plants for the pair, preserving pool order.
#[must_use]
pub fn find_bridge_plants<'a, C, I>(
    catalog: &C,
    first_enemy: &str,
    second_enemy: &str,
    pool: I,
) -> Vec<PlantId>
where
    C: CatalogOracle + ?Sized,
    I: IntoIterator<Item = &'a PlantId>,
{
    pool.into_iter()
        .filter(|candidate| is_bridge(catalog, candidate.as_str(), first_enemy, second_enemy))
        .cloned()
        .collect()
}
