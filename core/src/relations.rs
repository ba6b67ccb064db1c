//! Resolution of the effective relationship between two plants.
//!
//! Catalog relationship lists are advisory and frequently one-sided. A pair is
//! incompatible when either side lists the other as an enemy, and companions
//! when either side lists the other as a companion, with enemy status always
//! taking precedence. Unknown identifiers contribute no relationship.

use serde::{Deserialize, Serialize};

use crate::CatalogOracle;

/// Effective relationship between two plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    /// At least one side avoids the other; adjacency is forbidden.
    Enemy,
    /// At least one side benefits from the other and neither avoids it.
    Companion,
    /// No declared relationship.
    Neutral,
}

/// Reports whether `first` and `second` may occupy adjacent cells.
#[must_use]
pub fn is_compatible<C>(catalog: &C, first: &str, second: &str) -> bool
where
    C: CatalogOracle + ?Sized,
{
    let first_avoids = catalog
        .lookup(first)
        .is_some_and(|profile| profile.lists_enemy(second));
    let second_avoids = catalog
        .lookup(second)
        .is_some_and(|profile| profile.lists_enemy(first));
    !(first_avoids || second_avoids)
}

/// Reports whether `first` and `second` benefit from being adjacent.
#[must_use]
pub fn is_companion<C>(catalog: &C, first: &str, second: &str) -> bool
where
    C: CatalogOracle + ?Sized,
{
    relationship(catalog, first, second) == Relationship::Companion
}

/// Combines both sides' declarations into a single relationship.
#[must_use]
pub fn relationship<C>(catalog: &C, first: &str, second: &str) -> Relationship
where
    C: CatalogOracle + ?Sized,
{
    if !is_compatible(catalog, first, second) {
        return Relationship::Enemy;
    }

    let first_likes = catalog
        .lookup(first)
        .is_some_and(|profile| profile.lists_companion(second));
    let second_likes = catalog
        .lookup(second)
        .is_some_and(|profile| profile.lists_companion(first));
    if first_likes || second_likes {
        Relationship::Companion
    } else {
        Relationship::Neutral
    }
}

/// Number of plants `id` declares as enemies; zero for unknown plants.
#[must_use]
pub fn enemy_count<C>(catalog: &C, id: &str) -> usize
where
    C: CatalogOracle + ?Sized,
{
    catalog.lookup(id).map_or(0, |profile| profile.avoid().len())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::{enemy_count, is_companion, is_compatible, relationship, Relationship};
    use crate::{CatalogOracle, PlantId, PlantProfile};

    struct TableCatalog(BTreeMap<PlantId, PlantProfile>);

    impl CatalogOracle for TableCatalog {
        fn lookup(&self, id: &str) -> Option<&PlantProfile> {
            self.0.get(id)
        }
    }

    fn catalog() -> TableCatalog {
        let profiles = [
            PlantProfile::new("tomato", "Tomato")
                .with_companions(["basil"])
                .with_avoid(["potato"]),
            PlantProfile::new("basil", "Basil"),
            PlantProfile::new("potato", "Potato"),
            PlantProfile::new("dill", "Dill").with_companions(["carrot"]),
            PlantProfile::new("carrot", "Carrot").with_avoid(["dill"]),
        ];
        TableCatalog(
            profiles
                .into_iter()
                .map(|profile| (profile.id().clone(), profile))
                .collect(),
        )
    }

    #[test]
    fn one_sided_enemy_blocks_both_directions() {
        let catalog = catalog();
        assert!(!is_compatible(&catalog, "tomato", "potato"));
        assert!(!is_compatible(&catalog, "potato", "tomato"));
    }

    #[test]
    fn one_sided_companion_counts_for_both() {
        let catalog = catalog();
        assert!(is_companion(&catalog, "tomato", "basil"));
        assert!(is_companion(&catalog, "basil", "tomato"));
    }

    #[test]
    fn enemy_overrides_companion() {
        let catalog = catalog();
        assert_eq!(relationship(&catalog, "dill", "carrot"), Relationship::Enemy);
        assert!(!is_companion(&catalog, "carrot", "dill"));
    }

    #[test]
    fn unknown_plants_have_no_relationship() {
        let catalog = catalog();
        assert!(is_compatible(&catalog, "tomato", "okra"));
        assert_eq!(relationship(&catalog, "okra", "tomato"), Relationship::Neutral);
        assert_eq!(enemy_count(&catalog, "okra"), 0);
        assert_eq!(catalog.display_name("okra"), "okra");
    }

    #[test]
    fn enemy_count_reads_declared_list() {
        let catalog = catalog();
        assert_eq!(enemy_count(&catalog, "tomato"), 1);
        assert_eq!(enemy_count(&catalog, "potato"), 0);
    }
}
