#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy placement system that arranges selected plants in a bed.
//!
//! Units are placed one at a time, most constrained plant first, into the free
//! cell with the most companion neighbours that touches no enemy. Earlier
//! choices are never revisited, so the planner never produces an invalid grid
//! but can report failure for requests a backtracking search would solve.

mod engine;
mod fill;
mod ranker;

use std::collections::BTreeSet;

use garden_planner_core::{
    Arrangement, CatalogOracle, GenerationRequest, Grid, LockedMask, PlannerError, PlantId,
    Placement,
};
use tracing::{debug, info, warn};

pub use engine::{companion_score, find_cell, is_valid_placement};
pub use ranker::{rank_units, unit_total};

/// Placement system that owns the scratch buffers reused across generations.
#[derive(Debug, Default)]
pub struct Planner {
    units: Vec<PlantId>,
    unplaced: Vec<PlantId>,
    fill_order: Vec<(f64, usize)>,
}

impl Planner {
    /// Creates a planner with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Places exactly the requested quantities.
    ///
    /// The request's `fill_mode` flag is ignored; see [`Planner::generate_with_fill`].
    pub fn generate<C>(
        &mut self,
        catalog: &C,
        request: &GenerationRequest,
    ) -> Result<Arrangement, PlannerError>
    where
        C: CatalogOracle + ?Sized,
    {
        let (mut grid, locked) = prepare_bed(request)?;
        let placements = self.place_minimums(catalog, request, &mut grid, &locked)?;

        if !self.unplaced.is_empty() {
            let plants = distinct_names(catalog, &self.unplaced);
            warn!(?plants, "arrangement failed: plants could not avoid their enemies");
            return Err(PlannerError::Unplaceable { plants });
        }

        info!(
            width = request.width,
            height = request.height,
            placements = placements.len(),
            "generated arrangement"
        );
        Ok(Arrangement {
            grid,
            placements,
            success: true,
            unplaced: Vec::new(),
        })
    }

    /// Places the requested quantities as minimums and, when `fill_mode` is
    /// set, keeps adding the selected plants until no free cell accepts any.
    pub fn generate_with_fill<C>(
        &mut self,
        catalog: &C,
        request: &GenerationRequest,
    ) -> Result<Arrangement, PlannerError>
    where
        C: CatalogOracle + ?Sized,
    {
        if !request.fill_mode {
            return self.generate(catalog, request);
        }

        let (mut grid, locked) = prepare_bed(request)?;
        let mut placements = self.place_minimums(catalog, request, &mut grid, &locked)?;

        if !self.unplaced.is_empty() {
            let plants = distinct_names(catalog, &self.unplaced);
            warn!(?plants, "fill aborted: minimum quantities could not be placed");
            return Err(PlannerError::MinimumQuantitiesUnplaceable { plants });
        }

        let minimum = placements.len();
        let added = fill::expand(
            catalog,
            &request.plant_selections,
            &mut grid,
            &locked,
            &mut placements,
            &mut self.fill_order,
        );

        info!(
            width = request.width,
            height = request.height,
            minimum,
            added,
            "generated filled arrangement"
        );
        Ok(Arrangement {
            grid,
            placements,
            success: true,
            unplaced: Vec::new(),
        })
    }

    fn place_minimums<C>(
        &mut self,
        catalog: &C,
        request: &GenerationRequest,
        grid: &mut Grid,
        locked: &LockedMask,
    ) -> Result<Vec<Placement>, PlannerError>
    where
        C: CatalogOracle + ?Sized,
    {
        self.unplaced.clear();
        self.units.clear();

        let required = unit_total(catalog, &request.plant_selections);
        let available = grid.cell_count().saturating_sub(locked.locked_count());
        if required > available {
            warn!(required, available, "not enough free squares for the requested units");
            return Err(PlannerError::InsufficientSpace {
                required,
                available,
            });
        }

        rank_units(catalog, &request.plant_selections, &mut self.units);

        let mut placements = Vec::with_capacity(self.units.len());
        for plant in self.units.drain(..) {
            match find_cell(catalog, plant.as_str(), grid, locked) {
                Some(cell) => {
                    let _ = grid.set(cell, plant.clone());
                    placements.push(Placement { plant, cell });
                }
                None => {
                    debug!(%plant, "no feasible cell for unit");
                    self.unplaced.push(plant);
                }
            }
        }

        Ok(placements)
    }
}

/// Places exactly the requested quantities using a fresh [`Planner`].
pub fn generate_arrangement<C>(
    catalog: &C,
    request: &GenerationRequest,
) -> Result<Arrangement, PlannerError>
where
    C: CatalogOracle + ?Sized,
{
    Planner::new().generate(catalog, request)
}

/// Places the requested quantities and optionally fills the bed using a fresh [`Planner`].
pub fn generate_arrangement_with_fill<C>(
    catalog: &C,
    request: &GenerationRequest,
) -> Result<Arrangement, PlannerError>
where
    C: CatalogOracle + ?Sized,
{
    Planner::new().generate_with_fill(catalog, request)
}

fn prepare_bed(request: &GenerationRequest) -> Result<(Grid, LockedMask), PlannerError> {
    let (width, height) = (request.width, request.height);
    if width == 0 || height == 0 {
        return Err(PlannerError::InvalidDimensions {
            width: i64::from(width),
            height: i64::from(height),
        });
    }

    let locked = match &request.locked_squares {
        Some(mask) if mask.width() != width || mask.height() != height => {
            return Err(PlannerError::LockMaskMismatch { width, height });
        }
        Some(mask) => mask.clone(),
        None => LockedMask::new(width, height),
    };

    let mut grid = Grid::new(width, height);
    if let Some(preserved) = &request.preserved_grid {
        for (cell, plant) in preserved.occupied() {
            if locked.is_locked(cell) {
                let _ = grid.set(cell, plant.clone());
            }
        }
    }

    Ok((grid, locked))
}

fn distinct_names<C>(catalog: &C, plants: &[PlantId]) -> Vec<String>
where
    C: CatalogOracle + ?Sized,
{
    let mut seen = BTreeSet::new();
    plants
        .iter()
        .filter(|plant| seen.insert(plant.as_str()))
        .map(|plant| catalog.display_name(plant.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{distinct_names, prepare_bed};
    use garden_planner_core::{
        CatalogOracle, CellCoord, GenerationRequest, Grid, LockedMask, PlannerError, PlantId,
        PlantProfile,
    };

    struct Names;

    impl CatalogOracle for Names {
        fn lookup(&self, _id: &str) -> Option<&PlantProfile> {
            None
        }

        fn display_name(&self, id: &str) -> String {
            id.to_uppercase()
        }
    }

    #[test]
    fn distinct_names_keep_first_failure_order() {
        let plants = [
            PlantId::new("potato"),
            PlantId::new("fennel"),
            PlantId::new("potato"),
        ];
        assert_eq!(distinct_names(&Names, &plants), vec!["POTATO", "FENNEL"]);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let request = GenerationRequest::new(0, 3, Vec::new());
        assert_eq!(
            prepare_bed(&request).map(|_| ()),
            Err(PlannerError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
    }

    #[test]
    fn mismatched_lock_mask_is_rejected() {
        let request =
            GenerationRequest::new(3, 3, Vec::new()).with_locked_squares(LockedMask::new(2, 3));
        assert_eq!(
            prepare_bed(&request).map(|_| ()),
            Err(PlannerError::LockMaskMismatch {
                width: 3,
                height: 3
            })
        );
    }

    #[test]
    fn preserved_plants_survive_only_on_locked_cells() {
        let mut saved = Grid::new(2, 1);
        let _ = saved.set(CellCoord::new(0, 0), PlantId::new("garlic"));
        let _ = saved.set(CellCoord::new(1, 0), PlantId::new("onion"));
        let request = GenerationRequest::new(2, 1, Vec::new())
            .with_locked_squares(LockedMask::from_cells(2, 1, [CellCoord::new(0, 0)]))
            .with_preserved_grid(saved);

        let (grid, locked) = prepare_bed(&request).expect("bed prepares");
        assert_eq!(
            grid.get(CellCoord::new(0, 0)).map(PlantId::as_str),
            Some("garlic")
        );
        assert!(grid.is_empty_at(CellCoord::new(1, 0)));
        assert_eq!(locked.locked_count(), 1);
    }
}
