#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the garden planner.
//!
//! This crate defines the data surface that connects the plant catalog, the
//! pure planning systems, and the adapters that present their results. The
//! catalog is reached exclusively through the [`CatalogOracle`] trait so that
//! systems never depend on a concrete plant table. Systems consume a
//! [`GenerationRequest`] or a finished [`Grid`], query the oracle for plant
//! relationships, and respond with fresh result values such as
//! [`Arrangement`], [`ValidationResult`], and [`ArrangementStats`].

mod adjacency;
mod error;
mod relations;
mod request;

use std::{borrow::Borrow, collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

pub use adjacency::neighbors;
pub use error::PlannerError;
pub use relations::{enemy_count, is_companion, is_compatible, relationship, Relationship};
pub use request::GenerationRequest;

/// Identifier of a plant as it appears in the catalog (for example `"tomato"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(String);

impl PlantId {
    /// Creates a new plant identifier from the provided string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PlantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PlantId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PlantId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Relationship data published by the catalog for a single plant.
///
/// The companion and avoid lists are advisory and need not be symmetric;
/// use the functions re-exported from this crate (such as [`is_compatible`])
/// to resolve the effective relationship between two plants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantProfile {
    id: PlantId,
    name: String,
    companions: BTreeSet<PlantId>,
    avoid: BTreeSet<PlantId>,
}

impl PlantProfile {
    /// Creates a profile with no declared relationships.
    #[must_use]
    pub fn new(id: impl Into<PlantId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            companions: BTreeSet::new(),
            avoid: BTreeSet::new(),
        }
    }

    /// Adds the provided identifiers to the companion list.
    #[must_use]
    pub fn with_companions<I, P>(mut self, companions: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlantId>,
    {
        self.companions.extend(companions.into_iter().map(Into::into));
        self
    }

    /// Adds the provided identifiers to the avoid list.
    #[must_use]
    pub fn with_avoid<I, P>(mut self, avoid: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PlantId>,
    {
        self.avoid.extend(avoid.into_iter().map(Into::into));
        self
    }

    /// Identifier of the plant.
    #[must_use]
    pub fn id(&self) -> &PlantId {
        &self.id
    }

    /// Human readable name shown to gardeners.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Plants this profile declares as beneficial neighbours.
    #[must_use]
    pub fn companions(&self) -> &BTreeSet<PlantId> {
        &self.companions
    }

    /// Plants this profile declares as forbidden neighbours.
    #[must_use]
    pub fn avoid(&self) -> &BTreeSet<PlantId> {
        &self.avoid
    }

    /// Reports whether this profile lists `other` as a companion.
    #[must_use]
    pub fn lists_companion(&self, other: &str) -> bool {
        self.companions.contains(other)
    }

    /// Reports whether this profile lists `other` as an enemy.
    #[must_use]
    pub fn lists_enemy(&self, other: &str) -> bool {
        self.avoid.contains(other)
    }
}

/// Read-only plant lookup injected into every planning system.
///
/// Implementations must be in-memory and non-blocking.
pub trait CatalogOracle {
    /// Resolves the profile for `id`, or `None` when the plant is unknown.
    fn lookup(&self, id: &str) -> Option<&PlantProfile>;

    /// Display name for `id`, falling back to the raw identifier.
    fn display_name(&self, id: &str) -> String {
        self.lookup(id)
            .map_or_else(|| id.to_owned(), |profile| profile.name().to_owned())
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Reports whether `other` lies in this cell's 8-neighbourhood.
    #[must_use]
    pub fn touches(self, other: CellCoord) -> bool {
        self != other
            && self.column.abs_diff(other.column) <= 1
            && self.row.abs_diff(other.row) <= 1
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Rectangular bed of squares, each holding at most one plant.
///
/// Cells are stored row-major; `width` counts columns and `height` counts rows.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: u32,
    height: u32,
    cells: Vec<Option<PlantId>>,
}

impl Grid {
    /// Creates an empty grid with the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![None; cell_capacity(width, height)],
        }
    }

    /// Builds a grid from row slices, returning `None` for ragged input.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<Option<PlantId>>>) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let width = u32::try_from(width).ok()?;
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of squares in the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Reports whether the cell lies inside the grid bounds.
    #[must_use]
    pub fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Returns the plant occupying the cell, if any.
    #[must_use]
    pub fn get(&self, cell: CellCoord) -> Option<&PlantId> {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .and_then(Option::as_ref)
    }

    /// Reports whether the cell is inside the grid and holds no plant.
    #[must_use]
    pub fn is_empty_at(&self, cell: CellCoord) -> bool {
        self.index(cell)
            .and_then(|index| self.cells.get(index))
            .is_some_and(Option::is_none)
    }

    /// Writes `plant` into the cell and returns the previous occupant.
    ///
    /// Out-of-bounds writes are ignored.
    pub fn set(&mut self, cell: CellCoord, plant: PlantId) -> Option<PlantId> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)?.replace(plant)
    }

    /// Empties the cell and returns the plant it held.
    pub fn clear(&mut self, cell: CellCoord) -> Option<PlantId> {
        let index = self.index(cell)?;
        self.cells.get_mut(index)?.take()
    }

    /// Exchanges the contents of two cells, returning `false` if either is out of bounds.
    pub fn swap(&mut self, first: CellCoord, second: CellCoord) -> bool {
        match (self.index(first), self.index(second)) {
            (Some(a), Some(b)) => {
                self.cells.swap(a, b);
                true
            }
            _ => false,
        }
    }

    /// Iterates over every cell in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, Option<&PlantId>)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(index, slot)| (self.coord_at(index), slot.as_ref()))
    }

    /// Iterates over filled cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellCoord, &PlantId)> + '_ {
        self.iter()
            .filter_map(|(cell, slot)| slot.map(|plant| (cell, plant)))
    }

    /// Number of squares holding a plant.
    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|slot| slot.is_some()).count()
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    fn coord_at(&self, index: usize) -> CellCoord {
        let width = usize::try_from(self.width).unwrap_or(usize::MAX).max(1);
        CellCoord::new((index % width) as u32, (index / width) as u32)
    }
}

/// Cells the placement engine must never write to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockedMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl LockedMask {
    /// Creates a mask with every cell unlocked.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; cell_capacity(width, height)],
        }
    }

    /// Creates a mask with the listed cells locked; out-of-bounds cells are ignored.
    #[must_use]
    pub fn from_cells(width: u32, height: u32, cells: impl IntoIterator<Item = CellCoord>) -> Self {
        let mut mask = Self::new(width, height);
        for cell in cells {
            let _ = mask.lock(cell);
        }
        mask
    }

    /// Builds a mask from row slices, returning `None` for ragged input.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Option<Self> {
        let height = u32::try_from(rows.len()).ok()?;
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let width = u32::try_from(width).ok()?;
        Some(Self {
            width,
            height,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of columns covered by the mask.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows covered by the mask.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Locks the cell, returning `true` if it was previously unlocked.
    pub fn lock(&mut self, cell: CellCoord) -> bool {
        match self.slot_mut(cell) {
            Some(slot) if !*slot => {
                *slot = true;
                true
            }
            _ => false,
        }
    }

    /// Unlocks the cell, returning `true` if it was previously locked.
    pub fn unlock(&mut self, cell: CellCoord) -> bool {
        match self.slot_mut(cell) {
            Some(slot) if *slot => {
                *slot = false;
                true
            }
            _ => false,
        }
    }

    /// Reports whether the cell is locked. Out-of-bounds cells are never locked.
    #[must_use]
    pub fn is_locked(&self, cell: CellCoord) -> bool {
        if cell.column() >= self.width || cell.row() >= self.height {
            return false;
        }
        let index = cell.row() as usize * self.width as usize + cell.column() as usize;
        self.cells.get(index).copied().unwrap_or(false)
    }

    /// Number of locked cells.
    #[must_use]
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|locked| **locked).count()
    }

    fn slot_mut(&mut self, cell: CellCoord) -> Option<&mut bool> {
        if cell.column() >= self.width || cell.row() >= self.height {
            return None;
        }
        let index = cell.row() as usize * self.width as usize + cell.column() as usize;
        self.cells.get_mut(index)
    }
}

/// Requested plant and the number of squares it should cover.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlantSelection {
    /// Plant requested by the gardener.
    pub plant: PlantId,
    /// Area requested in squares; fractional areas round up.
    pub quantity: f64,
}

impl PlantSelection {
    /// Creates a new selection.
    #[must_use]
    pub fn new(plant: impl Into<PlantId>, quantity: f64) -> Self {
        Self {
            plant: plant.into(),
            quantity,
        }
    }

    /// Whole squares required by the selection.
    ///
    /// Non-finite and non-positive quantities request nothing.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        if !self.quantity.is_finite() || self.quantity <= 0.0 {
            return 0;
        }
        self.quantity.ceil() as usize
    }
}

/// A single committed assignment of a plant to a cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    /// Plant written into the cell.
    pub plant: PlantId,
    /// Cell that received the plant.
    pub cell: CellCoord,
}

/// Complete output of a generation call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrangement {
    /// Final grid including any preserved locked plants.
    pub grid: Grid,
    /// Assignments in the order they were committed.
    pub placements: Vec<Placement>,
    /// Indicates whether every requested unit was placed.
    pub success: bool,
    /// Plants that could not be placed. Empty for arrangements returned to callers.
    pub unplaced: Vec<PlantId>,
}

/// Enemy adjacency discovered by the validator.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// Earlier cell of the pair in row-major order.
    pub cell: CellCoord,
    /// Plant occupying `cell`.
    pub plant: PlantId,
    /// Neighbouring cell holding the incompatible plant.
    pub enemy_cell: CellCoord,
    /// Plant occupying `enemy_cell`.
    pub enemy: PlantId,
}

/// Outcome of validating a grid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// `true` iff `violations` is empty.
    pub valid: bool,
    /// Every distinct enemy adjacency found.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Wraps the violations, deriving the validity flag.
    #[must_use]
    pub fn from_violations(violations: Vec<Violation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

/// Occupancy and companion metrics for a finished grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArrangementStats {
    total_squares: u32,
    filled_squares: u32,
    companion_adjacencies: u32,
    unique_plants: u32,
}

impl ArrangementStats {
    /// Creates a new statistics report.
    #[must_use]
    pub const fn new(
        total_squares: u32,
        filled_squares: u32,
        companion_adjacencies: u32,
        unique_plants: u32,
    ) -> Self {
        Self {
            total_squares,
            filled_squares,
            companion_adjacencies,
            unique_plants,
        }
    }

    /// Number of squares in the bed.
    #[must_use]
    pub const fn total_squares(&self) -> u32 {
        self.total_squares
    }

    /// Number of squares holding a plant.
    #[must_use]
    pub const fn filled_squares(&self) -> u32 {
        self.filled_squares
    }

    /// Number of squares left empty.
    #[must_use]
    pub const fn empty_squares(&self) -> u32 {
        self.total_squares.saturating_sub(self.filled_squares)
    }

    /// Number of adjacent companion pairs.
    #[must_use]
    pub const fn companion_adjacencies(&self) -> u32 {
        self.companion_adjacencies
    }

    /// Number of distinct plants present.
    #[must_use]
    pub const fn unique_plants(&self) -> u32 {
        self.unique_plants
    }
}

fn cell_capacity(width: u32, height: u32) -> usize {
    let capacity_u64 = u64::from(width) * u64::from(height);
    usize::try_from(capacity_u64).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{
        Arrangement, ArrangementStats, CellCoord, Grid, LockedMask, PlantId, PlantSelection,
        Placement,
    };
    use serde::{de::DeserializeOwned, Serialize};

    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let bytes = bincode::serialize(value).expect("serialize");
        let restored: T = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(&restored, value);
    }

    #[test]
    fn arrangement_round_trips_through_bincode() {
        let mut grid = Grid::new(2, 1);
        let _ = grid.set(CellCoord::new(1, 0), PlantId::new("basil"));
        let arrangement = Arrangement {
            grid,
            placements: vec![Placement {
                plant: PlantId::new("basil"),
                cell: CellCoord::new(1, 0),
            }],
            success: true,
            unplaced: Vec::new(),
        };
        assert_round_trip(&arrangement);
    }

    #[test]
    fn stats_round_trip_through_bincode() {
        assert_round_trip(&ArrangementStats::new(9, 2, 1, 2));
    }

    #[test]
    fn grid_iterates_in_row_major_order() {
        let grid = Grid::new(3, 2);
        let cells: Vec<CellCoord> = grid.iter().map(|(cell, _)| cell).collect();
        assert_eq!(
            cells,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(1, 0),
                CellCoord::new(2, 0),
                CellCoord::new(0, 1),
                CellCoord::new(1, 1),
                CellCoord::new(2, 1),
            ]
        );
    }

    #[test]
    fn grid_set_clear_and_swap() {
        let mut grid = Grid::new(2, 2);
        let origin = CellCoord::new(0, 0);
        let corner = CellCoord::new(1, 1);

        assert!(grid.set(origin, PlantId::new("tomato")).is_none());
        assert_eq!(grid.get(origin).map(PlantId::as_str), Some("tomato"));
        assert!(grid.is_empty_at(corner));

        assert!(grid.swap(origin, corner));
        assert!(grid.is_empty_at(origin));
        assert_eq!(grid.get(corner).map(PlantId::as_str), Some("tomato"));
        assert_eq!(grid.filled_count(), 1);

        assert_eq!(grid.clear(corner), Some(PlantId::new("tomato")));
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn grid_ignores_out_of_bounds_writes() {
        let mut grid = Grid::new(1, 1);
        assert!(grid.set(CellCoord::new(1, 0), PlantId::new("kale")).is_none());
        assert_eq!(grid.filled_count(), 0);
        assert!(!grid.is_empty_at(CellCoord::new(0, 4)));
        assert!(!grid.swap(CellCoord::new(0, 0), CellCoord::new(3, 3)));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let rows = vec![vec![None, None], vec![None]];
        assert!(Grid::from_rows(rows).is_none());
        assert!(LockedMask::from_rows(vec![vec![true], vec![]]).is_none());
    }

    #[test]
    fn locked_mask_tracks_cells() {
        let mut mask = LockedMask::from_cells(3, 3, [CellCoord::new(1, 1), CellCoord::new(5, 5)]);
        assert_eq!(mask.locked_count(), 1);
        assert!(mask.is_locked(CellCoord::new(1, 1)));
        assert!(!mask.lock(CellCoord::new(1, 1)));
        assert!(mask.unlock(CellCoord::new(1, 1)));
        assert_eq!(mask.locked_count(), 0);
    }

    #[test]
    fn selection_rounds_fractional_area_up() {
        assert_eq!(PlantSelection::new("tomato", 1.2).unit_count(), 2);
        assert_eq!(PlantSelection::new("tomato", 3.0).unit_count(), 3);
        assert_eq!(PlantSelection::new("tomato", 0.0).unit_count(), 0);
        assert_eq!(PlantSelection::new("tomato", -2.0).unit_count(), 0);
        assert_eq!(PlantSelection::new("tomato", f64::NAN).unit_count(), 0);
    }

    #[test]
    fn touching_cells_include_diagonals() {
        let centre = CellCoord::new(1, 1);
        assert!(centre.touches(CellCoord::new(0, 0)));
        assert!(centre.touches(CellCoord::new(2, 1)));
        assert!(!centre.touches(centre));
        assert!(!centre.touches(CellCoord::new(3, 1)));
    }
}
