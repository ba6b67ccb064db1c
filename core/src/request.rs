//! Generation request model and parsing of request documents handed over by
//! storage or UI layers.

use serde_json::{Map, Value};

use crate::{Grid, LockedMask, PlannerError, PlantId, PlantSelection};

/// Input to a single generation call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GenerationRequest {
    /// Number of columns in the bed.
    pub width: u32,
    /// Number of rows in the bed.
    pub height: u32,
    /// Plants and quantities to place.
    pub plant_selections: Vec<PlantSelection>,
    /// Cells the engine must not write to. Defaults to all unlocked.
    pub locked_squares: Option<LockedMask>,
    /// Previously saved grid; plants on locked cells are carried into the result.
    pub preserved_grid: Option<Grid>,
    /// Treat quantities as minimums and saturate the remaining capacity.
    pub fill_mode: bool,
}

impl GenerationRequest {
    /// Creates a request for an unlocked bed.
    #[must_use]
    pub fn new(width: u32, height: u32, plant_selections: Vec<PlantSelection>) -> Self {
        Self {
            width,
            height,
            plant_selections,
            locked_squares: None,
            preserved_grid: None,
            fill_mode: false,
        }
    }

    /// Sets the cells the engine must leave untouched.
    #[must_use]
    pub fn with_locked_squares(mut self, locked: LockedMask) -> Self {
        self.locked_squares = Some(locked);
        self
    }

    /// Supplies a previously saved grid whose locked plants should be kept.
    #[must_use]
    pub fn with_preserved_grid(mut self, grid: Grid) -> Self {
        self.preserved_grid = Some(grid);
        self
    }

    /// Enables or disables fill mode.
    #[must_use]
    pub fn with_fill_mode(mut self, fill_mode: bool) -> Self {
        self.fill_mode = fill_mode;
        self
    }

    /// Parses a JSON request document.
    ///
    /// The document uses the field names `width`, `height`, `plantSelections`
    /// (a list of `{plantId, quantity}`), and the optional `lockedSquares`
    /// (rows of booleans), `grid` (rows of plant ids or `null`) and `fillMode`.
    pub fn from_json(document: &str) -> Result<Self, PlannerError> {
        let value: Value = serde_json::from_str(document)
            .map_err(|error| PlannerError::Malformed(error.to_string()))?;
        let object = value
            .as_object()
            .ok_or_else(|| PlannerError::Malformed("expected a JSON object".to_owned()))?;

        let (raw_width, width) = dimension(object.get("width"));
        let (raw_height, height) = dimension(object.get("height"));
        let (Some(width), Some(height)) = (width, height) else {
            return Err(PlannerError::InvalidDimensions {
                width: raw_width,
                height: raw_height,
            });
        };

        let plant_selections = match object.get("plantSelections") {
            Some(Value::Array(entries)) => entries
                .iter()
                .enumerate()
                .map(|(index, entry)| parse_selection(index, entry))
                .collect::<Result<Vec<_>, _>>()?,
            _ => return Err(PlannerError::InvalidSelections),
        };

        Ok(Self {
            width,
            height,
            plant_selections,
            locked_squares: parse_locked(object, width, height)?,
            preserved_grid: parse_grid(object)?,
            fill_mode: object
                .get("fillMode")
                .and_then(Value::as_bool)
                .unwrap_or(false),
        })
    }
}

fn dimension(value: Option<&Value>) -> (i64, Option<u32>) {
    let reported = value.and_then(Value::as_f64).unwrap_or(0.0) as i64;
    let valid = value
        .and_then(Value::as_u64)
        .filter(|candidate| *candidate >= 1)
        .and_then(|candidate| u32::try_from(candidate).ok());
    (reported, valid)
}

fn parse_selection(index: usize, entry: &Value) -> Result<PlantSelection, PlannerError> {
    let plant = entry
        .get("plantId")
        .and_then(Value::as_str)
        .ok_or_else(|| PlannerError::Malformed(format!("selection {index} has no plantId")))?;
    let quantity = entry
        .get("quantity")
        .and_then(Value::as_f64)
        .ok_or_else(|| PlannerError::Malformed(format!("selection {index} has no quantity")))?;
    Ok(PlantSelection::new(plant, quantity))
}

fn parse_locked(
    object: &Map<String, Value>,
    width: u32,
    height: u32,
) -> Result<Option<LockedMask>, PlannerError> {
    let rows = match object.get("lockedSquares") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(rows)) => rows,
        Some(_) => {
            return Err(PlannerError::Malformed(
                "lockedSquares must be rows of booleans".to_owned(),
            ))
        }
    };

    let mut parsed: Vec<Vec<bool>> = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row.as_array().ok_or_else(|| {
            PlannerError::Malformed("lockedSquares must be rows of booleans".to_owned())
        })?;
        parsed.push(
            cells
                .iter()
                .map(|cell| cell.as_bool().unwrap_or(false))
                .collect(),
        );
    }

    LockedMask::from_rows(parsed)
        .map(Some)
        .ok_or(PlannerError::LockMaskMismatch { width, height })
}

fn parse_grid(object: &Map<String, Value>) -> Result<Option<Grid>, PlannerError> {
    let rows = match object.get("grid") {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(rows)) => rows,
        Some(_) => {
            return Err(PlannerError::Malformed(
                "grid must be rows of plant ids".to_owned(),
            ))
        }
    };

    let mut parsed: Vec<Vec<Option<PlantId>>> = Vec::with_capacity(rows.len());
    for row in rows {
        let cells = row
            .as_array()
            .ok_or_else(|| PlannerError::Malformed("grid must be rows of plant ids".to_owned()))?;
        parsed.push(
            cells
                .iter()
                .map(|cell| cell.as_str().map(PlantId::from))
                .collect(),
        );
    }

    Grid::from_rows(parsed)
        .map(Some)
        .ok_or_else(|| PlannerError::Malformed("grid rows must share one width".to_owned()))
}
