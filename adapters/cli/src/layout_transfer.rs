use std::{error::Error, fmt};

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use garden_planner_core::{CellCoord, Grid, PlantId};

const LAYOUT_DOMAIN: &str = "garden";
const LAYOUT_VERSION: &str = "v1";

/// Identifier prefix emitted before the encoded layout payload.
pub(crate) const LAYOUT_HEADER: &str = "garden:v1";
/// Delimiter used to separate the prefix, bed dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes a bed into a single-line string suitable for clipboard transfer.
///
/// The payload is the JSON array of rows, each cell holding a plant id or `null`.
pub(crate) fn encode(grid: &Grid) -> Result<String, LayoutTransferError> {
    let json = serde_json::to_vec(&rows(grid)).map_err(LayoutTransferError::InvalidPayload)?;
    let encoded = STANDARD_NO_PAD.encode(json);
    Ok(format!(
        "{LAYOUT_HEADER}:{}x{}:{encoded}",
        grid.width(),
        grid.height()
    ))
}

/// Decodes a bed from the provided string representation.
pub(crate) fn decode(value: &str) -> Result<Grid, LayoutTransferError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LayoutTransferError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(LayoutTransferError::MissingPrefix)?;
    let version = parts.next().ok_or(LayoutTransferError::MissingVersion)?;
    let dimensions = parts.next().ok_or(LayoutTransferError::MissingDimensions)?;
    let payload = parts.next().ok_or(LayoutTransferError::MissingPayload)?;

    if domain != LAYOUT_DOMAIN {
        return Err(LayoutTransferError::InvalidPrefix(domain.to_owned()));
    }
    if version != LAYOUT_VERSION {
        return Err(LayoutTransferError::UnsupportedVersion(version.to_owned()));
    }

    let (columns, rows) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(LayoutTransferError::InvalidEncoding)?;
    let decoded: Vec<Vec<Option<PlantId>>> =
        serde_json::from_slice(&bytes).map_err(LayoutTransferError::InvalidPayload)?;

    let grid = Grid::from_rows(decoded).ok_or(LayoutTransferError::RaggedRows)?;
    if grid.width() != columns || grid.height() != rows {
        return Err(LayoutTransferError::DimensionMismatch {
            declared: (columns, rows),
            found: (grid.width(), grid.height()),
        });
    }

    Ok(grid)
}

fn rows(grid: &Grid) -> Vec<Vec<Option<PlantId>>> {
    (0..grid.height())
        .map(|row| {
            (0..grid.width())
                .map(|column| grid.get(CellCoord::new(column, row)).cloned())
                .collect()
        })
        .collect()
}

/// Errors that can occur while encoding or decoding layout transfer strings.
#[derive(Debug)]
pub(crate) enum LayoutTransferError {
    /// The provided string was empty or contained only whitespace.
    EmptyPayload,
    /// The prefix segment was missing from the encoded layout.
    MissingPrefix,
    /// The encoded layout did not contain a version segment.
    MissingVersion,
    /// The encoded layout did not include bed dimensions.
    MissingDimensions,
    /// The encoded layout did not include the payload segment.
    MissingPayload,
    /// The encoded layout used an unexpected prefix segment.
    InvalidPrefix(String),
    /// The encoded layout used an unsupported version identifier.
    UnsupportedVersion(String),
    /// The bed dimensions could not be parsed from the encoded layout.
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    InvalidEncoding(base64::DecodeError),
    /// The payload could not be serialised or deserialised.
    InvalidPayload(serde_json::Error),
    /// The payload rows had differing lengths.
    RaggedRows,
    /// The payload shape disagreed with the declared dimensions.
    DimensionMismatch {
        /// Columns and rows named in the header.
        declared: (u32, u32),
        /// Columns and rows found in the payload.
        found: (u32, u32),
    },
}

impl fmt::Display for LayoutTransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPayload => write!(f, "layout string was empty"),
            Self::MissingPrefix => write!(f, "layout string is missing the prefix"),
            Self::MissingVersion => write!(f, "layout string is missing the version"),
            Self::MissingDimensions => write!(f, "layout string is missing the bed dimensions"),
            Self::MissingPayload => write!(f, "layout string is missing the payload"),
            Self::InvalidPrefix(prefix) => write!(f, "layout prefix '{prefix}' is not supported"),
            Self::UnsupportedVersion(version) => {
                write!(f, "layout version '{version}' is not supported")
            }
            Self::InvalidDimensions(dimensions) => {
                write!(f, "could not parse bed dimensions '{dimensions}'")
            }
            Self::InvalidEncoding(error) => {
                write!(f, "could not decode layout payload: {error}")
            }
            Self::InvalidPayload(error) => {
                write!(f, "could not process layout payload: {error}")
            }
            Self::RaggedRows => write!(f, "layout rows have differing lengths"),
            Self::DimensionMismatch { declared, found } => write!(
                f,
                "layout declares a {}x{} bed but holds {}x{} cells",
                declared.0, declared.1, found.0, found.1
            ),
        }
    }
}

impl Error for LayoutTransferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEncoding(error) => Some(error),
            Self::InvalidPayload(error) => Some(error),
            _ => None,
        }
    }
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), LayoutTransferError> {
    let (columns, rows) = dimensions
        .split_once(['x', 'X'])
        .ok_or_else(|| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    let columns = columns
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;
    let rows = rows
        .trim()
        .parse::<u32>()
        .map_err(|_| LayoutTransferError::InvalidDimensions(dimensions.to_owned()))?;

    if columns == 0 || rows == 0 {
        return Err(LayoutTransferError::InvalidDimensions(
            dimensions.to_owned(),
        ));
    }

    Ok((columns, rows))
}
