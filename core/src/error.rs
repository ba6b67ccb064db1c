use thiserror::Error;

/// Errors returned by arrangement generation.
///
/// Every variant is terminal: generation is deterministic, so retrying the
/// same request reproduces the same failure.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlannerError {
    /// Width or height was missing, zero, or negative.
    #[error("bed dimensions must be positive (width: {width}, height: {height})")]
    InvalidDimensions {
        /// Width as supplied by the caller.
        width: i64,
        /// Height as supplied by the caller.
        height: i64,
    },

    /// The plant selections were not supplied as a list.
    #[error("plant selections must be a list")]
    InvalidSelections,

    /// The request document could not be parsed.
    #[error("malformed generation request: {0}")]
    Malformed(String),

    /// The locked mask does not match the bed dimensions.
    #[error("locked squares must cover a {width}x{height} bed")]
    LockMaskMismatch {
        /// Expected mask width.
        width: u32,
        /// Expected mask height.
        height: u32,
    },

    /// More unit squares were requested than unlocked cells exist.
    #[error("not enough space: {required} squares requested but only {available} available")]
    InsufficientSpace {
        /// Number of unit squares requested.
        required: usize,
        /// Number of unlocked cells in the bed.
        available: usize,
    },

    /// The greedy scan could not place one or more plants.
    #[error(
        "could not place all plants without enemy neighbours; unable to place: {}",
        .plants.join(", ")
    )]
    Unplaceable {
        /// Display names of the distinct plants left unplaced.
        plants: Vec<String>,
    },

    /// Fill mode could not satisfy the requested minimum quantities.
    #[error(
        "cannot place the minimum quantities without enemy neighbours: {}",
        .plants.join(", ")
    )]
    MinimumQuantitiesUnplaceable {
        /// Display names of the plants whose minimums could not be met.
        plants: Vec<String>,
    },
}
