//! Error types for the boundary checks.
//!
//! The romaji engine itself never fails; these errors come only from the
//! optional precondition checks and from loading menu data.

/// A reading rejected by [`validate_reading`](crate::romaji::validate_reading).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadingError {
    #[error("reading is empty")]
    Empty,
    #[error("invalid character {ch:?} at byte {pos} (allowed: a-z and '-')")]
    InvalidChar { ch: char, pos: usize },
}

/// Malformed sushi menu data.
#[derive(Debug, thiserror::Error)]
pub enum MenuError {
    #[error("{location}: name is empty")]
    EmptyName { location: String },
    #[error("{location}: reading {reading:?} is invalid: {source}")]
    InvalidReading {
        location: String,
        reading: String,
        #[source]
        source: ReadingError,
    },
    #[error("duplicate reading {reading:?} ({location})")]
    DuplicateReading { location: String, reading: String },
    #[error("sushi_groups[{index}]: group id is empty")]
    EmptyGroupId { index: usize },
    #[error("duplicate group id {0:?}")]
    DuplicateGroupId(String),
    #[error("group {0:?} has no sushi")]
    EmptyGroup(String),
    #[cfg(feature = "serde_json")]
    #[error("menu JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
