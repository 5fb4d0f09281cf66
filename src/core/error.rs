use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a whole query call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid coordinate: latitude {lat}, longitude {lon} (expected latitude in [-90, 90] and longitude in [-180, 180])")]
    InvalidCoordinate { lat: f64, lon: f64 },
}

/// Why a single pilot record was left out of a result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordFault {
    #[error("document could not be read: {detail}")]
    MalformedDocument { detail: String },

    #[error("coordinates are missing")]
    MissingCoordinates,

    #[error("coordinates are not an array")]
    CoordinateShape,

    #[error("expected 2 coordinate values, found {found}")]
    CoordinateArity { found: usize },

    #[error("coordinate values must be numbers")]
    NonNumericCoordinate,

    #[error("coordinate out of range: latitude {lat}, longitude {lon}")]
    CoordinateOutOfRange { lat: f64, lon: f64 },

    #[error("experience must be a non-negative whole number, got {value}")]
    InvalidExperience { value: String },

    #[error("distance is not a finite number")]
    NonFiniteDistance,
}

/// A skipped record, reported back to the caller instead of failing the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[error("record {index} skipped: {reason}")]
pub struct InvalidRecord {
    /// Position of the record in the input collection
    pub index: usize,
    #[serde(rename = "pilotId")]
    pub pilot_id: Option<String>,
    pub reason: RecordFault,
}
