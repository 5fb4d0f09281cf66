use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::error::QueryError;

/// Number of ranked pilots returned when the caller gives no limit
pub const DEFAULT_LIMIT: usize = 10;

/// Default match radius around the query point, in kilometers
pub const DEFAULT_MATCH_RADIUS_KM: f64 = 1000.0;

/// Default filter radius around the reference point, in kilometers
pub const DEFAULT_FILTER_RADIUS_KM: f64 = 300.0;

/// Administrative home location used as the fixed reference point
pub const DEFAULT_REFERENCE: Coordinate = Coordinate { lat: 51.505, lon: -0.09 };

/// Query point used before the caller supplies one
pub const DEFAULT_QUERY: Coordinate = Coordinate { lat: 80.5, lon: 30.5 };

/// A validated (latitude, longitude) pair in decimal degrees
///
/// Serialized as a `[lat, lon]` array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(into = "[f64; 2]", try_from = "[f64; 2]")]
pub struct Coordinate {
    lat: f64,
    lon: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting non-finite or out-of-range values
    pub fn new(lat: f64, lon: f64) -> Result<Self, QueryError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);

        if !valid {
            return Err(QueryError::InvalidCoordinate { lat, lon });
        }

        Ok(Self { lat, lon })
    }

    #[inline]
    pub fn latitude(&self) -> f64 {
        self.lat
    }

    #[inline]
    pub fn longitude(&self) -> f64 {
        self.lon
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(value: Coordinate) -> Self {
        [value.lat, value.lon]
    }
}

impl TryFrom<[f64; 2]> for Coordinate {
    type Error = QueryError;

    fn try_from(value: [f64; 2]) -> Result<Self, Self::Error> {
        Coordinate::new(value[0], value[1])
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(value: Coordinate) -> Self {
        geo::Point::new(value.lon, value.lat)
    }
}

/// Pilot document as delivered by the listing source
///
/// Fields that can be malformed per record are kept as raw JSON so the
/// query engine can skip the record and report why. Text fields of the
/// wrong type read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PilotDocument {
    #[serde(rename = "_id", default)]
    pub id: Value,
    /// Appwrite document identifier
    #[serde(rename = "$id", default, skip_serializing_if = "Value::is_null")]
    pub appwrite_id: Value,
    /// Plain `id` key, e.g. a Mongoose virtual next to `_id`
    #[serde(rename = "id", default, skip_serializing_if = "Value::is_null")]
    pub alt_id: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default)]
    pub coordinates: Value,
    #[serde(default)]
    pub experience: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(rename = "profileImage", default, deserialize_with = "lenient_text")]
    pub profile_image: Option<String>,
    /// Set when the listing element could not be read as a pilot document
    #[serde(skip)]
    pub malformed: Option<String>,
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(Some(s)),
        _ => Ok(None),
    }
}

fn id_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(obj) => obj
            .get("$oid")
            .and_then(|oid| oid.as_str())
            .map(str::to_string),
        _ => None,
    }
}

impl PilotDocument {
    /// Placeholder for a listing element that failed to deserialize
    pub fn malformed(id: Value, detail: impl Into<String>) -> Self {
        Self {
            id,
            malformed: Some(detail.into()),
            ..Default::default()
        }
    }

    /// Identifier as a string, from `_id`, `$id` or `id` in that order
    ///
    /// Plain strings, numbers and `{"$oid": ...}` are accepted.
    pub fn pilot_id(&self) -> Option<String> {
        id_string(&self.id)
            .or_else(|| id_string(&self.appwrite_id))
            .or_else(|| id_string(&self.alt_id))
    }
}

/// Validated pilot record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PilotRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub coordinates: Coordinate,
    pub experience: u32,
    pub location: String,
    #[serde(rename = "profileImage", default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

/// Pilot record with its distance to the query point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedPilotRecord {
    #[serde(flatten)]
    pub pilot: PilotRecord,
    /// Great-circle distance in kilometers
    pub distance: f64,
}

/// Parameters for one run of both queries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryParameters {
    pub query: Coordinate,
    pub match_radius_km: f64,
    pub reference: Coordinate,
    pub filter_radius_km: f64,
    pub limit: usize,
}

impl Default for QueryParameters {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY,
            match_radius_km: DEFAULT_MATCH_RADIUS_KM,
            reference: DEFAULT_REFERENCE,
            filter_radius_km: DEFAULT_FILTER_RADIUS_KM,
            limit: DEFAULT_LIMIT,
        }
    }
}
