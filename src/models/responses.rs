use serde::{Deserialize, Serialize};
use crate::core::error::InvalidRecord;
use crate::models::domain::{Coordinate, PilotRecord, RankedPilotRecord};

/// Response for the top matches endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopMatchesResponse {
    pub matches: Vec<RankedPilotRecord>,
    pub query: Coordinate,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub skipped: Vec<InvalidRecord>,
    pub scanned: usize,
}

/// Response for the in-range endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InRangeResponse {
    pub pilots: Vec<PilotRecord>,
    pub reference: Coordinate,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
    pub skipped: Vec<InvalidRecord>,
    pub scanned: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub source: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
