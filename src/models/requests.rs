use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the top matches endpoint
///
/// Missing values fall back to the configured defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TopMatchesRequest {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "latitude")]
    pub lat: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "longitude")]
    pub lon: Option<f64>,
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: Option<f64>,
    pub limit: Option<usize>,
}

/// Query string for the in-range endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InRangeRequest {
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: Option<f64>,
}
