use serde_json::Value;

use crate::core::error::RecordFault;
use crate::models::{Coordinate, PilotDocument, PilotRecord};

/// Turn a raw pilot document into a validated record
///
/// This is the per-record gate every query runs before measuring distance.
pub fn resolve_record(document: &PilotDocument) -> Result<PilotRecord, RecordFault> {
    if let Some(detail) = &document.malformed {
        return Err(RecordFault::MalformedDocument { detail: detail.clone() });
    }

    let id = document.pilot_id().unwrap_or_default();
    let coordinates = parse_coordinates(&document.coordinates)?;
    let experience = parse_experience(&document.experience)?;

    Ok(PilotRecord {
        id,
        name: document.name.clone().unwrap_or_default(),
        coordinates,
        experience,
        location: document.location.clone().unwrap_or_default(),
        profile_image: document.profile_image.clone(),
    })
}

/// Parse a `[lat, lon]` value
pub fn parse_coordinates(value: &Value) -> Result<Coordinate, RecordFault> {
    let items = match value {
        Value::Null => return Err(RecordFault::MissingCoordinates),
        Value::Array(items) => items,
        _ => return Err(RecordFault::CoordinateShape),
    };

    if items.len() != 2 {
        return Err(RecordFault::CoordinateArity { found: items.len() });
    }

    let lat = items[0].as_f64().ok_or(RecordFault::NonNumericCoordinate)?;
    let lon = items[1].as_f64().ok_or(RecordFault::NonNumericCoordinate)?;

    Coordinate::new(lat, lon).map_err(|_| RecordFault::CoordinateOutOfRange { lat, lon })
}

/// Parse years of experience; a missing value counts as zero
pub fn parse_experience(value: &Value) -> Result<u32, RecordFault> {
    let invalid = || RecordFault::InvalidExperience { value: value.to_string() };

    match value {
        Value::Null => Ok(0),
        Value::Number(n) => {
            if let Some(years) = n.as_u64() {
                return u32::try_from(years).map_err(|_| invalid());
            }

            let years = n.as_f64().ok_or_else(invalid)?;
            if years.is_finite() && years >= 0.0 && years.fract() == 0.0 && years <= u32::MAX as f64 {
                Ok(years as u32)
            } else {
                Err(invalid())
            }
        }
        _ => Err(invalid()),
    }
}

/// Inclusive radius check on an already computed distance
///
/// A negative or NaN radius admits nothing.
#[inline]
pub fn within_radius(distance_km: f64, radius_km: f64) -> bool {
    distance_km <= radius_km
}
