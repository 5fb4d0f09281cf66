// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Coordinate, PilotDocument, PilotRecord, QueryParameters, RankedPilotRecord,
    DEFAULT_FILTER_RADIUS_KM, DEFAULT_LIMIT, DEFAULT_MATCH_RADIUS_KM, DEFAULT_QUERY, DEFAULT_REFERENCE,
};
pub use requests::{InRangeRequest, TopMatchesRequest};
pub use responses::{ErrorResponse, HealthResponse, InRangeResponse, TopMatchesResponse};
