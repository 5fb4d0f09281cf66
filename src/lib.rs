//! Pilot Locator - pilot listing service with proximity search
//!
//! The core answers two questions over a pilot listing: which pilots are the
//! most experienced near a query point, and which pilots are within range of
//! a fixed reference point. Both are pure functions over an in-memory
//! collection; the HTTP layer and pilot sources feed them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::distance, filter_by_range, find_top_matches, QueryEngine, QueryError, QueryOutcome};
pub use crate::models::{Coordinate, PilotDocument, PilotRecord, QueryParameters, RankedPilotRecord};
