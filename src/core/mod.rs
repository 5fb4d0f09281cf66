// Core algorithm exports
pub mod distance;
pub mod error;
pub mod filters;
pub mod listing;
pub mod matcher;
pub mod ranking;

pub use distance::{distance, haversine_distance, is_within_radius};
pub use error::{InvalidRecord, QueryError, RecordFault};
pub use filters::{resolve_record, parse_coordinates, parse_experience, within_radius};
pub use listing::{listing_items, parse_listing};
pub use matcher::{filter_by_range, find_top_matches, QueryEngine, QueryOutcome, QueryReport};
pub use ranking::{rank_and_truncate, rank_order};
