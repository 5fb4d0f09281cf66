use serde::{Deserialize, Serialize};

use crate::core::{
    distance::distance,
    error::{InvalidRecord, RecordFault},
    filters::{resolve_record, within_radius},
    ranking::rank_and_truncate,
};
use crate::models::{Coordinate, PilotDocument, PilotRecord, QueryParameters, RankedPilotRecord};

/// Records produced by a query, plus the ones that had to be skipped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryOutcome<T> {
    pub records: Vec<T>,
    pub skipped: Vec<InvalidRecord>,
    /// Number of input records examined
    pub scanned: usize,
}

/// Both result sets for one set of query parameters
#[derive(Debug, Clone, PartialEq)]
pub struct QueryReport {
    pub top_matches: QueryOutcome<RankedPilotRecord>,
    pub in_range: QueryOutcome<PilotRecord>,
}

/// Validate every document and measure its distance from `origin`
///
/// Invalid records are logged and collected instead of aborting the scan.
fn measure(pilots: &[PilotDocument], origin: Coordinate) -> (Vec<(PilotRecord, f64)>, Vec<InvalidRecord>) {
    let mut measured = Vec::with_capacity(pilots.len());
    let mut skipped = Vec::new();

    for (index, document) in pilots.iter().enumerate() {
        let result = resolve_record(document).and_then(|record| {
            let distance_km = distance(origin, record.coordinates);
            if distance_km.is_finite() {
                Ok((record, distance_km))
            } else {
                Err(RecordFault::NonFiniteDistance)
            }
        });

        match result {
            Ok(entry) => measured.push(entry),
            Err(reason) => {
                let invalid = InvalidRecord {
                    index,
                    pilot_id: document.pilot_id(),
                    reason,
                };
                tracing::warn!("Skipping pilot record: {}", invalid);
                skipped.push(invalid);
            }
        }
    }

    (measured, skipped)
}

/// Top `limit` pilots within `match_radius_km` of `query`
///
/// Ranked by experience (descending), then distance (ascending).
/// The boundary is inclusive; a negative radius yields no matches.
pub fn find_top_matches(
    pilots: &[PilotDocument],
    query: Coordinate,
    match_radius_km: f64,
    limit: usize,
) -> QueryOutcome<RankedPilotRecord> {
    let (measured, skipped) = measure(pilots, query);

    let mut matches: Vec<RankedPilotRecord> = measured
        .into_iter()
        .filter(|(_, distance_km)| within_radius(*distance_km, match_radius_km))
        .map(|(pilot, distance_km)| RankedPilotRecord {
            pilot,
            distance: distance_km,
        })
        .collect();

    rank_and_truncate(&mut matches, limit);

    tracing::debug!(
        "Top matches: {} of {} pilots within {} km (skipped {})",
        matches.len(),
        pilots.len(),
        match_radius_km,
        skipped.len()
    );

    QueryOutcome {
        records: matches,
        skipped,
        scanned: pilots.len(),
    }
}

/// Every pilot within `filter_radius_km` of `reference`, in input order
pub fn filter_by_range(
    pilots: &[PilotDocument],
    reference: Coordinate,
    filter_radius_km: f64,
) -> QueryOutcome<PilotRecord> {
    let (measured, skipped) = measure(pilots, reference);

    let in_range: Vec<PilotRecord> = measured
        .into_iter()
        .filter(|(_, distance_km)| within_radius(*distance_km, filter_radius_km))
        .map(|(pilot, _)| pilot)
        .collect();

    tracing::debug!(
        "Range filter: {} of {} pilots within {} km (skipped {})",
        in_range.len(),
        pilots.len(),
        filter_radius_km,
        skipped.len()
    );

    QueryOutcome {
        records: in_range,
        skipped,
        scanned: pilots.len(),
    }
}

/// Query engine holding the defaults the presentation layer starts from
#[derive(Debug, Clone, Copy)]
pub struct QueryEngine {
    defaults: QueryParameters,
}

impl QueryEngine {
    pub fn new(defaults: QueryParameters) -> Self {
        Self { defaults }
    }

    pub fn with_default_parameters() -> Self {
        Self {
            defaults: QueryParameters::default(),
        }
    }

    pub fn defaults(&self) -> &QueryParameters {
        &self.defaults
    }

    /// Fixed reference point used by `filter_by_range`
    pub fn reference(&self) -> Coordinate {
        self.defaults.reference
    }

    /// Run both queries for one set of parameters
    ///
    /// Callers re-invoke this whenever parameters change; it holds no state
    /// between calls.
    pub fn run(&self, pilots: &[PilotDocument], params: &QueryParameters) -> QueryReport {
        QueryReport {
            top_matches: find_top_matches(pilots, params.query, params.match_radius_km, params.limit),
            in_range: filter_by_range(pilots, params.reference, params.filter_radius_km),
        }
    }

    /// Run both queries with the engine's defaults
    pub fn run_defaults(&self, pilots: &[PilotDocument]) -> QueryReport {
        self.run(pilots, &self.defaults)
    }
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::with_default_parameters()
    }
}
