use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::{
    error::QueryError,
    listing::{listing_items, parse_listing},
    matcher::{filter_by_range, find_top_matches, QueryEngine},
};
use crate::models::{
    Coordinate, ErrorResponse, HealthResponse, InRangeRequest, InRangeResponse, PilotDocument,
    TopMatchesRequest, TopMatchesResponse,
};
use crate::services::{PilotSource, SourceError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn PilotSource>,
    pub engine: QueryEngine,
    /// Upper bound for the `limit` query parameter
    pub max_limit: usize,
}

/// Configure all pilot routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/pilots", web::get().to(list_pilots))
        .route("/pilots/top-matches", web::get().to(top_matches))
        .route("/pilots/in-range", web::get().to(in_range));
}

fn error_response(status: actix_web::http::StatusCode, error: &str, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message,
        status_code: status.as_u16(),
    })
}

fn source_failure(state: &AppState, e: SourceError) -> HttpResponse {
    tracing::error!("Failed to fetch pilots from {}: {}", state.source.describe(), e);
    error_response(
        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
        "source_unavailable",
        e.to_string(),
    )
}

fn invalid_listing(e: QueryError) -> HttpResponse {
    tracing::error!("Pilot listing rejected: {}", e);
    error_response(actix_web::http::StatusCode::BAD_GATEWAY, "invalid_listing", e.to_string())
}

/// Fetch and parse the listing for a query endpoint
async fn load_documents(state: &AppState) -> Result<Vec<PilotDocument>, HttpResponse> {
    let listing = state
        .source
        .fetch_listing()
        .await
        .map_err(|e| source_failure(state, e))?;

    parse_listing(&listing).map_err(invalid_listing)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = match state.source.fetch_listing().await {
        Ok(_) => "healthy",
        Err(e) => {
            tracing::warn!("Health check could not read pilot listing: {}", e);
            "degraded"
        }
    };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        source: state.source.describe(),
        timestamp: chrono::Utc::now(),
    })
}

/// Full pilot listing
///
/// GET /api/pilots
async fn list_pilots(state: web::Data<AppState>) -> impl Responder {
    let listing = match state.source.fetch_listing().await {
        Ok(listing) => listing,
        Err(e) => return source_failure(&state, e),
    };

    match listing_items(&listing) {
        Ok(items) => {
            tracing::debug!("Returning {} pilots", items.len());
            HttpResponse::Ok().json(items)
        }
        Err(e) => invalid_listing(e),
    }
}

/// Top pilots near a query point, ranked by experience then distance
///
/// GET /api/pilots/top-matches?lat=51.5&lon=-0.1&radiusKm=1000&limit=10
async fn top_matches(
    state: web::Data<AppState>,
    req: web::Query<TopMatchesRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for top_matches request: {:?}", errors);
        return error_response(
            actix_web::http::StatusCode::BAD_REQUEST,
            "validation_failed",
            errors.to_string(),
        );
    }

    let defaults = state.engine.defaults();
    let query = match Coordinate::new(
        req.lat.unwrap_or(defaults.query.latitude()),
        req.lon.unwrap_or(defaults.query.longitude()),
    ) {
        Ok(query) => query,
        Err(e) => {
            return error_response(actix_web::http::StatusCode::BAD_REQUEST, "invalid_coordinate", e.to_string())
        }
    };
    let radius_km = req.radius_km.unwrap_or(defaults.match_radius_km);
    // Cap limit to keep responses bounded
    let limit = req.limit.unwrap_or(defaults.limit).min(state.max_limit);

    let documents = match load_documents(&state).await {
        Ok(documents) => documents,
        Err(response) => return response,
    };

    let outcome = find_top_matches(&documents, query, radius_km, limit);

    tracing::info!(
        "Returning {} top matches within {} km of ({}, {}) from {} pilots",
        outcome.records.len(),
        radius_km,
        query.latitude(),
        query.longitude(),
        outcome.scanned
    );

    HttpResponse::Ok().json(TopMatchesResponse {
        matches: outcome.records,
        query,
        radius_km,
        skipped: outcome.skipped,
        scanned: outcome.scanned,
    })
}

/// Pilots within range of the fixed reference point
///
/// GET /api/pilots/in-range?radiusKm=300
async fn in_range(
    state: web::Data<AppState>,
    req: web::Query<InRangeRequest>,
) -> impl Responder {
    let reference = state.engine.reference();
    let radius_km = req.radius_km.unwrap_or(state.engine.defaults().filter_radius_km);

    let documents = match load_documents(&state).await {
        Ok(documents) => documents,
        Err(response) => return response,
    };

    let outcome = filter_by_range(&documents, reference, radius_km);

    tracing::info!(
        "Returning {} pilots within {} km of the reference point from {} pilots",
        outcome.records.len(),
        radius_km,
        outcome.scanned
    );

    HttpResponse::Ok().json(InRangeResponse {
        pilots: outcome.records,
        reference,
        radius_km,
        skipped: outcome.skipped,
        scanned: outcome.scanned,
    })
}
