//! JSON API handlers
//!
//! Each handler runs exactly one store operation and returns its result as JSON.

use axum::extract::{Path, State};
use axum::response::Json;
use clim_db::models::{DateTemperature, PrecipitationRecord, TemperatureSummary};

use crate::error::ApiResult;
use crate::state::AppState;

/// GET /api/v1.0/precipitation
pub async fn precipitation(State(state): State<AppState>) -> ApiResult<Json<Vec<PrecipitationRecord>>> {
    let rows = state.query(|db| db.query_precipitation()).await?;
    Ok(Json(rows))
}

/// GET /api/v1.0/stations
pub async fn stations(State(state): State<AppState>) -> ApiResult<Json<Vec<Option<String>>>> {
    let names = state.query(|db| db.query_station_names()).await?;
    Ok(Json(names))
}

/// GET /api/v1.0/tobs
pub async fn tobs(State(state): State<AppState>) -> ApiResult<Json<Vec<DateTemperature>>> {
    let temps = state.query(|db| db.query_most_active_temperatures()).await?;
    Ok(Json(temps))
}

/// GET /api/v1.0/:start
pub async fn summary_from(
    State(state): State<AppState>,
    Path(start): Path<String>,
) -> ApiResult<Json<TemperatureSummary>> {
    let summary = state.query(move |db| db.query_summary_from(&start)).await?;
    Ok(Json(summary))
}

/// GET /api/v1.0/:start/:end
pub async fn summary_between(
    State(state): State<AppState>,
    Path((start, end)): Path<(String, String)>,
) -> ApiResult<Json<TemperatureSummary>> {
    let summary = state
        .query(move |db| db.query_summary_between(&start, &end))
        .await?;
    Ok(Json(summary))
}
