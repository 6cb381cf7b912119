//! API route handlers.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::dataset::{
    self, DatasetError, DatasetHandle, FastestLapResult, RaceEntrants, SeasonSchedule, TableStore,
};
use crate::types::{DatasetInfoResponse, ErrorResponse, HealthResponse};

/// Application state shared across handlers.
pub struct AppState {
    pub dataset: DatasetHandle,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    message: String,
}

impl ApiError {
    pub fn internal(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal",
            message: msg.into(),
        }
    }
}

impl From<DatasetError> for ApiError {
    fn from(err: DatasetError) -> Self {
        let status = match err {
            DatasetError::DatasetUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            DatasetError::RaceNotFound { .. }
            | DatasetError::SeasonNotFound { .. }
            | DatasetError::NoLapData { .. } => StatusCode::NOT_FOUND,
            DatasetError::DriverNotFound { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            kind: self.kind.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Build the router with tracing and CORS layers.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/dataset/info", get(dataset_info))
        .route("/dataset/seasons/{year}/schedule", get(schedule))
        .route("/dataset/races/{year}/{round}/fastest-lap", get(fastest_lap))
        .route("/dataset/races/{year}/{round}/entrants", get(entrants))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Run a dataset query on the blocking pool.
///
/// Per-request handles read the CSV files here, so even preloaded queries
/// take the same path to keep the executor free of file I/O.
async fn run_query<T, F>(state: &AppState, query: F) -> Result<T, ApiError>
where
    F: FnOnce(&TableStore) -> Result<T, DatasetError> + Send + 'static,
    T: Send + 'static,
{
    let handle = state.dataset.clone();
    tokio::task::spawn_blocking(move || {
        let store = handle.tables()?;
        query(&store)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Query task failed: {}", e)))?
    .map_err(|e| {
        tracing::debug!(kind = e.kind(), "Dataset query failed: {}", e);
        ApiError::from(e)
    })
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Dataset info endpoint.
pub async fn dataset_info(
    State(state): State<Arc<AppState>>,
) -> Result<Json<DatasetInfoResponse>, ApiError> {
    let (races, laps, drivers) = run_query(&state, |store| {
        Ok((store.race_count(), store.lap_count(), store.driver_count()))
    })
    .await?;

    Ok(Json(DatasetInfoResponse {
        mode: state.dataset.mode().to_string(),
        sources: state.dataset.sources().clone(),
        races,
        laps,
        drivers,
    }))
}

/// Season schedule endpoint.
pub async fn schedule(
    State(state): State<Arc<AppState>>,
    Path(year): Path<i32>,
) -> Result<Json<SeasonSchedule>, ApiError> {
    let schedule = run_query(&state, move |store| dataset::schedule(store, year)).await?;
    Ok(Json(schedule))
}

/// Fastest lap endpoint.
pub async fn fastest_lap(
    State(state): State<Arc<AppState>>,
    Path((year, round)): Path<(i32, i32)>,
) -> Result<Json<FastestLapResult>, ApiError> {
    let result = run_query(&state, move |store| dataset::fastest_lap(store, year, round)).await?;
    Ok(Json(result))
}

/// Race entrants endpoint.
pub async fn entrants(
    State(state): State<Arc<AppState>>,
    Path((year, round)): Path<(i32, i32)>,
) -> Result<Json<RaceEntrants>, ApiError> {
    let field = run_query(&state, move |store| dataset::entrants(store, year, round)).await?;
    Ok(Json(field))
}
