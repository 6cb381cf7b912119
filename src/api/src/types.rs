//! Response types for the F1 API.

use serde::Serialize;

use crate::dataset::TableSources;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Dataset info response
#[derive(Debug, Serialize)]
pub struct DatasetInfoResponse {
    pub mode: String,
    pub sources: TableSources,
    pub races: usize,
    pub laps: usize,
    pub drivers: usize,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
    pub message: String,
}
