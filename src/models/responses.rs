use serde::{Deserialize, Serialize};
use crate::models::domain::RankedResult;

/// Response for the vendor discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverVendorsResponse {
    pub results: Vec<RankedResult>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
