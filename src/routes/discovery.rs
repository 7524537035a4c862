use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::DiscoveryPipeline;
use crate::models::{
    DiscoverVendorsRequest, DiscoverVendorsResponse, DiscoveryQuery, ErrorResponse, HealthResponse,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: DiscoveryPipeline,
}

/// Configure all discovery-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/vendors/discover", web::post().to(discover_vendors));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Vendor discovery endpoint
///
/// POST /api/v1/vendors/discover
///
/// Request body:
/// ```json
/// {
///   "query": "outdoor wedding venue near downtown",
///   "context": {
///     "attendeeCount": "50",
///     "eventType": "wedding",
///     "specialRequirements": "wheelchair accessible"
///   }
/// }
/// ```
///
/// Only invalid input is an error; provider outages degrade into an empty
/// or fallback-classified result with a 200 status.
async fn discover_vendors(
    state: web::Data<AppState>,
    req: web::Json<DiscoverVendorsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for discover request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let query = match DiscoveryQuery::build(&req.query, req.context.clone()) {
        Ok(query) => query,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Invalid query".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!("Discovering vendors for query: \"{}\"", query.text);

    let results = state.pipeline.discover(&query).await;

    tracing::info!(
        "Returning {} ranked vendors for \"{}\"",
        results.len(),
        query.text
    );

    let response = DiscoverVendorsResponse {
        total_results: results.len(),
        results,
    };

    HttpResponse::Ok().json(response)
}
