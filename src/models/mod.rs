// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    DiscoveryQuery, Enhancement, EventContext, PlaceCandidate, QueryError, RankedResult,
    ScoringWeights, VendorCategory,
};
pub use requests::DiscoverVendorsRequest;
pub use responses::{DiscoverVendorsResponse, ErrorResponse, HealthResponse};
