//! Festa Discovery - vendor discovery and ranking service for the Festa
//! event planning app
//!
//! This library answers a natural-language vendor query by retrieving
//! candidates from a place-search provider, enriching them with a
//! language-model suitability assessment, and producing one ranked list
//! through a deterministic hybrid scoring function. Provider failures
//! degrade the result instead of failing the request.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{classify, hybrid_score, DiscoveryPipeline, DEFAULT_SUITABILITY};
pub use models::{
    DiscoverVendorsRequest, DiscoverVendorsResponse, DiscoveryQuery, Enhancement, EventContext,
    PlaceCandidate, RankedResult, ScoringWeights, VendorCategory,
};
