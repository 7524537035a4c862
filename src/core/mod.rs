// Core algorithm exports
pub mod classifier;
pub mod pipeline;
pub mod scoring;

pub use classifier::classify;
pub use pipeline::{fallback_enhancements, rank, DiscoveryPipeline};
pub use scoring::{hybrid_score, keyword_score, rating_score, DEFAULT_SUITABILITY, NEUTRAL_MIDPOINT};
