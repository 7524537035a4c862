use crate::core::classifier::classify;
use crate::core::scoring::{hybrid_score, DEFAULT_SUITABILITY};
use crate::models::{DiscoveryQuery, Enhancement, PlaceCandidate, RankedResult, ScoringWeights};
use crate::services::{Enhancer, PlaceSearch};
use std::collections::HashMap;
use std::sync::Arc;

/// Vendor discovery orchestrator
///
/// # Pipeline stages
/// 1. Candidate search (fails open to an empty list)
/// 2. Batched enhancement (fails closed into fallback classification)
/// 3. Merge, per-candidate gap-fill, hybrid scoring
/// 4. Stable ranking by hybrid score descending
///
/// Every external failure is absorbed exactly once per stage; the pipeline
/// always terminates in a ranked (possibly degraded) result. Input
/// validation happens earlier, in `DiscoveryQuery::build`.
#[derive(Clone)]
pub struct DiscoveryPipeline {
    search: Arc<dyn PlaceSearch>,
    enhancer: Arc<dyn Enhancer>,
    weights: ScoringWeights,
}

impl DiscoveryPipeline {
    pub fn new(
        search: Arc<dyn PlaceSearch>,
        enhancer: Arc<dyn Enhancer>,
        weights: ScoringWeights,
    ) -> Self {
        Self {
            search,
            enhancer,
            weights,
        }
    }

    /// Run the full discovery pipeline for one validated query
    ///
    /// Returns one `RankedResult` per search candidate, ordered by hybrid
    /// score descending. An empty list means the search stage produced no
    /// candidates; it is a valid outcome, not an error.
    pub async fn discover(&self, query: &DiscoveryQuery) -> Vec<RankedResult> {
        let candidates = match self.search.search(&query.text).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::warn!("Place search unavailable, treating as no matches: {}", e);
                Vec::new()
            }
        };

        if candidates.is_empty() {
            tracing::debug!("No candidates for query \"{}\"", query.text);
            return Vec::new();
        }

        let enhancements = match self
            .enhancer
            .enhance(&candidates, &query.text, query.context.as_ref())
            .await
        {
            Ok(enhancements) => enhancements,
            Err(e) => {
                tracing::warn!(
                    "Enhancement failed for {} candidates, using fallback classification: {}",
                    candidates.len(),
                    e
                );
                fallback_enhancements(&candidates)
            }
        };

        let mut by_id: HashMap<String, Enhancement> = enhancements
            .into_iter()
            .map(|e| (e.candidate_id.clone(), e))
            .collect();

        let mut results: Vec<RankedResult> = candidates
            .into_iter()
            .map(|candidate| {
                let enhancement = by_id.remove(&candidate.id);
                self.merge_and_score(candidate, enhancement, query)
            })
            .collect();

        rank(&mut results);

        results
    }

    /// Merge one candidate with its (possibly absent) enhancement and score it
    ///
    /// Gap-fill is per field: a missing category falls back to tag
    /// classification, a missing description is synthesized, a missing
    /// suitability stays absent so the scorer applies its documented default.
    fn merge_and_score(
        &self,
        candidate: PlaceCandidate,
        enhancement: Option<Enhancement>,
        query: &DiscoveryQuery,
    ) -> RankedResult {
        let (category, suitability, description) = match enhancement {
            Some(e) => (
                e.category.unwrap_or_else(|| classify(&candidate.tags)),
                e.suitability_score,
                e.description
                    .unwrap_or_else(|| describe_fallback(&candidate)),
            ),
            None => (classify(&candidate.tags), None, describe_fallback(&candidate)),
        };

        let score = hybrid_score(
            &candidate,
            category,
            suitability,
            &query.text,
            query.context.as_ref(),
            &self.weights,
        );

        RankedResult {
            candidate,
            category,
            suitability_score: suitability.unwrap_or(DEFAULT_SUITABILITY),
            description,
            hybrid_score: score,
        }
    }
}

/// Deterministic enhancements for a whole batch when the provider fails
pub fn fallback_enhancements(candidates: &[PlaceCandidate]) -> Vec<Enhancement> {
    candidates
        .iter()
        .map(|c| Enhancement {
            candidate_id: c.id.clone(),
            category: Some(classify(&c.tags)),
            suitability_score: None,
            description: Some(describe_fallback(c)),
        })
        .collect()
}

/// Generic description synthesized from name and address
fn describe_fallback(candidate: &PlaceCandidate) -> String {
    match &candidate.address {
        Some(address) => format!("{}, located at {}", candidate.name, address),
        None => candidate.name.clone(),
    }
}

/// Stable sort by hybrid score descending
///
/// Ties keep provider order; that is the tie-break policy.
pub fn rank(results: &mut [RankedResult]) {
    results.sort_by(|a, b| {
        b.hybrid_score
            .partial_cmp(&a.hybrid_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
