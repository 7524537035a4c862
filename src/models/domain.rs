use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a discovery query from raw input
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("query must be a non-empty string")]
    EmptyQuery,
}

/// Structured event metadata supplied alongside the free-text query
///
/// All fields are optional; empty or whitespace-only values are dropped
/// during query building so downstream code only ever sees meaningful data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventContext {
    #[serde(rename = "attendeeCount", default)]
    pub attendee_count: Option<String>,
    #[serde(rename = "eventType", default)]
    pub event_type: Option<String>,
    #[serde(rename = "specialRequirements", default)]
    pub special_requirements: Option<String>,
}

impl EventContext {
    /// Drop empty/whitespace fields; returns None if nothing survives
    pub fn normalized(self) -> Option<Self> {
        let clean = |field: Option<String>| {
            field
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let normalized = Self {
            attendee_count: clean(self.attendee_count),
            event_type: clean(self.event_type),
            special_requirements: clean(self.special_requirements),
        };

        if normalized.attendee_count.is_none()
            && normalized.event_type.is_none()
            && normalized.special_requirements.is_none()
        {
            None
        } else {
            Some(normalized)
        }
    }

    /// Attendee count as an integer, if it parses as one
    pub fn attendees(&self) -> Option<i64> {
        self.attendee_count
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
    }
}

/// A validated discovery request, immutable for the lifetime of one request
#[derive(Debug, Clone)]
pub struct DiscoveryQuery {
    pub text: String,
    pub context: Option<EventContext>,
}

impl DiscoveryQuery {
    /// Build a query from raw input, rejecting empty query text and
    /// stripping empty context fields
    pub fn build(text: &str, context: Option<EventContext>) -> Result<Self, QueryError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        Ok(Self {
            text: text.to_string(),
            context: context.and_then(EventContext::normalized),
        })
    }
}

/// Raw business returned by the place-search provider
///
/// Identity is the provider's `id`; it is the join key used to merge
/// enhancement results back onto candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceCandidate {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "priceLevel", default)]
    pub price_level: Option<u8>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(rename = "ratingCount", default)]
    pub rating_count: Option<u32>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "photoRefs", default)]
    pub photo_refs: Vec<String>,
}

/// Closed set of vendor categories every candidate resolves to before scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VendorCategory {
    Venue,
    Catering,
    Entertainment,
    Staffing,
    Equipment,
    Transportation,
    Other,
}

impl VendorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Catering => "catering",
            Self::Entertainment => "entertainment",
            Self::Staffing => "staffing",
            Self::Equipment => "equipment",
            Self::Transportation => "transportation",
            Self::Other => "other",
        }
    }

    /// Lenient parse used on model output; unknown labels yield None so the
    /// fallback classifier can fill the gap
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "venue" => Some(Self::Venue),
            "catering" => Some(Self::Catering),
            "entertainment" => Some(Self::Entertainment),
            "staffing" => Some(Self::Staffing),
            "equipment" => Some(Self::Equipment),
            "transportation" => Some(Self::Transportation),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

impl std::fmt::Display for VendorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-candidate enrichment produced by the enhancement provider or
/// synthesized by the fallback classifier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enhancement {
    #[serde(rename = "candidateId")]
    pub candidate_id: String,
    #[serde(default)]
    pub category: Option<VendorCategory>,
    #[serde(rename = "suitabilityScore", default)]
    pub suitability_score: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Final output item: candidate merged with its enrichment and the
/// computed hybrid relevance score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    #[serde(flatten)]
    pub candidate: PlaceCandidate,
    pub category: VendorCategory,
    #[serde(rename = "suitabilityScore")]
    pub suitability_score: f64,
    pub description: String,
    #[serde(rename = "hybridScore")]
    pub hybrid_score: f64,
}

/// Weights for the three normalized sub-scores of the hybrid scorer
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub model: f64,
    pub keyword: f64,
    pub rating: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            model: 0.5,
            keyword: 0.3,
            rating: 0.2,
        }
    }
}
