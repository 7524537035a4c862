use crate::models::{Enhancement, EventContext, PlaceCandidate, VendorCategory};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::fmt::Write as _;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during candidate enhancement
#[derive(Debug, Error)]
pub enum EnhanceError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Language-model enrichment of a candidate batch
///
/// One call covers the whole batch; a single attempt per request, no
/// retries. The pipeline converts any error into fallback enhancements.
#[async_trait]
pub trait Enhancer: Send + Sync {
    async fn enhance(
        &self,
        candidates: &[PlaceCandidate],
        query: &str,
        context: Option<&EventContext>,
    ) -> Result<Vec<Enhancement>, EnhanceError>;
}

/// Expected shape of the model's JSON output, after fence stripping
#[derive(Debug, Deserialize)]
struct EnhancedEnvelope {
    #[serde(rename = "enhancedResults")]
    enhanced_results: Vec<EnhancedResultDoc>,
}

#[derive(Debug, Deserialize)]
struct EnhancedResultDoc {
    #[serde(rename = "placeId")]
    place_id: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(rename = "eventSuitabilityScore", default)]
    event_suitability_score: Option<f64>,
    #[serde(default)]
    description: Option<String>,
}

/// HTTP client for a chat-completion enhancement endpoint
///
/// Any completion API that can be instructed to emit the
/// `enhancedResults` JSON shape is substitutable.
pub struct CompletionEnhancer {
    base_url: String,
    api_key: String,
    model: String,
    client: Client,
}

impl CompletionEnhancer {
    pub fn new(base_url: String, api_key: String, model: String, timeout_secs: u64) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            model,
            client,
        }
    }
}

#[async_trait]
impl Enhancer for CompletionEnhancer {
    async fn enhance(
        &self,
        candidates: &[PlaceCandidate],
        query: &str,
        context: Option<&EventContext>,
    ) -> Result<Vec<Enhancement>, EnhanceError> {
        let prompt = build_prompt(candidates, query, context);

        let url = format!(
            "{}/chat/completions",
            self.base_url.trim_end_matches('/')
        );

        tracing::debug!(
            "Enhancing {} candidates via {} ({})",
            candidates.len(),
            url,
            self.model
        );

        let payload = serde_json::json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": 0.2,
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EnhanceError::ApiError(format!(
                "Enhancement request failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let content = json
            .get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(|c| c.as_str())
            .ok_or_else(|| EnhanceError::InvalidResponse("Missing completion content".into()))?;

        parse_enhancements(content)
    }
}

/// Build the single batched enhancement prompt
///
/// Embeds the query, a context block with only the supplied fields, a
/// per-candidate data dump, the scoring rubric, and a strict
/// output-format instruction.
pub fn build_prompt(
    candidates: &[PlaceCandidate],
    query: &str,
    context: Option<&EventContext>,
) -> String {
    let mut prompt = String::new();

    writeln!(
        prompt,
        "You are assessing local businesses as vendors for an event.\n"
    )
    .ok();
    writeln!(prompt, "Search query: \"{}\"", query).ok();

    if let Some(ctx) = context {
        writeln!(prompt, "\nEvent context:").ok();
        if let Some(count) = &ctx.attendee_count {
            writeln!(prompt, "- Attendee count: {}", count).ok();
        }
        if let Some(event_type) = &ctx.event_type {
            writeln!(prompt, "- Event type: {}", event_type).ok();
        }
        if let Some(requirements) = &ctx.special_requirements {
            writeln!(prompt, "- Special requirements: {}", requirements).ok();
        }
    }

    writeln!(prompt, "\nCandidates:").ok();
    for (i, c) in candidates.iter().enumerate() {
        writeln!(prompt, "{}. id: {}", i + 1, c.id).ok();
        writeln!(prompt, "   name: {}", c.name).ok();
        if let Some(address) = &c.address {
            writeln!(prompt, "   address: {}", address).ok();
        }
        if !c.tags.is_empty() {
            writeln!(prompt, "   tags: {}", c.tags.join(", ")).ok();
        }
        if let Some(price) = c.price_level {
            writeln!(prompt, "   price level: {}/4", price).ok();
        }
        if let Some(rating) = c.rating {
            match c.rating_count {
                Some(count) => writeln!(prompt, "   rating: {} ({} reviews)", rating, count).ok(),
                None => writeln!(prompt, "   rating: {}", rating).ok(),
            };
        }
        if let Some(website) = &c.website {
            writeln!(prompt, "   website: {}", website).ok();
        }
        if let Some(phone) = &c.phone {
            writeln!(prompt, "   phone: {}", phone).ok();
        }
    }

    writeln!(
        prompt,
        "\nFor every candidate assign:\n\
         - category: exactly one of venue, catering, entertainment, staffing, equipment, transportation, other\n\
         - eventSuitabilityScore: 1-10, the sum of category fit (0-3), event-type fit (0-3), \
         capacity fit (0-1), special-requirements fit (0-1), and quality signal (0-2)\n\
         - description: one sentence on why this vendor suits the event"
    )
    .ok();
    writeln!(
        prompt,
        "\nRespond with ONLY a JSON object in this exact shape, no prose and no code fences:\n\
         {{\"enhancedResults\": [{{\"placeId\": \"...\", \"category\": \"...\", \
         \"eventSuitabilityScore\": 7, \"description\": \"...\"}}]}}"
    )
    .ok();

    prompt
}

/// Strip an optional markdown code fence (``` or ```json) around the body
pub fn strip_code_fences(text: &str) -> &str {
    let text = text.trim();

    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };

    // Drop the language hint on the opening fence line
    let rest = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest,
    };

    rest.trim_end().trim_end_matches("```").trim()
}

/// Decode the model's response text into enhancements
///
/// Strict: a body that is not JSON, or JSON without the expected envelope,
/// is an error so the caller can branch into the fallback path. Individual
/// fields stay lenient (unknown categories become None, scores are clamped
/// into 1-10).
pub fn parse_enhancements(body: &str) -> Result<Vec<Enhancement>, EnhanceError> {
    let body = strip_code_fences(body);

    let envelope: EnhancedEnvelope = serde_json::from_str(body)
        .map_err(|e| EnhanceError::InvalidResponse(format!("Failed to parse enhancements: {}", e)))?;

    let enhancements = envelope
        .enhanced_results
        .into_iter()
        .map(|doc| Enhancement {
            candidate_id: doc.place_id,
            category: doc.category.as_deref().and_then(VendorCategory::parse),
            suitability_score: doc.event_suitability_score.map(|s| s.clamp(1.0, 10.0)),
            description: doc.description,
        })
        .collect();

    Ok(enhancements)
}
