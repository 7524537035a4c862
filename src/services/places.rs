use crate::models::PlaceCandidate;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when talking to the place-search provider
#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Candidate search over an external place provider
///
/// Injected into the pipeline so tests can substitute fakes. The pipeline
/// absorbs errors into an empty candidate list; implementations just report
/// them.
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError>;
}

/// HTTP client for a text-query place-search endpoint
///
/// Any provider exposing a `results` array of candidates with a stable id,
/// name, address and tags is substitutable.
pub struct PlacesClient {
    base_url: String,
    api_key: String,
    max_results: usize,
    client: Client,
}

impl PlacesClient {
    pub fn new(base_url: String, api_key: String, max_results: usize) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            max_results,
            client,
        }
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let url = format!(
            "{}/places/search?query={}&limit={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query),
            self.max_results
        );

        tracing::debug!("Searching places: {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PlacesError::ApiError(format!(
                "Place search failed: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let results = json
            .get("results")
            .and_then(|r| r.as_array())
            .ok_or_else(|| PlacesError::InvalidResponse("Missing results array".into()))?;

        // Candidates the provider mangled are skipped, not fatal
        let mut candidates: Vec<PlaceCandidate> = results
            .iter()
            .filter_map(|doc| serde_json::from_value(doc.clone()).ok())
            .collect();

        candidates.truncate(self.max_results);

        tracing::debug!("Place search returned {} candidates", candidates.len());

        Ok(candidates)
    }
}
