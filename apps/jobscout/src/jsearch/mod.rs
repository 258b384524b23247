//! JSearch client: fetches pages of raw job records from the RapidAPI job-search API.
//!
//! Handlers never talk to the upstream API directly; they go through the `JobSource`
//! trait carried in `AppState`, which `JSearchClient` implements.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;
use crate::jobs::record::RawJobRecord;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum JSearchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Search failed after {retries} retries")]
    RetriesExhausted { retries: u32 },
}

/// One search request as the search form submits it.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub query: String,
    pub location: String,
    pub job_type: String,
    pub page: u32,
}

impl SearchQuery {
    /// The upstream API takes a single free-text query: "<query> <location> <job type>".
    pub fn combined_query(&self) -> String {
        [&self.query, &self.location, &self.job_type]
            .iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// One page of results. Records are kept exactly as received.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchPage {
    pub jobs: Vec<RawJobRecord>,
    pub total_pages: u32,
}

impl SearchPage {
    /// What a failed fetch looks like to the rest of the app.
    pub fn empty() -> Self {
        Self {
            jobs: Vec::new(),
            total_pages: 1,
        }
    }
}

/// Source of raw job pages. Swappable so handlers can be driven without the network.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, JSearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Option<Vec<Value>>,
    #[serde(default)]
    metadata: Option<SearchMetadata>,
}

#[derive(Debug, Deserialize)]
struct SearchMetadata {
    #[serde(default)]
    total_pages: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// RapidAPI JSearch client with retry on rate limits and server errors.
#[derive(Clone)]
pub struct JSearchClient {
    client: Client,
    api_key: String,
    base_url: String,
    host: String,
    num_pages: u32,
}

impl JSearchClient {
    pub fn new(config: &Config) -> Result<Self, JSearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(config.http_timeout_secs))
                .build()?,
            api_key: config.rapidapi_key.clone(),
            base_url: config.jsearch_base_url.trim_end_matches('/').to_string(),
            host: config.jsearch_host.clone(),
            num_pages: config.jsearch_num_pages,
        })
    }

    /// Fetches one page. Retries on 429, 5xx and transport errors with exponential backoff.
    async fn fetch_page(&self, query: &SearchQuery) -> Result<SearchPage, JSearchError> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("query", query.combined_query()),
            ("page", query.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
        ];

        let mut last_error: Option<JSearchError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Job search attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .get(&url)
                .header("X-RapidAPI-Key", &self.api_key)
                .header("X-RapidAPI-Host", &self.host)
                .query(&params)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(JSearchError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Job search API returned {}: {}", status, body);
                last_error = Some(JSearchError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
                continue;
            }

            let body = response.text().await?;

            if !status.is_success() {
                return Err(JSearchError::Api {
                    status: status.as_u16(),
                    message: api_error_message(body),
                });
            }

            let page = parse_search_page(&body)?;
            debug!(
                "Job search succeeded: page={}, jobs={}, total_pages={}",
                query.page,
                page.jobs.len(),
                page.total_pages
            );
            return Ok(page);
        }

        Err(last_error.unwrap_or(JSearchError::RetriesExhausted {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl JobSource for JSearchClient {
    async fn search(&self, query: &SearchQuery) -> Result<SearchPage, JSearchError> {
        self.fetch_page(query).await
    }
}

/// Parses a search response body. Non-object entries in `data` are dropped; a missing or
/// zero page count reads as a single page.
fn parse_search_page(body: &str) -> Result<SearchPage, JSearchError> {
    let response: SearchResponse = serde_json::from_str(body)?;
    let jobs = response
        .data
        .unwrap_or_default()
        .into_iter()
        .filter_map(RawJobRecord::from_value)
        .collect();
    let total_pages = response
        .metadata
        .and_then(|m| m.total_pages)
        .filter(|&pages| pages > 0)
        .unwrap_or(1);
    Ok(SearchPage { jobs, total_pages })
}

/// Prefers the `message` field of a JSON error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<ApiErrorBody>(&body)
        .map(|e| e.message)
        .unwrap_or(body)
}
