//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};

use crate::errors::AppError;
use crate::jobs::criteria::FilterSelection;
use crate::jobs::fields::{company_options, location_options};
use crate::jobs::filter::filter_jobs;
use crate::jobs::record::RawJobRecord;
use crate::jobs::temporal::now_unix;
use crate::jsearch::{SearchPage, SearchQuery};
use crate::state::AppState;

const DEFAULT_QUERY: &str = "developer";

/// Largest batch accepted by the filter endpoint. A search page holds a few dozen jobs.
pub const MAX_FILTER_JOBS: usize = 500;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchJobsParams {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default = "default_page")]
    pub page: u32,
    pub date_posted: Option<String>,
    pub experience: Option<String>,
    pub commitment: Option<String>,
    pub salary: Option<String>,
    pub company: Option<String>,
}

fn default_page() -> u32 {
    1
}

impl SearchJobsParams {
    fn search_query(&self) -> SearchQuery {
        let query = match self.query.trim() {
            "" => DEFAULT_QUERY.to_string(),
            q => q.to_string(),
        };
        SearchQuery {
            query,
            location: self.location.clone(),
            job_type: self.job_type.clone(),
            page: self.page,
        }
    }

    fn selection(&self) -> FilterSelection {
        FilterSelection {
            date_posted: self.date_posted.clone(),
            experience: self.experience.clone(),
            commitment: self.commitment.clone(),
            salary: self.salary.clone(),
            company: self.company.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SearchJobsResponse<'a> {
    pub page: u32,
    pub total_pages: u32,
    pub total_fetched: usize,
    pub jobs: Vec<&'a RawJobRecord>,
    pub company_options: Vec<String>,
    pub location_options: Vec<String>,
    pub active_filters: Vec<String>,
}

/// Entries of `jobs` that are not JSON objects are skipped, as on the search path.
#[derive(Debug, Deserialize)]
pub struct FilterJobsRequest {
    pub jobs: Vec<Value>,
    #[serde(default)]
    pub criteria: FilterSelection,
}

#[derive(Debug, Serialize)]
pub struct FilterJobsResponse<'a> {
    pub total: usize,
    pub matched: usize,
    pub jobs: Vec<&'a RawJobRecord>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs/search
///
/// Fetches one page from the job source and filters it. A failed fetch is logged and
/// served as an empty page, not as an error.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Query(params): Query<SearchJobsParams>,
) -> Result<Response, AppError> {
    if params.page == 0 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }

    let search = params.search_query();
    let page = match state.source.search(&search).await {
        Ok(page) => page,
        Err(e) => {
            error!("Job search for '{}' failed: {e}", search.combined_query());
            SearchPage::empty()
        }
    };

    let criteria = params.selection().to_criteria();
    let jobs = filter_jobs(&page.jobs, &criteria, now_unix());
    info!(
        "Search '{}' page {}: {} fetched, {} after filters",
        search.combined_query(),
        search.page,
        page.jobs.len(),
        jobs.len()
    );

    let response = SearchJobsResponse {
        page: search.page,
        total_pages: page.total_pages,
        total_fetched: page.jobs.len(),
        company_options: company_options(&page.jobs),
        location_options: location_options(&page.jobs),
        active_filters: criteria.active_filter_labels(),
        jobs,
    };
    Ok(Json(response).into_response())
}

/// POST /api/v1/jobs/filter
///
/// Filters caller-supplied records without fetching. Records come back unmodified and in
/// their original order; `total` counts the object entries that were considered.
pub async fn handle_filter_jobs(
    Json(request): Json<FilterJobsRequest>,
) -> Result<Response, AppError> {
    if request.jobs.len() > MAX_FILTER_JOBS {
        return Err(AppError::Validation(format!(
            "at most {MAX_FILTER_JOBS} jobs can be filtered per request, got {}",
            request.jobs.len()
        )));
    }

    let records: Vec<RawJobRecord> = request
        .jobs
        .into_iter()
        .filter_map(RawJobRecord::from_value)
        .collect();
    let criteria = request.criteria.to_criteria();
    let jobs = filter_jobs(&records, &criteria, now_unix());

    let response = FilterJobsResponse {
        total: records.len(),
        matched: jobs.len(),
        jobs,
    };
    Ok(Json(response).into_response())
}
