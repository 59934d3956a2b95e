//! Record listing, lookup and detail endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::catalog::Record;
use crate::pagination::{PageControls, PAGE_SIZE};
use crate::render::{result_count_label, ListView, NO_DESCRIPTION, NO_TRACKLIST};
use crate::AppState;

/// Query parameters for the record list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Free-text search (empty matches everything)
    #[serde(default)]
    pub q: String,

    /// Page number (1-indexed)
    #[serde(default = "default_page")]
    pub page: usize,
}

fn default_page() -> usize {
    1
}

/// List response with results and metadata
#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub query: String,
    pub total_results: usize,
    /// `"{n} result(s) found"`
    pub result_label: String,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub controls: PageControls,
    pub records: Vec<Record>,
}

/// Detail response; fallback copy is substituted for missing content
#[derive(Debug, Serialize)]
pub struct DetailsResponse {
    pub record: Record,
    /// Whether any content was found on the summary source
    pub found: bool,
    pub intro: String,
    pub tracklist: String,
}

/// GET /api/records?q=queen&page=2
///
/// Filtered, paginated record list. Out-of-range pages are clamped.
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ListResponse> {
    let view = ListView::build(state.catalog.records(), &query.q, query.page);

    Json(ListResponse {
        query: view.query,
        total_results: view.total_results,
        result_label: result_count_label(view.total_results),
        page: view.controls.current_page,
        page_size: PAGE_SIZE,
        total_pages: view.controls.total_pages,
        controls: view.controls,
        records: view.records,
    })
}

/// GET /api/records/:slug
pub async fn get_record(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Record>, ApiError> {
    state
        .catalog
        .find(&slug)
        .cloned()
        .map(Json)
        .ok_or(ApiError::UnknownRecord(slug))
}

/// GET /api/records/:slug/details
///
/// Resolves intro and track listing from the summary source. Lookup
/// failures are not errors: the response carries fallback copy instead.
pub async fn get_record_details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<DetailsResponse>, ApiError> {
    let record = state
        .catalog
        .find(&slug)
        .cloned()
        .ok_or(ApiError::UnknownRecord(slug))?;

    let content = state.resolver.resolve(&record.title, &record.artist).await;
    let found = content.is_some();
    let content = content.unwrap_or_default();

    Ok(Json(DetailsResponse {
        record,
        found,
        intro: content.intro.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        tracklist: content.tracklist.unwrap_or_else(|| NO_TRACKLIST.to_string()),
    }))
}

/// API errors
#[derive(Debug)]
pub enum ApiError {
    UnknownRecord(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::UnknownRecord(slug) => {
                (StatusCode::NOT_FOUND, format!("Unknown record: {}", slug))
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
