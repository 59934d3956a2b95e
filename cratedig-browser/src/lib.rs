//! cratedig-browser library - record catalog browser
//!
//! Loads a static artist/album catalog, filters and paginates it, routes
//! between the list and detail views, and resolves album details from an
//! encyclopedia API. Served over HTTP (`serve`) or in a terminal (`browse`).

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod browse;
pub mod catalog;
pub mod detail;
pub mod filter;
pub mod logging;
pub mod pagination;
pub mod render;
pub mod router;

use catalog::Catalog;
use detail::DetailResolver;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Immutable session catalog
    pub catalog: Arc<Catalog>,
    /// Album detail lookups
    pub resolver: DetailResolver,
}

impl AppState {
    /// Create new application state
    pub fn new(catalog: Arc<Catalog>, resolver: DetailResolver) -> Self {
        Self { catalog, resolver }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/api/records", get(api::list_records))
        .route("/api/records/:slug", get(api::get_record))
        .route("/api/records/:slug/details", get(api::get_record_details))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
