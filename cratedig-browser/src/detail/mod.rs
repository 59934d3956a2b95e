//! Detail content resolver
//!
//! Looks an album up on an external summary source and extracts an intro
//! paragraph and a track listing. Every failure along the way is logged and
//! downgraded to "no content"; nothing propagates to the caller.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

pub mod extract;
pub mod wikipedia;

pub use wikipedia::WikipediaClient;

/// Extracted detail content; fields are HTML fragments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DetailContent {
    pub intro: Option<String>,
    pub tracklist: Option<String>,
}

impl DetailContent {
    pub fn is_empty(&self) -> bool {
        self.intro.is_none() && self.tracklist.is_none()
    }
}

/// External source of page summaries
#[async_trait]
pub trait SummarySource: Send + Sync {
    /// Best-matching page title for a free-text query, if any
    async fn search(&self, text: &str) -> anyhow::Result<Option<String>>;

    /// Rendered body HTML for a page title
    async fn render(&self, page_title: &str) -> anyhow::Result<String>;
}

/// Resolves album detail content through a [`SummarySource`]
#[derive(Clone)]
pub struct DetailResolver {
    source: Arc<dyn SummarySource>,
    site_url: String,
}

impl DetailResolver {
    /// `site_url` is used to absolutize root-relative links in extracted content
    pub fn new(source: Arc<dyn SummarySource>, site_url: impl Into<String>) -> Self {
        Self {
            source,
            site_url: site_url.into(),
        }
    }

    /// Look up `"<title> <artist>"` and extract its content
    ///
    /// The two round trips are sequential: the page title found by the search
    /// selects the page that gets rendered. Returns `None` when there is no
    /// match, a round trip fails, or neither an intro nor a track listing
    /// could be located.
    pub async fn resolve(&self, title: &str, artist: &str) -> Option<DetailContent> {
        let query = format!("{} {}", title, artist);

        let page_title = match self.source.search(&query).await {
            Ok(Some(page_title)) => page_title,
            Ok(None) => {
                debug!(query = %query, "No summary page found");
                return None;
            }
            Err(e) => {
                warn!(query = %query, "Summary search failed: {:#}", e);
                return None;
            }
        };

        let html = match self.source.render(&page_title).await {
            Ok(html) => html,
            Err(e) => {
                warn!(page = %page_title, "Summary page fetch failed: {:#}", e);
                return None;
            }
        };

        match extract::extract(&html, &self.site_url) {
            Ok(content) if content.is_empty() => {
                debug!(page = %page_title, "No intro or track listing found");
                None
            }
            Ok(content) => {
                debug!(
                    page = %page_title,
                    intro = content.intro.is_some(),
                    tracklist = content.tracklist.is_some(),
                    "Resolved detail content"
                );
                Some(content)
            }
            Err(e) => {
                warn!(page = %page_title, "Content extraction failed: {}", e);
                None
            }
        }
    }
}
