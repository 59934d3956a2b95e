//! Shared test utilities
//!
//! Fixture catalog loading and a canned summary source standing in for the
//! encyclopedia API.

#![allow(dead_code)]

use async_trait::async_trait;
use cratedig_browser::catalog::Catalog;
use cratedig_browser::detail::{DetailResolver, SummarySource};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const SITE_URL: &str = "https://en.wikipedia.org";

/// Fixture catalog (5 records, 3 artists)
pub async fn fixture_catalog() -> Arc<Catalog> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/records.json");
    Arc::new(
        Catalog::load(&path)
            .await
            .expect("Should load fixture catalog"),
    )
}

/// Rendered page for "A Night at the Opera"
pub const OPERA_PAGE: &str = r##"<div class="mw-parser-output">
<div class="shortdescription">1975 studio album by Queen</div>
<p class="mw-empty-elt"></p>
<p><i><b>A Night at the Opera</b></i> is the fourth studio album by the British rock band
<a href="/wiki/Queen_(band)" title="Queen (band)">Queen</a>.<sup class="reference"><a href="#cite_note-1">[1]</a></sup></p>
<div class="mw-heading mw-heading2"><h2 id="Track_listing">Track listing</h2><span class="mw-editsection">[edit]</span></div>
<ol><li>"Death on Two Legs"</li><li>"Bohemian Rhapsody"</li></ol>
<div class="mw-heading mw-heading2"><h2 id="Personnel">Personnel</h2></div>
<ul><li>Freddie Mercury</li></ul>
</div>"##;

/// Canned summary source: search query -> page title -> page HTML
#[derive(Default)]
pub struct StubSource {
    pub titles: HashMap<String, String>,
    pub pages: HashMap<String, String>,
    pub calls: Mutex<Vec<String>>,
}

impl StubSource {
    pub fn with_page(mut self, query: &str, title: &str, html: &str) -> Self {
        self.titles.insert(query.to_string(), title.to_string());
        self.pages.insert(title.to_string(), html.to_string());
        self
    }
}

#[async_trait]
impl SummarySource for StubSource {
    async fn search(&self, text: &str) -> anyhow::Result<Option<String>> {
        self.calls.lock().unwrap().push(format!("search:{text}"));
        Ok(self.titles.get(text).cloned())
    }

    async fn render(&self, page_title: &str) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(format!("render:{page_title}"));
        self.pages
            .get(page_title)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("no such page: {page_title}"))
    }
}

/// Resolver knowing only "A Night at the Opera Queen"
pub fn opera_resolver() -> DetailResolver {
    let source = StubSource::default().with_page(
        "A Night at the Opera Queen",
        "A Night at the Opera",
        OPERA_PAGE,
    );
    DetailResolver::new(Arc::new(source), SITE_URL)
}
