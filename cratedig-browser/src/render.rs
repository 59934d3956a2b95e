//! View models and renderers
//!
//! The router hands a [`View`] to a [`Renderer`]; renderers only consume
//! view models and never reach back into catalog or routing state.

use serde::Serialize;
use std::io::Write;
use tracing::warn;

use crate::catalog::Record;
use crate::detail::extract::html_to_text;
use crate::detail::DetailContent;
use crate::filter::filter;
use crate::pagination::{
    clamp_page, page_controls, paginate, total_pages, PageButton, PageControls, PAGE_SIZE,
};

pub const NO_RESULTS: &str = "No results found";
pub const NO_DESCRIPTION: &str = "No description found.";
pub const NO_TRACKLIST: &str = "No tracklist found.";
pub const LOADING: &str = "Loading details...";

/// `"{n} result(s) found"`
pub fn result_count_label(count: usize) -> String {
    format!("{} result(s) found", count)
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub query: String,
    pub total_results: usize,
    pub records: Vec<Record>,
    pub controls: PageControls,
}

/// Detail content lifecycle for the detail view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetailState {
    Loading,
    Loaded(DetailContent),
    NotFound,
}

impl ListView {
    /// Filter `records` by `query` and take page `page` (clamped)
    pub fn build(records: &[Record], query: &str, page: usize) -> Self {
        let results = filter(records, query);
        let page = clamp_page(page, total_pages(results.len(), PAGE_SIZE));
        let page = paginate(&results, page, PAGE_SIZE);

        Self {
            query: query.to_string(),
            total_results: results.len(),
            records: page.items.iter().map(|r| (*r).clone()).collect(),
            controls: page_controls(page.current_page, page.total_pages),
        }
    }
}

/// A single record with its (possibly pending) detail content
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailsView {
    pub record: Record,
    pub content: DetailState,
}

impl DetailsView {
    /// Intro HTML, if resolved
    pub fn intro(&self) -> Option<&str> {
        match &self.content {
            DetailState::Loaded(c) => c.intro.as_deref(),
            _ => None,
        }
    }

    /// Track listing HTML, if resolved
    pub fn tracklist(&self) -> Option<&str> {
        match &self.content {
            DetailState::Loaded(c) => c.tracklist.as_deref(),
            _ => None,
        }
    }
}

/// Top-level view handed to a renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum View {
    List(ListView),
    Details(DetailsView),
}

/// Draws views; implementations own their output surface
pub trait Renderer {
    fn render(&mut self, view: &View);
}

/// Plain-text renderer for terminals
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    fn write_list(&mut self, list: &ListView) -> std::io::Result<()> {
        let out = &mut self.out;
        if list.query.trim().is_empty() {
            writeln!(out, "All records")?;
        } else {
            writeln!(out, "Search: {}", list.query.trim())?;
        }
        writeln!(out)?;

        if list.records.is_empty() {
            writeln!(out, "  {}", NO_RESULTS)?;
        }
        for (i, record) in list.records.iter().enumerate() {
            writeln!(
                out,
                "  {:>2}. {} - {}  [{}]",
                i + 1,
                record.title,
                record.artist,
                record.slug
            )?;
        }
        writeln!(out)?;

        writeln!(out, "{}", pager_line(&list.controls))?;
        writeln!(out, "{}", result_count_label(list.total_results))?;
        Ok(())
    }

    fn write_details(&mut self, details: &DetailsView) -> std::io::Result<()> {
        let out = &mut self.out;
        let record = &details.record;
        writeln!(out, "== {} ==", record.title)?;
        writeln!(out, "by {}", record.artist)?;
        if !record.image.is_empty() {
            writeln!(out, "Cover: {}", record.image)?;
        }
        writeln!(out)?;

        if details.content == DetailState::Loading {
            writeln!(out, "{}", LOADING)?;
            return Ok(());
        }

        let intro = details
            .intro()
            .map(html_to_text)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string());
        writeln!(out, "{}", intro)?;
        writeln!(out)?;
        writeln!(out, "Track listing:")?;
        let tracklist = details
            .tracklist()
            .map(html_to_text)
            .unwrap_or_else(|| NO_TRACKLIST.to_string());
        writeln!(out, "{}", tracklist)?;
        Ok(())
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, view: &View) {
        let result = match view {
            View::List(list) => self.write_list(list),
            View::Details(details) => self.write_details(details),
        };
        if let Err(e) = result.and_then(|_| writeln!(self.out).and_then(|_| self.out.flush())) {
            warn!("Failed to write view: {}", e);
        }
    }
}

/// `« prev | 1 … 4 [5] 6 … 10 | next »`, disabled controls in parentheses
fn pager_line(controls: &PageControls) -> String {
    let pages: Vec<String> = controls
        .buttons
        .iter()
        .map(|b| match b {
            PageButton::Page { number, current: true } => format!("[{}]", number),
            PageButton::Page { number, .. } => number.to_string(),
            PageButton::Ellipsis => "…".to_string(),
        })
        .collect();

    let prev = if controls.previous_enabled { "« prev" } else { "(« prev)" };
    let next = if controls.next_enabled { "next »" } else { "(next »)" };
    format!("{} | {} | {}", prev, pages.join(" "), next)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render_to_string(view: &View) -> String {
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(view);
        String::from_utf8(renderer.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_list_shows_fallback_and_count() {
        let view = View::List(ListView {
            query: "beatles".into(),
            total_results: 0,
            records: vec![],
            controls: page_controls(1, 1),
        });

        let text = render_to_string(&view);
        assert!(text.contains(NO_RESULTS));
        assert!(text.contains("0 result(s) found"));
        assert!(text.contains("(« prev) | [1] | (next »)"));
    }

    #[test]
    fn test_list_lines() {
        let view = View::List(ListView {
            query: String::new(),
            total_results: 25,
            records: vec![Record::new("Queen", "Jazz", "j.jpg")],
            controls: page_controls(2, 3),
        });

        let text = render_to_string(&view);
        assert!(text.starts_with("All records"));
        assert!(text.contains(" 1. Jazz - Queen  [queen-jazz]"));
        assert!(text.contains("« prev | 1 [2] 3 | next »"));
        assert!(text.contains("25 result(s) found"));
    }

    #[test]
    fn test_details_not_found_shows_both_fallbacks() {
        let view = View::Details(DetailsView {
            record: Record::new("Queen", "Jazz", "j.jpg"),
            content: DetailState::NotFound,
        });

        let text = render_to_string(&view);
        assert!(text.contains("== Jazz =="));
        assert!(text.contains(NO_DESCRIPTION));
        assert!(text.contains(NO_TRACKLIST));
    }

    #[test]
    fn test_details_loaded_strips_markup() {
        let view = View::Details(DetailsView {
            record: Record::new("Queen", "Jazz", ""),
            content: DetailState::Loaded(DetailContent {
                intro: Some("<p><b>Jazz</b> is the seventh album.</p>".into()),
                tracklist: None,
            }),
        });

        let text = render_to_string(&view);
        assert!(text.contains("Jazz is the seventh album."));
        assert!(text.contains(NO_TRACKLIST));
        assert!(!text.contains("Cover:"));
    }

    #[test]
    fn test_list_view_build_clamps_page() {
        let records: Vec<Record> = (0..25)
            .map(|i| Record::new("Artist", format!("Album {i:02}"), ""))
            .collect();

        let view = ListView::build(&records, "album", 7);
        assert_eq!(view.total_results, 25);
        assert_eq!(view.controls.current_page, 3);
        assert_eq!(view.records.len(), 5);
        assert_eq!(view.records[0].title, "Album 20");
    }

    #[test]
    fn test_view_json_shape() {
        let view = View::Details(DetailsView {
            record: Record::new("Queen", "Jazz", "j.jpg"),
            content: DetailState::Loading,
        });
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["view"], "details");
        assert_eq!(json["record"]["slug"], "queen-jazz");
        assert_eq!(json["content"]["status"], "loading");
    }
}
