//! Album page content extraction
//!
//! Best-effort scraping of a rendered encyclopedia page: an introduction
//! paragraph and a track listing section. Noise (edit links, citations,
//! navigation boxes) is detached from the tree before anything is read, and
//! root-relative links are rewritten to absolute ones opening in a new tab.

use scraper::{ElementRef, Html, Node, Selector};
use thiserror::Error;

use super::DetailContent;

/// Minimum trimmed text length (exclusive) for an intro paragraph
pub const MIN_INTRO_CHARS: usize = 10;

/// Heading ids accepted as the track listing section (compared case-insensitively)
pub const TRACKLIST_IDS: &[&str] = &[
    "track_listing",
    "track_list",
    "tracklist",
    "tracklisting",
    "track_listing_and_personnel",
    "songs",
];

const ROOT_SELECTORS: &[&str] = &[".mw-parser-output", "body"];

const NOISE_SELECTOR: &str = ".mw-editsection, sup.reference, .reference, .reflist, \
     .references, .mw-references-wrap, .navbox, .vertical-navbox, .hatnote, .ambox, \
     .metadata, .noprint, .mw-empty-elt, .shortdescription, #coordinates, style, script";

const VOID_ELEMENTS: &[&str] = &[
    "area", "br", "col", "hr", "img", "input", "link", "meta", "source", "wbr",
];

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid selector {0}")]
    Selector(String),

    #[error("Content root not found")]
    NoRoot,
}

fn selector(css: &str) -> Result<Selector, ExtractError> {
    Selector::parse(css).map_err(|e| ExtractError::Selector(format!("{css:?}: {e:?}")))
}

/// Extract intro and track listing from a rendered page body
///
/// `site_url` is prefixed to root-relative links (`/wiki/...`).
/// Fields that cannot be located are `None`.
pub fn extract(html: &str, site_url: &str) -> Result<DetailContent, ExtractError> {
    let mut document = Html::parse_document(html);

    let root_id = {
        let mut found = None;
        for css in ROOT_SELECTORS {
            let sel = selector(css)?;
            if let Some(el) = document.select(&sel).next() {
                found = Some(el.id());
                break;
            }
        }
        found.unwrap_or_else(|| document.root_element().id())
    };

    // Detach noise first so it can never be mistaken for content
    let noise = selector(NOISE_SELECTOR)?;
    let noise_ids: Vec<_> = document
        .tree
        .get(root_id)
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::NoRoot)?
        .select(&noise)
        .map(|el| el.id())
        .filter(|id| *id != root_id)
        .collect();
    for id in noise_ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }

    let root = document
        .tree
        .get(root_id)
        .and_then(ElementRef::wrap)
        .ok_or(ExtractError::NoRoot)?;

    let writer = HtmlWriter { site_url };
    let intro = find_intro(root).map(|p| writer.outer_html(p));
    let tracklist = find_tracklist(root)?.and_then(|section| {
        let html: String = section.into_iter().map(|el| writer.outer_html(el)).collect();
        (!html.trim().is_empty()).then_some(html)
    });

    Ok(DetailContent { intro, tracklist })
}

/// First paragraph with non-trivial text before any section heading
///
/// Only direct children of the root are considered: parse output keeps lead
/// paragraphs at the top level, so a `<p>` nested in a wrapper such as
/// `<section>` or a table is never taken as the intro.
fn find_intro(root: ElementRef<'_>) -> Option<ElementRef<'_>> {
    for child in root.children().filter_map(ElementRef::wrap) {
        if heading_level(child).is_some() {
            return None;
        }
        if child.value().name() == "p" && text_of(child).trim().chars().count() > MIN_INTRO_CHARS {
            return Some(child);
        }
    }
    None
}

/// Elements following the track listing heading, up to the next h1/h2
fn find_tracklist(root: ElementRef<'_>) -> Result<Option<Vec<ElementRef<'_>>>, ExtractError> {
    let with_id = selector("[id]")?;

    let anchor = root.select(&with_id).find(|el| {
        el.value()
            .attr("id")
            .map(|id| TRACKLIST_IDS.iter().any(|t| t.eq_ignore_ascii_case(id)))
            .unwrap_or(false)
    });
    let Some(anchor) = anchor else {
        return Ok(None);
    };

    // Older markup puts the id on a span inside the heading
    let heading = if is_plain_heading(anchor) {
        anchor
    } else {
        match anchor
            .ancestors()
            .filter_map(ElementRef::wrap)
            .find(|el| is_plain_heading(*el))
        {
            Some(h) => h,
            None => return Ok(None),
        }
    };

    // Newer markup wraps the heading in div.mw-heading
    let boundary = heading
        .parent()
        .and_then(ElementRef::wrap)
        .filter(|p| p.value().name() == "div" && p.value().classes().any(|c| c == "mw-heading"))
        .unwrap_or(heading);

    let section = boundary
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .take_while(|el| !matches!(heading_level(*el), Some(1 | 2)))
        .collect();

    Ok(Some(section))
}

fn is_plain_heading(el: ElementRef<'_>) -> bool {
    matches!(el.value().name(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
}

/// Level of `h1`..`h6` or of a `div.mw-heading mw-headingN` wrapper
fn heading_level(el: ElementRef<'_>) -> Option<u8> {
    let name = el.value().name();
    if is_plain_heading(el) {
        return name[1..].parse().ok();
    }
    if name == "div" {
        return el
            .value()
            .classes()
            .find_map(|c| c.strip_prefix("mw-heading").and_then(|n| n.parse().ok()));
    }
    None
}

fn text_of(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Serializes extracted elements, absolutizing root-relative links
struct HtmlWriter<'a> {
    site_url: &'a str,
}

impl HtmlWriter<'_> {
    fn outer_html(&self, el: ElementRef<'_>) -> String {
        let mut out = String::new();
        self.write_element(el, &mut out);
        out
    }

    fn write_element(&self, el: ElementRef<'_>, out: &mut String) {
        let element = el.value();
        let name = element.name();

        out.push('<');
        out.push_str(name);

        let rewrite = name == "a" && element.attr("href").is_some_and(is_root_relative);

        for (attr, value) in element.attrs() {
            if rewrite && matches!(attr, "target" | "rel") {
                continue;
            }
            out.push(' ');
            out.push_str(attr);
            out.push_str("=\"");
            if rewrite && attr == "href" {
                escape_into(self.site_url.trim_end_matches('/'), true, out);
            }
            escape_into(value, true, out);
            out.push('"');
        }
        if rewrite {
            out.push_str(" target=\"_blank\" rel=\"noopener noreferrer\"");
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&name) {
            return;
        }

        for child in el.children() {
            match child.value() {
                Node::Text(text) => escape_into(text, false, out),
                Node::Element(_) => {
                    if let Some(child) = ElementRef::wrap(child) {
                        self.write_element(child, out);
                    }
                }
                _ => {}
            }
        }

        out.push_str("</");
        out.push_str(name);
        out.push('>');
    }
}

fn is_root_relative(href: &str) -> bool {
    href.starts_with('/') && !href.starts_with("//")
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// Reduce an HTML fragment to its text content
pub fn html_to_text(fragment: &str) -> String {
    let parsed = Html::parse_fragment(fragment);
    let text: String = parsed.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
