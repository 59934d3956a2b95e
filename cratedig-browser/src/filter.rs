//! Query filter
//!
//! Case-insensitive, whitespace-tokenized AND search over
//! `"<artist> <title>"`.

use crate::catalog::Record;

/// A normalized search query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    terms: Vec<String>,
}

impl Query {
    /// Lowercase and split on whitespace runs; empty tokens are dropped
    pub fn parse(raw: &str) -> Self {
        let terms = raw
            .to_lowercase()
            .split_whitespace()
            .map(str::to_string)
            .collect();
        Self { terms }
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    /// True when the query has no terms and matches everything
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every term must be a substring of the record's haystack
    pub fn matches(&self, record: &Record) -> bool {
        if self.is_empty() {
            return true;
        }
        let haystack = format!("{} {}", record.artist, record.title).to_lowercase();
        self.terms.iter().all(|term| haystack.contains(term.as_str()))
    }
}

/// Records matching `query`, in catalog order
pub fn filter<'a>(catalog: &'a [Record], query: &str) -> Vec<&'a Record> {
    let query = Query::parse(query);
    if query.is_empty() {
        return catalog.iter().collect();
    }
    catalog.iter().filter(|r| query.matches(r)).collect()
}
