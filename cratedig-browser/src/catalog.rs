//! Catalog store
//!
//! Flattens the nested artist/album source document into a slug-sorted list
//! of [`Record`]s. The catalog is built once and never mutated afterward.

use cratedig_common::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One artist + album pairing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub artist: String,
    pub title: String,
    /// Cover image URL
    pub image: String,
    /// Routing key, see [`slugify`]
    pub slug: String,
}

impl Record {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, image: impl Into<String>) -> Self {
        let artist = artist.into();
        let title = title.into();
        let slug = slugify(&artist, &title);
        Self {
            artist,
            title,
            image: image.into(),
            slug,
        }
    }
}

/// Artist entry in the catalog source document
#[derive(Debug, Clone, Deserialize)]
pub struct ArtistEntry {
    pub name: String,
    #[serde(default)]
    pub albums: Vec<AlbumEntry>,
}

/// Album entry in the catalog source document
#[derive(Debug, Clone, Deserialize)]
pub struct AlbumEntry {
    pub title: String,
    #[serde(default)]
    pub image: String,
}

/// Derive the URL-safe routing key for an artist/title pair
///
/// Lowercases, collapses every run of non-alphanumeric characters to a
/// single hyphen and trims hyphens from both ends.
///
/// # Examples
/// ```
/// use cratedig_browser::catalog::slugify;
///
/// assert_eq!(slugify("Pink Floyd", "The Wall"), "pink-floyd-the-wall");
/// assert_eq!(slugify("A & B!", "C/D"), "a-b-c-d");
/// ```
pub fn slugify(artist: &str, title: &str) -> String {
    let mut slug = String::with_capacity(artist.len() + title.len() + 1);
    let mut pending_hyphen = false;

    for c in artist.chars().chain(std::iter::once(' ')).chain(title.chars()) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// The session's immutable, slug-sorted record list
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
}

impl Catalog {
    /// Flatten artists (source order) then sort by slug
    ///
    /// The sort is stable, so records sharing a slug keep source order and
    /// the first one wins lookups.
    pub fn from_artists(artists: Vec<ArtistEntry>) -> Self {
        let mut records: Vec<Record> = artists
            .into_iter()
            .flat_map(|artist| {
                let name = artist.name;
                artist
                    .albums
                    .into_iter()
                    .map(move |album| Record::new(name.clone(), album.title, album.image))
            })
            .collect();

        records.sort_by(|a, b| a.slug.cmp(&b.slug));
        Self { records }
    }

    /// Parse a catalog source document
    pub fn from_json(json: &str) -> Result<Self> {
        let artists: Vec<ArtistEntry> = serde_json::from_str(json)?;
        Ok(Self::from_artists(artists))
    }

    /// Read and parse the catalog source file
    pub async fn load(path: &Path) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json(&json)?;
        info!(
            "Loaded catalog from {} ({} records)",
            path.display(),
            catalog.len()
        );
        Ok(catalog)
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// First record with the given slug
    pub fn find(&self, slug: &str) -> Option<&Record> {
        self.records.iter().find(|r| r.slug == slug)
    }

    pub fn contains(&self, slug: &str) -> bool {
        self.find(slug).is_some()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
