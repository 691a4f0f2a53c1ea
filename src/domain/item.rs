//! Catalog records as seen by the browsing core.
//!
//! These are projections of the remote API's payloads: just enough to render a
//! result card or a detail page. They are owned by the response that produced them
//! and are never mutated by controllers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which catalog a search targets.
///
/// `Anime` is the primary catalog and the default whenever the address bar does
/// not name a recognized kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    /// Primary catalog.
    #[default]
    Anime,
    /// Secondary catalog.
    Manga,
}

impl CatalogKind {
    /// Returns the value used for this kind in URLs and API paths.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Anime => "anime",
            Self::Manga => "manga",
        }
    }

    /// Parses a URL/API value. Returns `None` for anything unrecognized.
    ///
    /// ```
    /// use catalog_browser::CatalogKind;
    ///
    /// assert_eq!(CatalogKind::parse("manga"), Some(CatalogKind::Manga));
    /// assert_eq!(CatalogKind::parse("novel"), None);
    /// ```
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "anime" => Some(Self::Anime),
            "manga" => Some(Self::Manga),
            _ => None,
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Minimal projection of a catalog record needed to display a result card.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: u64,
    pub title: String,
    pub image_url: String,
    pub score: Option<f64>,
    pub type_label: Option<String>,
    pub year: Option<i32>,
}

/// One page of list or search results.
///
/// `items` keeps the server's order.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CatalogPage {
    pub items: Vec<CatalogItem>,
    pub total_pages: u32,
}

/// Result of a natural-language search.
///
/// `interpreted_query` is how the remote side understood the request and is shown
/// next to the results.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AiSearchResult {
    pub interpreted_query: String,
    pub items: Vec<CatalogItem>,
}

/// Full record for a single title, used by the detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    pub id: u64,
    pub kind: CatalogKind,
    pub title: String,
    pub title_english: Option<String>,
    pub synopsis: Option<String>,
    pub background: Option<String>,
    pub score: Option<f64>,
    pub scored_by: Option<u64>,
    pub episodes: Option<u32>,
    pub chapters: Option<u32>,
    pub status: Option<String>,
    pub genres: Vec<String>,
    pub themes: Vec<String>,
    pub image_url: String,
    pub year: Option<i32>,
}

/// A character credited on a title, as listed on its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastMember {
    pub id: u64,
    pub name: String,
    pub image_url: String,
    /// `Main` or `Supporting` on the remote side; kept verbatim.
    pub role: String,
}

/// A title a character appears in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appearance {
    pub id: u64,
    pub title: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCredit {
    pub name: String,
    pub language: String,
}

/// Full record for a single character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub id: u64,
    pub name: String,
    pub name_kanji: Option<String>,
    pub nicknames: Vec<String>,
    pub favorites: u64,
    pub about: Option<String>,
    pub image_url: String,
    pub anime: Vec<Appearance>,
    pub manga: Vec<Appearance>,
    pub voices: Vec<VoiceCredit>,
}
