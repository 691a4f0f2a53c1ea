//! Typed search/pagination intent.

use super::item::CatalogKind;
use serde::{Deserialize, Serialize};

/// Normalized representation of what the user is currently looking at.
///
/// A descriptor is a value: every URL observation produces a fresh one and a
/// change of any field produces a new descriptor rather than a mutation.
/// `page` is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryDescriptor {
    text: String,
    kind: CatalogKind,
    page: u32,
}

impl QueryDescriptor {
    /// Creates a descriptor, raising a zero page to 1.
    ///
    /// ```
    /// use catalog_browser::{CatalogKind, QueryDescriptor};
    ///
    /// let d = QueryDescriptor::new("bebop", CatalogKind::Anime, 0);
    /// assert_eq!(d.page(), 1);
    /// ```
    #[must_use]
    pub fn new(text: impl Into<String>, kind: CatalogKind, page: u32) -> Self {
        Self {
            text: text.into(),
            kind,
            page: page.max(1),
        }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        self.kind
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns a copy of this descriptor pointing at another page.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        Self::new(self.text.clone(), self.kind, page)
    }
}

impl Default for QueryDescriptor {
    fn default() -> Self {
        Self::new(String::new(), CatalogKind::default(), 1)
    }
}
