//! Query surfaces: the independent browsing contexts.
//!
//! Each surface owns its own controller and ticket counter. Responses are routed
//! by surface, so a slow listing fetch can never touch search results and vice
//! versa.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One independent browsing context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceKind {
    /// Paged catalog listing at `/`.
    Listing,
    /// Paged free-text search at `/search`.
    Search,
    /// Single-shot natural-language search at `/ai-search`.
    AiSearch,
}

impl SurfaceKind {
    pub const ALL: [Self; 3] = [Self::Listing, Self::Search, Self::AiSearch];

    /// Path the surface lives at; pagination links are built against it.
    #[must_use]
    pub const fn base_path(self) -> &'static str {
        match self {
            Self::Listing => "/",
            Self::Search => "/search",
            Self::AiSearch => "/ai-search",
        }
    }

    /// Generic message shown when a fetch for this surface fails.
    ///
    /// Raw transport errors are logged, never shown.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Listing => "Failed to fetch anime list. Please try again later.",
            Self::Search => "Failed to perform search. Please try again later.",
            Self::AiSearch => "Failed to perform AI search. Please try again later.",
        }
    }

    /// Whether the surface keeps its state in the address bar.
    #[must_use]
    pub const fn is_paged(self) -> bool {
        !matches!(self, Self::AiSearch)
    }

    /// Parses the names accepted on the command line.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "list" | "listing" => Some(Self::Listing),
            "search" => Some(Self::Search),
            "ai" | "ai-search" => Some(Self::AiSearch),
            _ => None,
        }
    }
}

impl fmt::Display for SurfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Listing => "listing",
            Self::Search => "search",
            Self::AiSearch => "ai-search",
        };
        f.write_str(name)
    }
}
