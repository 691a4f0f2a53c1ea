//! Visible result state of a surface.
//!
//! Both state types are replaced wholesale on every accepted transition. The
//! constructors below are the only way to build them, which keeps a transition
//! from mixing fields of an old result with a new one.

use crate::domain::{AiSearchResult, CatalogItem, CatalogPage};
use serde::{Deserialize, Serialize};

/// Lifecycle of a surface's current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// Nothing observed yet.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The latest fetch (or the empty-query shortcut) succeeded.
    Success,
    /// The latest fetch failed.
    Error,
}

/// Result state of a paged surface (listing or search).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultState {
    pub status: Status,
    pub items: Vec<CatalogItem>,
    pub total_pages: u32,
    pub error_message: Option<String>,
}

impl ResultState {
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn loading() -> Self {
        Self {
            status: Status::Loading,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn success(page: CatalogPage) -> Self {
        Self {
            status: Status::Success,
            items: page.items,
            total_pages: page.total_pages,
            error_message: None,
        }
    }

    /// Successful state with nothing to show.
    #[must_use]
    pub fn empty() -> Self {
        Self::success(CatalogPage::default())
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Result state of the AI-search surface.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AiResultState {
    pub status: Status,
    pub items: Vec<CatalogItem>,
    pub interpreted_query: Option<String>,
    pub error_message: Option<String>,
}

impl AiResultState {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            status: Status::Loading,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn success(result: AiSearchResult) -> Self {
        Self {
            status: Status::Success,
            items: result.items,
            interpreted_query: Some(result.interpreted_query),
            error_message: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            error_message: Some(message.into()),
            ..Self::default()
        }
    }
}
