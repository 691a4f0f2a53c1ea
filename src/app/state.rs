//! Application state: one controller per surface plus the address bar.
//!
//! `AppState` is the single owner of every surface's state. There is no global
//! mutable state; two `AppState` values never share anything.
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::{AppState, SurfaceKind};
//!
//! let mut state = AppState::new();
//! state.set_location(SurfaceKind::Search, "?q=bebop&debug=1");
//! assert_eq!(state.location(SurfaceKind::Search), "q=bebop&debug=1");
//! assert_eq!(state.current_href(SurfaceKind::Search), "/search?q=bebop&debug=1");
//! ```

use super::ai::AiSearchController;
use super::controller::QueryController;
use super::surface::SurfaceKind;

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Controller for the catalog listing surface.
    pub listing: QueryController,

    /// Controller for the free-text search surface.
    pub search: QueryController,

    /// Controller for the AI-search surface.
    pub ai: AiSearchController,

    /// Current query string of the listing surface, without `?`.
    listing_location: String,

    /// Current query string of the search surface, without `?`.
    search_location: String,
}

impl AppState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listing: QueryController::new(SurfaceKind::Listing),
            search: QueryController::new(SurfaceKind::Search),
            ai: AiSearchController::new(),
            listing_location: String::new(),
            search_location: String::new(),
        }
    }

    /// Controller of a paged surface; `None` for AI search.
    #[must_use]
    pub const fn controller(&self, surface: SurfaceKind) -> Option<&QueryController> {
        match surface {
            SurfaceKind::Listing => Some(&self.listing),
            SurfaceKind::Search => Some(&self.search),
            SurfaceKind::AiSearch => None,
        }
    }

    pub fn controller_mut(&mut self, surface: SurfaceKind) -> Option<&mut QueryController> {
        match surface {
            SurfaceKind::Listing => Some(&mut self.listing),
            SurfaceKind::Search => Some(&mut self.search),
            SurfaceKind::AiSearch => None,
        }
    }

    /// Current query string of a surface. Always empty for AI search.
    #[must_use]
    pub fn location(&self, surface: SurfaceKind) -> &str {
        match surface {
            SurfaceKind::Listing => &self.listing_location,
            SurfaceKind::Search => &self.search_location,
            SurfaceKind::AiSearch => "",
        }
    }

    /// Records what the address bar shows for a paged surface.
    pub fn set_location(&mut self, surface: SurfaceKind, raw_query: &str) {
        let raw_query = raw_query.strip_prefix('?').unwrap_or(raw_query).to_string();
        match surface {
            SurfaceKind::Listing => self.listing_location = raw_query,
            SurfaceKind::Search => self.search_location = raw_query,
            SurfaceKind::AiSearch => {
                tracing::debug!("ai search has no address-bar state");
            }
        }
    }

    /// Full href of the surface's current location.
    #[must_use]
    pub fn current_href(&self, surface: SurfaceKind) -> String {
        let query = self.location(surface);
        if query.is_empty() {
            surface.base_path().to_string()
        } else {
            format!("{}?{query}", surface.base_path())
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
