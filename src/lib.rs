//! Catalog Browser: the browsing core of a media-catalog front-end.
//!
//! The crate keeps what a browse page shows in sync with what its address bar
//! says, even when remote responses arrive out of order:
//! - A URL state codec mapping query strings to search descriptors and back
//! - Per-surface controllers that tag every fetch with a monotonic ticket and
//!   accept only the response to the newest one
//! - Pagination links that preserve unrelated query parameters
//! - A one-shot AI search with the same stale-response guard
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  CLI front-end (main.rs)                            │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Session (session.rs)                               │  ← Cooperative driver
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Ticketed controllers                             │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Query Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (query/)      │   │ (worker/)     │
//! │ - View models │   │ - URL codec   │   │ - Dispatch    │
//! │ - Text output │   │ - Pagination  │   │ - Result map  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                 │
//!                                         ┌───────────────┐
//!                                         │ API (api/)    │
//!                                         │ - reqwest     │
//!                                         └───────────────┘
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Infrastructure, Observability              │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Core domain types (descriptors, items, tickets, errors)
//! - [`query`]: URL state codec and pagination links
//! - [`worker`]: Fetch execution against a [`CatalogApi`]
//! - [`api`]: Remote catalog trait and its HTTP implementation
//! - [`session`]: Driver combining state, handler and worker
//! - [`ui`]: View models and plain-text rendering
//! - [`infrastructure`]: Filesystem paths
//! - [`observability`]: `tracing` subscriber setup
//!
//! # Configuration
//!
//! Settings come from a TOML file, typically
//! `~/.config/catalog-browser/config.toml`:
//!
//! ```toml
//! api_base_url = "https://api.jikan.moe/v4"
//! ai_search_url = "http://localhost:5000/api/ai-search"
//! request_timeout_ms = 15000
//! trace_level = "debug"
//! log_file = "~/.local/state/catalog-browser/browse.log"
//! ```
//!
//! # Examples
//!
//! ```rust
//! use catalog_browser::{handle_event, AppState, Event, SurfaceKind};
//!
//! let mut state = AppState::new();
//! let (_, actions) = handle_event(
//!     &mut state,
//!     Event::Navigate { surface: SurfaceKind::Listing, raw_query: "page=3".to_string() },
//! );
//! assert_eq!(actions.len(), 1); // one fetch for page 3
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod observability;
pub mod query;
pub mod session;
pub mod ui;
pub mod worker;

pub use api::{CatalogApi, HttpCatalogApi};
pub use app::{handle_event, Action, AppState, Event, Status, SurfaceKind};
pub use domain::{BrowseError, CatalogItem, CatalogKind, CatalogPage, QueryDescriptor, Result};
pub use session::{BrowseSession, Resolution};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Default remote catalog endpoint.
pub const DEFAULT_API_BASE_URL: &str = "https://api.jikan.moe/v4";

/// Runtime configuration.
///
/// # Example
///
/// ```toml
/// api_base_url = "https://api.jikan.moe/v4"
/// ai_search_url = "http://localhost:5000/api/ai-search"
/// trace_level = "debug"
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the catalog API. Default: [`DEFAULT_API_BASE_URL`]
    pub api_base_url: String,

    /// Endpoint for natural-language search.
    ///
    /// AI searches fail with a configuration error while this is unset.
    pub ai_search_url: Option<String>,

    /// Per-request deadline in milliseconds.
    ///
    /// Unset means requests may wait indefinitely; the affected surface stays
    /// loading until a newer request replaces it.
    pub request_timeout_ms: Option<u64>,

    /// Log filter used when `RUST_LOG` is not set.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,

    /// Optional log file, rotated at 10MB. `~` is expanded.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            ai_search_url: None,
            request_timeout_ms: None,
            trace_level: None,
            log_file: None,
        }
    }
}

/// On-disk shape of [`Config`]; every key is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    api_base_url: Option<String>,
    ai_search_url: Option<String>,
    request_timeout_ms: Option<u64>,
    trace_level: Option<String>,
    log_file: Option<String>,
}

impl From<RawConfig> for Config {
    fn from(raw: RawConfig) -> Self {
        Self {
            api_base_url: non_empty(raw.api_base_url).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            ai_search_url: non_empty(raw.ai_search_url),
            request_timeout_ms: raw.request_timeout_ms.filter(|ms| *ms > 0),
            trace_level: non_empty(raw.trace_level),
            log_file: non_empty(raw.log_file),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Config {
    /// Parses configuration from a string map.
    ///
    /// Parsing is lenient: unknown keys are ignored, blank values count as
    /// unset, and an unparsable timeout falls back to none.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use catalog_browser::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("ai_search_url".to_string(), "http://localhost:5000/ai".to_string());
    /// map.insert("request_timeout_ms".to_string(), "soon".to_string());
    ///
    /// let config = Config::from_map(&map);
    /// assert_eq!(config.ai_search_url.as_deref(), Some("http://localhost:5000/ai"));
    /// assert_eq!(config.request_timeout_ms, None);
    /// ```
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| non_empty(map.get(key).cloned());

        RawConfig {
            api_base_url: get("api_base_url"),
            ai_search_url: get("ai_search_url"),
            request_timeout_ms: get("request_timeout_ms").and_then(|s| s.parse::<u64>().ok()),
            trace_level: get("trace_level"),
            log_file: get("log_file"),
        }
        .into()
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`BrowseError::ConfigParse`] for malformed TOML, wrong value
    /// types or unknown keys.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let raw: RawConfig = toml::from_str(text)?;
        Ok(raw.into())
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "loading config file");
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads the default config file if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_default() -> Result<Self> {
        match infrastructure::default_config_path() {
            Some(path) if path.is_file() => Self::from_file(path),
            _ => Ok(Self::default()),
        }
    }
}
