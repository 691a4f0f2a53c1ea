//! Cooperative driver tying state, handler and worker together.
//!
//! A [`BrowseSession`] is what a front-end holds on to. It feeds events through
//! [`handle_event`], starts a worker future for every `Fetch` action, and turns
//! `PushLocation` actions back into navigation, the way a browser reports a
//! pushed URL to the page that pushed it.
//!
//! In-flight fetches live in a [`FuturesUnordered`], so
//! [`next_resolution`](BrowseSession::next_resolution) yields them in completion
//! order. Nothing is ever cancelled: a superseded request runs to completion and
//! its response is dropped by the ticket check in the controller.
//!
//! # Example
//!
//! ```rust,no_run
//! use catalog_browser::{BrowseSession, Config, HttpCatalogApi, SurfaceKind};
//! use std::sync::Arc;
//!
//! # async fn run() -> catalog_browser::Result<()> {
//! let api = Arc::new(HttpCatalogApi::new(&Config::default())?);
//! let mut session = BrowseSession::new(api);
//!
//! session.navigate(SurfaceKind::Listing, "page=2");
//! session.settle().await;
//! println!("{} items", session.state().listing.state().items.len());
//! # Ok(())
//! # }
//! ```

use crate::api::CatalogApi;
use crate::app::{handle_event, Action, AppState, Event, SurfaceKind};
use crate::domain::{CastMember, CatalogKind, CharacterRecord, DetailRecord, RequestTicket, Result};
use crate::worker::{CatalogWorker, FetchResponse};
use futures_util::future::BoxFuture;
use futures_util::stream::FuturesUnordered;
use futures_util::StreamExt;
use std::collections::VecDeque;
use std::sync::Arc;

/// A completed fetch after it went through the handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub surface: SurfaceKind,
    pub ticket: RequestTicket,
    /// `false` when the response was stale and discarded.
    pub applied: bool,
}

/// Single-threaded browsing session over one [`CatalogApi`].
pub struct BrowseSession<A: ?Sized> {
    state: AppState,
    worker: CatalogWorker<A>,
    in_flight: FuturesUnordered<BoxFuture<'static, FetchResponse>>,
}

impl<A: CatalogApi + ?Sized + 'static> BrowseSession<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self {
            state: AppState::new(),
            worker: CatalogWorker::new(api),
            in_flight: FuturesUnordered::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> &AppState {
        &self.state
    }

    /// Number of fetches started but not yet yielded by
    /// [`next_resolution`](Self::next_resolution), stale ones included.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    #[must_use]
    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Applies an event and runs the resulting actions.
    ///
    /// Returns `true` if any surface needs to be rendered again.
    pub fn apply(&mut self, event: Event) -> bool {
        let mut pending = VecDeque::from([event]);
        let mut render = false;

        while let Some(event) = pending.pop_front() {
            let (changed, actions) = handle_event(&mut self.state, event);
            render |= changed;

            for action in actions {
                match action {
                    Action::Fetch(request) => {
                        tracing::debug!(
                            surface = %request.surface,
                            ticket = %request.ticket,
                            "starting fetch"
                        );
                        self.in_flight.push(self.worker.dispatch(request));
                    }
                    Action::PushLocation { surface, raw_query } => {
                        tracing::debug!(surface = %surface, query = %raw_query, "pushing location");
                        pending.push_back(Event::Navigate { surface, raw_query });
                    }
                }
            }
        }

        render
    }

    /// The address bar of `surface` now shows `raw_query`.
    pub fn navigate(&mut self, surface: SurfaceKind, raw_query: &str) -> bool {
        self.apply(Event::Navigate {
            surface,
            raw_query: raw_query.to_string(),
        })
    }

    pub fn submit_search(&mut self, text: &str, kind: CatalogKind) -> bool {
        self.apply(Event::SubmitSearch {
            text: text.to_string(),
            kind,
        })
    }

    pub fn submit_ai(&mut self, text: &str) -> bool {
        self.apply(Event::SubmitAi { text: text.to_string() })
    }

    pub fn retry(&mut self, surface: SurfaceKind) -> bool {
        self.apply(Event::Retry { surface })
    }

    /// Waits for the next fetch to complete and routes it to its controller.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn next_resolution(&mut self) -> Option<Resolution> {
        let response = self.in_flight.next().await?;
        let surface = response.surface;
        let ticket = response.ticket;

        let (applied, _) = handle_event(&mut self.state, Event::FetchResolved(response));
        Some(Resolution {
            surface,
            ticket,
            applied,
        })
    }

    /// Drives every in-flight fetch to completion.
    pub async fn settle(&mut self) -> Vec<Resolution> {
        let mut resolutions = Vec::with_capacity(self.in_flight.len());
        while let Some(resolution) = self.next_resolution().await {
            resolutions.push(resolution);
        }
        resolutions
    }

    /// Fetches a single record for a detail view.
    ///
    /// Detail lookups are not tied to any surface and bypass the ticket
    /// machinery.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged.
    pub async fn fetch_detail(&self, kind: CatalogKind, id: u64) -> Result<DetailRecord> {
        let api = Arc::clone(self.worker.api());
        api.fetch_by_id(kind, id).await
    }

    /// Fetches the characters credited on an anime. Untracked, like
    /// [`fetch_detail`](Self::fetch_detail).
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged.
    pub async fn fetch_cast(&self, anime_id: u64) -> Result<Vec<CastMember>> {
        let api = Arc::clone(self.worker.api());
        api.fetch_characters(anime_id).await
    }

    /// Fetches one character record. Untracked.
    ///
    /// # Errors
    ///
    /// Returns the API error unchanged.
    pub async fn fetch_character(&self, id: u64) -> Result<CharacterRecord> {
        let api = Arc::clone(self.worker.api());
        api.fetch_character(id).await
    }
}
