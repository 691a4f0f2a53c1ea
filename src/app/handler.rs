//! Event handling and state transition logic.
//!
//! [`handle_event`] is the single entry point through which anything reaches a
//! controller: address-bar changes, form submissions, retries and worker
//! responses. It mutates [`AppState`] and returns the actions the runtime must
//! execute, so every state transition is explicit and testable without a
//! network.
//!
//! # Event Types
//!
//! - **Navigation**: `Navigate` (initial load, links, back/forward)
//! - **Submission**: `SubmitSearch`, `SubmitAi`, `Retry`
//! - **Worker**: `FetchResolved` with the response of an earlier `Fetch` action

use super::{Action, AppState, QueryController, SurfaceKind};
use crate::domain::{CatalogKind, QueryDescriptor};
use crate::query;
use crate::worker::FetchResponse;

/// Events triggered by the user, the address bar or the worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The address bar of a paged surface now shows `raw_query`.
    Navigate {
        surface: SurfaceKind,
        raw_query: String,
    },

    /// The search form was submitted.
    ///
    /// Produces a fresh search location rather than fetching directly.
    SubmitSearch {
        text: String,
        kind: CatalogKind,
    },

    /// The AI-search form was submitted.
    SubmitAi {
        text: String,
    },

    /// The user asked to try the surface's last query again.
    Retry {
        surface: SurfaceKind,
    },

    /// A worker response arrived.
    FetchResolved(FetchResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// The returned flag tells the caller whether the affected surface needs to be
/// rendered again.
///
/// # Example
///
/// ```rust
/// use catalog_browser::app::{handle_event, AppState, Event, SurfaceKind};
///
/// let mut state = AppState::new();
/// let (render, actions) = handle_event(
///     &mut state,
///     Event::Navigate { surface: SurfaceKind::Search, raw_query: String::new() },
/// );
/// assert!(render);
/// assert!(actions.is_empty()); // empty search text never fetches
/// ```
pub fn handle_event(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(&event)).entered();

    match event {
        Event::Navigate { surface, raw_query } => {
            if !surface.is_paged() {
                tracing::debug!(surface = %surface, "navigation ignored for unpaged surface");
                return (false, vec![]);
            }

            state.set_location(surface, &raw_query);
            let descriptor = query::decode(&raw_query);

            tracing::debug!(
                surface = %surface,
                text = %descriptor.text(),
                kind = %descriptor.kind(),
                page = descriptor.page(),
                "location observed"
            );

            let request = state
                .controller_mut(surface)
                .and_then(|controller| controller.observe(descriptor));

            (true, request.map(Action::Fetch).into_iter().collect())
        }
        Event::SubmitSearch { text, kind } => {
            let text = text.trim();
            if text.is_empty() {
                tracing::debug!("blank search submission ignored");
                return (false, vec![]);
            }

            let descriptor = QueryDescriptor::new(text, kind, 1);
            (
                false,
                vec![Action::PushLocation {
                    surface: SurfaceKind::Search,
                    raw_query: query::encode(&descriptor, ""),
                }],
            )
        }
        Event::SubmitAi { text } => match state.ai.submit(&text) {
            Some(request) => (true, vec![Action::Fetch(request)]),
            None => (false, vec![]),
        },
        Event::Retry { surface } => {
            let request = match surface {
                SurfaceKind::AiSearch => state.ai.retry(),
                paged => state
                    .controller_mut(paged)
                    .and_then(QueryController::retry),
            };
            match request {
                Some(request) => (true, vec![Action::Fetch(request)]),
                None => (true, vec![]),
            }
        }
        Event::FetchResolved(response) => {
            let changed = match response.surface {
                SurfaceKind::AiSearch => state.ai.resolve(response),
                paged => state
                    .controller_mut(paged)
                    .is_some_and(|controller| controller.resolve(response)),
            };
            (changed, vec![])
        }
    }
}

const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Navigate { .. } => "navigate",
        Event::SubmitSearch { .. } => "submit_search",
        Event::SubmitAi { .. } => "submit_ai",
        Event::Retry { .. } => "retry",
        Event::FetchResolved(_) => "fetch_resolved",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Status;
    use crate::domain::{CatalogItem, CatalogPage};
    use crate::worker::{FetchOutcome, FetchRequest, RemoteCall};

    fn navigate(state: &mut AppState, surface: SurfaceKind, raw: &str) -> (bool, Vec<Action>) {
        handle_event(
            state,
            Event::Navigate {
                surface,
                raw_query: raw.to_string(),
            },
        )
    }

    fn single_fetch(actions: Vec<Action>) -> FetchRequest {
        match actions.as_slice() {
            [Action::Fetch(request)] => request.clone(),
            other => panic!("expected one fetch, got {other:?}"),
        }
    }

    fn one_item_page(id: u64) -> FetchOutcome {
        FetchOutcome::Page(CatalogPage {
            items: vec![CatalogItem {
                id,
                title: format!("#{id}"),
                image_url: String::new(),
                score: None,
                type_label: None,
                year: None,
            }],
            total_pages: 3,
        })
    }

    #[test]
    fn navigation_decodes_location_into_fetch() {
        let mut state = AppState::new();
        let (render, actions) = navigate(&mut state, SurfaceKind::Search, "?q=naruto&type=manga&page=2&debug=1");
        assert!(render);

        let request = single_fetch(actions);
        assert_eq!(
            request.call,
            RemoteCall::Search {
                text: "naruto".to_string(),
                kind: CatalogKind::Manga,
                page: 2,
            }
        );
        assert_eq!(state.location(SurfaceKind::Search), "q=naruto&type=manga&page=2&debug=1");
    }

    #[test]
    fn foreign_key_change_does_not_refetch() {
        let mut state = AppState::new();
        single_fetch(navigate(&mut state, SurfaceKind::Listing, "page=2").1);
        let (_, actions) = navigate(&mut state, SurfaceKind::Listing, "page=2&debug=1");
        assert!(actions.is_empty());
        assert_eq!(state.location(SurfaceKind::Listing), "page=2&debug=1");
    }

    #[test]
    fn submit_search_pushes_fresh_location() {
        let mut state = AppState::new();
        let (_, actions) = handle_event(
            &mut state,
            Event::SubmitSearch {
                text: "  cowboy bebop ".to_string(),
                kind: CatalogKind::Anime,
            },
        );
        assert_eq!(
            actions,
            vec![Action::PushLocation {
                surface: SurfaceKind::Search,
                raw_query: "q=cowboy+bebop&type=anime&page=1".to_string(),
            }]
        );

        let (_, blank) = handle_event(
            &mut state,
            Event::SubmitSearch {
                text: "   ".to_string(),
                kind: CatalogKind::Anime,
            },
        );
        assert!(blank.is_empty());
    }

    #[test]
    fn responses_route_to_their_own_surface() {
        let mut state = AppState::new();
        let listing = single_fetch(navigate(&mut state, SurfaceKind::Listing, "page=1").1);
        let search = single_fetch(navigate(&mut state, SurfaceKind::Search, "q=a").1);

        // Both surfaces minted their first ticket independently.
        assert_eq!(listing.ticket, search.ticket);

        let (changed, _) = handle_event(&mut state, Event::FetchResolved(search.respond(one_item_page(9))));
        assert!(changed);
        assert_eq!(state.search.state().status, Status::Success);
        assert_eq!(state.listing.state().status, Status::Loading);

        handle_event(&mut state, Event::FetchResolved(listing.respond(one_item_page(1))));
        assert_eq!(state.listing.state().items[0].id, 1);
        assert_eq!(state.search.state().items[0].id, 9);
    }

    #[test]
    fn back_and_forth_discards_the_slow_response() {
        let mut state = AppState::new();
        let page_one = single_fetch(navigate(&mut state, SurfaceKind::Listing, "page=1").1);
        let page_two = single_fetch(navigate(&mut state, SurfaceKind::Listing, "page=2").1);

        handle_event(&mut state, Event::FetchResolved(page_two.respond(one_item_page(2))));
        let (changed, _) = handle_event(&mut state, Event::FetchResolved(page_one.respond(one_item_page(1))));

        assert!(!changed);
        assert_eq!(state.listing.state().items[0].id, 2);
    }

    #[test]
    fn retry_targets_the_named_surface() {
        let mut state = AppState::new();
        let first = single_fetch(navigate(&mut state, SurfaceKind::Search, "q=a").1);
        handle_event(
            &mut state,
            Event::FetchResolved(first.respond(FetchOutcome::Failed {
                message: "boom".to_string(),
            })),
        );
        assert_eq!(state.search.state().status, Status::Error);

        let again = single_fetch(handle_event(&mut state, Event::Retry { surface: SurfaceKind::Search }).1);
        assert!(again.ticket > first.ticket);
        assert_eq!(state.search.state().status, Status::Loading);
    }

    #[test]
    fn navigation_on_ai_surface_is_ignored() {
        let mut state = AppState::new();
        let (render, actions) = navigate(&mut state, SurfaceKind::AiSearch, "q=x");
        assert!(!render);
        assert!(actions.is_empty());
    }
}
