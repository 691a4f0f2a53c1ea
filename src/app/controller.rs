//! Fetch lifecycle of a paged surface.
//!
//! [`QueryController`] is a small state machine (`Idle → Loading → Success |
//! Error`, re-entering `Loading` on every new descriptor) owned by exactly one
//! surface. It is driven explicitly: the owner calls [`QueryController::observe`]
//! whenever the observed descriptor changes and [`QueryController::resolve`]
//! whenever a response arrives. Nothing re-runs behind its back.
//!
//! Superseded requests are cancelled logically: each issued fetch carries a
//! ticket and only the response holding the current ticket is applied. Every
//! other response is dropped without touching state.

use super::results::ResultState;
use super::surface::SurfaceKind;
use crate::domain::{QueryDescriptor, RequestTicket, TicketCounter};
use crate::worker::{FetchOutcome, FetchRequest, FetchResponse, RemoteCall};

/// State machine for the listing and search surfaces.
#[derive(Debug, Clone)]
pub struct QueryController {
    surface: SurfaceKind,
    tickets: TicketCounter,
    current: Option<RequestTicket>,
    descriptor: Option<QueryDescriptor>,
    state: ResultState,
}

impl QueryController {
    /// Creates an idle controller for a paged surface.
    #[must_use]
    pub fn new(surface: SurfaceKind) -> Self {
        debug_assert!(surface.is_paged(), "{surface} has no address-bar state");
        Self {
            surface,
            tickets: TicketCounter::new(),
            current: None,
            descriptor: None,
            state: ResultState::idle(),
        }
    }

    #[must_use]
    pub const fn surface(&self) -> SurfaceKind {
        self.surface
    }

    #[must_use]
    pub const fn state(&self) -> &ResultState {
        &self.state
    }

    /// Last observed descriptor.
    #[must_use]
    pub const fn descriptor(&self) -> Option<&QueryDescriptor> {
        self.descriptor.as_ref()
    }

    /// Ticket whose response would currently be accepted.
    #[must_use]
    pub const fn current_ticket(&self) -> Option<RequestTicket> {
        self.current
    }

    /// Observes a descriptor decoded from the address bar.
    ///
    /// Returns the fetch to execute, or `None` when nothing needs fetching:
    /// either the descriptor equals the last observed one, or this is the search
    /// surface and the text is empty (which settles directly on an empty
    /// `Success` and retires any in-flight ticket).
    pub fn observe(&mut self, descriptor: QueryDescriptor) -> Option<FetchRequest> {
        if self.descriptor.as_ref() == Some(&descriptor) {
            tracing::debug!(surface = %self.surface, "descriptor unchanged, skipping fetch");
            return None;
        }
        self.descriptor = Some(descriptor.clone());
        self.issue(&descriptor)
    }

    /// Re-issues the last observed descriptor under a fresh ticket.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let descriptor = self.descriptor.clone()?;
        tracing::debug!(surface = %self.surface, "retrying last query");
        self.issue(&descriptor)
    }

    /// Applies a response if its ticket is current.
    ///
    /// Returns `true` when the visible state changed. Stale responses are
    /// discarded silently.
    pub fn resolve(&mut self, response: FetchResponse) -> bool {
        if self.current != Some(response.ticket) {
            tracing::debug!(
                surface = %self.surface,
                ticket = %response.ticket,
                current = ?self.current.map(RequestTicket::value),
                "discarding stale response"
            );
            return false;
        }
        self.current = None;

        self.state = match response.outcome {
            FetchOutcome::Page(page) => {
                tracing::debug!(
                    surface = %self.surface,
                    ticket = %response.ticket,
                    items = page.items.len(),
                    total_pages = page.total_pages,
                    "response applied"
                );
                ResultState::success(page)
            }
            FetchOutcome::Failed { message } => {
                tracing::warn!(surface = %self.surface, ticket = %response.ticket, error = %message, "fetch failed");
                ResultState::failed(self.surface.failure_message())
            }
            FetchOutcome::Ai(_) => {
                tracing::warn!(surface = %self.surface, ticket = %response.ticket, "unexpected AI payload for paged surface");
                ResultState::failed(self.surface.failure_message())
            }
        };
        true
    }

    fn issue(&mut self, descriptor: &QueryDescriptor) -> Option<FetchRequest> {
        let call = match self.surface {
            SurfaceKind::Search if descriptor.text().is_empty() => {
                tracing::debug!(surface = %self.surface, "empty search text, settling without fetch");
                self.current = None;
                self.state = ResultState::empty();
                return None;
            }
            SurfaceKind::Search => RemoteCall::Search {
                text: descriptor.text().to_string(),
                kind: descriptor.kind(),
                page: descriptor.page(),
            },
            SurfaceKind::Listing | SurfaceKind::AiSearch => RemoteCall::List {
                page: descriptor.page(),
            },
        };

        let ticket = self.tickets.mint();
        self.current = Some(ticket);
        self.state = ResultState::loading();

        tracing::debug!(surface = %self.surface, ticket = %ticket, call = ?call, "fetch issued");

        Some(FetchRequest {
            surface: self.surface,
            ticket,
            call,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::results::Status;
    use crate::domain::{CatalogItem, CatalogKind, CatalogPage};

    fn item(id: u64) -> CatalogItem {
        CatalogItem {
            id,
            title: format!("Title {id}"),
            image_url: format!("https://img.example/{id}.jpg"),
            score: Some(8.0),
            type_label: Some("TV".to_string()),
            year: Some(2001),
        }
    }

    fn page(ids: &[u64], total_pages: u32) -> FetchOutcome {
        FetchOutcome::Page(CatalogPage {
            items: ids.iter().copied().map(item).collect(),
            total_pages,
        })
    }

    fn search(text: &str, page: u32) -> QueryDescriptor {
        QueryDescriptor::new(text, CatalogKind::Anime, page)
    }

    #[test]
    fn starts_idle() {
        let controller = QueryController::new(SurfaceKind::Listing);
        assert_eq!(controller.state().status, Status::Idle);
        assert!(controller.current_ticket().is_none());
    }

    #[test]
    fn listing_page_two_scenario() {
        let mut controller = QueryController::new(SurfaceKind::Listing);
        let request = controller
            .observe(QueryDescriptor::default().with_page(2))
            .expect("listing always fetches");
        assert_eq!(request.call, RemoteCall::List { page: 2 });
        assert_eq!(controller.state().status, Status::Loading);

        assert!(controller.resolve(request.respond(page(&[1, 2], 5))));

        let state = controller.state();
        assert_eq!(state.status, Status::Success);
        assert_eq!(state.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(state.total_pages, 5);
        assert!(state.error_message.is_none());
    }

    #[test]
    fn out_of_range_page_is_still_issued() {
        let mut controller = QueryController::new(SurfaceKind::Listing);
        let request = controller
            .observe(QueryDescriptor::default().with_page(6))
            .expect("controller does not clamp");
        assert_eq!(request.call, RemoteCall::List { page: 6 });

        assert!(controller.resolve(request.respond(page(&[], 5))));
        assert_eq!(controller.state().status, Status::Success);
        assert!(controller.state().items.is_empty());
    }

    #[test]
    fn later_ticket_wins_regardless_of_arrival_order() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let first = controller.observe(search("slow", 1)).expect("fetch");
        let second = controller.observe(search("fast", 1)).expect("fetch");
        assert!(first.ticket < second.ticket);

        assert!(controller.resolve(second.respond(page(&[20], 1))));
        assert!(!controller.resolve(first.respond(page(&[10], 9))));

        let state = controller.state();
        assert_eq!(state.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![20]);
        assert_eq!(state.total_pages, 1);
    }

    #[test]
    fn stale_failure_is_ignored_while_loading() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let first = controller.observe(search("a", 1)).expect("fetch");
        let _second = controller.observe(search("b", 1)).expect("fetch");

        let changed = controller.resolve(first.respond(FetchOutcome::Failed {
            message: "connection reset".to_string(),
        }));

        assert!(!changed);
        assert_eq!(controller.state().status, Status::Loading);
    }

    #[test]
    fn failure_shows_generic_message_and_clears_items() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let first = controller.observe(search("a", 1)).expect("fetch");
        controller.resolve(first.respond(page(&[1, 2, 3], 2)));

        let second = controller.observe(search("a", 2)).expect("fetch");
        controller.resolve(second.respond(FetchOutcome::Failed {
            message: "HTTP 500: upstream exploded at 10.0.0.3".to_string(),
        }));

        let state = controller.state();
        assert_eq!(state.status, Status::Error);
        assert!(state.items.is_empty());
        assert_eq!(state.total_pages, 0);
        let message = state.error_message.as_deref().unwrap_or_default();
        assert_eq!(message, SurfaceKind::Search.failure_message());
        assert!(!message.contains("10.0.0.3"));
    }

    #[test]
    fn empty_search_text_settles_without_fetch() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        assert!(controller.observe(search("", 1)).is_none());

        let state = controller.state();
        assert_eq!(state.status, Status::Success);
        assert!(state.items.is_empty());
        assert_eq!(state.total_pages, 0);
    }

    #[test]
    fn clearing_the_search_retires_in_flight_ticket() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let pending = controller.observe(search("naruto", 1)).expect("fetch");
        assert!(controller.observe(search("", 1)).is_none());

        assert!(!controller.resolve(pending.respond(page(&[1], 3))));
        assert!(controller.state().items.is_empty());
        assert_eq!(controller.state().status, Status::Success);
    }

    #[test]
    fn listing_ignores_empty_text_rule() {
        let mut controller = QueryController::new(SurfaceKind::Listing);
        assert!(controller.observe(QueryDescriptor::default()).is_some());
    }

    #[test]
    fn unchanged_descriptor_is_a_no_op() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let request = controller.observe(search("bebop", 1)).expect("fetch");
        assert!(controller.observe(search("bebop", 1)).is_none());
        assert_eq!(controller.current_ticket(), Some(request.ticket));
    }

    #[test]
    fn retry_reissues_with_new_ticket() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        assert!(controller.retry().is_none());

        let first = controller.observe(search("bebop", 3)).expect("fetch");
        controller.resolve(first.respond(FetchOutcome::Failed {
            message: "timeout".to_string(),
        }));

        let again = controller.retry().expect("retry fetches");
        assert!(again.ticket > first.ticket);
        assert_eq!(again.call, first.call);
        assert_eq!(controller.state().status, Status::Loading);
    }

    #[test]
    fn duplicate_delivery_is_discarded() {
        let mut controller = QueryController::new(SurfaceKind::Listing);
        let request = controller.observe(QueryDescriptor::default()).expect("fetch");
        assert!(controller.resolve(request.respond(page(&[1], 1))));
        assert!(!controller.resolve(request.respond(page(&[2], 1))));
        assert_eq!(controller.state().items[0].id, 1);
    }

    #[test]
    fn search_call_carries_descriptor_fields() {
        let mut controller = QueryController::new(SurfaceKind::Search);
        let request = controller
            .observe(QueryDescriptor::new("berserk", CatalogKind::Manga, 4))
            .expect("fetch");
        assert_eq!(
            request.call,
            RemoteCall::Search {
                text: "berserk".to_string(),
                kind: CatalogKind::Manga,
                page: 4,
            }
        );
        assert_eq!(request.surface, SurfaceKind::Search);
    }
}
