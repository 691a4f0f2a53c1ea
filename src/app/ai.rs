//! Single-shot controller for natural-language search.
//!
//! Unlike [`QueryController`](super::QueryController) there is no address-bar
//! state and no pagination: every submission is one fetch. The same ticket rule
//! applies, so a second submission made before the first answer arrives turns
//! that first answer into a no-op.

use super::results::AiResultState;
use super::surface::SurfaceKind;
use crate::domain::{RequestTicket, TicketCounter};
use crate::worker::{FetchOutcome, FetchRequest, FetchResponse, RemoteCall};

#[derive(Debug, Clone, Default)]
pub struct AiSearchController {
    tickets: TicketCounter,
    current: Option<RequestTicket>,
    last_text: Option<String>,
    state: AiResultState,
}

impl AiSearchController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(&self) -> &AiResultState {
        &self.state
    }

    /// Text of the last accepted submission.
    #[must_use]
    pub fn last_text(&self) -> Option<&str> {
        self.last_text.as_deref()
    }

    #[must_use]
    pub const fn current_ticket(&self) -> Option<RequestTicket> {
        self.current
    }

    /// Submits a natural-language query.
    ///
    /// Blank text is ignored. Any other submission, including a repeat of the
    /// previous text, issues a new fetch and supersedes the one in flight.
    pub fn submit(&mut self, text: &str) -> Option<FetchRequest> {
        let text = text.trim();
        if text.is_empty() {
            tracing::debug!("blank ai search submission ignored");
            return None;
        }
        self.last_text = Some(text.to_string());
        Some(self.issue(text.to_string()))
    }

    /// Re-submits the last query, if there was one.
    pub fn retry(&mut self) -> Option<FetchRequest> {
        let text = self.last_text.clone()?;
        Some(self.issue(text))
    }

    /// Applies a response if its ticket is current. Returns whether state changed.
    pub fn resolve(&mut self, response: FetchResponse) -> bool {
        if self.current != Some(response.ticket) {
            tracing::debug!(
                ticket = %response.ticket,
                current = ?self.current.map(RequestTicket::value),
                "discarding stale ai search response"
            );
            return false;
        }
        self.current = None;

        self.state = match response.outcome {
            FetchOutcome::Ai(result) => {
                tracing::debug!(
                    ticket = %response.ticket,
                    items = result.items.len(),
                    interpreted_query = %result.interpreted_query,
                    "ai search response applied"
                );
                AiResultState::success(result)
            }
            FetchOutcome::Failed { message } => {
                tracing::warn!(ticket = %response.ticket, error = %message, "ai search failed");
                AiResultState::failed(SurfaceKind::AiSearch.failure_message())
            }
            FetchOutcome::Page(_) => {
                tracing::warn!(ticket = %response.ticket, "unexpected page payload for ai search");
                AiResultState::failed(SurfaceKind::AiSearch.failure_message())
            }
        };
        true
    }

    fn issue(&mut self, text: String) -> FetchRequest {
        let ticket = self.tickets.mint();
        self.current = Some(ticket);
        self.state = AiResultState::loading();
        tracing::debug!(ticket = %ticket, "ai search issued");

        FetchRequest {
            surface: SurfaceKind::AiSearch,
            ticket,
            call: RemoteCall::AiSearch { text },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::results::Status;
    use crate::domain::{AiSearchResult, CatalogItem};

    fn answer(interpreted: &str, ids: &[u64]) -> FetchOutcome {
        FetchOutcome::Ai(AiSearchResult {
            interpreted_query: interpreted.to_string(),
            items: ids
                .iter()
                .map(|id| CatalogItem {
                    id: *id,
                    title: format!("Show {id}"),
                    image_url: String::new(),
                    score: None,
                    type_label: None,
                    year: None,
                })
                .collect(),
        })
    }

    #[test]
    fn success_keeps_interpreted_query_and_items() {
        let mut controller = AiSearchController::new();
        let request = controller.submit("mafia mentor school comedy").expect("fetch");
        assert_eq!(
            request.call,
            RemoteCall::AiSearch {
                text: "mafia mentor school comedy".to_string()
            }
        );

        controller.resolve(request.respond(answer(
            "comedy anime about mentoring a student in organized crime",
            &[1, 2],
        )));

        let state = controller.state();
        assert_eq!(state.status, Status::Success);
        assert_eq!(
            state.interpreted_query.as_deref(),
            Some("comedy anime about mentoring a student in organized crime")
        );
        assert_eq!(state.items.len(), 2);
    }

    #[test]
    fn second_submission_discards_first_answer() {
        let mut controller = AiSearchController::new();
        let first = controller.submit("mafia mentor school comedy").expect("fetch");
        let second = controller.submit("space cowboys jazz").expect("fetch");

        assert!(!controller.resolve(first.respond(answer("mafia", &[1]))));
        assert_eq!(controller.state().status, Status::Loading);

        assert!(controller.resolve(second.respond(answer("space western", &[7]))));
        assert_eq!(controller.state().interpreted_query.as_deref(), Some("space western"));
        assert_eq!(controller.state().items[0].id, 7);
    }

    #[test]
    fn zero_results_is_success() {
        let mut controller = AiSearchController::new();
        let request = controller.submit("nothing like this exists").expect("fetch");
        controller.resolve(request.respond(answer("no match", &[])));
        assert_eq!(controller.state().status, Status::Success);
        assert!(controller.state().items.is_empty());
        assert!(controller.state().error_message.is_none());
    }

    #[test]
    fn blank_submission_changes_nothing() {
        let mut controller = AiSearchController::new();
        assert!(controller.submit("   ").is_none());
        assert_eq!(controller.state().status, Status::Idle);
        assert!(controller.current_ticket().is_none());
    }

    #[test]
    fn repeated_text_still_fetches() {
        let mut controller = AiSearchController::new();
        let first = controller.submit("isekai").expect("fetch");
        let second = controller.submit("isekai").expect("fetch");
        assert!(second.ticket > first.ticket);
    }

    #[test]
    fn failure_hides_raw_error() {
        let mut controller = AiSearchController::new();
        let request = controller.submit("isekai").expect("fetch");
        controller.resolve(request.respond(FetchOutcome::Failed {
            message: "Decode error: expected value at line 1".to_string(),
        }));
        let state = controller.state();
        assert_eq!(state.status, Status::Error);
        assert_eq!(
            state.error_message.as_deref(),
            Some(SurfaceKind::AiSearch.failure_message())
        );
        assert!(state.interpreted_query.is_none());

        let again = controller.retry().expect("retry");
        assert_eq!(again.call, RemoteCall::AiSearch { text: "isekai".to_string() });
    }
}
