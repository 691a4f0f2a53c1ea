//! Worker that turns fetch requests into remote API calls.
//!
//! The worker owns the [`CatalogApi`] implementation and never touches
//! controller state. Every request it receives produces exactly one
//! [`FetchResponse`] tagged with the request's ticket, whether the call
//! succeeded or not; deciding whether that response still matters is left to
//! the controller that issued it.

use crate::api::CatalogApi;
use crate::domain::Result;
use crate::worker::{FetchOutcome, FetchRequest, FetchResponse, RemoteCall};
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use std::sync::Arc;
use tracing::Instrument;

/// Dispatches [`FetchRequest`]s against a shared API client.
pub struct CatalogWorker<A: ?Sized> {
    api: Arc<A>,
}

impl<A: ?Sized> Clone for CatalogWorker<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
        }
    }
}

impl<A: CatalogApi + ?Sized + 'static> CatalogWorker<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// The API client requests are dispatched against.
    #[must_use]
    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Starts the remote call described by `request`.
    ///
    /// The returned future is independent of the worker and always resolves;
    /// failures become [`FetchOutcome::Failed`].
    pub fn dispatch(&self, request: FetchRequest) -> BoxFuture<'static, FetchResponse> {
        let api = Arc::clone(&self.api);
        let span = tracing::debug_span!(
            "dispatch",
            surface = %request.surface,
            ticket = request.ticket.value(),
        );

        async move {
            let outcome = match &request.call {
                RemoteCall::List { page } => {
                    Self::handle_api_result("fetch list", api.fetch_list(*page).await, FetchOutcome::Page)
                }
                RemoteCall::Search { text, kind, page } => Self::handle_api_result(
                    "search",
                    api.search_items(text, *kind, *page).await,
                    FetchOutcome::Page,
                ),
                RemoteCall::AiSearch { text } => {
                    Self::handle_api_result("ai search", api.ai_search(text).await, FetchOutcome::Ai)
                }
            };
            request.respond(outcome)
        }
        .instrument(span)
        .boxed()
    }

    /// Maps an API result to an outcome with consistent logging.
    fn handle_api_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> FetchOutcome
    where
        F: FnOnce(T) -> FetchOutcome,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "api call successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "api call failed");
                FetchOutcome::Failed {
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }
}
