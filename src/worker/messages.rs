//! Request and response protocol between controllers and the worker.
//!
//! Controllers never call the remote API themselves. They emit a [`FetchRequest`]
//! tagged with the ticket they minted; the worker executes it and answers with a
//! [`FetchResponse`] carrying the same surface and ticket, which is all a
//! controller needs to decide whether the answer is still wanted.

use crate::app::SurfaceKind;
use crate::domain::{AiSearchResult, CatalogKind, CatalogPage, RequestTicket};
use serde::{Deserialize, Serialize};

/// Remote call a controller wants executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemoteCall {
    /// One page of the catalog listing.
    List {
        page: u32,
    },
    /// One page of free-text search results.
    Search {
        text: String,
        kind: CatalogKind,
        page: u32,
    },
    /// Natural-language search, unpaged.
    AiSearch {
        text: String,
    },
}

/// A remote call issued under a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchRequest {
    pub surface: SurfaceKind,
    pub ticket: RequestTicket,
    pub call: RemoteCall,
}

/// What the remote call produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FetchOutcome {
    /// A page of list or search results.
    Page(CatalogPage),
    /// An AI-search answer.
    Ai(AiSearchResult),
    /// The call failed; `message` is the raw error, for diagnostics only.
    Failed {
        message: String,
    },
}

/// Answer to a [`FetchRequest`], routed back by surface and ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub surface: SurfaceKind,
    pub ticket: RequestTicket,
    pub outcome: FetchOutcome,
}

impl FetchRequest {
    /// Builds the response to this request.
    #[must_use]
    pub fn respond(&self, outcome: FetchOutcome) -> FetchResponse {
        FetchResponse {
            surface: self.surface,
            ticket: self.ticket,
            outcome,
        }
    }
}
