//! Remote catalog API abstraction.
//!
//! [`CatalogApi`] is the seam between the browsing core and the network. The
//! worker only ever talks to this trait, which lets tests substitute fakes that
//! resolve in any order they like.
//!
//! # Implementations
//!
//! - [`HttpCatalogApi`]: `reqwest` client for a Jikan-v4-shaped API plus an
//!   optional AI-search endpoint
//!
//! Methods return boxed futures so the trait stays object-safe and the worker
//! can hold any implementation behind an `Arc`.

pub mod client;
pub mod wire;

pub use client::HttpCatalogApi;

use crate::domain::{
    AiSearchResult, CastMember, CatalogKind, CatalogPage, CharacterRecord, DetailRecord, Result,
};
use futures_util::future::BoxFuture;

/// Operations the browsing core needs from the remote catalog.
pub trait CatalogApi: Send + Sync {
    /// Fetches one page of the catalog listing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn fetch_list(&self, page: u32) -> BoxFuture<'_, Result<CatalogPage>>;

    /// Searches one catalog for `text`, returning the requested page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn search_items<'a>(
        &'a self,
        text: &'a str,
        kind: CatalogKind,
        page: u32,
    ) -> BoxFuture<'a, Result<CatalogPage>>;

    /// Fetches the full record of a single title.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn fetch_by_id(&self, kind: CatalogKind, id: u64) -> BoxFuture<'_, Result<DetailRecord>>;

    /// Fetches the characters credited on an anime, in the server's order.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn fetch_characters(&self, anime_id: u64) -> BoxFuture<'_, Result<Vec<CastMember>>>;

    /// Fetches a character with their appearances and voice credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be decoded.
    fn fetch_character(&self, id: u64) -> BoxFuture<'_, Result<CharacterRecord>>;

    /// Runs a natural-language search.
    ///
    /// # Errors
    ///
    /// Returns an error if no AI endpoint is configured, the request fails, or
    /// the response cannot be decoded.
    fn ai_search<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<AiSearchResult>>;
}
