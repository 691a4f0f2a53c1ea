//! Domain layer for catalog browsing.
//!
//! Core value types shared by every other layer, independent of HTTP, rendering
//! or the async runtime.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: Catalog and character records, and the search kind
//! - [`descriptor`]: The typed query descriptor decoded from the address bar
//! - [`ticket`]: Monotonic request tickets

pub mod descriptor;
pub mod error;
pub mod item;
pub mod ticket;

pub use descriptor::QueryDescriptor;
pub use error::{BrowseError, Result};
pub use item::{
    AiSearchResult, Appearance, CastMember, CatalogItem, CatalogKind, CatalogPage, CharacterRecord,
    DetailRecord, VoiceCredit,
};
pub use ticket::{RequestTicket, TicketCounter};
