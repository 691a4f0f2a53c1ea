//! Asynchronous fetch execution.
//!
//! Controllers describe the remote calls they want as [`FetchRequest`]s; the
//! worker runs them against a [`CatalogApi`](crate::api::CatalogApi) and hands
//! back [`FetchResponse`]s tagged with the originating ticket.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types
//! - `handler`: Worker implementation and result mapping

pub mod handler;
pub mod messages;

pub use handler::CatalogWorker;
pub use messages::{FetchOutcome, FetchRequest, FetchResponse, RemoteCall};
