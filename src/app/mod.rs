//! Application layer coordinating state, events, and actions.
//!
//! This module sits between the session runtime and the domain/query/worker
//! layers. Data flows one way:
//!
//! ```text
//! Address bar / forms → Events → handle_event → controller transitions → Actions
//!                          ↑                                              ↓
//!                          └────────────── worker responses ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`ai`]: Single-shot AI-search controller
//! - [`controller`]: Ticketed fetch lifecycle for paged surfaces
//! - [`handler`]: Event processing and routing
//! - [`results`]: Visible result state types
//! - [`state`]: Per-surface state container
//! - [`surface`]: The independent browsing contexts

pub mod actions;
pub mod ai;
pub mod controller;
pub mod handler;
pub mod results;
pub mod state;
pub mod surface;

pub use actions::Action;
pub use ai::AiSearchController;
pub use controller::QueryController;
pub use handler::{handle_event, Event};
pub use results::{AiResultState, ResultState, Status};
pub use state::AppState;
pub use surface::SurfaceKind;
