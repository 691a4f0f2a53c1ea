//! Actions representing side effects to be executed by the session runtime.
//!
//! The event handler never performs I/O. It returns a `Vec<Action>` and the
//! runtime executes them: fetches go to the worker, location pushes are fed
//! back in as navigation events, the way a browser would after `history.push`.
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::{handle_event, Action, AppState, Event, SurfaceKind};
//!
//! let mut state = AppState::new();
//! let (_, actions) = handle_event(
//!     &mut state,
//!     Event::Navigate { surface: SurfaceKind::Listing, raw_query: "page=2".to_string() },
//! );
//! assert!(matches!(actions.as_slice(), [Action::Fetch(_)]));
//! ```

use super::surface::SurfaceKind;
use crate::worker::FetchRequest;

/// Commands produced by the event handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Executes a remote call through the worker.
    ///
    /// The response must come back as
    /// [`Event::FetchResolved`](super::Event::FetchResolved).
    Fetch(FetchRequest),

    /// Replaces the address-bar query string of a surface.
    ///
    /// Emitted by explicit form submissions; the runtime applies it as
    /// [`Event::Navigate`](super::Event::Navigate) so the URL stays the source
    /// of truth.
    PushLocation {
        /// Surface whose location changes.
        surface: SurfaceKind,
        /// New query string, without a leading `?`.
        raw_query: String,
    },
}
