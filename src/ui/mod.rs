//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! AppState → ResultsView::compute → ResultsView → render → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready state of one surface
//! - [`renderer`]: Line-oriented text output

pub mod renderer;
pub mod viewmodel;

pub use renderer::render;
pub use viewmodel::{Banner, CardView, EmptyState, PageLink, ResultsView, LOADING_PLACEHOLDERS};
