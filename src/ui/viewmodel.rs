//! View model types representing renderable surface state.
//!
//! A [`ResultsView`] is computed from [`AppState`] for one surface and holds
//! display-ready data only: headings, cards, banners and pagination hrefs.
//! Renderers never look at controllers directly.
//!
//! # Example
//!
//! ```rust
//! use catalog_browser::app::{AppState, SurfaceKind};
//! use catalog_browser::ui::ResultsView;
//!
//! let state = AppState::new();
//! let view = ResultsView::compute(&state, SurfaceKind::Listing);
//! assert_eq!(view.heading, "Explore Anime");
//! assert!(view.cards.is_empty());
//! ```

use crate::app::{AppState, Status, SurfaceKind};
use crate::domain::{CatalogItem, CatalogKind, QueryDescriptor};
use crate::query::{build_page_link, page_items, PageItem};

/// Number of skeleton cards shown while a page is loading.
pub const LOADING_PLACEHOLDERS: usize = 12;

/// Complete view model of one surface.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsView {
    pub surface: SurfaceKind,

    /// Page heading, e.g. `Search results for "bebop" in anime`.
    pub heading: String,

    /// Loading or error banner, if any.
    pub banner: Option<Banner>,

    /// How the AI endpoint understood the request. AI search only.
    pub interpreted_query: Option<String>,

    /// Result cards in server order.
    pub cards: Vec<CardView>,

    /// Shown instead of cards when a successful fetch returned nothing.
    pub empty_state: Option<EmptyState>,

    /// Paging widget entries; empty unless there is more than one page.
    pub pagination: Vec<PageLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Loading { placeholders: usize },
    Error(String),
}

/// One result card.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub title: String,
    /// Link to the item's detail page, e.g. `/anime/5`.
    pub href: String,
    pub image_url: String,
    /// Score with one decimal, or `No rating`.
    pub score_label: String,
    /// Type label and year, when known.
    pub chips: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
}

/// One entry of the paging widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub label: String,
    pub href: String,
    pub selected: bool,
    /// `false` for ellipses and for previous/next at either end.
    pub enabled: bool,
}

impl ResultsView {
    /// Computes the view of `surface` from the current application state.
    #[must_use]
    pub fn compute(state: &AppState, surface: SurfaceKind) -> Self {
        match state.controller(surface) {
            Some(controller) => {
                let descriptor = controller.descriptor().cloned().unwrap_or_default();
                let results = controller.state();
                let kind = match surface {
                    SurfaceKind::Search => descriptor.kind(),
                    _ => CatalogKind::Anime,
                };

                let empty_state = (results.status == Status::Success && results.items.is_empty())
                    .then(|| empty_message(surface, &descriptor))
                    .flatten()
                    .map(|message| EmptyState { message });

                let pagination = if results.status == Status::Success && results.total_pages > 1 {
                    pagination_links(surface, &descriptor, results.total_pages, state.location(surface))
                } else {
                    vec![]
                };

                Self {
                    surface,
                    heading: heading(surface, &descriptor),
                    banner: banner(results.status, results.error_message.as_deref()),
                    interpreted_query: None,
                    cards: cards(&results.items, kind),
                    empty_state,
                    pagination,
                }
            }
            None => {
                let results = state.ai.state();
                let empty_state = (results.status == Status::Success && results.items.is_empty())
                    .then(|| EmptyState {
                        message: "No results found".to_string(),
                    });

                Self {
                    surface,
                    heading: heading(surface, &QueryDescriptor::default()),
                    banner: banner(results.status, results.error_message.as_deref()),
                    interpreted_query: results.interpreted_query.clone(),
                    cards: cards(&results.items, CatalogKind::Anime),
                    empty_state,
                    pagination: vec![],
                }
            }
        }
    }
}

fn heading(surface: SurfaceKind, descriptor: &QueryDescriptor) -> String {
    match surface {
        SurfaceKind::Listing => "Explore Anime".to_string(),
        SurfaceKind::Search if descriptor.text().is_empty() => "Search".to_string(),
        SurfaceKind::Search => format!(
            "Search results for \"{}\" in {}",
            descriptor.text(),
            descriptor.kind()
        ),
        SurfaceKind::AiSearch => "AI Anime Search".to_string(),
    }
}

fn banner(status: Status, error_message: Option<&str>) -> Option<Banner> {
    match status {
        Status::Loading => Some(Banner::Loading {
            placeholders: LOADING_PLACEHOLDERS,
        }),
        Status::Error => error_message.map(|message| Banner::Error(message.to_string())),
        Status::Idle | Status::Success => None,
    }
}

fn empty_message(surface: SurfaceKind, descriptor: &QueryDescriptor) -> Option<String> {
    match surface {
        SurfaceKind::Listing => Some("No anime found".to_string()),
        // An empty query is not a search that found nothing.
        SurfaceKind::Search if descriptor.text().is_empty() => None,
        SurfaceKind::Search => Some(format!(
            "No results found for \"{}\" in {}",
            descriptor.text(),
            descriptor.kind()
        )),
        SurfaceKind::AiSearch => Some("No results found".to_string()),
    }
}

fn cards(items: &[CatalogItem], kind: CatalogKind) -> Vec<CardView> {
    items
        .iter()
        .map(|item| CardView {
            title: item.title.clone(),
            href: format!("/{kind}/{}", item.id),
            image_url: item.image_url.clone(),
            score_label: item
                .score
                .filter(|score| *score > 0.0)
                .map_or_else(|| "No rating".to_string(), |score| format!("{score:.1}")),
            chips: item
                .type_label
                .iter()
                .cloned()
                .chain(item.year.map(|year| year.to_string()))
                .collect(),
        })
        .collect()
}

fn pagination_links(
    surface: SurfaceKind,
    descriptor: &QueryDescriptor,
    total_pages: u32,
    current_query: &str,
) -> Vec<PageLink> {
    page_items(descriptor.page(), total_pages)
        .into_iter()
        .map(|item| {
            let target = item.target();
            let (label, selected) = match item {
                PageItem::Previous(_) => ("‹".to_string(), false),
                PageItem::Next(_) => ("›".to_string(), false),
                PageItem::Ellipsis => ("…".to_string(), false),
                PageItem::Page { number, selected } => (number.to_string(), selected),
            };
            PageLink {
                label,
                href: build_page_link(surface.base_path(), descriptor, target, current_query),
                selected,
                enabled: target.is_some(),
            }
        })
        .collect()
}
