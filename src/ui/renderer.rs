//! Plain-text rendering of a [`ResultsView`].
//!
//! Output is line-oriented and free of escape sequences so it can go to a
//! terminal, a log file or a test buffer alike.
//!
//! # Layout
//!
//! ```text
//! == Search results for "bebop" in anime ==
//! AI understood your request as: ...      (AI search only)
//! [loading 12 results...] / [error] ...   (banner, if any)
//!  1. Cowboy Bebop  8.8  [TV] [1998]  /anime/1
//! No results found for "bebop" in anime   (empty state, if any)
//! pages: ‹ 1 [2] 3 ›
//! ```

use super::viewmodel::{Banner, ResultsView};
use crate::domain::Result;
use std::io::Write;

/// Writes `view` to `out`.
///
/// # Errors
///
/// Returns an error if writing to `out` fails.
pub fn render<W: Write>(view: &ResultsView, out: &mut W) -> Result<()> {
    writeln!(out, "== {} ==", view.heading)?;

    if let Some(interpreted) = &view.interpreted_query {
        writeln!(out, "AI understood your request as: {interpreted}")?;
    }

    match &view.banner {
        Some(Banner::Loading { placeholders }) => writeln!(out, "[loading {placeholders} results...]")?,
        Some(Banner::Error(message)) => writeln!(out, "[error] {message}")?,
        None => {}
    }

    for (index, card) in view.cards.iter().enumerate() {
        let chips: String = card.chips.iter().map(|chip| format!(" [{chip}]")).collect();
        writeln!(
            out,
            "{:>2}. {}  {}{}  {}",
            index + 1,
            card.title,
            card.score_label,
            chips,
            card.href
        )?;
    }

    if let Some(empty) = &view.empty_state {
        writeln!(out, "{}", empty.message)?;
    }

    if !view.pagination.is_empty() {
        let labels: Vec<String> = view
            .pagination
            .iter()
            .map(|link| {
                if link.selected {
                    format!("[{}]", link.label)
                } else {
                    link.label.clone()
                }
            })
            .collect();
        writeln!(out, "pages: {}", labels.join(" "))?;
    }

    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SurfaceKind;
    use crate::ui::viewmodel::{CardView, EmptyState, PageLink};

    fn render_to_string(view: &ResultsView) -> String {
        let mut buffer = Vec::new();
        render(view, &mut buffer).expect("write to vec");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn renders_cards_and_pages() {
        let view = ResultsView {
            surface: SurfaceKind::Listing,
            heading: "Explore Anime".to_string(),
            banner: None,
            interpreted_query: None,
            cards: vec![CardView {
                title: "Cowboy Bebop".to_string(),
                href: "/anime/1".to_string(),
                image_url: String::new(),
                score_label: "8.8".to_string(),
                chips: vec!["TV".to_string(), "1998".to_string()],
            }],
            empty_state: None,
            pagination: vec![
                PageLink {
                    label: "1".to_string(),
                    href: "/?page=1".to_string(),
                    selected: true,
                    enabled: true,
                },
                PageLink {
                    label: "2".to_string(),
                    href: "/?page=2".to_string(),
                    selected: false,
                    enabled: true,
                },
            ],
        };

        assert_eq!(
            render_to_string(&view),
            "== Explore Anime ==\n 1. Cowboy Bebop  8.8 [TV] [1998]  /anime/1\npages: [1] 2\n"
        );
    }

    #[test]
    fn renders_interpretation_and_empty_state() {
        let view = ResultsView {
            surface: SurfaceKind::AiSearch,
            heading: "AI Anime Search".to_string(),
            banner: None,
            interpreted_query: Some("quiet slice of life".to_string()),
            cards: vec![],
            empty_state: Some(EmptyState {
                message: "No results found".to_string(),
            }),
            pagination: vec![],
        };

        assert_eq!(
            render_to_string(&view),
            "== AI Anime Search ==\nAI understood your request as: quiet slice of life\nNo results found\n"
        );
    }
}
