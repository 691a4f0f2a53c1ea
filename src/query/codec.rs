//! Bidirectional mapping between the address-bar query string and a
//! [`QueryDescriptor`].
//!
//! The codec owns exactly three keys: `q`, `type` and `page`. Everything else in
//! the query string is foreign and is carried through [`encode`] byte-for-byte, so
//! links built from the current location keep whatever filters or flags other
//! parts of the application put there.
//!
//! Malformed state in the address bar is never an error: [`decode`] normalizes it
//! to defaults.

use crate::domain::{CatalogKind, QueryDescriptor};
use url::form_urlencoded;

/// Free-text search key.
pub const TEXT_KEY: &str = "q";
/// Catalog kind key.
pub const KIND_KEY: &str = "type";
/// One-based page number key.
pub const PAGE_KEY: &str = "page";

const OWNED_KEYS: [&str; 3] = [TEXT_KEY, KIND_KEY, PAGE_KEY];

/// Decodes a raw query string (with or without a leading `?`) into a descriptor.
///
/// - missing `q` → empty text
/// - missing or unrecognized `type` → [`CatalogKind::Anime`]
/// - missing, non-numeric, zero or negative `page` → 1
///
/// When a key repeats, its first occurrence wins.
///
/// ```
/// use catalog_browser::query::decode;
///
/// assert_eq!(decode("page=abc").page(), 1);
/// assert_eq!(decode("?q=cowboy+bebop&page=4").text(), "cowboy bebop");
/// ```
#[must_use]
pub fn decode(raw: &str) -> QueryDescriptor {
    let mut text: Option<String> = None;
    let mut kind: Option<CatalogKind> = None;
    let mut page: Option<u32> = None;
    let mut kind_seen = false;

    for (key, value) in form_urlencoded::parse(strip_question_mark(raw).as_bytes()) {
        match key.as_ref() {
            TEXT_KEY if text.is_none() => text = Some(value.into_owned()),
            KIND_KEY if !kind_seen => {
                kind_seen = true;
                kind = CatalogKind::parse(&value);
            }
            PAGE_KEY if page.is_none() => page = Some(parse_page(&value)),
            _ => {}
        }
    }

    QueryDescriptor::new(
        text.unwrap_or_default(),
        kind.unwrap_or_default(),
        page.unwrap_or(1),
    )
}

/// Rewrites the descriptor's keys inside `current`, leaving foreign keys intact.
///
/// Owned keys are replaced at the position of their first occurrence and any
/// later duplicates are dropped. Owned keys not present in `current` are appended
/// in the order `q`, `type`, `page`. `q` is omitted for empty text and `type` is
/// omitted when there is no text and the kind is the default, which keeps plain
/// listing URLs as short as `page=3`. The result has no leading `?`: a foreign
/// segment that would start the output with one gets it written as `%3F`.
///
/// ```
/// use catalog_browser::query::{decode, encode};
///
/// let current = "q=foo&type=anime&page=1&debug=1";
/// let next = decode(current).with_page(3);
/// assert_eq!(encode(&next, current), "q=foo&type=anime&page=3&debug=1");
/// ```
#[must_use]
pub fn encode(descriptor: &QueryDescriptor, current: &str) -> String {
    let owned_values = owned_values(descriptor);
    let mut written = [false; OWNED_KEYS.len()];
    let mut segments: Vec<String> = Vec::new();

    for segment in strip_question_mark(current).split('&').filter(|s| !s.is_empty()) {
        match owned_index(&segment_key(segment)) {
            Some(idx) => {
                if written[idx] {
                    continue;
                }
                written[idx] = true;
                if let Some(value) = &owned_values[idx] {
                    segments.push(encode_pair(OWNED_KEYS[idx], value));
                }
            }
            None => segments.push(segment.to_string()),
        }
    }

    for (idx, key) in OWNED_KEYS.iter().enumerate() {
        if written[idx] {
            continue;
        }
        if let Some(value) = &owned_values[idx] {
            segments.push(encode_pair(key, value));
        }
    }

    let encoded = segments.join("&");
    match encoded.strip_prefix('?') {
        Some(rest) => format!("%3F{rest}"),
        None => encoded,
    }
}

fn owned_values(descriptor: &QueryDescriptor) -> [Option<String>; 3] {
    let has_text = !descriptor.text().is_empty();
    let text = has_text.then(|| descriptor.text().to_string());
    let kind = (has_text || descriptor.kind() != CatalogKind::default())
        .then(|| descriptor.kind().as_str().to_string());
    let page = Some(descriptor.page().to_string());
    [text, kind, page]
}

fn parse_page(value: &str) -> u32 {
    value
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

fn strip_question_mark(raw: &str) -> &str {
    raw.strip_prefix('?').unwrap_or(raw)
}

fn segment_key(segment: &str) -> String {
    form_urlencoded::parse(segment.as_bytes())
        .next()
        .map(|(key, _)| key.into_owned())
        .unwrap_or_default()
}

fn owned_index(key: &str) -> Option<usize> {
    OWNED_KEYS.iter().position(|owned| *owned == key)
}

fn encode_pair(key: &str, value: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn malformed_pages_default_to_one() {
        for raw in ["page=abc", "page=-3", "", "page=0", "page=", "page=2.5", "page=99999999999"] {
            assert_eq!(decode(raw).page(), 1, "raw query {raw:?}");
        }
    }

    #[test]
    fn missing_keys_take_defaults() {
        let descriptor = decode("?debug=1");
        assert_eq!(descriptor, QueryDescriptor::default());
    }

    #[test]
    fn unknown_kind_normalizes_to_primary_catalog() {
        assert_eq!(decode("type=primary-catalog").kind(), CatalogKind::Anime);
        assert_eq!(decode("type=manga").kind(), CatalogKind::Manga);
    }

    #[test]
    fn first_occurrence_wins() {
        let descriptor = decode("page=2&page=7&type=manga&type=anime");
        assert_eq!(descriptor.page(), 2);
        assert_eq!(descriptor.kind(), CatalogKind::Manga);
    }

    #[test]
    fn round_trips_through_empty_query() {
        let descriptors = [
            QueryDescriptor::default(),
            QueryDescriptor::new("naruto", CatalogKind::Anime, 1),
            QueryDescriptor::new("one piece & friends=100%", CatalogKind::Manga, 12),
            QueryDescriptor::new("", CatalogKind::Manga, 3),
            QueryDescriptor::new("  ", CatalogKind::Anime, 2),
            QueryDescriptor::new("進撃の巨人", CatalogKind::Anime, 5),
        ];
        for descriptor in descriptors {
            assert_eq!(decode(&encode(&descriptor, "")), descriptor);
        }
    }

    #[test]
    fn round_trips_with_foreign_keys_preserved() {
        let foreign = "debug=1&sort=score%20desc&flag";
        let descriptor = QueryDescriptor::new("mecha", CatalogKind::Manga, 4);
        let encoded = encode(&descriptor, foreign);

        assert_eq!(decode(&encoded), descriptor);
        for segment in foreign.split('&') {
            assert!(
                encoded.split('&').any(|s| s == segment),
                "{segment} missing from {encoded}"
            );
        }
    }

    #[test]
    fn owned_keys_are_replaced_in_place() {
        let encoded = encode(
            &QueryDescriptor::new("bar", CatalogKind::Anime, 2),
            "?x=1&page=9&q=foo&y=2",
        );
        assert_eq!(encoded, "x=1&page=2&q=bar&y=2&type=anime");
    }

    #[test]
    fn duplicate_owned_keys_collapse() {
        let encoded = encode(&QueryDescriptor::default().with_page(5), "page=1&a=b&page=2");
        assert_eq!(encoded, "page=5&a=b");
    }

    #[test]
    fn leading_question_mark_in_foreign_segment_is_escaped() {
        let descriptor = QueryDescriptor::new("a b", CatalogKind::Anime, 5);
        for foreign in ["&?q", "&?page", "??type&x=1"] {
            let encoded = encode(&descriptor, foreign);
            assert!(!encoded.starts_with('?'), "{encoded}");
            assert_eq!(decode(&encoded), descriptor, "foreign {foreign:?}");
        }
        assert_eq!(encode(&descriptor, "&?q"), "%3Fq&q=a+b&type=anime&page=5");
    }

    #[test]
    fn empty_text_drops_text_key() {
        let encoded = encode(&QueryDescriptor::default(), "q=old&page=4");
        assert_eq!(encoded, "page=1");
    }

    fn foreign_piece() -> impl Strategy<Value = String> {
        prop_oneof![
            Just("q".to_string()),
            Just("?".to_string()),
            Just("&".to_string()),
            Just("=".to_string()),
            Just("%71".to_string()),
            Just("pa%67e".to_string()),
            Just("type".to_string()),
            Just("page".to_string()),
            Just("+".to_string()),
            "[a-z0-9%]{1,4}",
        ]
    }

    fn any_descriptor() -> impl Strategy<Value = QueryDescriptor> {
        (any::<String>(), any::<bool>(), 1u32..10_000).prop_map(|(text, manga, page)| {
            let kind = if manga { CatalogKind::Manga } else { CatalogKind::Anime };
            QueryDescriptor::new(text, kind, page)
        })
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(
            descriptor in any_descriptor(),
            pieces in proptest::collection::vec(foreign_piece(), 0..12),
        ) {
            let foreign = pieces.concat();
            let encoded = encode(&descriptor, &foreign);
            prop_assert_eq!(decode(&encoded), descriptor, "encoded {:?}", encoded);
        }

        #[test]
        fn prop_encode_is_stable(
            descriptor in any_descriptor(),
            pieces in proptest::collection::vec(foreign_piece(), 0..12),
        ) {
            let once = encode(&descriptor, &pieces.concat());
            prop_assert_eq!(encode(&descriptor, &once), once.clone());
        }
    }
}
