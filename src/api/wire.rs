//! Wire payloads of the remote API and their projection into domain types.
//!
//! The remote side follows the Jikan v4 shapes: lists come wrapped in
//! `{ "data": [...], "pagination": { "last_visible_page": N } }`, single records
//! in `{ "data": {...} }`, and images live under `images.jpg`. Fields the core
//! does not display are not modeled.

use crate::domain::{
    AiSearchResult, Appearance, CastMember, CatalogItem, CatalogKind, CatalogPage, CharacterRecord,
    DetailRecord, VoiceCredit,
};
use serde::{Deserialize, Serialize};

/// Paged list or search response.
#[derive(Debug, Clone, Deserialize)]
pub struct ListEnvelope {
    pub data: Vec<ItemRecord>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub last_visible_page: u32,
}

/// Single-record response.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailEnvelope {
    pub data: DetailPayload,
}

/// List/search entry.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRecord {
    pub mal_id: u64,
    pub title: String,
    #[serde(default)]
    pub images: Images,
    pub score: Option<f64>,
    #[serde(rename = "type")]
    pub type_label: Option<String>,
    pub year: Option<i32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Images {
    #[serde(default)]
    pub jpg: ImageUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUrls {
    pub image_url: Option<String>,
    pub large_image_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedEntry {
    pub name: String,
}

/// Full anime or manga record.
#[derive(Debug, Clone, Deserialize)]
pub struct DetailPayload {
    pub mal_id: u64,
    pub title: String,
    pub title_english: Option<String>,
    pub synopsis: Option<String>,
    pub background: Option<String>,
    #[serde(default)]
    pub images: Images,
    pub score: Option<f64>,
    pub scored_by: Option<u64>,
    pub episodes: Option<u32>,
    pub chapters: Option<u32>,
    pub status: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub genres: Vec<NamedEntry>,
    #[serde(default)]
    pub themes: Vec<NamedEntry>,
}

/// `/anime/{id}/characters` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CastEnvelope {
    #[serde(default)]
    pub data: Vec<CastEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CastEntry {
    pub character: CharacterRef,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterRef {
    pub mal_id: u64,
    pub name: String,
    #[serde(default)]
    pub images: Images,
}

/// `/characters/{id}/full` response.
#[derive(Debug, Clone, Deserialize)]
pub struct CharacterEnvelope {
    pub data: CharacterPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CharacterPayload {
    pub mal_id: u64,
    pub name: String,
    pub name_kanji: Option<String>,
    #[serde(default)]
    pub nicknames: Vec<String>,
    pub favorites: Option<u64>,
    pub about: Option<String>,
    #[serde(default)]
    pub images: Images,
    #[serde(default, alias = "animeography")]
    pub anime: Vec<AnimeRole>,
    #[serde(default, alias = "mangaography")]
    pub manga: Vec<MangaRole>,
    #[serde(default)]
    pub voices: Vec<VoiceEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AnimeRole {
    #[serde(default)]
    pub role: String,
    pub anime: TitleRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MangaRole {
    #[serde(default)]
    pub role: String,
    pub manga: TitleRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TitleRef {
    pub mal_id: u64,
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceEntry {
    #[serde(default)]
    pub language: String,
    pub person: PersonRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PersonRef {
    pub name: String,
}

/// Body of an AI-search request.
#[derive(Debug, Clone, Serialize)]
pub struct AiSearchRequest<'a> {
    pub query: &'a str,
}

/// AI-search response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiSearchEnvelope {
    pub interpreted_query: String,
    #[serde(default)]
    pub results: Vec<ItemRecord>,
}

impl ItemRecord {
    #[must_use]
    pub fn into_item(self) -> CatalogItem {
        CatalogItem {
            id: self.mal_id,
            title: self.title,
            image_url: self.images.jpg.image_url.unwrap_or_default(),
            score: self.score,
            type_label: self.type_label,
            year: self.year,
        }
    }
}

impl ListEnvelope {
    #[must_use]
    pub fn into_page(self) -> CatalogPage {
        CatalogPage {
            items: self.data.into_iter().map(ItemRecord::into_item).collect(),
            total_pages: self.pagination.last_visible_page,
        }
    }
}

impl DetailPayload {
    #[must_use]
    pub fn into_record(self, kind: CatalogKind) -> DetailRecord {
        let images = self.images.jpg;
        DetailRecord {
            id: self.mal_id,
            kind,
            title: self.title,
            title_english: self.title_english,
            synopsis: self.synopsis,
            background: self.background,
            score: self.score,
            scored_by: self.scored_by,
            episodes: self.episodes,
            chapters: self.chapters,
            status: self.status,
            genres: self.genres.into_iter().map(|g| g.name).collect(),
            themes: self.themes.into_iter().map(|t| t.name).collect(),
            image_url: images.large_image_url.or(images.image_url).unwrap_or_default(),
            year: self.year,
        }
    }
}

impl CastEnvelope {
    #[must_use]
    pub fn into_cast(self) -> Vec<CastMember> {
        self.data
            .into_iter()
            .map(|entry| CastMember {
                id: entry.character.mal_id,
                name: entry.character.name,
                image_url: entry.character.images.jpg.image_url.unwrap_or_default(),
                role: entry.role,
            })
            .collect()
    }
}

impl TitleRef {
    fn into_appearance(self, role: String) -> Appearance {
        Appearance {
            id: self.mal_id,
            title: self.title,
            role,
        }
    }
}

impl CharacterPayload {
    #[must_use]
    pub fn into_record(self) -> CharacterRecord {
        CharacterRecord {
            id: self.mal_id,
            name: self.name,
            name_kanji: self.name_kanji.filter(|kanji| !kanji.is_empty()),
            nicknames: self.nicknames,
            favorites: self.favorites.unwrap_or_default(),
            about: self.about,
            image_url: self.images.jpg.image_url.unwrap_or_default(),
            anime: self
                .anime
                .into_iter()
                .map(|entry| entry.anime.into_appearance(entry.role))
                .collect(),
            manga: self
                .manga
                .into_iter()
                .map(|entry| entry.manga.into_appearance(entry.role))
                .collect(),
            voices: self
                .voices
                .into_iter()
                .map(|voice| VoiceCredit {
                    name: voice.person.name,
                    language: voice.language,
                })
                .collect(),
        }
    }
}

impl AiSearchEnvelope {
    #[must_use]
    pub fn into_result(self) -> AiSearchResult {
        AiSearchResult {
            interpreted_query: self.interpreted_query,
            items: self.results.into_iter().map(ItemRecord::into_item).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn list_projection_keeps_server_order() {
        let envelope: ListEnvelope = serde_json::from_value(json!({
            "data": [
                {"mal_id": 5, "title": "Cowboy Bebop", "images": {"jpg": {"image_url": "https://cdn/5.jpg"}},
                 "score": 8.75, "type": "TV", "year": 1998},
                {"mal_id": 1, "title": "Berserk", "images": {"jpg": {"image_url": "https://cdn/1.jpg"}},
                 "score": null, "type": "Manga"}
            ],
            "pagination": {"last_visible_page": 42, "has_next_page": true}
        }))
        .expect("valid payload");

        let page = envelope.into_page();
        assert_eq!(page.total_pages, 42);
        assert_eq!(page.items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![5, 1]);
        assert_eq!(page.items[0].year, Some(1998));
        assert_eq!(page.items[1].year, None);
        assert_eq!(page.items[1].score, None);
        assert_eq!(page.items[1].type_label.as_deref(), Some("Manga"));
    }

    #[test]
    fn detail_prefers_large_image() {
        let envelope: DetailEnvelope = serde_json::from_value(json!({
            "data": {
                "mal_id": 21, "title": "One Piece", "title_english": "One Piece",
                "images": {"jpg": {"image_url": "small.jpg", "large_image_url": "large.jpg"}},
                "score": 8.7, "scored_by": 1000, "episodes": null, "status": "Currently Airing",
                "genres": [{"mal_id": 1, "name": "Action"}], "themes": [{"mal_id": 2, "name": "Pirates"}]
            }
        }))
        .expect("valid payload");

        let record = envelope.data.into_record(CatalogKind::Anime);
        assert_eq!(record.image_url, "large.jpg");
        assert_eq!(record.genres, vec!["Action".to_string()]);
        assert_eq!(record.themes, vec!["Pirates".to_string()]);
        assert_eq!(record.episodes, None);
    }

    #[test]
    fn ai_envelope_uses_camel_case() {
        let envelope: AiSearchEnvelope = serde_json::from_value(json!({
            "interpretedQuery": "comedy about a hitman tutor",
            "results": [{"mal_id": 1, "title": "Reborn!"}]
        }))
        .expect("valid payload");

        let result = envelope.into_result();
        assert_eq!(result.interpreted_query, "comedy about a hitman tutor");
        assert_eq!(result.items[0].title, "Reborn!");
        assert_eq!(result.items[0].image_url, "");
    }

    #[test]
    fn cast_keeps_role_and_order() {
        let envelope: CastEnvelope = serde_json::from_value(json!({
            "data": [
                {"character": {"mal_id": 1, "name": "Spiegel, Spike",
                               "images": {"jpg": {"image_url": "spike.jpg"}}},
                 "role": "Main", "voice_actors": []},
                {"character": {"mal_id": 3, "name": "Jet Black"}, "role": "Supporting"}
            ]
        }))
        .expect("valid payload");

        let cast = envelope.into_cast();
        assert_eq!(cast.len(), 2);
        assert_eq!(cast[0].name, "Spiegel, Spike");
        assert_eq!(cast[0].image_url, "spike.jpg");
        assert_eq!(cast[1].role, "Supporting");
        assert_eq!(cast[1].image_url, "");
    }

    #[test]
    fn character_collects_appearances_and_voices() {
        let envelope: CharacterEnvelope = serde_json::from_value(json!({
            "data": {
                "mal_id": 1, "name": "Spike Spiegel", "name_kanji": "",
                "nicknames": ["Swimming Bird"], "favorites": 50000, "about": null,
                "anime": [{"role": "Main", "anime": {"mal_id": 1, "title": "Cowboy Bebop"}}],
                "mangaography": [{"role": "Main", "manga": {"mal_id": 173, "title": "Shooting Star Bebop"}}],
                "voices": [{"language": "Japanese", "person": {"mal_id": 11, "name": "Yamadera, Kouichi"}}]
            }
        }))
        .expect("valid payload");

        let record = envelope.data.into_record();
        assert_eq!(record.name_kanji, None);
        assert_eq!(record.favorites, 50000);
        assert_eq!(record.anime[0].title, "Cowboy Bebop");
        assert_eq!(record.manga[0].id, 173);
        assert_eq!(record.voices[0].language, "Japanese");
    }
}
