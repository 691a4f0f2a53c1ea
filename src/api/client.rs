//! HTTP implementation of [`CatalogApi`].

use super::wire::{
    AiSearchEnvelope, AiSearchRequest, CastEnvelope, CharacterEnvelope, DetailEnvelope, ListEnvelope,
};
use super::CatalogApi;
use crate::domain::{
    AiSearchResult, BrowseError, CastMember, CatalogKind, CatalogPage, CharacterRecord, DetailRecord,
    Result,
};
use crate::Config;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `reqwest`-backed client for a Jikan-v4-shaped catalog API.
///
/// Requests carry no deadline unless one is configured; a hung request simply
/// leaves its surface loading until a newer request supersedes it.
#[derive(Debug, Clone)]
pub struct HttpCatalogApi {
    client: Client,
    base_url: String,
    ai_search_url: Option<String>,
}

impl HttpCatalogApi {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder().user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ));
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder
            .build()
            .map_err(|e| BrowseError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            ai_search_url: config.ai_search_url.clone(),
        })
    }

    /// Base URL every catalog path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(BrowseError::Http {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn list(&self, page: u32) -> Result<CatalogPage> {
        let url = format!("{}/top/anime", self.base_url);
        tracing::debug!(url = %url, page, "fetching listing page");

        let envelope: ListEnvelope =
            Self::send_json(self.client.get(&url).query(&[("page", page)])).await?;
        Ok(envelope.into_page())
    }

    async fn search(&self, text: &str, kind: CatalogKind, page: u32) -> Result<CatalogPage> {
        let url = format!("{}/{kind}", self.base_url);
        tracing::debug!(url = %url, text = %text, page, "searching catalog");

        let page = page.to_string();
        let envelope: ListEnvelope =
            Self::send_json(self.client.get(&url).query(&[("q", text), ("page", page.as_str())])).await?;
        Ok(envelope.into_page())
    }

    async fn detail(&self, kind: CatalogKind, id: u64) -> Result<DetailRecord> {
        let url = format!("{}/{kind}/{id}", self.base_url);
        tracing::debug!(url = %url, "fetching detail record");

        let envelope: DetailEnvelope = Self::send_json(self.client.get(&url)).await?;
        Ok(envelope.data.into_record(kind))
    }

    async fn cast(&self, anime_id: u64) -> Result<Vec<CastMember>> {
        let url = format!("{}/anime/{anime_id}/characters", self.base_url);
        tracing::debug!(url = %url, "fetching cast");

        let envelope: CastEnvelope = Self::send_json(self.client.get(&url)).await?;
        Ok(envelope.into_cast())
    }

    async fn character(&self, id: u64) -> Result<CharacterRecord> {
        let url = format!("{}/characters/{id}/full", self.base_url);
        tracing::debug!(url = %url, "fetching character");

        let envelope: CharacterEnvelope = Self::send_json(self.client.get(&url)).await?;
        Ok(envelope.data.into_record())
    }

    async fn ai(&self, text: &str) -> Result<AiSearchResult> {
        let url = self
            .ai_search_url
            .as_deref()
            .ok_or_else(|| BrowseError::Config("no AI search endpoint configured".to_string()))?;
        tracing::debug!(url = %url, "running ai search");

        let envelope: AiSearchEnvelope =
            Self::send_json(self.client.post(url).json(&AiSearchRequest { query: text })).await?;
        Ok(envelope.into_result())
    }
}

impl CatalogApi for HttpCatalogApi {
    fn fetch_list(&self, page: u32) -> BoxFuture<'_, Result<CatalogPage>> {
        self.list(page).boxed()
    }

    fn search_items<'a>(
        &'a self,
        text: &'a str,
        kind: CatalogKind,
        page: u32,
    ) -> BoxFuture<'a, Result<CatalogPage>> {
        self.search(text, kind, page).boxed()
    }

    fn fetch_by_id(&self, kind: CatalogKind, id: u64) -> BoxFuture<'_, Result<DetailRecord>> {
        self.detail(kind, id).boxed()
    }

    fn fetch_characters(&self, anime_id: u64) -> BoxFuture<'_, Result<Vec<CastMember>>> {
        self.cast(anime_id).boxed()
    }

    fn fetch_character(&self, id: u64) -> BoxFuture<'_, Result<CharacterRecord>> {
        self.character(id).boxed()
    }

    fn ai_search<'a>(&'a self, text: &'a str) -> BoxFuture<'a, Result<AiSearchResult>> {
        self.ai(text).boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_trimmed() {
        let config = Config {
            api_base_url: "https://api.example.test/v4/".to_string(),
            ..Config::default()
        };
        let api = HttpCatalogApi::new(&config).expect("client builds");
        assert_eq!(api.base_url(), "https://api.example.test/v4");
    }

    #[tokio::test]
    async fn ai_search_without_endpoint_is_a_config_error() {
        let api = HttpCatalogApi::new(&Config::default()).expect("client builds");
        let err = api.ai_search("anything").await.expect_err("no endpoint");
        assert!(matches!(err, BrowseError::Config(_)));
    }
}
