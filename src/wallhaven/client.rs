use super::{extract_detail, extract_listing, DetailRecord, ListingPage, SearchOption, WallpaperId};
use crate::{parse_document, Fetch, FetchError, ScrapeError};
use reqwest::Url;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BASE_URL: &str = "https://alpha.wallhaven.cc";

/// Thin request layer: builds URLs, fetches through `F` and hands the
/// markup to the extractors.
#[derive(Debug, Clone)]
pub struct WallhavenClient<F> {
    fetcher: F,
    base_url: String,
}

impl<F: Fetch> WallhavenClient<F> {
    pub fn new(fetcher: F) -> Self {
        Self::with_base_url(fetcher, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(fetcher: F, base_url: &str) -> Self {
        WallhavenClient {
            fetcher,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn search_url(&self, query: &str, options: &[SearchOption]) -> Result<Url, ScrapeError> {
        let query = query.trim();
        let mut params = vec![];
        if !query.is_empty() {
            params.push(("q", query.to_string()));
        }
        params.extend(options.iter().map(|o| (o.key(), o.value())));

        Url::parse_with_params(&format!("{}/search", self.base_url), params)
            .map_err(|e| ScrapeError::InvalidUrl(e.to_string()))
    }

    pub fn uploads_url(&self, user: &str, options: &[SearchOption]) -> Result<Url, ScrapeError> {
        let mut url = Url::parse(&format!("{}/user", self.base_url))
            .map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ScrapeError::InvalidUrl(self.base_url.clone()))?
            .push(user)
            .push("uploads");

        let params: Vec<_> = options
            .iter()
            .filter(|o| o.applies_to_uploads())
            .map(|o| (o.key(), o.value()))
            .collect();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }

    pub fn wallpaper_url(&self, id: WallpaperId) -> String {
        format!("{}/wallpaper/{}", self.base_url, id)
    }

    pub async fn search(
        &self,
        query: &str,
        options: &[SearchOption],
    ) -> Result<ListingPage, ScrapeError> {
        let url = self.search_url(query, options)?;
        self.listing(url.as_str()).await
    }

    pub async fn user_uploads(
        &self,
        user: &str,
        options: &[SearchOption],
    ) -> Result<ListingPage, ScrapeError> {
        let url = self.uploads_url(user, options)?;
        self.listing(url.as_str()).await
    }

    pub async fn details(&self, id: WallpaperId) -> Result<DetailRecord, ScrapeError> {
        let link = self.wallpaper_url(id);
        let html = self.fetcher.fetch_text(&link).await?;

        let record = {
            let doc = parse_document(&html)?;
            extract_detail(&doc, id, &link)?
        };
        Ok(record)
    }

    pub async fn image_bytes(&self, detail: &DetailRecord) -> Result<Vec<u8>, ScrapeError> {
        Ok(self.fetcher.fetch_bytes(&detail.image_url).await?)
    }

    /// Saves the full-resolution image under `dir`, named after the last
    /// segment of its URL.
    pub async fn download(
        &self,
        detail: &DetailRecord,
        dir: impl AsRef<Path>,
    ) -> Result<PathBuf, ScrapeError> {
        let name = detail
            .image_url
            .rsplit('/')
            .next()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ScrapeError::InvalidUrl(detail.image_url.clone()))?;
        let path = dir.as_ref().join(name);

        let bytes = self.image_bytes(detail).await?;
        tokio::fs::write(&path, bytes)
            .await
            .map_err(FetchError::from)?;

        info!("Saved {} to {}", detail.id, path.display());
        Ok(path)
    }

    async fn listing(&self, url: &str) -> Result<ListingPage, ScrapeError> {
        let html = self.fetcher.fetch_text(url).await?;

        let page = {
            let doc = parse_document(&html)?;
            extract_listing(&doc)?
        };
        Ok(page)
    }
}
