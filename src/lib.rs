use scraper::Html;

pub mod color;
pub mod http;
pub mod wallhaven;

mod error;
mod utils;

pub use color::{hex_to_rgb, Rgb};
pub use error::{ColorError, ExtractError, FetchError, ScrapeError};
pub use http::HttpFetcher;

/// Retrieves pages and files on behalf of the client. The extractors never
/// call it themselves.
#[async_trait::async_trait]
pub trait Fetch {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError>;
    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Parses markup for the extractors. Blank or markup-free input is rejected;
/// recoverable html5ever errors are not.
pub fn parse_document(source: &str) -> Result<Html, ExtractError> {
    let source = source.trim();
    if source.is_empty() {
        return Err(ExtractError::MalformedDocument("empty document".to_string()));
    }
    if !source.contains('<') {
        return Err(ExtractError::MalformedDocument("no markup".to_string()));
    }
    Ok(Html::parse_document(source))
}
