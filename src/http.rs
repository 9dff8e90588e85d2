use crate::{Fetch, FetchError};
use tracing::debug;

/// [`Fetch`] over a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(client: reqwest::Client) -> Self {
        HttpFetcher { client }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        debug!("Visit {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl Fetch for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String, FetchError> {
        Ok(self.get(url).await?.text().await?)
    }

    async fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        Ok(self.get(url).await?.bytes().await?.to_vec())
    }
}
