#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Missing fragment `{0}`")]
    MissingFragment(&'static str),
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("Invalid hex color length {len}: {hex:?}")]
    InvalidLength { hex: String, len: usize },

    #[error("Invalid hex digit in {0:?}")]
    InvalidDigit(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Request error")]
    Request(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("IO error")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("Fetch error")]
    Fetch(#[from] FetchError),

    #[error("Extract error")]
    Extract(#[from] ExtractError),

    #[error("Invalid url {0}")]
    InvalidUrl(String),
}
