use thiserror::Error as ThisError;

///
/// FeedError
///
/// Everything that can go wrong between the deck and the feed API.
///

#[derive(Debug, ThisError)]
pub enum FeedError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("{url} answered {status}")]
    Status { status: u16, url: String },

    #[error("malformed feed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid api base url '{0}' (expected http:// or https://)")]
    InvalidBaseUrl(String),
}
