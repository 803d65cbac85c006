use thiserror::Error;

/// Failure of the HTTP collaborator.
///
/// Callers treat every variant the same way: log it and skip the page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
