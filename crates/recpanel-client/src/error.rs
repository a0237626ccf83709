use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("transport unavailable: {0}")]
    Unavailable(String),
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),
    #[cfg(feature = "http")]
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[cfg(feature = "http")]
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
