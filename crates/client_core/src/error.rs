use shared::domain::UserId;
use thiserror::Error;

/// Failure of a single round trip to the remote collection.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("invalid base url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },
    #[error("{url} rejected the request with status {status}")]
    Rejected { url: String, status: u16 },
}

/// Operator-facing failure of a coordinator command.
///
/// Variants carry no cause; the display text is what the error banner shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Failed to fetch users. Please try again later.")]
    FetchList,
    #[error("Failed to add the user. Please try again.")]
    Create,
    #[error("Failed to save changes. Please try again.")]
    Update,
    #[error("Failed to delete the user. Please try again.")]
    Delete,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    #[error("user {0} is already present in the cache")]
    DuplicateId(UserId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("first name must be a single word")]
    FirstNameWhitespace,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
}
