use std::fmt;

use devfeed_core::{FeedError, FeedId, Generation, Post, PostId, RenderedArticle, Tag};

/// Results the engine thread reports back to the shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageFetched {
        feed: FeedId,
        generation: Generation,
        page: u32,
        result: Result<Vec<Post>, FetchError>,
    },
    TagsFetched(Result<Vec<Tag>, FetchError>),
    ArticleFetched {
        id: PostId,
        result: Result<RenderedArticle, FetchError>,
    },
    ThemeSaved(Result<(), String>),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Every engine-side failure is a transport failure to the core.
impl From<FetchError> for FeedError {
    fn from(err: FetchError) -> Self {
        FeedError::transport(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
