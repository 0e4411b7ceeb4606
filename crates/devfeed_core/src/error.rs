use thiserror::Error;

use crate::contact::ContactField;

/// Coarse error classes seen by the view layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransportFailure,
    ValidationFailure,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// Network or HTTP failure from the page source, tag/article fetch or mail relay.
    #[error("transport failure: {0}")]
    TransportFailure(String),
    /// First violated contact-form field.
    #[error("{message}")]
    ValidationFailure {
        field: ContactField,
        message: &'static str,
    },
}

impl FeedError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::TransportFailure(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            FeedError::TransportFailure(_) => ErrorKind::TransportFailure,
            FeedError::ValidationFailure { .. } => ErrorKind::ValidationFailure,
        }
    }
}
