use thiserror::Error;

use crate::query::ValidationError;

use super::transport::TransportError;

/// Why an attempt ended in `Failed`. The display text is the operator-facing
/// message.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{message}")]
    RequestFailed { status: u16, message: String },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("malformed response from altitude service: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

impl QueryError {
    /// HTTP status returned by the collaborator, if it answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            QueryError::RequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
