//! Request failure kinds and their HTTP status mapping

use hyper::StatusCode;

use crate::storage::{PathError, StorageError};

#[derive(Debug, thiserror::Error)]
pub enum DavError {
    #[error(transparent)]
    Path(#[from] PathError),

    #[error("File not found")]
    NotFound,

    #[error("cannot write to a collection")]
    Collection,

    #[error("request body exceeds {max} bytes")]
    PayloadTooLarge { max: u64 },

    #[error("failed to read request body: {0}")]
    Body(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("failed to serialize listing: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DavError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Path(PathError::Traversal(_)) => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Collection => StatusCode::METHOD_NOT_ALLOWED,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Body(_) | Self::Storage(_) | Self::Serialize(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Text sent to the client. OS error details stay in the error log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Path(_) => "Forbidden".to_string(),
            Self::NotFound => "File not found".to_string(),
            Self::Collection => "Cannot PUT to a collection".to_string(),
            Self::PayloadTooLarge { .. } => "Payload Too Large".to_string(),
            Self::Body(_) => "Error: failed to read request body".to_string(),
            Self::Storage(e) => format!("Error: {} failed", e.op),
            Self::Serialize(_) => "Error: failed to build directory listing".to_string(),
        }
    }
}
