use thiserror::Error;

use crate::document::collection::CollectionName;
use crate::sync::remote::RemoteError;

/// Editor-level error type.
///
/// Local precondition violations (`NoDocumentLoaded`, `IndexOutOfRange`, the
/// field errors) indicate a miswired UI and abort only the operation that hit
/// them. Remote failures never touch the held document.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("No document loaded")]
    NoDocumentLoaded,

    #[error("Position {position} out of range for {collection} (len {len})")]
    IndexOutOfRange {
        collection: CollectionName,
        position: usize,
        len: usize,
    },

    #[error("Unknown collection: {0}")]
    UnknownCollection(String),

    #[error("Unknown field '{field}' on {target}")]
    UnknownField { target: String, field: String },

    #[error("Field '{0}' cannot be changed")]
    ImmutableField(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidFieldValue { field: String, reason: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(#[source] RemoteError),

    #[error("Service error: {0}")]
    Service(#[source] RemoteError),

    #[error("Response for document {expected} arrived after switching to {actual}")]
    DocumentChanged { expected: String, actual: String },
}

impl EditorError {
    /// Whether the error should be shown to the user as a notification.
    /// Precondition violations are programmer errors and are only logged.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            EditorError::NotFound(_)
                | EditorError::Transport(_)
                | EditorError::Service(_)
                | EditorError::DocumentChanged { .. }
        )
    }

    /// Maps a collaborator error from a Load or Save exchange.
    pub(crate) fn from_persistence(err: RemoteError) -> Self {
        match err {
            RemoteError::NotFound(what) => EditorError::NotFound(what),
            other => EditorError::Transport(other),
        }
    }

    /// Maps a collaborator error from an enrichment exchange.
    pub(crate) fn from_enrichment(err: RemoteError) -> Self {
        EditorError::Service(err)
    }
}
