use thiserror::Error;

/// Errors the store reports to callers.
///
/// Load and save failures are not here: those are logged and recovered.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid {kind} patch: {reason}")]
    InvalidPatch { kind: &'static str, reason: String },

    #[error("malformed import document: {0}")]
    MalformedImport(#[source] serde_json::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl StoreError {
    pub fn invalid_patch(kind: &'static str, reason: impl Into<String>) -> Self {
        StoreError::InvalidPatch {
            kind,
            reason: reason.into(),
        }
    }
}
