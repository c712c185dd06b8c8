use crate::store::StoreError;
use crate::types::FrameId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: FrameId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Script is empty")]
    EmptyInput,

    #[error("No frames detected in script")]
    NoFramesDetected,

    #[error("Persistence failure: {0}")]
    Persistence(#[source] StoreError),
}

impl From<StoreError> for CoreError {
    fn from(err: StoreError) -> Self {
        Self::Persistence(err)
    }
}
