use crate::batch::BatchWriteError;
use crate::shade::FieldViolation;
use crate::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    /// A listing or filter matched nothing. Reported as not-found, never as
    /// an empty success.
    #[error("No matches: {0}")]
    NoMatches(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldViolation>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    BatchWrite(#[from] BatchWriteError),
}
