use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("product ID is missing, cannot update")]
    MissingProductId,
    #[error("record must be a JSON object")]
    NotAnObject,
    #[error("no profile loaded")]
    NoProfile,
    #[error("invalid record: {0}")]
    Json(#[from] serde_json::Error),
}
