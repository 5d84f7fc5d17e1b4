use thiserror::Error;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The backend rejected or failed a statement; the message is shown verbatim
    #[error("{0}")]
    BackendExecution(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),

    #[error("Error while retrieving schema objects: {0}")]
    SchemaLoadFailed(String),
}

impl From<dbtree_core::DbTreeError> for ServiceError {
    fn from(error: dbtree_core::DbTreeError) -> Self {
        ServiceError::BackendExecution(error.to_string())
    }
}
