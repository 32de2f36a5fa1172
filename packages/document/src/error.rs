//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unknown page: {0} (expected \"home\" or \"product\")")]
    UnknownPage(String),
}
