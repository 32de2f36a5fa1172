//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("Document error: {0}")]
    Document(#[from] storefront_document::DocumentError),

    #[error("A save is already in progress")]
    SaveInProgress,

    #[error("Save ticket does not match the save in progress")]
    StaleSaveTicket,
}

/// Failure reported by a theme store, returned as a value and never retried
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Theme rejected: {0}")]
    Validation(String),

    #[error("Invalid store slug: {0:?}")]
    InvalidStoreSlug(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Theme store unavailable: {0}")]
    Unavailable(String),
}
