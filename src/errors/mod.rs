use std::io;
use axum::{http::StatusCode, response::{IntoResponse, Response}};
use log::{error, warn};
use thiserror::Error;

/// Custom error types for the wiki application
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("404 page not found")]
    NotFound,
    /// The path segment failed title validation. Reported exactly like a
    /// missing resource.
    #[error("404 page not found")]
    InvalidTitle,
    /// A valid title with no backing file.
    #[error("page not found: {0}")]
    PageNotFound(String),
    #[error("{0}")]
    StorageWrite(io::Error),
    #[error("Template error: {0}")]
    TemplateError(String),
}

impl IntoResponse for WikiError {
    fn into_response(self) -> Response {
        match self {
            WikiError::NotFound | WikiError::InvalidTitle | WikiError::PageNotFound(_) => {
                warn!("Responding 404: {}", self);
                (StatusCode::NOT_FOUND, "404 page not found").into_response()
            }
            WikiError::Io(_) | WikiError::StorageWrite(_) | WikiError::TemplateError(_) => {
                error!("Responding 500: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
        }
    }
}
