use axum::response::{IntoResponse, Response};
use roost_common::{RoostError, UploadError};
use roost_db::DbError;
use thiserror::Error;

/// Everything that can go wrong in a listings handler besides "not found",
/// which handlers answer with a flash and a redirect instead.
#[derive(Error, Debug)]
pub enum ListingError {
    #[error("Invalid listing: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Price must be a non-negative number, got {0:?}")]
    InvalidPrice(String),

    #[error("Malformed request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Db(#[from] DbError),

    #[error("Failed to build view context: {0}")]
    Render(#[from] serde_json::Error),
}

impl From<ListingError> for RoostError {
    fn from(err: ListingError) -> Self {
        match err {
            ListingError::Validation(_)
            | ListingError::MissingField(_)
            | ListingError::InvalidPrice(_)
            | ListingError::BadRequest(_) => RoostError::ValidationError(err.to_string()),
            ListingError::Upload(e) => e.into(),
            ListingError::Db(e) => e.into(),
            ListingError::Render(e) => e.into(),
        }
    }
}

impl IntoResponse for ListingError {
    fn into_response(self) -> Response {
        RoostError::from(self).into_response()
    }
}
