//! Service abstractions for collaborators outside the request handlers.
//!
//! Handlers only see these traits, so tests can swap in fakes.

use axum::body::Bytes;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

use crate::error::RoostError;
use crate::models::ListingImage;

/// Type alias for a boxed future that returns a Result
pub type BoxFuture<'a, T, E> = Pin<Box<dyn Future<Output = Result<T, E>> + Send + 'a>>;

/// A file received in a multipart request, before it is stored anywhere.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Invalid file name: {0}")]
    InvalidName(String),

    #[error("Failed to read upload: {0}")]
    Read(String),

    #[error("Failed to store upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for RoostError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::Io(e) => RoostError::InternalError(format!("Failed to store upload: {}", e)),
            other => RoostError::UploadError(other.to_string()),
        }
    }
}

/// Persists uploaded images and hands back where they can be fetched from.
pub trait ImageStorage: Send + Sync {
    fn store(&self, file: IncomingFile) -> BoxFuture<'_, ListingImage, UploadError>;
}
