use thiserror::Error;

/// The base error type shared by all Roost crates.
///
/// Crates keep their own error enums and convert into this one at the HTTP
/// boundary by implementing `From<TheirError> for RoostError`.
#[derive(Error, Debug)]
pub enum RoostError {
    /// Input rejected by validation
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Error occurred during database operation
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Error occurred while storing an uploaded file
    #[error("Upload error: {0}")]
    UploadError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for RoostError {
    fn status_code(&self) -> u16 {
        match self {
            RoostError::ValidationError(_) => 400,
            RoostError::DatabaseError(_) => 500,
            RoostError::UploadError(_) => 400,
            RoostError::ConfigError(_) => 500,
            RoostError::InternalError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for RoostError {
    fn from(err: serde_json::Error) -> Self {
        RoostError::InternalError(err.to_string())
    }
}
