
// Declare modules within this crate
pub mod error; // Error handling
pub mod flash; // Flash messages
pub mod http; // HTTP utilities
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Service abstractions
pub mod session; // Current user extraction
pub mod view; // View rendering seam

#[cfg(test)]
mod flash_test;

// Re-export error types and utilities for easier access
pub use error::{HttpStatusCode, RoostError};

// Re-export HTTP utilities for easier access
pub use http::method_override;

// Re-export logging utilities for easier access
pub use logging::{init, init_with_level, parse_level};

pub use flash::{FlashJar, FlashKind, FlashMessage};
pub use services::{BoxFuture, ImageStorage, IncomingFile, UploadError};
pub use session::{identify_user, CurrentUser};
pub use view::{JsonViewRenderer, View, ViewRenderer};
