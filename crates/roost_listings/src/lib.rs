// Declare modules within this crate
pub mod error; // Handler errors
pub mod forms; // Typed form input
pub mod handlers; // HTTP request handlers
pub mod logic; // Pure helpers
pub mod routes; // Route definitions
pub mod upload; // Local image storage

#[cfg(test)]
mod forms_test;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;

pub use error::ListingError;
pub use handlers::ListingsState;
pub use routes::{app, routes};
pub use upload::LocalImageStorage;
