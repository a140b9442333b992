//! Listing storage for Roost
//!
//! Listings, their owners and reviews live in a SQL database reached through
//! `sqlx::Any`. An in-memory store implementing the same trait backs tests and
//! local runs.
//!
//! # Example
//!
//! ```rust,no_run
//! use roost_config::{AppConfig, DatabaseConfig};
//! use roost_db::{DbClient, ListingRepository, ListingRepositoryFactory, RepositoryFactory};
//! use std::sync::Arc;
//!
//! async fn setup() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(AppConfig {
//!         database: Some(DatabaseConfig {
//!             url: "sqlite://data/roost.db".to_string(),
//!             max_connections: None,
//!         }),
//!         ..AppConfig::default()
//!     });
//!     let db_client = DbClient::new(&config).await?;
//!     let listings = ListingRepositoryFactory::new(&config.listings).create_repository(db_client);
//!     listings.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod repositories;
pub mod repository;

#[cfg(test)]
mod client_test;

pub use client::DbClient;
pub use error::DbError;
pub use repository::RepositoryFactory;

pub use repositories::{
    escape_like, fold_case, InMemoryListingRepository, ListingRepository, ListingRepositoryFactory,
    SqlListingRepository,
};
