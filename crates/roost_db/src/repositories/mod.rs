//! Repository modules for database access

pub mod listing;
pub mod listing_factory;
pub mod listing_memory;
pub mod listing_sql;

#[cfg(test)]
mod listing_proptest;
#[cfg(test)]
mod listing_sql_test;

pub use listing::{escape_like, fold_case, ListingRepository};
pub use listing_factory::ListingRepositoryFactory;
pub use listing_memory::InMemoryListingRepository;
pub use listing_sql::SqlListingRepository;
