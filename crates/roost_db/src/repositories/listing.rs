//! Repository for listings
//!
//! Listings own an image reference, point at their owner and collect reviews.
//! The handlers only ever see this trait, never a concrete store.

use crate::error::DbError;
use roost_common::models::{Listing, ListingDetail, ListingPatch, NewListing};

pub use roost_common::models::{ListingImage, PopulatedReview, Review, User};

/// Storage operations the listings controller relies on.
pub trait ListingRepository: Send + Sync {
    /// Creates the tables if they do not exist yet.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Returns the stored user with `id`, recording a bare one first if the
    /// store has never seen it. The username of a bare user is its id.
    fn ensure_user(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<User, DbError>> + Send;

    /// All listings in insertion order.
    fn find_all(&self) -> impl std::future::Future<Output = Result<Vec<Listing>, DbError>> + Send;

    /// Listings whose location or country contains `term`, ignoring case.
    ///
    /// `term` is matched literally; `%` and `_` have no special meaning.
    fn search_by_place(
        &self,
        term: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Listing>, DbError>> + Send;

    fn find_by_id(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Listing>, DbError>> + Send;

    /// The listing with its owner and every review author resolved.
    fn find_detail(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ListingDetail>, DbError>> + Send;

    /// Stores a new listing under a fresh id. A missing image gets the store default.
    fn create(
        &self,
        listing: NewListing,
    ) -> impl std::future::Future<Output = Result<Listing, DbError>> + Send;

    /// Applies `patch` and returns the stored result, or `None` for an unknown id.
    ///
    /// Concurrent updates to the same listing are last-write-wins.
    fn update(
        &self,
        id: &str,
        patch: ListingPatch,
    ) -> impl std::future::Future<Output = Result<Option<Listing>, DbError>> + Send;

    /// Removes the listing and returns it, or `None` for an unknown id.
    ///
    /// Reviews that referenced it are left in place.
    fn delete(
        &self,
        id: &str,
    ) -> impl std::future::Future<Output = Result<Option<Listing>, DbError>> + Send;
}

/// Case folding shared by every store, so searches agree across backends.
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Escapes `\`, `%` and `_` for use in a `LIKE ... ESCAPE '\'` pattern.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
