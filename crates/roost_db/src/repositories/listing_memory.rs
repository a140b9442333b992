//! In-memory implementation of the listing repository
//!
//! Keeps everything behind one `RwLock`. Used by tests and for running the
//! service without a database.

use crate::error::DbError;
use crate::repositories::listing::{
    fold_case, ListingImage, ListingRepository, PopulatedReview, Review, User,
};
use roost_common::models::{Listing, ListingDetail, ListingPatch, NewListing};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Default)]
struct Store {
    listings: Vec<Listing>,
    users: HashMap<String, User>,
    reviews: HashMap<String, Vec<Review>>,
}

#[derive(Debug, Clone)]
pub struct InMemoryListingRepository {
    store: Arc<RwLock<Store>>,
    default_image: ListingImage,
    queries: Arc<AtomicUsize>,
}

impl InMemoryListingRepository {
    pub fn new(default_image: ListingImage) -> Self {
        Self {
            store: Arc::new(RwLock::new(Store::default())),
            default_image,
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub async fn insert_user(&self, user: User) {
        self.store.write().await.users.insert(user.id.clone(), user);
    }

    pub async fn insert_review(&self, listing_id: &str, review: Review) {
        self.store
            .write()
            .await
            .reviews
            .entry(listing_id.to_string())
            .or_default()
            .push(review);
    }

    /// Number of repository operations served so far, schema setup excluded.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }

    fn record(&self) {
        self.queries.fetch_add(1, Ordering::SeqCst);
    }
}

impl ListingRepository for InMemoryListingRepository {
    async fn ensure_user(&self, id: &str) -> Result<User, DbError> {
        self.record();
        let mut store = self.store.write().await;
        let user = store.users.entry(id.to_string()).or_insert_with(|| User {
            id: id.to_string(),
            username: id.to_string(),
            email: String::new(),
        });
        Ok(user.clone())
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Listing>, DbError> {
        self.record();
        Ok(self.store.read().await.listings.clone())
    }

    async fn search_by_place(&self, term: &str) -> Result<Vec<Listing>, DbError> {
        self.record();
        let needle = fold_case(term);
        let store = self.store.read().await;
        Ok(store
            .listings
            .iter()
            .filter(|l| {
                fold_case(&l.location).contains(&needle)
                    || fold_case(&l.country).contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, DbError> {
        self.record();
        let store = self.store.read().await;
        Ok(store.listings.iter().find(|l| l.id == id).cloned())
    }

    async fn find_detail(&self, id: &str) -> Result<Option<ListingDetail>, DbError> {
        self.record();
        let store = self.store.read().await;
        let Some(listing) = store.listings.iter().find(|l| l.id == id).cloned() else {
            return Ok(None);
        };

        let owner = store.users.get(&listing.owner_id).cloned();
        let reviews = store
            .reviews
            .get(&listing.id)
            .map(|reviews| {
                reviews
                    .iter()
                    .map(|r| PopulatedReview {
                        id: r.id.clone(),
                        rating: r.rating,
                        comment: r.comment.clone(),
                        created_at: r.created_at,
                        author: r
                            .author_id
                            .as_ref()
                            .and_then(|author| store.users.get(author).cloned()),
                    })
                    .collect()
            })
            .unwrap_or_default();

        Ok(Some(ListingDetail {
            listing,
            owner,
            reviews,
        }))
    }

    async fn create(&self, new_listing: NewListing) -> Result<Listing, DbError> {
        self.record();
        if new_listing.price < 0.0 {
            return Err(DbError::QueryError("price must not be negative".to_string()));
        }
        let listing = Listing {
            id: Uuid::new_v4().to_string(),
            title: new_listing.title,
            description: new_listing.description,
            image: new_listing
                .image
                .unwrap_or_else(|| self.default_image.clone()),
            price: new_listing.price,
            location: new_listing.location,
            country: new_listing.country,
            owner_id: new_listing.owner_id,
        };
        debug!("Storing listing {} in memory", listing.id);
        self.store.write().await.listings.push(listing.clone());
        Ok(listing)
    }

    async fn update(&self, id: &str, patch: ListingPatch) -> Result<Option<Listing>, DbError> {
        self.record();
        if patch.price.is_some_and(|price| price < 0.0) {
            return Err(DbError::QueryError("price must not be negative".to_string()));
        }
        let mut store = self.store.write().await;
        let Some(listing) = store.listings.iter_mut().find(|l| l.id == id) else {
            return Ok(None);
        };
        patch.apply(listing);
        Ok(Some(listing.clone()))
    }

    async fn delete(&self, id: &str) -> Result<Option<Listing>, DbError> {
        self.record();
        let mut store = self.store.write().await;
        let Some(position) = store.listings.iter().position(|l| l.id == id) else {
            return Ok(None);
        };
        Ok(Some(store.listings.remove(position)))
    }
}
