//! SQL implementation of the listing repository

use crate::error::DbError;
use crate::repositories::listing::{
    escape_like, fold_case, ListingImage, ListingRepository, PopulatedReview, Review, User,
};
use crate::DbClient;
use chrono::{DateTime, Utc};
use roost_common::models::{Listing, ListingDetail, ListingPatch, NewListing};
use sqlx::any::AnyRow;
use sqlx::{Row, ValueRef};
use tracing::{debug, error, info};
use uuid::Uuid;

const LISTING_COLUMNS: &str =
    "id, title, description, image_url, image_filename, price, location, country, owner_id";

const SCHEMA: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS users (
        id TEXT PRIMARY KEY,
        username TEXT NOT NULL,
        email TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS listings (
        id TEXT PRIMARY KEY,
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        image_url TEXT NOT NULL,
        image_filename TEXT NOT NULL,
        price REAL NOT NULL CHECK (price >= 0),
        location TEXT NOT NULL,
        country TEXT NOT NULL,
        owner_id TEXT NOT NULL,
        location_folded TEXT NOT NULL,
        country_folded TEXT NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS reviews (
        id TEXT PRIMARY KEY,
        listing_id TEXT NOT NULL,
        author_id TEXT,
        rating INTEGER NOT NULL,
        comment TEXT NOT NULL,
        created_at TEXT NOT NULL
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_reviews_listing ON reviews (listing_id)",
];

/// SQL implementation of the listing repository
#[derive(Debug, Clone)]
pub struct SqlListingRepository {
    db_client: DbClient,
    default_image: ListingImage,
}

impl SqlListingRepository {
    pub fn new(db_client: DbClient, default_image: ListingImage) -> Self {
        Self {
            db_client,
            default_image,
        }
    }

    /// Inserts or replaces a user record.
    pub async fn insert_user(&self, user: &User) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, username, email) VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET username = excluded.username, email = excluded.email
            "#,
        )
        .bind(&user.id)
        .bind(&user.username)
        .bind(&user.email)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to store user {}: {}", user.id, e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(())
    }

    /// Attaches a review to a listing.
    pub async fn insert_review(&self, listing_id: &str, review: &Review) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, listing_id, author_id, rating, comment, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&review.id)
        .bind(listing_id)
        .bind(review.author_id.clone())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(review.created_at.to_rfc3339())
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to store review for listing {}: {}", listing_id, e);
            DbError::QueryError(e.to_string())
        })?;
        Ok(())
    }

    async fn find_owner(&self, owner_id: &str) -> Result<Option<User>, DbError> {
        let row = sqlx::query("SELECT id, username, email FROM users WHERE id = $1")
            .bind(owner_id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        row.map(|row| -> Result<User, DbError> {
            Ok(User {
                id: row.try_get("id")?,
                username: row.try_get("username")?,
                email: row.try_get("email")?,
            })
        })
        .transpose()
    }

    async fn find_reviews(&self, listing_id: &str) -> Result<Vec<PopulatedReview>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.rating, r.comment, r.created_at,
                   u.id AS author_id, u.username AS author_username, u.email AS author_email
            FROM reviews r
            LEFT JOIN users u ON u.id = r.author_id
            WHERE r.listing_id = $1
            ORDER BY r.rowid
            "#,
        )
        .bind(listing_id)
        .fetch_all(self.db_client.pool())
        .await
        .map_err(|e| DbError::QueryError(e.to_string()))?;

        rows.iter().map(review_from_row).collect()
    }
}

fn listing_from_row(row: &AnyRow) -> Result<Listing, DbError> {
    Ok(Listing {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image: ListingImage {
            url: row.try_get("image_url")?,
            filename: row.try_get("image_filename")?,
        },
        price: row.try_get("price")?,
        location: row.try_get("location")?,
        country: row.try_get("country")?,
        owner_id: row.try_get("owner_id")?,
    })
}

fn review_from_row(row: &AnyRow) -> Result<PopulatedReview, DbError> {
    let created_at: String = row.try_get("created_at")?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| DbError::DecodeError(format!("review created_at {}: {}", created_at, e)))?;

    // The Any driver reports NULL as its own type, so Option<String> will not decode it
    let author = if row.try_get_raw("author_id")?.is_null() {
        None
    } else {
        Some(User {
            id: row.try_get("author_id")?,
            username: row.try_get("author_username")?,
            email: row.try_get("author_email")?,
        })
    };

    Ok(PopulatedReview {
        id: row.try_get("id")?,
        rating: row.try_get("rating")?,
        comment: row.try_get("comment")?,
        created_at,
        author,
    })
}

impl ListingRepository for SqlListingRepository {
    async fn ensure_user(&self, id: &str) -> Result<User, DbError> {
        debug!("Ensuring user record for {}", id);

        sqlx::query(
            "INSERT INTO users (id, username, email) VALUES ($1, $2, '') ON CONFLICT (id) DO NOTHING",
        )
        .bind(id)
        .bind(id)
        .execute(self.db_client.pool())
        .await
        .map_err(|e| {
            error!("Failed to record user {}: {}", id, e);
            DbError::QueryError(e.to_string())
        })?;

        self.find_owner(id)
            .await?
            .ok_or_else(|| DbError::QueryError(format!("user {} vanished after insert", id)))
    }

    async fn init_schema(&self) -> Result<(), DbError> {
        debug!("Initializing listing schema");

        for statement in SCHEMA {
            self.db_client.execute(statement).await?;
        }

        info!("Listing schema initialized successfully");
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Listing>, DbError> {
        debug!("Finding all listings");

        let query = format!("SELECT {} FROM listings ORDER BY rowid", LISTING_COLUMNS);
        let rows = sqlx::query(&query)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to list listings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(listing_from_row).collect()
    }

    async fn search_by_place(&self, term: &str) -> Result<Vec<Listing>, DbError> {
        debug!("Searching listings by place: {}", term);

        // lower() in SQLite only folds ASCII, so match against columns folded on write
        let pattern = format!("%{}%", escape_like(&fold_case(term)));
        let query = format!(
            r#"
            SELECT {} FROM listings
            WHERE location_folded LIKE $1 ESCAPE '\'
               OR country_folded LIKE $2 ESCAPE '\'
            ORDER BY rowid
            "#,
            LISTING_COLUMNS
        );
        let rows = sqlx::query(&query)
            .bind(&pattern)
            .bind(&pattern)
            .fetch_all(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to search listings: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        rows.iter().map(listing_from_row).collect()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Listing>, DbError> {
        debug!("Finding listing: {}", id);

        let query = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to find listing {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        row.as_ref().map(listing_from_row).transpose()
    }

    async fn find_detail(&self, id: &str) -> Result<Option<ListingDetail>, DbError> {
        let Some(listing) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let owner = self.find_owner(&listing.owner_id).await?;
        let reviews = self.find_reviews(&listing.id).await?;

        Ok(Some(ListingDetail {
            listing,
            owner,
            reviews,
        }))
    }

    async fn create(&self, new_listing: NewListing) -> Result<Listing, DbError> {
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
        debug!("Creating listing {} for owner {}", listing.id, listing.owner_id);

        let query = format!(
            r#"
            INSERT INTO listings ({}, location_folded, country_folded)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
            LISTING_COLUMNS
        );
        sqlx::query(&query)
            .bind(&listing.id)
            .bind(&listing.title)
            .bind(&listing.description)
            .bind(&listing.image.url)
            .bind(&listing.image.filename)
            .bind(listing.price)
            .bind(&listing.location)
            .bind(&listing.country)
            .bind(&listing.owner_id)
            .bind(fold_case(&listing.location))
            .bind(fold_case(&listing.country))
            .execute(self.db_client.pool())
            .await
            .map_err(|e| {
                error!("Failed to insert listing: {}", e);
                DbError::QueryError(e.to_string())
            })?;

        info!("Listing {} created", listing.id);
        Ok(listing)
    }

    async fn update(&self, id: &str, patch: ListingPatch) -> Result<Option<Listing>, DbError> {
        debug!("Updating listing: {}", id);

        let mut tx = self.db_client.begin().await?;

        let select = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let mut listing = listing_from_row(&row)?;
        patch.apply(&mut listing);

        sqlx::query(
            r#"
            UPDATE listings
            SET title = $1, description = $2, image_url = $3, image_filename = $4,
                price = $5, location = $6, country = $7,
                location_folded = $8, country_folded = $9
            WHERE id = $10
            "#,
        )
        .bind(&listing.title)
        .bind(&listing.description)
        .bind(&listing.image.url)
        .bind(&listing.image.filename)
        .bind(listing.price)
        .bind(&listing.location)
        .bind(&listing.country)
        .bind(fold_case(&listing.location))
        .bind(fold_case(&listing.country))
        .bind(&listing.id)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            error!("Failed to update listing {}: {}", id, e);
            DbError::QueryError(e.to_string())
        })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Listing {} updated", id);
        Ok(Some(listing))
    }

    async fn delete(&self, id: &str) -> Result<Option<Listing>, DbError> {
        debug!("Deleting listing: {}", id);

        let mut tx = self.db_client.begin().await?;

        let select = format!("SELECT {} FROM listings WHERE id = $1", LISTING_COLUMNS);
        let row = sqlx::query(&select)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| DbError::QueryError(e.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };
        let listing = listing_from_row(&row)?;

        sqlx::query("DELETE FROM listings WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Failed to delete listing {}: {}", id, e);
                DbError::QueryError(e.to_string())
            })?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionError(e.to_string()))?;

        info!("Listing {} deleted", id);
        Ok(Some(listing))
    }
}
