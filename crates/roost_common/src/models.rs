use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Reference to an image held by the storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingImage {
    pub url: String,
    pub filename: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: ListingImage,
    pub price: f64,
    pub location: String,
    pub country: String,
    /// Set once at creation from the session user.
    pub owner_id: String,
}

/// Input for creating a listing. `image: None` lets the store apply its default.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: String,
    pub image: Option<ListingImage>,
    pub price: f64,
    pub location: String,
    pub country: String,
    pub owner_id: String,
}

/// Partial update. `None` leaves the stored value as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<ListingImage>,
    pub price: Option<f64>,
    pub location: Option<String>,
    pub country: Option<String>,
}

impl ListingPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Writes the present fields onto `listing`. Id and owner are never touched.
    pub fn apply(self, listing: &mut Listing) {
        if let Some(title) = self.title {
            listing.title = title;
        }
        if let Some(description) = self.description {
            listing.description = description;
        }
        if let Some(image) = self.image {
            listing.image = image;
        }
        if let Some(price) = self.price {
            listing.price = price;
        }
        if let Some(location) = self.location {
            listing.location = location;
        }
        if let Some(country) = self.country {
            listing.country = country;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub rating: i64,
    pub comment: String,
    pub author_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A review with its author resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulatedReview {
    pub id: String,
    pub rating: i64,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub author: Option<User>,
}

/// Everything the detail page needs, with no unresolved references left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingDetail {
    #[serde(flatten)]
    pub listing: Listing,
    pub owner: Option<User>,
    pub reviews: Vec<PopulatedReview>,
}
