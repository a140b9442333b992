//! Factory for creating listing repositories

use crate::repositories::listing::ListingImage;
use crate::repositories::listing_sql::SqlListingRepository;
use crate::{DbClient, RepositoryFactory};
use roost_config::ListingsConfig;

/// Builds SQL listing repositories that share the configured placeholder image.
#[derive(Debug, Clone)]
pub struct ListingRepositoryFactory {
    default_image: ListingImage,
}

impl ListingRepositoryFactory {
    pub fn new(config: &ListingsConfig) -> Self {
        Self {
            default_image: ListingImage {
                url: config.default_image_url.clone(),
                filename: config.default_image_filename.clone(),
            },
        }
    }
}

impl Default for ListingRepositoryFactory {
    fn default() -> Self {
        Self::new(&ListingsConfig::default())
    }
}

impl RepositoryFactory<SqlListingRepository, DbClient> for ListingRepositoryFactory {
    fn create_repository(&self, db_client: DbClient) -> SqlListingRepository {
        SqlListingRepository::new(db_client, self.default_image.clone())
    }
}
