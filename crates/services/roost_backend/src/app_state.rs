use roost_common::JsonViewRenderer;
use roost_config::AppConfig;
use roost_db::{
    DbClient, DbError, ListingRepository, ListingRepositoryFactory, RepositoryFactory,
    SqlListingRepository,
};
use roost_listings::{ListingsState, LocalImageStorage};
use std::sync::Arc;
use tracing::info;

/// Connects the store, prepares its schema and wires the listings state.
pub async fn build_listings_state(
    config: Arc<AppConfig>,
    db_client: DbClient,
) -> Result<Arc<ListingsState<SqlListingRepository>>, DbError> {
    let repository = ListingRepositoryFactory::new(&config.listings).create_repository(db_client);
    repository.init_schema().await?;

    let images = Arc::new(LocalImageStorage::new(&config.uploads));
    info!(
        "Serving uploads from {} at {}",
        config.uploads.dir, config.uploads.public_path
    );

    Ok(Arc::new(ListingsState::new(
        config,
        repository,
        images,
        Arc::new(JsonViewRenderer),
    )))
}
