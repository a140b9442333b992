//! HTTP handlers for listings
//!
//! Every handler is generic over the injected [`ListingRepository`], renders
//! through the injected [`ViewRenderer`] and answers "not found" with an error
//! flash plus a redirect to the index. Anything else that fails becomes a
//! [`ListingError`] and goes to the shared error handler.

use axum::{
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
};
use roost_common::{
    CurrentUser, FlashJar, ImageStorage, IncomingFile, View, ViewRenderer,
};
use roost_common::models::ListingImage;
use roost_config::AppConfig;
use roost_db::ListingRepository;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::ListingError;
use crate::forms::ListingSubmission;
use crate::logic::{normalize_search, thumbnail_url};

pub const INDEX_PATH: &str = "/listings";

pub const NOT_FOUND_MESSAGE: &str = "Cannot find that Listing!";
pub const EMPTY_SEARCH_MESSAGE: &str = "Please enter a search term";
pub const CREATED_MESSAGE: &str = "Successfully added a new Listing!";
pub const UPDATED_MESSAGE: &str = "Listing updated successfully!";

/// Shared state for listings handlers
pub struct ListingsState<R> {
    pub config: Arc<AppConfig>,
    pub repository: R,
    pub images: Arc<dyn ImageStorage>,
    pub views: Arc<dyn ViewRenderer>,
}

impl<R> ListingsState<R> {
    pub fn new(
        config: Arc<AppConfig>,
        repository: R,
        images: Arc<dyn ImageStorage>,
        views: Arc<dyn ViewRenderer>,
    ) -> Self {
        Self {
            config,
            repository,
            images,
            views,
        }
    }

    /// Renders `view` with the flash messages that arrived with this request.
    fn render(&self, mut flash: FlashJar, view: View) -> (FlashJar, Response) {
        let messages = flash.take();
        let response = self.views.render(view.with_flash(messages));
        (flash, response)
    }

    async fn store_upload(
        &self,
        file: Option<IncomingFile>,
    ) -> Result<Option<ListingImage>, ListingError> {
        match file {
            Some(file) => Ok(Some(self.images.store(file).await?)),
            None => Ok(None),
        }
    }
}

type HandlerResult = Result<(FlashJar, Response), ListingError>;

fn redirect(flash: FlashJar, to: &str) -> (FlashJar, Response) {
    (flash, Redirect::to(to).into_response())
}

fn not_found(flash: FlashJar, id: &str) -> (FlashJar, Response) {
    warn!("Listing {} not found", id);
    redirect(flash.error(NOT_FOUND_MESSAGE), INDEX_PATH)
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// `GET /listings`
pub async fn index_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    flash: FlashJar,
) -> HandlerResult {
    debug!("Listing all listings");
    let all_listings = state.repository.find_all().await?;
    let view = View::new("listings/index").with("all_listings", &all_listings)?;
    Ok(state.render(flash, view))
}

/// `GET /listings/new`
pub async fn new_form_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    _user: CurrentUser,
    flash: FlashJar,
) -> HandlerResult {
    Ok(state.render(flash, View::new("listings/new")))
}

/// `GET /listings/search?query=...`
///
/// A blank query never reaches the store.
pub async fn search_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    Query(params): Query<SearchParams>,
    flash: FlashJar,
) -> HandlerResult {
    let Some(term) = normalize_search(params.query.as_deref()) else {
        debug!("Rejecting blank search");
        return Ok(redirect(flash.error(EMPTY_SEARCH_MESSAGE), INDEX_PATH));
    };

    debug!("Searching listings for {:?}", term);
    let all_listings = state.repository.search_by_place(&term).await?;
    let view = View::new("listings/index")
        .with("all_listings", &all_listings)?
        .with("search_query", &params.query)?;
    Ok(state.render(flash, view))
}

/// `GET /listings/{id}`
pub async fn show_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    Path(id): Path<String>,
    flash: FlashJar,
) -> HandlerResult {
    debug!("Showing listing {}", id);
    let Some(listing) = state.repository.find_detail(&id).await? else {
        return Ok(not_found(flash, &id));
    };
    let view = View::new("listings/show").with("listing", &listing)?;
    Ok(state.render(flash, view))
}

/// `POST /listings`
///
/// The form is validated before the upload is stored, so a rejected
/// submission leaves no file behind.
pub async fn create_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    user: CurrentUser,
    flash: FlashJar,
    submission: ListingSubmission,
) -> HandlerResult {
    let ListingSubmission { form, file } = submission;
    form.validate_for_create()?;

    let owner = state.repository.ensure_user(&user.id).await?;
    let uploaded = state.store_upload(file).await?;
    let new_listing = form.into_new_listing(owner.id, uploaded)?;
    let listing = state.repository.create(new_listing).await?;

    info!("User {} created listing {}", listing.owner_id, listing.id);
    Ok(redirect(flash.success(CREATED_MESSAGE), INDEX_PATH))
}

/// `GET /listings/{id}/edit`
pub async fn edit_form_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    Path(id): Path<String>,
    flash: FlashJar,
) -> HandlerResult {
    let Some(listing) = state.repository.find_by_id(&id).await? else {
        return Ok(not_found(flash, &id));
    };

    let thumbnail = thumbnail_url(&listing.image.url, &state.config.listings);
    let view = View::new("listings/edit")
        .with("listing", &listing)?
        .with("image_url", &listing.image.url)?
        .with("thumbnail_url", &thumbnail)?;
    Ok(state.render(flash, view))
}

/// `PUT|PATCH /listings/{id}`
///
/// Only submitted fields change. Without a new file the stored image stays.
pub async fn update_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    Path(id): Path<String>,
    flash: FlashJar,
    submission: ListingSubmission,
) -> HandlerResult {
    let ListingSubmission { form, file } = submission;
    form.validate_for_update()?;

    let uploaded = state.store_upload(file).await?;
    let patch = form.into_patch(uploaded);
    let Some(listing) = state.repository.update(&id, patch).await? else {
        return Ok(not_found(flash, &id));
    };

    info!("Listing {} updated", listing.id);
    let to = format!("{}/{}", INDEX_PATH, listing.id);
    Ok(redirect(flash.success(UPDATED_MESSAGE), &to))
}

/// `DELETE /listings/{id}`
pub async fn delete_handler<R: ListingRepository>(
    State(state): State<Arc<ListingsState<R>>>,
    Path(id): Path<String>,
    flash: FlashJar,
) -> HandlerResult {
    let Some(listing) = state.repository.delete(&id).await? else {
        return Ok(not_found(flash, &id));
    };

    info!("Listing {} deleted", listing.id);
    let message = format!("Listing {} has been removed!", listing.title);
    Ok(redirect(flash.success(message), INDEX_PATH))
}
