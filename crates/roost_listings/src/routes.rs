use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use roost_common::identify_user;
use roost_db::ListingRepository;
use std::sync::Arc;
use tracing::info;

use crate::handlers::{
    create_handler, delete_handler, edit_form_handler, index_handler, new_form_handler,
    search_handler, show_handler, update_handler, ListingsState,
};

/// The listings HTTP surface, bound to `state`.
///
/// HTML forms reach the PUT, PATCH and DELETE routes through
/// `roost_common::method_override`, which has to wrap the final router.
pub fn routes<R>(state: Arc<ListingsState<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    Router::new()
        .route("/listings", get(index_handler::<R>).post(create_handler::<R>))
        .route("/listings/new", get(new_form_handler::<R>))
        .route("/listings/search", get(search_handler::<R>))
        .route(
            "/listings/{id}",
            get(show_handler::<R>)
                .put(update_handler::<R>)
                .patch(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route("/listings/{id}/edit", get(edit_form_handler::<R>))
        .with_state(state)
}

/// [`routes`] plus the session user lookup and the upload size limit.
pub fn app<R>(state: Arc<ListingsState<R>>) -> Router
where
    R: ListingRepository + 'static,
{
    let auth = Arc::new(state.config.auth.clone());
    let body_limit = state.config.uploads.max_bytes;

    info!("Listings routes initialized");

    routes(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(from_fn_with_state(auth, identify_user))
}
