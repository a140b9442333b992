//! The authenticated user for the current request.
//!
//! Authentication happens upstream. [`identify_user`] reads the user id the
//! upstream layer forwards and places a [`CurrentUser`] in the request
//! extensions, where handlers pick it up as an extractor.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use roost_config::AuthConfig;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::flash::FlashJar;

/// Flash shown when an anonymous request hits a protected route.
pub const LOGIN_REQUIRED_MESSAGE: &str = "You must be logged in to do that!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
}

/// Where anonymous requests get sent. Inserted by [`identify_user`].
#[derive(Debug, Clone)]
pub struct LoginRedirect(pub String);

impl Default for LoginRedirect {
    fn default() -> Self {
        Self(AuthConfig::default().login_path)
    }
}

/// Rejection for [`CurrentUser`]: error flash plus a redirect to the login page.
#[derive(Debug)]
pub struct LoginRequired {
    login_path: String,
}

impl IntoResponse for LoginRequired {
    fn into_response(self) -> Response {
        warn!("Anonymous request redirected to {}", self.login_path);
        (
            FlashJar::default().error(LOGIN_REQUIRED_MESSAGE),
            Redirect::to(&self.login_path),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = LoginRequired;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        let login_path = parts
            .extensions
            .get::<LoginRedirect>()
            .cloned()
            .unwrap_or_default()
            .0;
        Err(LoginRequired { login_path })
    }
}

/// Middleware that trusts `auth.user_header` as the authenticated user id.
pub async fn identify_user(
    State(auth): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let user = req
        .headers()
        .get(auth.user_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| CurrentUser { id: id.to_string() });

    if let Some(user) = user {
        debug!("Request from user {}", user.id);
        req.extensions_mut().insert(user);
    }
    req.extensions_mut()
        .insert(LoginRedirect(auth.login_path.clone()));

    next.run(req).await
}
