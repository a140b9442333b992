//! One-shot flash messages carried across a redirect in a cookie.
//!
//! Handlers queue messages with [`FlashJar::success`] / [`FlashJar::error`]
//! and return the jar as part of their response. The next request reads them
//! back with [`FlashJar::take`], which also clears the cookie.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{COOKIE, SET_COOKIE},
        request::Parts,
        HeaderMap, HeaderValue,
    },
    response::{IntoResponseParts, ResponseParts},
};
use cookie::{time::Duration, Cookie, SameSite};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use tracing::warn;

/// Name of the cookie holding pending flash messages.
pub const FLASH_COOKIE: &str = "roost_flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub kind: FlashKind,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: FlashKind::Error,
            message: message.into(),
        }
    }
}

/// Flash messages for the current request and the ones queued for the next.
#[derive(Debug, Clone, Default)]
pub struct FlashJar {
    incoming: Vec<FlashMessage>,
    outgoing: Vec<FlashMessage>,
    consumed: bool,
}

impl FlashJar {
    /// Builds a jar from the request's `Cookie` headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let incoming = headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| Cookie::parse_encoded(pair.trim().to_owned()).ok())
            .filter(|cookie| cookie.name() == FLASH_COOKIE)
            .flat_map(|cookie| decode_messages(cookie.value()))
            .collect();

        Self {
            incoming,
            ..Self::default()
        }
    }

    /// Consumes the messages that arrived with this request.
    pub fn take(&mut self) -> Vec<FlashMessage> {
        if !self.incoming.is_empty() {
            self.consumed = true;
        }
        std::mem::take(&mut self.incoming)
    }

    /// Queues a success message for the next request.
    pub fn success(mut self, message: impl Into<String>) -> Self {
        self.outgoing.push(FlashMessage::success(message));
        self
    }

    /// Queues an error message for the next request.
    pub fn error(mut self, message: impl Into<String>) -> Self {
        self.outgoing.push(FlashMessage::error(message));
        self
    }

    /// Messages queued during this request.
    pub fn queued(&self) -> &[FlashMessage] {
        &self.outgoing
    }

    fn into_cookie(self) -> Option<Cookie<'static>> {
        let pending: Vec<FlashMessage> = self.incoming.into_iter().chain(self.outgoing).collect();

        if !pending.is_empty() {
            let value = match serde_json::to_string(&pending) {
                Ok(value) => value,
                Err(e) => {
                    warn!("Failed to encode flash messages: {}", e);
                    return None;
                }
            };
            return Some(base_cookie(value).build());
        }

        if self.consumed {
            return Some(base_cookie(String::new()).max_age(Duration::ZERO).build());
        }

        None
    }
}

fn base_cookie(value: String) -> cookie::CookieBuilder<'static> {
    Cookie::build((FLASH_COOKIE, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
}

fn decode_messages(value: &str) -> Vec<FlashMessage> {
    if value.is_empty() {
        return Vec::new();
    }
    serde_json::from_str(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed flash cookie: {}", e);
        Vec::new()
    })
}

impl<S> FromRequestParts<S> for FlashJar
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

impl IntoResponseParts for FlashJar {
    type Error = Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        if let Some(cookie) = self.into_cookie() {
            match HeaderValue::from_str(&cookie.encoded().to_string()) {
                Ok(value) => {
                    res.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!("Flash cookie is not a valid header value: {}", e),
            }
        }
        Ok(res)
    }
}
