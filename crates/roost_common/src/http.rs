use axum::{
    extract::Request,
    http::{Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::error::{HttpStatusCode, RoostError};

/// Every handler error ends up here, so this is the application's single error handler.
impl IntoResponse for RoostError {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let error_message = self.to_string();
        if status_code.is_server_error() {
            error!("Request failed: {}", error_message);
        } else {
            warn!("Request rejected: {}", error_message);
        }

        let body = Json(json!({
            "error": {
                "message": error_message,
                "code": status_code.as_u16(),
            }
        }));

        (status_code, body).into_response()
    }
}

#[derive(Deserialize)]
struct MethodOverride {
    #[serde(rename = "_method")]
    method: Option<String>,
}

/// Middleware that lets HTML forms reach PUT, PATCH and DELETE routes.
///
/// A `POST` whose query string carries `_method=PUT|PATCH|DELETE` is
/// dispatched as that method. Any other value is ignored. It has to wrap the
/// router from the outside, since routing happens before route layers run.
pub async fn method_override(mut req: Request, next: Next) -> Response {
    if req.method() == Method::POST {
        if let Some(method) = override_from_query(req.uri().query()) {
            debug!("Overriding POST {} as {}", req.uri().path(), method);
            *req.method_mut() = method;
        }
    }
    next.run(req).await
}

pub(crate) fn override_from_query(query: Option<&str>) -> Option<Method> {
    let parsed: MethodOverride = serde_urlencoded::from_str(query?).ok()?;
    match parsed.method?.to_ascii_uppercase().as_str() {
        "PUT" => Some(Method::PUT),
        "PATCH" => Some(Method::PATCH),
        "DELETE" => Some(Method::DELETE),
        _ => None,
    }
}
