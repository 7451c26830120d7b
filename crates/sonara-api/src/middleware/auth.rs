use axum::extract::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::error::ApiError;

/// The authenticated caller, extracted from the gateway-provided header.
#[derive(Debug, Clone)]
pub struct UserSub(pub String);

/// Gateway auth middleware.
///
/// The platform edge validates the caller's JWT and forwards the subject in
/// `x-user-sub`; a request without it never reaches the pipeline.
pub async fn require_user(mut req: Request, next: Next) -> Response {
    let sub = req
        .headers()
        .get("x-user-sub")
        .and_then(|v| v.to_str().ok())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    let Some(sub) = sub else {
        return ApiError::Unauthorized("missing x-user-sub header".to_string()).into_response();
    };

    req.extensions_mut().insert(UserSub(sub));
    next.run(req).await
}
