//! Axum router and handlers

use crate::error::ApiError;
use crate::service::{ObjectOutcome, ObjectService};
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, get};
use axum::{Json, Router};
use bytes::Bytes;
use capstore_core::{Error, ObjectRequest, Result, BEARER_PREFIX, TOKEN_QUERY_PARAM};
use capstore_token::{SignedUrl, SignedUrlIssuer};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use url::form_urlencoded;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ObjectService>,
    pub issuer: Arc<SignedUrlIssuer>,
}

/// Build the full router
///
/// Routes:
/// - `ANY /objects/:name` - object store, verb decides the action
/// - `GET /sign-object-url/operation/:operation/name/:name` - mint a signed URL
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/objects/:name", any(object_handler))
        .route(
            "/sign-object-url/operation/:operation/name/:name",
            get(sign_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn object_handler(
    State(state): State<AppState>,
    method: Method,
    Path(name): Path<String>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> std::result::Result<Response, ApiError> {
    let mut request = ObjectRequest::new(method.as_str(), name).with_body(body);
    request.header_token = header_token(&headers);
    request.query_token = query_token(query.as_deref())?;

    match state.service.handle(request)? {
        ObjectOutcome::Payload(payload) => Ok((StatusCode::OK, payload).into_response()),
        ObjectOutcome::Done => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

async fn sign_handler(
    State(state): State<AppState>,
    Path((operation, name)): Path<(String, String)>,
) -> std::result::Result<Json<SignedUrl>, ApiError> {
    Ok(Json(state.issuer.issue_signed_url(&operation, &name)?))
}

/// Token from the `Authorization` header, with an optional `Bearer ` prefix
/// removed. Empty values count as absent. Non-UTF-8 bytes are kept (lossily
/// decoded) so the value still takes part in the conflict check.
fn header_token(headers: &HeaderMap) -> Option<String> {
    let raw = headers.get(header::AUTHORIZATION)?;
    let decoded = String::from_utf8_lossy(raw.as_bytes());
    let value: &str = &decoded;
    let token = value.strip_prefix(BEARER_PREFIX).unwrap_or(value);
    (!token.is_empty()).then(|| token.to_string())
}

/// Token from the `token` query parameter.
///
/// Repeated parameters must all carry the same value; differing values are
/// conflicting credentials just like a header/query mismatch.
fn query_token(query: Option<&str>) -> Result<Option<String>> {
    let mut found: Option<String> = None;
    let pairs = form_urlencoded::parse(query.unwrap_or_default().as_bytes());
    for (key, value) in pairs {
        if key != TOKEN_QUERY_PARAM || value.is_empty() {
            continue;
        }
        match &found {
            Some(existing) if *existing != value => {
                return Err(Error::ConflictingAuthorization);
            }
            Some(_) => {}
            None => found = Some(value.into_owned()),
        }
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_header_token_strips_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(header_token(&headers).as_deref(), Some("abc"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("abc"));
        assert_eq!(header_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn test_non_utf8_header_is_still_presented() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_bytes(b"other-token-\xff").unwrap(),
        );
        let token = header_token(&headers).unwrap();
        assert!(token.starts_with("other-token-"));
    }

    #[test]
    fn test_query_token_rules() {
        assert_eq!(query_token(None).unwrap(), None);
        assert_eq!(query_token(Some("a=1")).unwrap(), None);
        assert_eq!(query_token(Some("token=")).unwrap(), None);
        assert_eq!(query_token(Some("token=abc")).unwrap().as_deref(), Some("abc"));
        assert_eq!(
            query_token(Some("token=abc&token=abc")).unwrap().as_deref(),
            Some("abc")
        );
        assert!(matches!(
            query_token(Some("token=abc&token=xyz")),
            Err(Error::ConflictingAuthorization)
        ));
    }

    #[test]
    fn test_empty_header_counts_as_absent() {
        let mut headers = HeaderMap::new();
        assert_eq!(header_token(&headers), None);

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(""));
        assert_eq!(header_token(&headers), None);
    }
}
