use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, StatusCode},
};

use crate::model::AuthContext;
use crate::store::http::CLIENT_AUTHORIZATION;

/// Axum extractor for AuthContext from request headers
///
/// - Authorization: required, forwarded as-is
/// - Client-Authorization: optional, forwarded as-is
///
/// Requests without an Authorization header are rejected with 401.
#[async_trait]
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        auth_from_headers(&parts.headers).ok_or(StatusCode::UNAUTHORIZED)
    }
}

pub fn auth_from_headers(headers: &HeaderMap) -> Option<AuthContext> {
    let authorization = extract_header_value(headers, AUTHORIZATION.as_str())?;
    Some(AuthContext {
        authorization,
        client_authorization: extract_header_value(headers, CLIENT_AUTHORIZATION),
    })
}

/// Extract header value as string
fn extract_header_value(headers: &HeaderMap, header_name: &str) -> Option<String> {
    headers
        .get(header_name)
        .and_then(|value| value.to_str().ok())
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderName, HeaderValue, Request};

    #[test]
    fn test_auth_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer user-token"));
        headers.insert(
            HeaderName::from_static("client-authorization"),
            HeaderValue::from_static("Bearer client-token"),
        );

        let ctx = auth_from_headers(&headers).unwrap();
        assert_eq!(ctx.authorization, "Bearer user-token");
        assert_eq!(ctx.client_authorization.as_deref(), Some("Bearer client-token"));
    }

    #[test]
    fn test_missing_or_blank_authorization() {
        let headers = HeaderMap::new();
        assert!(auth_from_headers(&headers).is_none());

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("  "));
        assert!(auth_from_headers(&headers).is_none());
    }

    #[tokio::test]
    async fn test_extractor_rejects_without_token() {
        let (mut parts, _) = Request::builder()
            .uri("/instances/abc")
            .body(())
            .unwrap()
            .into_parts();
        let rejected = AuthContext::from_request_parts(&mut parts, &()).await;
        assert_eq!(rejected.unwrap_err(), StatusCode::UNAUTHORIZED);

        let (mut parts, _) = Request::builder()
            .uri("/instances/abc")
            .header("Authorization", "Bearer t")
            .body(())
            .unwrap()
            .into_parts();
        let ctx = AuthContext::from_request_parts(&mut parts, &()).await.unwrap();
        assert_eq!(ctx.authorization, "Bearer t");
        assert!(ctx.client_authorization.is_none());
    }
}
