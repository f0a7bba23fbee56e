//! Identity-verification collaborator and the shared auth middleware.
//!
//! Token verification itself happens in the external auth endpoint; this
//! module only forwards the bearer token and maps the answer to a
//! [`CallerIdentity`].

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request, StatusCode},
    middleware::Next,
    response::Response,
};
use serde::Deserialize;
use uuid::Uuid;

use common::{AppError, AppResult};

use crate::config::SupabaseConfig;

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Verified caller identity extracted from the Authorization header.
#[derive(Debug, Clone, Deserialize)]
pub struct CallerIdentity {
    pub id: Uuid,
    pub email: String,
}

/// Client for the external identity endpoint (`/auth/v1/user`).
pub struct IdentityClient {
    http: reqwest::Client,
    url: String,
    anon_key: String,
}

impl IdentityClient {
    pub fn new(config: &SupabaseConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::internal(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            http,
            url: config.url.clone(),
            anon_key: config.anon_key.clone(),
        })
    }

    /// Resolve a bearer token to the caller it belongs to.
    pub async fn verify_token(&self, token: &str) -> AppResult<CallerIdentity> {
        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.url))
            .header("apikey", &self.anon_key)
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await
            .map_err(|e| AppError::internal(format!("identity service request failed: {e}")))?;

        match response.status() {
            status if status.is_success() => response
                .json::<CallerIdentity>()
                .await
                .map_err(|e| AppError::internal(format!("malformed identity response: {e}"))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(AppError::Unauthorized),
            status => Err(AppError::upstream(
                status.as_u16(),
                "identity verification failed".to_string(),
            )),
        }
    }
}

/// Authentication middleware shared by all services.
///
/// Verifies the bearer token via the identity collaborator and stores the
/// resulting [`CallerIdentity`] in request extensions.
pub async fn auth_middleware(
    State(identity): State<Arc<IdentityClient>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)?;

    let caller = identity.verify_token(&token).await?;

    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Extract bearer token from Authorization header.
fn extract_token(request: &Request<Body>) -> AppResult<String> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    if !auth_header.starts_with("Bearer ") {
        return Err(AppError::Unauthorized);
    }

    Ok(auth_header[7..].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with_header(value: &str) -> Request<Body> {
        Request::builder()
            .header(AUTHORIZATION, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn extracts_bearer_tokens() {
        let request = request_with_header("Bearer abc.def.ghi");
        assert_eq!(extract_token(&request).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn rejects_missing_or_malformed_headers() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert!(matches!(
            extract_token(&request).unwrap_err(),
            AppError::Unauthorized
        ));

        let request = request_with_header("Basic dXNlcjpwYXNz");
        assert!(matches!(
            extract_token(&request).unwrap_err(),
            AppError::Unauthorized
        ));
    }
}
