use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::AuthConfig;
use crate::error::ApiError;

use super::client_addr;

const BEARER_PREFIX: &str = "Bearer ";

/// Why a request was turned away
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessDenied {
    MissingToken,
    BadFormat,
    InvalidToken,
}

impl AccessDenied {
    pub fn reason(&self) -> &'static str {
        match self {
            AccessDenied::MissingToken => "Missing or invalid authorization token.",
            AccessDenied::BadFormat => "Invalid token format. Use 'Bearer <token>'.",
            AccessDenied::InvalidToken => "Invalid token.",
        }
    }
}

/// Which paths are open and how long a bearer token must be.
///
/// Tokens are only length-checked: no signature, expiry or identity.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    pub min_token_length: usize,
    pub public_paths: Vec<String>,
    pub public_prefixes: Vec<String>,
}

impl AccessPolicy {
    pub fn from_config(config: &AuthConfig) -> Self {
        Self {
            min_token_length: config.min_token_length,
            public_paths: config.public_paths.clone(),
            public_prefixes: config.public_prefixes.clone(),
        }
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
            || self.public_prefixes.iter().any(|p| path.starts_with(p.as_str()))
    }

    /// Decide on the raw `Authorization` header value
    pub fn check(&self, header: Option<&str>) -> Result<(), AccessDenied> {
        let header = match header {
            Some(h) if !h.trim().is_empty() => h,
            _ => return Err(AccessDenied::MissingToken),
        };

        let token = header
            .strip_prefix(BEARER_PREFIX)
            .ok_or(AccessDenied::BadFormat)?
            .trim();

        if token.is_empty() || token.chars().count() < self.min_token_length {
            return Err(AccessDenied::InvalidToken);
        }
        Ok(())
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

/// Bearer-token gate. Public paths pass untouched; everything else needs a
/// well-formed token or gets a 401 and never reaches the handlers.
pub async fn access_gate(
    State(policy): State<Arc<AccessPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_owned();
    if policy.is_public(&path) {
        return next.run(request).await;
    }

    // A header that is not valid UTF-8 counts as missing
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let method = request.method().clone();
    let client = client_addr(&request);

    match policy.check(header) {
        Ok(()) => {
            tracing::info!(%method, %path, %client, "Authorized request");
            next.run(request).await
        }
        Err(denied) => {
            tracing::warn!(
                %method,
                %path,
                %client,
                reason = denied.reason(),
                "Unauthorized request"
            );
            ApiError::unauthorized(denied.reason()).into_response()
        }
    }
}
