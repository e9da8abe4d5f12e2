//! HTTP Basic Auth against a single shared-secret credential

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use subtle::ConstantTimeEq;
use tracing::warn;

use super::rest::AppState;
use crate::config::AuthConfig;

/// Expected `Authorization` header value, precomputed at startup.
pub struct BasicAuth {
    expected: String,
}

impl BasicAuth {
    pub fn new(config: &AuthConfig) -> Self {
        let token = BASE64.encode(format!("{}:{}", config.username, config.password));
        Self {
            expected: format!("Basic {token}"),
        }
    }

    /// Constant-time comparison against the configured credential.
    pub fn verify(&self, header: &str) -> bool {
        header.as_bytes().ct_eq(self.expected.as_bytes()).into()
    }
}

/// Middleware guarding every route when an `[auth]` section is configured.
/// This is an all-or-nothing shared-secret check, not a user system.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some(auth) = &state.auth else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| auth.verify(v))
        .unwrap_or(false);

    if authorized {
        next.run(request).await
    } else {
        warn!("rejected request without valid credentials");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Basic realm=\"instaxify\"")],
            "Unauthorized.",
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn auth() -> BasicAuth {
        BasicAuth::new(&AuthConfig {
            username: "instax".to_string(),
            password: String::new(),
        })
    }

    #[test]
    fn test_verify_accepts_exact_token() {
        // base64("instax:") == aW5zdGF4Og==
        assert!(auth().verify("Basic aW5zdGF4Og=="));
    }

    #[test]
    fn test_verify_rejects_wrong_token() {
        assert!(!auth().verify("Basic d3Jvbmc6d3Jvbmc="));
    }

    #[test]
    fn test_verify_rejects_malformed_header() {
        assert!(!auth().verify("Bearer aW5zdGF4Og=="));
        assert!(!auth().verify(""));
    }
}
