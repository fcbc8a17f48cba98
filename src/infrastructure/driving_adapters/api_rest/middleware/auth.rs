//! JWT Authentication Middleware
//!
//! Extracts and validates operator tokens from requests.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::infrastructure::driven_adapters::config::AppConfig;
use crate::infrastructure::driven_adapters::security::{decode_claims, Claims, OPERATOR_ROLE};
use crate::infrastructure::driving_adapters::api_rest::AppState;
use crate::shared::errors::ErrorResponse;

/// Operator identity extracted from a verified token
#[derive(Debug, Clone)]
pub struct AuthenticatedOperator {
    pub id: String,
    pub username: String,
}

impl From<Claims> for AuthenticatedOperator {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
        }
    }
}

/// JWT authentication extractor
pub struct JwtAuth(pub AuthenticatedOperator);

/// Error type for authentication failures
#[derive(Debug)]
pub struct AuthError {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl AuthError {
    fn unauthorized(message: &'static str) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "UNAUTHORIZED",
            message,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse::new(self.code, self.message, None))).into_response()
    }
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let config = parts
            .extensions
            .get::<Arc<AppConfig>>()
            .cloned()
            .ok_or(AuthError {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                code: "INTERNAL_ERROR",
                message: "Configuration not available",
            })?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| AuthError::unauthorized("Missing Authorization header"))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| AuthError::unauthorized("Invalid Authorization header format"))?;

        // Don't expose token validation details
        let claims = decode_claims(token, &config.jwt.secret)
            .map_err(|_| AuthError::unauthorized("Invalid or expired token"))?;

        if claims.role != OPERATOR_ROLE {
            return Err(AuthError {
                status: StatusCode::FORBIDDEN,
                code: "FORBIDDEN",
                message: "Operator role required",
            });
        }

        Ok(JwtAuth(claims.into()))
    }
}

/// Middleware layer that adds config to request extensions for JWT validation
pub async fn add_config_extension(
    State(state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: axum::middleware::Next,
) -> Response {
    request.extensions_mut().insert(state.config.clone());
    next.run(request).await
}
