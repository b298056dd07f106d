// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction and authentication for the server.
//!
//! Every request must present the configured public API key in an
//! `apikey` header. Authenticated routes additionally carry a session
//! token in the Authorization header; the extractor validates it and
//! resolves the viewer's role per request.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use hrms_api::{SessionUser, Viewer};
use hrms_domain::SystemRole;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor that checks the `apikey` header and yields the raw session
/// token from the Authorization header, without validating it.
///
/// Used by routes that must accept stale tokens, such as logout and the
/// session snapshot.
pub struct SessionToken(pub String);

impl FromRequestParts<AppState> for SessionToken {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_api_key(parts, state)?;
        Ok(Self(bearer_token(parts)?))
    }
}

/// Extractor that checks only the `apikey` header.
///
/// Used by routes that do not require a session, such as signup and
/// login.
pub struct ApiKey;

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_api_key(parts, state)?;
        Ok(Self)
    }
}

/// Extractor for authenticated viewers.
///
/// Validates the session token, checks expiry, and resolves the
/// viewer's role from their employee row. The second field is the
/// session token the viewer presented.
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - the `apikey` header is missing or wrong
/// - the Authorization header is missing or malformed
/// - the session token is unknown or expired
pub struct SessionViewer(pub Viewer, pub String);

impl FromRequestParts<AppState> for SessionViewer {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        check_api_key(parts, state)?;
        let token: String = bearer_token(parts)?;

        let mut persistence = state.persistence.lock().await;
        let user: SessionUser = state
            .auth
            .current_session(&mut persistence, &token)
            .map_err(|e| {
                warn!(error = %e, "Session lookup failed");
                SessionError::InvalidSession(e.to_string())
            })?
            .ok_or_else(|| {
                debug!("Unknown or expired session token");
                SessionError::InvalidSession(String::from("Unknown or expired session token"))
            })?;
        let role: SystemRole = state.auth.resolve_role(&mut persistence, &user.email);
        drop(persistence);

        debug!(email = %user.email, role = %role, "Session validated");

        Ok(Self(Viewer::new(user, role), token))
    }
}

fn check_api_key(parts: &Parts, state: &AppState) -> Result<(), SessionError> {
    let presented: &str = parts
        .headers
        .get("apikey")
        .ok_or_else(|| {
            debug!("Missing apikey header");
            SessionError::MissingApiKey
        })?
        .to_str()
        .map_err(|_| SessionError::MissingApiKey)?;

    if presented == state.api_key {
        Ok(())
    } else {
        warn!("Rejected request with wrong API key");
        Err(SessionError::WrongApiKey)
    }
}

fn bearer_token(parts: &Parts) -> Result<String, SessionError> {
    let auth_header: &str = parts
        .headers
        .get("Authorization")
        .ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?
        .to_str()
        .map_err(|_| {
            warn!("Invalid Authorization header encoding");
            SessionError::InvalidAuthorizationHeader
        })?;

    let token: &str = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })?;

    Ok(token.to_string())
}

/// Session extraction errors.
///
/// These are converted directly to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// The `apikey` header is missing.
    MissingApiKey,
    /// The `apikey` header does not match the configured key.
    WrongApiKey,
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::MissingApiKey => (StatusCode::UNAUTHORIZED, "Missing apikey header"),
            Self::WrongApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            Self::MissingAuthorizationHeader => {
                (StatusCode::UNAUTHORIZED, "Missing Authorization header")
            }
            Self::InvalidAuthorizationHeader => (
                StatusCode::UNAUTHORIZED,
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => {
                return (
                    StatusCode::UNAUTHORIZED,
                    format!("Session validation failed: {reason}"),
                )
                    .into_response();
            }
        };

        (status, message).into_response()
    }
}
