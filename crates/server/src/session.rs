// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for admin endpoints.
//!
//! Admin routes take an [`AdminSession`] argument; requests without a live
//! `Authorization: Bearer <token>` header are rejected with 401 before the
//! handler runs.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use plazas_api::AuthenticationService;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for an authenticated admin session.
///
/// # Authentication Flow
///
/// 1. Extract `Authorization: Bearer <token>` header
/// 2. Validate the token via `AuthenticationService::validate_session`
/// 3. Return the token so handlers such as logout can use it
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if:
/// - Authorization header is missing
/// - Authorization header format is invalid
/// - Session token is not live
pub struct AdminSession(pub String);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
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

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            SessionError::InvalidAuthorizationHeader
        })?;

        let sessions = state.sessions.lock().await;
        AuthenticationService::validate_session(&sessions, token).map_err(|e| {
            warn!(error = %e, "Session validation failed");
            SessionError::InvalidSession(e.to_string())
        })?;
        drop(sessions);

        Ok(Self(token.to_string()))
    }
}

/// Session extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
