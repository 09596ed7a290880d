use axum::{
    Json,
    extract::{FromRequestParts, State},
    extract::rejection::JsonRejection,
    http::{header, request::Parts},
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::warn;

use super::error_response::ApiError;
use super::state::GalleryState;
use crate::domain::auth::entities::{AdminSession, AdminToken};
use crate::domain::auth::services::AuthError;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Authenticate the admin and issue a bearer token
pub async fn admin_login(
    State(state): State<Arc<GalleryState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AdminToken>, ApiError> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(e) => {
            warn!("JSON parsing error: {:?}", e);
            return Err(ApiError::validation(format!("Invalid JSON: {e}")));
        }
    };

    let token = state.auth.login(&request.password)?;
    Ok(Json(token))
}

/// Admin handlers receive the decoded session as an extractor argument,
/// so every protected route is checked before its body runs.
impl FromRequestParts<Arc<GalleryState>> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<GalleryState>,
    ) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ApiError::Unauthorized(AuthError::MissingToken))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(ApiError::Unauthorized(AuthError::MalformedToken))?;

        let session = state.auth.verify(token)?;
        Ok(session)
    }
}
