use axum::{
    Json,
    extract::State,
    extract::rejection::JsonRejection,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use super::error_response::ApiError;
use super::models::{ArtworkResponse, OkResponse, RankingEntry};
use super::state::GalleryState;
use crate::domain::artwork::entities::ArtworkId;
use crate::domain::auth::entities::AdminSession;
use crate::domain::like::entities::{Like, VisitorName};
use crate::domain::like::services::RankingService;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeRequest {
    pub username: String,
    pub artwork_id: String,
}

/// Record a visitor's like; repeating the same pair is a no-op
pub async fn submit_like(
    State(state): State<Arc<GalleryState>>,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(e) => {
            warn!("JSON parsing error: {:?}", e);
            return Err(ApiError::validation(format!("Invalid JSON: {e}")));
        }
    };

    let username = VisitorName::parse(&request.username)
        .map_err(|e| ApiError::validation(e.to_string()))?;
    let artwork_id = ArtworkId::parse(&request.artwork_id).map_err(|_| {
        ApiError::validation(format!("Invalid artwork id: {}", request.artwork_id))
    })?;

    if state.artworks.find_by_id(&artwork_id).await?.is_none() {
        return Err(ApiError::not_found(format!(
            "Artwork not found: {artwork_id}"
        )));
    }

    let inserted = state
        .likes
        .submit(Like::new(username.clone(), artwork_id))
        .await?;
    if inserted {
        info!("Like recorded: {} -> {}", username, artwork_id);
    }

    Ok(Json(OkResponse::ok()))
}

/// Full like log, newest first
pub async fn get_like_log(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
) -> Result<Json<Vec<Like>>, ApiError> {
    let log = state.likes.list_all().await?;
    Ok(Json(log))
}

/// Remove every recorded like
pub async fn reset_likes(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
) -> Result<Json<OkResponse>, ApiError> {
    let removed = state.likes.clear().await?;
    info!("Like log reset: {} entries removed", removed);
    Ok(Json(OkResponse::ok()))
}

/// Artworks ranked by like count
pub async fn get_ranking(
    _session: AdminSession,
    State(state): State<Arc<GalleryState>>,
) -> Result<Json<Vec<RankingEntry>>, ApiError> {
    let artworks = state.artworks.list_ordered().await?;
    let counts = state.likes.counts().await?;

    let entries = RankingService::rank(artworks, &counts)
        .into_iter()
        .map(|ranked| RankingEntry {
            rank: ranked.rank,
            artwork: ArtworkResponse::from_artwork(&ranked.artwork, ranked.like_count),
        })
        .collect();

    Ok(Json(entries))
}
