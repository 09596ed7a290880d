use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::artwork::entities::Artwork;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtworkResponse {
    pub id: String,
    pub author: String,
    pub display_order: u32,
    pub like_count: usize,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ArtworkResponse {
    pub fn from_artwork(artwork: &Artwork, like_count: usize) -> Self {
        Self {
            id: artwork.id.as_str(),
            author: artwork.author.clone(),
            display_order: artwork.display_order,
            like_count,
            image_url: format!("/api/artworks/{}/image", artwork.id),
            created_at: artwork.created_at,
            updated_at: artwork.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: u32,
    #[serde(flatten)]
    pub artwork: ArtworkResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub built_at: String,
}
