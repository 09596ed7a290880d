use std::sync::Arc;

use crate::domain::artwork::repositories::{ArtworkRepository, ImageStore};
use crate::domain::auth::services::AdminAuthService;
use crate::domain::like::repositories::LikeRepository;

/// Shared state for all web handlers
///
/// The stores are trait objects so any persistence engine can sit
/// behind the same router.
pub struct GalleryState {
    pub artworks: Arc<dyn ArtworkRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub images: Arc<dyn ImageStore>,
    pub auth: AdminAuthService,
}

impl GalleryState {
    pub fn new(
        artworks: Arc<dyn ArtworkRepository>,
        likes: Arc<dyn LikeRepository>,
        images: Arc<dyn ImageStore>,
        auth: AdminAuthService,
    ) -> Self {
        Self {
            artworks,
            likes,
            images,
            auth,
        }
    }
}
